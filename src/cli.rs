//! Command line definition

use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use log::info;
use std::path::PathBuf;

use crate::config::Config;
use crate::errors::FeatureResult;
use crate::store::TableName;

/// Configuration read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "featurekit.toml";

/// Snapshot the command line writes to when no store is configured
pub const DEFAULT_STORE_FILE: &str = "features.fks";

/// Build the `featurekit` argument parser
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("featurekit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Store geographic features and query them by bounding box")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .help("Snapshot file to use instead of the configured one")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("memory")
                .long("memory")
                .help("Keep features in memory only; nothing outlives the process")
                .action(ArgAction::SetTrue)
                .conflicts_with("store")
                .global(true),
        )
        .arg(
            Arg::new("table")
                .long("table")
                .help("Table name")
                .value_name("NAME")
                .global(true),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .help("Also write log records to this file")
                .value_name("FILE")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            ClapCommand::new("insert")
                .about("Insert a point feature")
                .arg(Arg::new("lon").long("lon").help("Longitude or x").value_name("X").required(true).allow_negative_numbers(true))
                .arg(Arg::new("lat").long("lat").help("Latitude or y").value_name("Y").required(true).allow_negative_numbers(true))
                .arg(Arg::new("id").long("id").help("Feature id (generated when omitted)").value_name("ID"))
                .arg(Arg::new("srid").long("srid").help("SRID, e.g. 4326 or EPSG:32635").value_name("SRID"))
                .arg(
                    Arg::new("attr")
                        .short('a')
                        .long("attr")
                        .help("Attribute as key=value, repeatable")
                        .value_name("KEY=VALUE")
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            ClapCommand::new("get")
                .about("Show one feature")
                .arg(Arg::new("id").help("Feature id").required(true).index(1)),
        )
        .subcommand(
            ClapCommand::new("delete")
                .about("Delete one feature")
                .arg(Arg::new("id").help("Feature id").required(true).index(1)),
        )
        .subcommand(ClapCommand::new("list").about("List every feature"))
        .subcommand(
            ClapCommand::new("query")
                .about("List features whose bounds intersect a box")
                .arg(
                    Arg::new("bbox")
                        .long("bbox")
                        .help("Bounding box (minx,miny,maxx,maxy)")
                        .value_name("BBOX")
                        .required(true)
                        .allow_hyphen_values(true),
                ),
        )
        .subcommand(
            ClapCommand::new("import")
                .about("Import point features from CSV")
                .arg(Arg::new("input").help("CSV file with lat/lon columns").required(true).index(1))
                .arg(
                    Arg::new("no-progress")
                        .long("no-progress")
                        .help("Do not draw a progress bar")
                        .action(ArgAction::SetTrue),
                ),
        )
}

/// Configuration file plus command line overrides
///
/// Without a configured snapshot the command line falls back to
/// `DEFAULT_STORE_FILE`, so writes outlive the process unless `--memory`
/// asks otherwise.
pub fn load_config(matches: &ArgMatches) -> FeatureResult<Config> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => Config::from_file(path)?,
        None => Config::from_file(DEFAULT_CONFIG_FILE)?,
    };

    if let Some(store) = matches.get_one::<String>("store") {
        config.store.path = Some(PathBuf::from(store));
    }
    if let Some(table) = matches.get_one::<String>("table") {
        config.store.table = TableName::new(table)?;
    }

    if matches.get_flag("memory") {
        config.store.path = None;
    } else if config.store.path.is_none() {
        info!("No store configured, using {}", DEFAULT_STORE_FILE);
        config.store.path = Some(PathBuf::from(DEFAULT_STORE_FILE));
    }

    Ok(config)
}
