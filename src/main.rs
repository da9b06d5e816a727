use std::process;
use log::{error, LevelFilter};

use featurekit::cli::{build_cli, load_config};
use featurekit::commands::{CommandFactory, FeaturekitCommandFactory};
use featurekit::utils::logger::Logger;
use featurekit::FeatureKit;

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let level = if matches.get_flag("verbose") { LevelFilter::Debug } else { config.log_level };
    match matches.get_one::<String>("log-file") {
        Some(log_file) => {
            if let Err(e) = Logger::init_global_logger(log_file, level) {
                eprintln!("Error setting up global logger: {}", e);
                process::exit(1);
            }
        },
        None => {
            env_logger::Builder::new().filter_level(level).parse_default_env().init();
        },
    }

    let factory = FeaturekitCommandFactory::new();
    let command = match factory.create_command(&matches) {
        Ok(command) => command,
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let kit = match FeatureKit::open(&config.store).await {
        Ok(kit) => kit,
        Err(e) => {
            error!("Failed to open store: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = command.execute(&kit).await {
        error!("Command execution error: {}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
