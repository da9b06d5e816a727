//! Insert a point feature

use async_trait::async_trait;
use clap::ArgMatches;
use log::debug;

use crate::api::FeatureKit;
use crate::commands::command_traits::Command;
use crate::coordinate::CoordinateSystem;
use crate::errors::{FeatureError, FeatureResult};
use crate::feature::Attributes;
use crate::import::infer_value;
use crate::utils::format_utils::describe_feature;

/// Command inserting one point with attributes given as `key=value`
pub struct InsertCommand {
    id: Option<String>,
    x: f64,
    y: f64,
    srid: Option<i32>,
    attributes: Attributes,
}

impl InsertCommand {
    pub fn new(args: &ArgMatches) -> FeatureResult<Self> {
        let x = parse_number(args, "lon")?;
        let y = parse_number(args, "lat")?;
        let srid = args
            .get_one::<String>("srid")
            .map(|s| CoordinateSystem::parse_srid(s))
            .transpose()?;

        let mut attributes = Attributes::new();
        if let Some(pairs) = args.get_many::<String>("attr") {
            for pair in pairs {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| FeatureError::ConfigError(format!("Attribute '{}' must be key=value", pair)))?;
                attributes.insert(key.trim().to_string(), infer_value(value.trim()));
            }
        }

        Ok(InsertCommand {
            id: args.get_one::<String>("id").cloned(),
            x,
            y,
            srid,
            attributes,
        })
    }
}

/// Parse a required floating point argument
pub(crate) fn parse_number(args: &ArgMatches, name: &str) -> FeatureResult<f64> {
    let text = args
        .get_one::<String>(name)
        .ok_or_else(|| FeatureError::ConfigError(format!("Missing --{}", name)))?;
    text.trim()
        .parse::<f64>()
        .map_err(|_| FeatureError::ConfigError(format!("Invalid --{} value: {}", name, text)))
}

#[async_trait]
impl Command for InsertCommand {
    async fn execute(&self, kit: &FeatureKit) -> FeatureResult<()> {
        debug!("Inserting point ({}, {}) with {} attribute(s)", self.x, self.y, self.attributes.len());
        let feature = kit
            .insert_point(self.id.as_deref(), self.x, self.y, self.srid, self.attributes.clone())
            .await?;
        print!("{}", describe_feature(&feature));
        Ok(())
    }
}
