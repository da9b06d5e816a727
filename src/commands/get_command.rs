//! Show one feature

use async_trait::async_trait;
use clap::ArgMatches;

use crate::api::FeatureKit;
use crate::commands::command_traits::Command;
use crate::errors::{FeatureError, FeatureResult};
use crate::utils::format_utils::describe_feature;

pub struct GetCommand {
    id: String,
}

impl GetCommand {
    pub fn new(args: &ArgMatches) -> FeatureResult<Self> {
        Ok(GetCommand { id: required_id(args)? })
    }
}

pub(crate) fn required_id(args: &ArgMatches) -> FeatureResult<String> {
    args.get_one::<String>("id")
        .cloned()
        .ok_or_else(|| FeatureError::ConfigError("Missing feature id".to_string()))
}

#[async_trait]
impl Command for GetCommand {
    async fn execute(&self, kit: &FeatureKit) -> FeatureResult<()> {
        match kit.get(&self.id).await? {
            Some(feature) => {
                print!("{}", describe_feature(&feature));
                Ok(())
            },
            None => Err(FeatureError::NotFound(self.id.clone())),
        }
    }
}
