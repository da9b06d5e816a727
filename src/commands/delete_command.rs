//! Delete one feature

use async_trait::async_trait;
use clap::ArgMatches;

use crate::api::FeatureKit;
use crate::commands::command_traits::Command;
use crate::commands::get_command::required_id;
use crate::errors::FeatureResult;

pub struct DeleteCommand {
    id: String,
}

impl DeleteCommand {
    pub fn new(args: &ArgMatches) -> FeatureResult<Self> {
        Ok(DeleteCommand { id: required_id(args)? })
    }
}

#[async_trait]
impl Command for DeleteCommand {
    async fn execute(&self, kit: &FeatureKit) -> FeatureResult<()> {
        if kit.delete(&self.id).await? {
            println!("Deleted {}", self.id);
        } else {
            println!("No feature with id {}", self.id);
        }
        Ok(())
    }
}
