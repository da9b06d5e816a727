//! Bulk import of CSV points

use async_trait::async_trait;
use clap::ArgMatches;

use crate::api::FeatureKit;
use crate::commands::command_traits::Command;
use crate::errors::{FeatureError, FeatureResult};

pub struct ImportCommand {
    input_file: String,
    progress: bool,
}

impl ImportCommand {
    pub fn new(args: &ArgMatches) -> FeatureResult<Self> {
        let input_file = args
            .get_one::<String>("input")
            .ok_or_else(|| FeatureError::ConfigError("Missing input file".to_string()))?
            .clone();

        Ok(ImportCommand {
            input_file,
            progress: !args.get_flag("no-progress"),
        })
    }
}

#[async_trait]
impl Command for ImportCommand {
    async fn execute(&self, kit: &FeatureKit) -> FeatureResult<()> {
        let summary = kit.import_csv(&self.input_file, self.progress).await?;
        println!("Imported {} feature(s), skipped {}", summary.imported, summary.skipped);
        Ok(())
    }
}
