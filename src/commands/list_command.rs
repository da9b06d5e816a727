//! List stored features, optionally filtered by a bounding box

use async_trait::async_trait;
use clap::ArgMatches;
use log::info;

use crate::api::FeatureKit;
use crate::commands::command_traits::Command;
use crate::coordinate::BoundingBox;
use crate::errors::{FeatureError, FeatureResult};
use crate::utils::format_utils::summarize_feature;

/// Backs both `list` (no box) and `query --bbox`
pub struct ListCommand {
    bbox: Option<BoundingBox>,
}

impl ListCommand {
    pub fn all() -> Self {
        ListCommand { bbox: None }
    }

    pub fn query(args: &ArgMatches) -> FeatureResult<Self> {
        let text = args
            .get_one::<String>("bbox")
            .ok_or_else(|| FeatureError::ConfigError("Missing --bbox".to_string()))?;
        Ok(ListCommand { bbox: Some(BoundingBox::from_string(text)?) })
    }
}

#[async_trait]
impl Command for ListCommand {
    async fn execute(&self, kit: &FeatureKit) -> FeatureResult<()> {
        let features = match &self.bbox {
            Some(bbox) => {
                info!("Querying {} for box {}, {}, {}, {}", kit.description(), bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y);
                kit.query(*bbox).await?
            },
            None => kit.list().await?,
        };

        for feature in &features {
            println!("{}", summarize_feature(feature));
        }
        println!("{} feature(s)", features.len());
        Ok(())
    }
}
