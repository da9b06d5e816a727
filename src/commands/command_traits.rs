//! Command pattern interfaces
//!
//! This module defines the core Command pattern interfaces
//! for the CLI application.

use async_trait::async_trait;

use crate::api::FeatureKit;
use crate::errors::FeatureResult;

/// Represents an executable command in the application
///
/// Command objects hold their parsed arguments and run against an opened
/// `FeatureKit`.
#[async_trait]
pub trait Command: Send + Sync {
    /// Execute the command
    async fn execute(&self, kit: &FeatureKit) -> FeatureResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory {
    /// Create a new Command instance based on CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A command that implements the Command trait, or an error
    fn create_command(&self, args: &clap::ArgMatches) -> FeatureResult<Box<dyn Command>>;
}
