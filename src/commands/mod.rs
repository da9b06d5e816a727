//! CLI command implementations
//!
//! Each subcommand is a `Command`; the factory picks one from the parsed
//! arguments.

pub mod command_traits;
pub mod insert_command;
pub mod get_command;
pub mod delete_command;
pub mod list_command;
pub mod import_command;

pub use command_traits::{Command, CommandFactory};
pub use insert_command::InsertCommand;
pub use get_command::GetCommand;
pub use delete_command::DeleteCommand;
pub use list_command::ListCommand;
pub use import_command::ImportCommand;

use clap::ArgMatches;
use crate::errors::{FeatureError, FeatureResult};

/// Factory for creating command instances based on CLI arguments
pub struct FeaturekitCommandFactory;

impl FeaturekitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        FeaturekitCommandFactory
    }
}

impl Default for FeaturekitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandFactory for FeaturekitCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> FeatureResult<Box<dyn Command>> {
        match args.subcommand() {
            Some(("insert", sub)) => Ok(Box::new(InsertCommand::new(sub)?)),
            Some(("get", sub)) => Ok(Box::new(GetCommand::new(sub)?)),
            Some(("delete", sub)) => Ok(Box::new(DeleteCommand::new(sub)?)),
            Some(("list", _)) => Ok(Box::new(ListCommand::all())),
            Some(("query", sub)) => Ok(Box::new(ListCommand::query(sub)?)),
            Some(("import", sub)) => Ok(Box::new(ImportCommand::new(sub)?)),
            Some((other, _)) => Err(FeatureError::ConfigError(format!("Unknown command: {}", other))),
            None => Err(FeatureError::ConfigError("No command given".to_string())),
        }
    }
}
