//! Validated table identifiers

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::errors::{FeatureError, FeatureResult};

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Default table used when none is configured
pub const DEFAULT_TABLE: &str = "features";

/// A table name that has passed identifier validation
///
/// Only values of this type may name a table at the store boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableName(String);

impl TableName {
    pub fn new(name: &str) -> FeatureResult<Self> {
        if IDENTIFIER.is_match(name) {
            Ok(TableName(name.to_string()))
        } else {
            Err(FeatureError::InvalidIdentifier(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TableName {
    fn default() -> Self {
        TableName(DEFAULT_TABLE.to_string())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
