//! Custom error types for feature storage

use std::fmt;
use std::io;

/// Feature store error types
#[derive(Debug)]
pub enum FeatureError {
    /// Coordinate component outside its valid range
    OutOfRange {
        /// Name of the offending component ("latitude" or "longitude")
        field: &'static str,
        /// The rejected value
        value: f64,
    },
    /// WKB payload could not be decoded
    MalformedGeometry(String),
    /// Stored attribute text is not a flat JSON object of scalar values
    InvalidAttributes(String),
    /// Table or collection name failed identifier validation
    InvalidIdentifier(String),
    /// A row with this id already exists
    DuplicateId(String),
    /// No row matched this id
    NotFound(String),
    /// Backing store could not be reached or failed mid-operation
    StoreUnavailable(String),
    /// I/O error outside the store (config files, CSV input)
    IoError(io::Error),
    /// Invalid configuration value
    ConfigError(String),
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::OutOfRange { field, value } => match *field {
                "latitude" => write!(f, "Latitude must be between -90 and 90 (got {})", value),
                "longitude" => write!(f, "Longitude must be between -180 and 180 (got {})", value),
                other => write!(f, "Value out of range for {}: {}", other, value),
            },
            FeatureError::MalformedGeometry(msg) => write!(f, "Malformed geometry: {}", msg),
            FeatureError::InvalidAttributes(msg) => write!(f, "Invalid attributes: {}", msg),
            FeatureError::InvalidIdentifier(name) => write!(
                f,
                "Invalid identifier '{}': must start with a letter or underscore and contain only alphanumeric characters and underscores",
                name
            ),
            FeatureError::DuplicateId(id) => write!(f, "Feature already exists: {}", id),
            FeatureError::NotFound(id) => write!(f, "Feature not found: {}", id),
            FeatureError::StoreUnavailable(msg) => write!(f, "Store unavailable: {}", msg),
            FeatureError::IoError(e) => write!(f, "I/O error: {}", e),
            FeatureError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for FeatureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeatureError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FeatureError {
    fn from(error: io::Error) -> Self {
        FeatureError::IoError(error)
    }
}

impl From<String> for FeatureError {
    fn from(msg: String) -> Self {
        FeatureError::ConfigError(msg)
    }
}

/// Result type for feature store operations
pub type FeatureResult<T> = Result<T, FeatureError>;
