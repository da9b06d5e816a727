//! Compression handler trait definition

use crate::errors::FeatureResult;

/// Strategy trait for compressing snapshot bodies
pub trait CompressionHandler: Send + Sync {
    /// Decompress the data
    fn decompress(&self, data: &[u8]) -> FeatureResult<Vec<u8>>;

    /// Compress the data
    fn compress(&self, data: &[u8]) -> FeatureResult<Vec<u8>>;

    /// Get the name of this compression method
    fn name(&self) -> &'static str;

    /// Code written into the snapshot header
    fn code(&self) -> u8;
}
