//! Snapshot bodies stored as written

use crate::errors::FeatureResult;
use super::handler::CompressionHandler;

/// No compression (code 1)
#[derive(Debug, Clone, Copy)]
pub struct UncompressedHandler;

impl UncompressedHandler {
    pub const CODE: u8 = 1;
}

impl CompressionHandler for UncompressedHandler {
    fn decompress(&self, data: &[u8]) -> FeatureResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn compress(&self, data: &[u8]) -> FeatureResult<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn name(&self) -> &'static str {
        "none"
    }

    fn code(&self) -> u8 {
        Self::CODE
    }
}
