//! Zstandard snapshot bodies

use log::debug;

use crate::errors::{FeatureError, FeatureResult};
use super::handler::CompressionHandler;

/// Zstandard snapshot compression (code 14)
#[derive(Debug, Clone, Copy)]
pub struct ZstdHandler {
    level: i32,
}

impl ZstdHandler {
    pub const CODE: u8 = 14;
    pub const DEFAULT_LEVEL: i32 = 3;

    pub fn new() -> Self {
        ZstdHandler { level: Self::DEFAULT_LEVEL }
    }

    /// Handler compressing at `level`; rejects levels zstd does not support
    pub fn with_level(level: i32) -> FeatureResult<Self> {
        let supported = zstd::compression_level_range();
        if !supported.contains(&level) {
            return Err(FeatureError::ConfigError(format!(
                "zstd compression_level {} outside {}..={}",
                level,
                supported.start(),
                supported.end()
            )));
        }
        Ok(ZstdHandler { level })
    }

    pub fn level(&self) -> i32 {
        self.level
    }
}

impl Default for ZstdHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressionHandler for ZstdHandler {
    fn decompress(&self, data: &[u8]) -> FeatureResult<Vec<u8>> {
        zstd::decode_all(data)
            .map_err(|e| FeatureError::StoreUnavailable(format!("zstd snapshot body unreadable: {}", e)))
    }

    fn compress(&self, data: &[u8]) -> FeatureResult<Vec<u8>> {
        let packed = zstd::encode_all(data, self.level)
            .map_err(|e| FeatureError::StoreUnavailable(format!("zstd snapshot compression failed: {}", e)))?;
        debug!("zstd level {} packed {} snapshot bytes into {}", self.level, data.len(), packed.len());
        Ok(packed)
    }

    fn name(&self) -> &'static str {
        "zstd"
    }

    fn code(&self) -> u8 {
        Self::CODE
    }
}
