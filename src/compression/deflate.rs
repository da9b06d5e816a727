//! zlib-wrapped deflate snapshot bodies

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

use crate::errors::{FeatureError, FeatureResult};
use super::handler::CompressionHandler;

/// Deflate snapshot compression (code 8)
#[derive(Debug, Clone, Copy)]
pub struct DeflateHandler;

impl DeflateHandler {
    pub const CODE: u8 = 8;
}

impl CompressionHandler for DeflateHandler {
    fn decompress(&self, data: &[u8]) -> FeatureResult<Vec<u8>> {
        let mut body = Vec::with_capacity(data.len() * 4);
        ZlibDecoder::new(data)
            .read_to_end(&mut body)
            .map_err(|e| FeatureError::StoreUnavailable(format!("deflate snapshot body unreadable: {}", e)))?;
        Ok(body)
    }

    fn compress(&self, data: &[u8]) -> FeatureResult<Vec<u8>> {
        let failed = |e: std::io::Error| FeatureError::StoreUnavailable(format!("deflate snapshot compression failed: {}", e));
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
        encoder.write_all(data).map_err(failed)?;
        encoder.finish().map_err(failed)
    }

    fn name(&self) -> &'static str {
        "deflate"
    }

    fn code(&self) -> u8 {
        Self::CODE
    }
}
