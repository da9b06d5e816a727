//! Byte order handling for WKB payloads
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian) when reading and writing
//! geometry records.

use byteorder::{BigEndian, ByteOrder as Endianness, LittleEndian, ReadBytesExt};
use std::io::{Read, Result};

use crate::errors::{FeatureError, FeatureResult};

/// WKB marker byte for big-endian (XDR) records
pub const XDR_MARKER: u8 = 0;
/// WKB marker byte for little-endian (NDR) records
pub const NDR_MARKER: u8 = 1;

/// Represents the byte order of a WKB record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Little-endian byte order (NDR)
    #[default]
    LittleEndian,
    /// Big-endian byte order (XDR)
    BigEndian,
}

impl ByteOrder {
    /// Reads the one-byte order marker that opens every WKB record
    pub fn detect(reader: &mut dyn Read) -> FeatureResult<Self> {
        let marker = reader.read_u8().map_err(|e| {
            FeatureError::MalformedGeometry(format!("missing byte order marker: {}", e))
        })?;
        Self::from_marker(marker)
    }

    /// Maps a marker byte to a byte order
    pub fn from_marker(marker: u8) -> FeatureResult<Self> {
        match marker {
            NDR_MARKER => Ok(ByteOrder::LittleEndian),
            XDR_MARKER => Ok(ByteOrder::BigEndian),
            _ => Err(FeatureError::MalformedGeometry(format!(
                "invalid byte order marker: {:#04x}",
                marker
            ))),
        }
    }

    /// The marker byte written for this order
    pub fn marker(&self) -> u8 {
        match self {
            ByteOrder::LittleEndian => NDR_MARKER,
            ByteOrder::BigEndian => XDR_MARKER,
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian (NDR)",
            ByteOrder::BigEndian => "Big Endian (XDR)",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Trait for byte order handling strategies
pub trait ByteOrderHandler: Send + Sync {
    /// Read a u32 value
    fn read_u32(&self, reader: &mut dyn Read) -> Result<u32>;

    /// Read an f64 value
    fn read_f64(&self, reader: &mut dyn Read) -> Result<f64>;

    /// Append a u32 value to an output buffer
    fn put_u32(&self, buffer: &mut Vec<u8>, value: u32);

    /// Append an f64 value to an output buffer
    fn put_f64(&self, buffer: &mut Vec<u8>, value: f64);
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn read_u32(&self, reader: &mut dyn Read) -> Result<u32> {
        reader.read_u32::<LittleEndian>()
    }

    fn read_f64(&self, reader: &mut dyn Read) -> Result<f64> {
        reader.read_f64::<LittleEndian>()
    }

    fn put_u32(&self, buffer: &mut Vec<u8>, value: u32) {
        let mut bytes = [0u8; 4];
        LittleEndian::write_u32(&mut bytes, value);
        buffer.extend_from_slice(&bytes);
    }

    fn put_f64(&self, buffer: &mut Vec<u8>, value: f64) {
        let mut bytes = [0u8; 8];
        LittleEndian::write_f64(&mut bytes, value);
        buffer.extend_from_slice(&bytes);
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn read_u32(&self, reader: &mut dyn Read) -> Result<u32> {
        reader.read_u32::<BigEndian>()
    }

    fn read_f64(&self, reader: &mut dyn Read) -> Result<f64> {
        reader.read_f64::<BigEndian>()
    }

    fn put_u32(&self, buffer: &mut Vec<u8>, value: u32) {
        let mut bytes = [0u8; 4];
        BigEndian::write_u32(&mut bytes, value);
        buffer.extend_from_slice(&bytes);
    }

    fn put_f64(&self, buffer: &mut Vec<u8>, value: f64) {
        let mut bytes = [0u8; 8];
        BigEndian::write_f64(&mut bytes, value);
        buffer.extend_from_slice(&bytes);
    }
}
