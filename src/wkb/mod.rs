//! Well-Known Binary geometry codec
//!
//! Byte-compatible with plain WKB: a one-byte order marker, a four-byte
//! type code, then the coordinate payload. The SRID travels beside the
//! bytes, never inside them. The codec checks structure only; ring closure
//! and coordinate ranges are not validated.

mod reader;
mod writer;
#[cfg(test)]
mod tests;

pub use reader::WkbReader;
pub use writer::WkbWriter;

use crate::coordinate::BoundingBox;
use crate::errors::FeatureResult;
use crate::geometry::Geometry;

/// Encode a geometry as little-endian WKB
pub fn encode(geometry: &Geometry) -> Vec<u8> {
    WkbWriter::default().write(geometry)
}

/// Decode WKB; the geometry gets the default SRID
pub fn decode(bytes: &[u8]) -> FeatureResult<Geometry> {
    WkbReader::new(bytes).read()
}

/// Decode WKB and stamp the SRID stored alongside it
pub fn decode_with_srid(bytes: &[u8], srid: i32) -> FeatureResult<Geometry> {
    Ok(decode(bytes)?.with_srid(srid))
}

/// Minimum bounding rectangle of an encoded geometry
///
/// `Ok(None)` for geometries without usable positions.
pub fn envelope(bytes: &[u8]) -> FeatureResult<Option<BoundingBox>> {
    Ok(decode(bytes)?.bounds())
}
