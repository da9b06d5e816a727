//! Coordinate handling for geospatial data
//!
//! This module provides the validated geographic coordinate, the
//! bounding rectangle used by spatial queries, and SRID helpers.

mod bbox;
mod crs;
mod geographic;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::crs::{CoordinateSystem, DEFAULT_SRID};
pub use self::geographic::{Coordinate, LATITUDE_RANGE, LONGITUDE_RANGE};
