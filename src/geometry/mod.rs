//! Geometry model
//!
//! A closed set of geometry kinds, each carrying an SRID. Coordinates are
//! raw (x, y) pairs; range validation belongs to higher layers.

mod types;
mod bounds;
mod wkt;

pub use self::types::{Geometry, GeometryType, LineString, Polygon, Position, Shape};
