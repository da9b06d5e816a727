//! WKB decoder
//!
//! Parses plain (non-extended) Well-Known Binary into the geometry model.
//! Every record starts with its own byte order marker, so nested records in
//! a multi-geometry may use a different order than their parent.

use log::debug;
use std::io::{self, Cursor};

use crate::coordinate::DEFAULT_SRID;
use crate::errors::{FeatureError, FeatureResult};
use crate::geometry::{Geometry, GeometryType, LineString, Polygon, Position, Shape};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};

/// Bytes taken by one encoded (x, y) position
const POSITION_SIZE: u64 = 16;
/// Bytes taken by a count field
const COUNT_SIZE: u64 = 4;
/// Smallest possible nested record: marker, type code, one position
const MIN_POINT_RECORD: u64 = 1 + 4 + POSITION_SIZE;
/// Smallest possible nested line or polygon record: marker, type code, count
const MIN_COLLECTION_RECORD: u64 = 1 + 4 + COUNT_SIZE;

/// Reader over a single WKB buffer
pub struct WkbReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> WkbReader<'a> {
    /// Creates a reader positioned at the start of the buffer
    pub fn new(bytes: &'a [u8]) -> Self {
        WkbReader { cursor: Cursor::new(bytes) }
    }

    /// Number of unread bytes
    fn remaining(&self) -> u64 {
        (self.cursor.get_ref().len() as u64).saturating_sub(self.cursor.position())
    }

    /// Decodes exactly one geometry spanning the whole buffer
    ///
    /// The result carries the default SRID; plain WKB has no SRID field.
    pub fn read(&mut self) -> FeatureResult<Geometry> {
        let shape = self.read_record()?;

        let trailing = self.remaining();
        if trailing > 0 {
            return Err(FeatureError::MalformedGeometry(format!(
                "{} trailing bytes after {} record",
                trailing,
                shape.geometry_type().name()
            )));
        }

        Ok(Geometry { shape, srid: DEFAULT_SRID })
    }

    /// Reads the marker and type code that open every record
    fn read_header(&mut self) -> FeatureResult<(ByteOrder, GeometryType)> {
        let byte_order = ByteOrder::detect(&mut self.cursor)?;
        let handler = byte_order.create_handler();

        let code = handler.read_u32(&mut self.cursor).map_err(|e| truncated("type code", e))?;
        let geometry_type = GeometryType::from_code(code).ok_or_else(|| {
            FeatureError::MalformedGeometry(format!("unrecognized geometry type code {}", code))
        })?;

        Ok((byte_order, geometry_type))
    }

    /// Reads the header of a multi-geometry member and checks its type
    fn read_member_header(&mut self, expected: GeometryType) -> FeatureResult<Box<dyn ByteOrderHandler>> {
        let (byte_order, geometry_type) = self.read_header()?;
        if geometry_type != expected {
            return Err(FeatureError::MalformedGeometry(format!(
                "expected {} member, found {}",
                expected.name(),
                geometry_type.name()
            )));
        }
        Ok(byte_order.create_handler())
    }

    /// Reads one top-level record
    fn read_record(&mut self) -> FeatureResult<Shape> {
        let (byte_order, geometry_type) = self.read_header()?;
        let handler = byte_order.create_handler();
        let handler = handler.as_ref();

        debug!("Decoding {} record ({})", geometry_type.name(), byte_order.name());

        let shape = match geometry_type {
            GeometryType::Point => Shape::Point(self.read_position(handler)?),
            GeometryType::LineString => Shape::LineString(self.read_line(handler)?),
            GeometryType::Polygon => Shape::Polygon(self.read_polygon(handler)?),
            GeometryType::MultiPoint => {
                let count = self.read_count(handler, MIN_POINT_RECORD, "points")?;
                let mut points = Vec::with_capacity(count);
                for _ in 0..count {
                    let member = self.read_member_header(GeometryType::Point)?;
                    points.push(self.read_position(member.as_ref())?);
                }
                Shape::MultiPoint(points)
            },
            GeometryType::MultiLineString => {
                let count = self.read_count(handler, MIN_COLLECTION_RECORD, "line strings")?;
                let mut lines = Vec::with_capacity(count);
                for _ in 0..count {
                    let member = self.read_member_header(GeometryType::LineString)?;
                    lines.push(self.read_line(member.as_ref())?);
                }
                Shape::MultiLineString(lines)
            },
            GeometryType::MultiPolygon => {
                let count = self.read_count(handler, MIN_COLLECTION_RECORD, "polygons")?;
                let mut polygons = Vec::with_capacity(count);
                for _ in 0..count {
                    let member = self.read_member_header(GeometryType::Polygon)?;
                    polygons.push(self.read_polygon(member.as_ref())?);
                }
                Shape::MultiPolygon(polygons)
            },
        };

        Ok(shape)
    }

    /// Reads a count and checks the buffer can hold that many elements of
    /// at least `min_element_size` bytes each
    fn read_count(
        &mut self,
        handler: &dyn ByteOrderHandler,
        min_element_size: u64,
        what: &str,
    ) -> FeatureResult<usize> {
        let count = handler.read_u32(&mut self.cursor).map_err(|e| truncated(what, e))? as u64;
        let remaining = self.remaining();

        if count * min_element_size > remaining {
            return Err(FeatureError::MalformedGeometry(format!(
                "declared {} {} but only {} bytes remain",
                count, what, remaining
            )));
        }

        Ok(count as usize)
    }

    fn read_position(&mut self, handler: &dyn ByteOrderHandler) -> FeatureResult<Position> {
        let x = handler.read_f64(&mut self.cursor).map_err(|e| truncated("x coordinate", e))?;
        let y = handler.read_f64(&mut self.cursor).map_err(|e| truncated("y coordinate", e))?;
        Ok(Position { x, y })
    }

    fn read_line(&mut self, handler: &dyn ByteOrderHandler) -> FeatureResult<LineString> {
        let count = self.read_count(handler, POSITION_SIZE, "points")?;
        let mut points = Vec::with_capacity(count);
        for _ in 0..count {
            points.push(self.read_position(handler)?);
        }
        Ok(LineString { points })
    }

    fn read_polygon(&mut self, handler: &dyn ByteOrderHandler) -> FeatureResult<Polygon> {
        let count = self.read_count(handler, COUNT_SIZE, "rings")?;
        let mut rings = Vec::with_capacity(count);
        for _ in 0..count {
            rings.push(self.read_line(handler)?);
        }
        let polygon = Polygon { rings };
        if !polygon.is_well_formed() {
            debug!("Polygon has an open ring; accepted as stored");
        }
        Ok(polygon)
    }
}

fn truncated(what: &str, error: io::Error) -> FeatureError {
    if error.kind() == io::ErrorKind::UnexpectedEof {
        FeatureError::MalformedGeometry(format!("truncated while reading {}", what))
    } else {
        FeatureError::MalformedGeometry(format!("failed reading {}: {}", what, error))
    }
}
