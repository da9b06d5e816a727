//! WKB encoder

use crate::geometry::{Geometry, GeometryType, LineString, Polygon, Position, Shape};
use crate::io::byte_order::{ByteOrder, ByteOrderHandler};

/// Encoder producing plain WKB in a fixed byte order
pub struct WkbWriter {
    byte_order: ByteOrder,
    handler: Box<dyn ByteOrderHandler>,
}

impl Default for WkbWriter {
    fn default() -> Self {
        WkbWriter::new(ByteOrder::default())
    }
}

impl WkbWriter {
    /// Creates a writer for the given byte order
    pub fn new(byte_order: ByteOrder) -> Self {
        WkbWriter {
            byte_order,
            handler: byte_order.create_handler(),
        }
    }

    /// Encodes a geometry; the SRID is not part of the output
    pub fn write(&self, geometry: &Geometry) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(Self::encoded_len(&geometry.shape));
        self.write_shape(&mut buffer, &geometry.shape);
        buffer
    }

    /// Exact size of the encoded record
    pub fn encoded_len(shape: &Shape) -> usize {
        const HEADER: usize = 1 + 4;
        const POSITION: usize = 16;
        let line_len = |line: &LineString| 4 + line.points.len() * POSITION;
        let polygon_len = |polygon: &Polygon| 4 + polygon.rings.iter().map(line_len).sum::<usize>();

        HEADER + match shape {
            Shape::Point(_) => POSITION,
            Shape::LineString(line) => line_len(line),
            Shape::Polygon(polygon) => polygon_len(polygon),
            Shape::MultiPoint(points) => 4 + points.len() * (HEADER + POSITION),
            Shape::MultiLineString(lines) => {
                4 + lines.iter().map(|l| HEADER + line_len(l)).sum::<usize>()
            },
            Shape::MultiPolygon(polygons) => {
                4 + polygons.iter().map(|p| HEADER + polygon_len(p)).sum::<usize>()
            },
        }
    }

    fn write_header(&self, buffer: &mut Vec<u8>, geometry_type: GeometryType) {
        buffer.push(self.byte_order.marker());
        self.handler.put_u32(buffer, geometry_type.code());
    }

    fn write_shape(&self, buffer: &mut Vec<u8>, shape: &Shape) {
        self.write_header(buffer, shape.geometry_type());

        match shape {
            Shape::Point(p) => self.write_position(buffer, p),
            Shape::LineString(line) => self.write_line(buffer, line),
            Shape::Polygon(polygon) => self.write_polygon(buffer, polygon),
            Shape::MultiPoint(points) => {
                self.write_count(buffer, points.len());
                for p in points {
                    self.write_header(buffer, GeometryType::Point);
                    self.write_position(buffer, p);
                }
            },
            Shape::MultiLineString(lines) => {
                self.write_count(buffer, lines.len());
                for line in lines {
                    self.write_header(buffer, GeometryType::LineString);
                    self.write_line(buffer, line);
                }
            },
            Shape::MultiPolygon(polygons) => {
                self.write_count(buffer, polygons.len());
                for polygon in polygons {
                    self.write_header(buffer, GeometryType::Polygon);
                    self.write_polygon(buffer, polygon);
                }
            },
        }
    }

    fn write_count(&self, buffer: &mut Vec<u8>, count: usize) {
        // WKB counts are u32; in-memory geometries never approach that size
        self.handler.put_u32(buffer, count as u32);
    }

    fn write_position(&self, buffer: &mut Vec<u8>, p: &Position) {
        self.handler.put_f64(buffer, p.x);
        self.handler.put_f64(buffer, p.y);
    }

    fn write_line(&self, buffer: &mut Vec<u8>, line: &LineString) {
        self.write_count(buffer, line.points.len());
        for p in &line.points {
            self.write_position(buffer, p);
        }
    }

    fn write_polygon(&self, buffer: &mut Vec<u8>, polygon: &Polygon) {
        self.write_count(buffer, polygon.rings.len());
        for ring in &polygon.rings {
            self.write_line(buffer, ring);
        }
    }
}
