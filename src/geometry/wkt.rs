//! Well-Known Text rendering

use std::fmt::{self, Display, Write};

use super::types::{Geometry, LineString, Polygon, Position, Shape};

fn write_position(f: &mut impl Write, p: &Position) -> fmt::Result {
    write!(f, "{} {}", p.x, p.y)
}

fn write_sequence(f: &mut impl Write, points: &[Position]) -> fmt::Result {
    f.write_char('(')?;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_position(f, p)?;
    }
    f.write_char(')')
}

fn write_polygon(f: &mut impl Write, polygon: &Polygon) -> fmt::Result {
    f.write_char('(')?;
    for (i, ring) in polygon.rings.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_sequence(f, &ring.points)?;
    }
    f.write_char(')')
}

fn write_lines(f: &mut impl Write, lines: &[LineString]) -> fmt::Result {
    f.write_char('(')?;
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_sequence(f, &line.points)?;
    }
    f.write_char(')')
}

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.geometry_type().name();
        if self.is_empty() {
            return write!(f, "{} EMPTY", name);
        }

        write!(f, "{} ", name)?;
        match &self.shape {
            Shape::Point(p) => {
                f.write_char('(')?;
                write_position(f, p)?;
                f.write_char(')')
            },
            Shape::LineString(line) => write_sequence(f, &line.points),
            Shape::Polygon(polygon) => write_polygon(f, polygon),
            Shape::MultiPoint(points) => write_sequence(f, points),
            Shape::MultiLineString(lines) => write_lines(f, lines),
            Shape::MultiPolygon(polygons) => {
                f.write_char('(')?;
                for (i, polygon) in polygons.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_polygon(f, polygon)?;
                }
                f.write_char(')')
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_wkt() {
        assert_eq!(Geometry::point(28.9784, 41.0082).to_string(), "POINT (28.9784 41.0082)");
    }

    #[test]
    fn test_polygon_wkt() {
        let polygon = Geometry::polygon(&[vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]]);
        assert_eq!(polygon.to_string(), "POLYGON ((0 0, 1 0, 1 1, 0 0))");
    }

    #[test]
    fn test_multi_polygon_wkt() {
        let geometry = Geometry::new(Shape::MultiPolygon(vec![
            Polygon::new(vec![LineString::from_tuples(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)])]),
            Polygon::new(vec![LineString::from_tuples(&[(5.0, 5.0), (6.0, 6.0), (5.0, 5.0)])]),
        ]));
        assert_eq!(
            geometry.to_string(),
            "MULTIPOLYGON (((0 0, 1 1, 0 0)), ((5 5, 6 6, 5 5)))"
        );
    }

    #[test]
    fn test_empty_wkt() {
        assert_eq!(Geometry::line_string(&[]).to_string(), "LINESTRING EMPTY");
    }
}
