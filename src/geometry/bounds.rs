//! Minimum bounding rectangle computation

use crate::coordinate::BoundingBox;
use super::types::{Geometry, LineString, Polygon, Position, Shape};

impl Geometry {
    /// Visit every position of the geometry in storage order
    pub fn for_each_position<F: FnMut(&Position)>(&self, mut visit: F) {
        fn visit_line<F: FnMut(&Position)>(line: &LineString, visit: &mut F) {
            line.points.iter().for_each(|p| visit(p));
        }

        fn visit_polygon<F: FnMut(&Position)>(polygon: &Polygon, visit: &mut F) {
            for ring in &polygon.rings {
                visit_line(ring, visit);
            }
        }

        match &self.shape {
            Shape::Point(p) => visit(p),
            Shape::LineString(line) => visit_line(line, &mut visit),
            Shape::Polygon(polygon) => visit_polygon(polygon, &mut visit),
            Shape::MultiPoint(points) => points.iter().for_each(|p| visit(p)),
            Shape::MultiLineString(lines) => {
                for line in lines {
                    visit_line(line, &mut visit);
                }
            },
            Shape::MultiPolygon(polygons) => {
                for polygon in polygons {
                    visit_polygon(polygon, &mut visit);
                }
            },
        }
    }

    /// Minimum bounding rectangle of the geometry
    ///
    /// Positions with a NaN or infinite component are skipped. Returns `None`
    /// when no finite position remains.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut bounds: Option<BoundingBox> = None;

        self.for_each_position(|p| {
            if !p.x.is_finite() || !p.y.is_finite() {
                return;
            }
            match bounds.as_mut() {
                Some(b) => b.expand_to_include(p.x, p.y),
                None => bounds = Some(BoundingBox::from_point(p.x, p.y)),
            }
        });

        bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_bounds() {
        let bounds = Geometry::point(28.9784, 41.0082).bounds().unwrap();
        assert_eq!(bounds, BoundingBox::from_point(28.9784, 41.0082));
    }

    #[test]
    fn test_polygon_bounds_cover_all_rings() {
        let polygon = Geometry::polygon(&[
            vec![(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 0.0)],
            vec![(1.0, 1.0), (2.0, -1.0), (1.0, 1.0)],
        ]);
        assert_eq!(polygon.bounds(), Some(BoundingBox::new(0.0, -1.0, 4.0, 3.0)));
    }

    #[test]
    fn test_multi_line_bounds() {
        let geometry = Geometry::new(Shape::MultiLineString(vec![
            LineString::from_tuples(&[(-10.0, 5.0), (-8.0, 6.0)]),
            LineString::from_tuples(&[(3.0, -2.0)]),
        ]));
        assert_eq!(geometry.bounds(), Some(BoundingBox::new(-10.0, -2.0, 3.0, 6.0)));
    }

    #[test]
    fn test_empty_geometry_has_no_bounds() {
        assert_eq!(Geometry::line_string(&[]).bounds(), None);
        assert_eq!(Geometry::multi_point(&[]).bounds(), None);
        assert_eq!(Geometry::point(f64::NAN, f64::NAN).bounds(), None);
    }

    #[test]
    fn test_infinite_positions_are_skipped() {
        assert_eq!(Geometry::point(f64::INFINITY, 1.0).bounds(), None);

        let line = Geometry::line_string(&[(f64::NEG_INFINITY, 0.0), (2.0, 3.0), (f64::INFINITY, 1.0)]);
        assert_eq!(line.bounds(), Some(BoundingBox::from_point(2.0, 3.0)));
    }
}
