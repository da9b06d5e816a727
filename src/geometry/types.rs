//! Geometry value types

use crate::coordinate::DEFAULT_SRID;

/// A raw (x, y) pair; x is longitude-like, y latitude-like
///
/// Positions are not range-checked. Projected systems use meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Position { x, y }
    }
}

/// An ordered sequence of positions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    pub points: Vec<Position>,
}

impl LineString {
    pub fn new(points: Vec<Position>) -> Self {
        LineString { points }
    }

    /// Build from (x, y) tuples
    pub fn from_tuples(points: &[(f64, f64)]) -> Self {
        LineString { points: points.iter().map(|&p| Position::from(p)).collect() }
    }

    /// True when the first and last positions are equal and there is at least one
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A polygon as a list of rings; the first ring is the exterior shell
///
/// Ring closure is expected for a well-formed polygon but is not enforced.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub rings: Vec<LineString>,
}

impl Polygon {
    pub fn new(rings: Vec<LineString>) -> Self {
        Polygon { rings }
    }

    /// True when every ring is closed
    pub fn is_well_formed(&self) -> bool {
        self.rings.iter().all(|ring| ring.is_closed())
    }
}

/// Geometry type codes shared with the WKB format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl GeometryType {
    /// WKB type code
    pub fn code(&self) -> u32 {
        match self {
            GeometryType::Point => 1,
            GeometryType::LineString => 2,
            GeometryType::Polygon => 3,
            GeometryType::MultiPoint => 4,
            GeometryType::MultiLineString => 5,
            GeometryType::MultiPolygon => 6,
        }
    }

    /// Look up a WKB type code; `None` for codes outside the model
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(GeometryType::Point),
            2 => Some(GeometryType::LineString),
            3 => Some(GeometryType::Polygon),
            4 => Some(GeometryType::MultiPoint),
            5 => Some(GeometryType::MultiLineString),
            6 => Some(GeometryType::MultiPolygon),
            _ => None,
        }
    }

    /// Upper-case WKT keyword
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
        }
    }
}

/// The coordinate payload of a geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Position),
    LineString(LineString),
    Polygon(Polygon),
    MultiPoint(Vec<Position>),
    MultiLineString(Vec<LineString>),
    MultiPolygon(Vec<Polygon>),
}

impl Shape {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Shape::Point(_) => GeometryType::Point,
            Shape::LineString(_) => GeometryType::LineString,
            Shape::Polygon(_) => GeometryType::Polygon,
            Shape::MultiPoint(_) => GeometryType::MultiPoint,
            Shape::MultiLineString(_) => GeometryType::MultiLineString,
            Shape::MultiPolygon(_) => GeometryType::MultiPolygon,
        }
    }
}

/// A geometry together with its spatial reference identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub shape: Shape,
    pub srid: i32,
}

impl Geometry {
    /// Wrap a shape using the default SRID (4326)
    pub fn new(shape: Shape) -> Self {
        Geometry { shape, srid: DEFAULT_SRID }
    }

    /// Replace the SRID, consuming self
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    pub fn point(x: f64, y: f64) -> Self {
        Geometry::new(Shape::Point(Position::new(x, y)))
    }

    pub fn line_string(points: &[(f64, f64)]) -> Self {
        Geometry::new(Shape::LineString(LineString::from_tuples(points)))
    }

    /// Polygon from rings given as (x, y) tuples; the first ring is the shell
    pub fn polygon(rings: &[Vec<(f64, f64)>]) -> Self {
        let rings = rings.iter().map(|ring| LineString::from_tuples(ring)).collect();
        Geometry::new(Shape::Polygon(Polygon::new(rings)))
    }

    pub fn multi_point(points: &[(f64, f64)]) -> Self {
        Geometry::new(Shape::MultiPoint(points.iter().map(|&p| Position::from(p)).collect()))
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.shape.geometry_type()
    }

    /// WKT keyword of the geometry kind, e.g. `POLYGON`
    pub fn kind_name(&self) -> &'static str {
        self.geometry_type().name()
    }

    /// True when the geometry holds no positions at all
    pub fn is_empty(&self) -> bool {
        match &self.shape {
            Shape::Point(_) => false,
            Shape::LineString(line) => line.is_empty(),
            Shape::Polygon(polygon) => polygon.rings.iter().all(|r| r.is_empty()),
            Shape::MultiPoint(points) => points.is_empty(),
            Shape::MultiLineString(lines) => lines.iter().all(|l| l.is_empty()),
            Shape::MultiPolygon(polygons) => polygons
                .iter()
                .all(|p| p.rings.iter().all(|r| r.is_empty())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_defaults_to_wgs84() {
        let point = Geometry::point(28.9784, 41.0082);
        assert_eq!(point.srid, 4326);
        assert_eq!(point.shape, Shape::Point(Position::new(28.9784, 41.0082)));
        assert_eq!(point.geometry_type(), GeometryType::Point);
    }

    #[test]
    fn test_with_srid() {
        let point = Geometry::point(664274.0, 4550917.0).with_srid(32635);
        assert_eq!(point.srid, 32635);
    }

    #[test]
    fn test_ring_closure() {
        let closed = LineString::from_tuples(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        let open = LineString::from_tuples(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert!(closed.is_closed());
        assert!(!open.is_closed());
        assert!(!LineString::default().is_closed());

        assert!(Polygon::new(vec![closed.clone()]).is_well_formed());
        assert!(!Polygon::new(vec![closed, open]).is_well_formed());
    }

    #[test]
    fn test_type_codes() {
        for code in 1..=6 {
            let geometry_type = GeometryType::from_code(code).unwrap();
            assert_eq!(geometry_type.code(), code);
        }
        assert_eq!(GeometryType::from_code(7), None);
        assert_eq!(GeometryType::from_code(1001), None);
        assert_eq!(Geometry::multi_point(&[(1.0, 2.0)]).kind_name(), "MULTIPOINT");
    }

    #[test]
    fn test_is_empty() {
        assert!(!Geometry::point(0.0, 0.0).is_empty());
        assert!(Geometry::line_string(&[]).is_empty());
        assert!(Geometry::new(Shape::MultiPolygon(vec![Polygon::default()])).is_empty());
    }
}
