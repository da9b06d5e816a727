//! Axis-aligned bounding box used for spatial filtering

use crate::errors::{FeatureError, FeatureResult};

/// An axis-aligned bounding rectangle in raw geometry units
///
/// X is the longitude-like axis and Y the latitude-like axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    ///
    /// The corners are taken as given. An inverted box (min greater than max
    /// on either axis) is a legal value that intersects nothing.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    /// Degenerate box covering a single position
    pub fn from_point(x: f64, y: f64) -> Self {
        BoundingBox::new(x, y, x, y)
    }

    /// Parse a bounding box from a string (format: "minx,miny,maxx,maxy")
    pub fn from_string(bbox_str: &str) -> FeatureResult<Self> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err(FeatureError::ConfigError(
                "Bounding box must have 4 comma-separated values".to_string(),
            ));
        }

        let mut values = [0.0f64; 4];
        for (i, (part, name)) in parts.iter().zip(["min_x", "min_y", "max_x", "max_y"]).enumerate() {
            values[i] = part.trim().parse::<f64>()
                .map_err(|_| FeatureError::ConfigError(format!("Invalid {} value: {}", name, part.trim())))?;
        }

        Ok(BoundingBox::new(values[0], values[1], values[2], values[3]))
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when both axes are ordered and no corner is NaN
    pub fn is_valid(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Check if this bounding box contains a position (edges inclusive)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Rectangle intersection test
    ///
    /// Two boxes intersect unless one lies entirely to one side of the other
    /// on either axis. Touching edges count as intersecting.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }

        !(self.max_x < other.min_x
            || self.min_x > other.max_x
            || self.max_y < other.min_y
            || self.min_y > other.max_y)
    }

    /// Grow this box so it also covers the given position
    pub fn expand_to_include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let bbox = BoundingBox::from_string("28, 40, 29, 42").unwrap();
        assert_eq!(bbox, BoundingBox::new(28.0, 40.0, 29.0, 42.0));

        assert!(BoundingBox::from_string("1,2,3").is_err());
        assert!(BoundingBox::from_string("1,2,x,4").is_err());
    }

    #[test]
    fn test_intersects_overlapping_and_disjoint() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&BoundingBox::new(5.0, 5.0, 15.0, 15.0)));
        assert!(a.intersects(&BoundingBox::new(2.0, 2.0, 3.0, 3.0)));
        assert!(!a.intersects(&BoundingBox::new(11.0, 0.0, 12.0, 10.0)));
        assert!(!a.intersects(&BoundingBox::new(0.0, -5.0, 10.0, -1.0)));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(a.intersects(&BoundingBox::new(1.0, 0.0, 2.0, 1.0)));
        assert!(a.intersects(&BoundingBox::new(1.0, 1.0, 2.0, 2.0)));
        assert!(a.intersects(&BoundingBox::from_point(0.0, 0.5)));
    }

    #[test]
    fn test_inverted_box_matches_nothing() {
        let inverted = BoundingBox::new(29.0, 42.0, 28.0, 40.0);
        assert!(!inverted.is_valid());
        assert!(!inverted.intersects(&BoundingBox::from_point(28.5, 41.0)));
        assert!(!BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_valid());
    }

    #[test]
    fn test_expand_to_include() {
        let mut bbox = BoundingBox::from_point(1.0, 1.0);
        bbox.expand_to_include(-1.0, 3.0);
        assert_eq!(bbox, BoundingBox::new(-1.0, 1.0, 1.0, 3.0));
        assert_eq!(bbox.width(), 2.0);
        assert_eq!(bbox.height(), 2.0);
    }
}
