//! Fluent feature construction

use crate::coordinate::Coordinate;
use crate::geometry::Geometry;
use super::attributes::AttributeValue;
use super::entity::Feature;

/// Builder for creating features
///
/// The builder owns a single accumulator. `build` hands out a copy of it, so
/// repeated calls return equal but independent features.
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder {
    feature: Feature,
}

impl FeatureBuilder {
    /// Create a builder around a fresh feature
    pub fn new() -> Self {
        FeatureBuilder { feature: Feature::new() }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.feature.id = id.into();
        self
    }

    /// Attach a geometry; it takes the builder's current SRID
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.feature.set_geometry(Some(geometry));
        self
    }

    /// Attach a point geometry (x = longitude, y = latitude for geographic SRIDs)
    pub fn with_point(self, x: f64, y: f64) -> Self {
        self.with_geometry(Geometry::point(x, y))
    }

    /// Attach a point at a validated geographic coordinate
    pub fn with_coordinate(self, coordinate: &Coordinate) -> Self {
        self.with_point(coordinate.longitude(), coordinate.latitude())
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.feature.set_attribute(key, value);
        self
    }

    /// Merge several attributes; later keys overwrite earlier ones
    pub fn with_attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        for (key, value) in attributes {
            self.feature.set_attribute(key, value);
        }
        self
    }

    /// Set the SRID, re-stamping any geometry already attached
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.feature.set_srid(srid);
        self
    }

    /// Produce a copy of the accumulated feature
    pub fn build(&self) -> Feature {
        self.feature.clone()
    }
}
