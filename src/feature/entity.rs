//! Feature entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::coordinate::DEFAULT_SRID;
use crate::geometry::Geometry;
use super::attributes::{AttributeValue, Attributes};
use super::builder::FeatureBuilder;

/// A geographic feature with geometry and attributes
///
/// The geometry's SRID always equals the feature's SRID; both are only
/// reachable through methods that keep them in step.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Unique identifier for the feature
    pub id: String,
    geometry: Option<Geometry>,
    /// Attributes (properties) of the feature
    pub attributes: Attributes,
    srid: i32,
    /// Timestamp when the feature was created
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last successful repository update
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Feature {
    fn default() -> Self {
        Feature::new()
    }
}

impl Feature {
    /// Creates an empty feature with a fresh identifier and the default SRID
    pub fn new() -> Self {
        Feature {
            id: Uuid::new_v4().to_string(),
            geometry: None,
            attributes: Attributes::new(),
            srid: DEFAULT_SRID,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Starts a fluent builder
    pub fn builder() -> FeatureBuilder {
        FeatureBuilder::new()
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Attaches or clears the geometry, stamping it with the feature's SRID
    pub fn set_geometry(&mut self, geometry: Option<Geometry>) {
        self.geometry = geometry.map(|g| g.with_srid(self.srid));
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// Changes the SRID of the feature and of any attached geometry
    pub fn set_srid(&mut self, srid: i32) {
        self.srid = srid;
        if let Some(geometry) = self.geometry.as_mut() {
            geometry.srid = srid;
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Inserts or replaces an attribute, returning the previous value
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.attributes.insert(key.into(), value.into())
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes.remove(key)
    }
}
