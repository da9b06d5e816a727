//! Feature entities
//!
//! A feature pairs an optional geometry with a typed attribute map,
//! an SRID and lifecycle timestamps.

mod attributes;
mod builder;
mod entity;

pub use attributes::{attributes_from_json, attributes_to_json, AttributeValue, Attributes};
pub use builder::FeatureBuilder;
pub use entity::Feature;
