pub mod errors;
pub mod io;
pub mod coordinate;
pub mod geometry;
pub mod wkb;
pub mod feature;
pub mod compression;
pub mod store;
pub mod repository;
pub mod config;
pub mod import;
pub mod utils;
pub mod commands;
pub mod cli;
pub mod api;

pub use crate::api::{FeatureKit, ImportSummary};

pub use coordinate::{BoundingBox, Coordinate, CoordinateSystem};
pub use errors::{FeatureError, FeatureResult};
pub use feature::{AttributeValue, Attributes, Feature, FeatureBuilder};
pub use geometry::{Geometry, GeometryType, Shape};
pub use repository::{FeatureRepository, StoreFeatureRepository};
pub use store::{FeatureStore, FileStore, MemoryStore, TableName};
