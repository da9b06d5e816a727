//! Repository contract

use async_trait::async_trait;

use crate::coordinate::BoundingBox;
use crate::errors::FeatureResult;
use crate::feature::Feature;

/// CRUD plus bounding-box query over features
///
/// Calls may run concurrently. Calls against the same id are not serialized
/// here; callers needing one writer per id must serialize themselves.
#[async_trait]
pub trait FeatureRepository: Send + Sync {
    /// Store a new feature; `DuplicateId` when the id is taken
    async fn insert(&self, feature: &Feature) -> FeatureResult<Feature>;

    /// Store several new features in one write
    ///
    /// All or nothing: an id already stored or repeated in the batch fails
    /// the call with `DuplicateId` and stores none of them.
    async fn insert_many(&self, features: &[Feature]) -> FeatureResult<usize>;

    /// Rewrite geometry, attributes and SRID of a stored feature
    ///
    /// Returns the feature with `updated_at` set, or `NotFound` when no row
    /// has its id.
    async fn update(&self, feature: &Feature) -> FeatureResult<Feature>;

    /// Remove a feature; `Ok(false)` when nothing had the id
    async fn delete(&self, id: &str) -> FeatureResult<bool>;

    async fn get_by_id(&self, id: &str) -> FeatureResult<Option<Feature>>;

    /// Every stored feature, in store-defined order
    async fn get_all(&self) -> FeatureResult<Vec<Feature>>;

    /// Features whose geometry MBR intersects the box, edges inclusive
    ///
    /// An inverted box matches nothing. This is an MBR filter; exact
    /// intersection is left to the caller.
    async fn query_bbox(&self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> FeatureResult<Vec<Feature>>;

    /// `query_bbox` over a `BoundingBox`
    async fn query_box(&self, bbox: &BoundingBox) -> FeatureResult<Vec<Feature>> {
        self.query_bbox(bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y).await
    }
}
