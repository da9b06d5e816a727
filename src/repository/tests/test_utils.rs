use crate::feature::{AttributeValue, Feature};
use crate::repository::StoreFeatureRepository;
use crate::store::{MemoryStore, TableName};

/// Repository over a fresh memory store with the default table created
pub async fn memory_repository() -> StoreFeatureRepository<MemoryStore> {
    StoreFeatureRepository::open(MemoryStore::new(), TableName::default())
        .await
        .unwrap()
}

/// Istanbul as a point feature carrying one attribute of each stored kind
#[allow(clippy::approx_constant)]
pub fn istanbul() -> Feature {
    Feature::builder()
        .with_id("istanbul")
        .with_point(28.9784, 41.0082)
        .with_attribute("name", "Istanbul")
        .with_attribute("population", 15_460_000i64)
        .with_attribute("ratio", 3.14)
        .with_attribute("active", true)
        .with_attribute("note", AttributeValue::Null)
        .build()
}

pub fn point(id: &str, x: f64, y: f64) -> Feature {
    Feature::builder().with_id(id).with_point(x, y).build()
}
