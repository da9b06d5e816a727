//! Repository over an abstract feature store

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, info, warn};

use crate::coordinate::BoundingBox;
use crate::errors::{FeatureError, FeatureResult};
use crate::feature::{attributes_from_json, attributes_to_json, Attributes, Feature};
use crate::store::{FeatureRow, FeatureStore, Statement, TableName};
use crate::wkb;
use super::traits::FeatureRepository;

/// Feature repository backed by any `FeatureStore`
pub struct StoreFeatureRepository<S: FeatureStore> {
    store: S,
    table: TableName,
}

impl<S: FeatureStore> StoreFeatureRepository<S> {
    /// Wrap a store without touching it
    pub fn new(store: S, table: TableName) -> Self {
        StoreFeatureRepository { store, table }
    }

    /// Wrap a store, creating the table if needed
    pub async fn open(store: S, table: TableName) -> FeatureResult<Self> {
        store.create_table(&table).await?;
        info!("Feature repository ready on {} table {}", store.describe(), table);
        Ok(Self::new(store, table))
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn to_row(feature: &Feature) -> FeatureRow {
        FeatureRow {
            id: feature.id.clone(),
            geometry: feature.geometry().map(wkb::encode),
            attributes: Some(attributes_to_json(&feature.attributes)),
            srid: feature.srid(),
            created_at: feature.created_at,
            updated_at: feature.updated_at,
        }
    }

    fn from_row(row: FeatureRow) -> FeatureResult<Feature> {
        let mut feature = Feature::new();
        feature.id = row.id;
        feature.set_srid(row.srid);
        feature.created_at = row.created_at;
        feature.updated_at = row.updated_at;

        if let Some(bytes) = row.geometry {
            let geometry = wkb::decode_with_srid(&bytes, row.srid).map_err(|e| {
                error!("Error reading geometry of feature {}: {}", feature.id, e);
                e
            })?;
            feature.set_geometry(Some(geometry));
        }

        if let Some(text) = row.attributes {
            feature.attributes = match attributes_from_json(&text) {
                Ok(attributes) => attributes,
                Err(e) => {
                    warn!("Failed to decode attributes for feature {}, using empty map: {}", feature.id, e);
                    Attributes::new()
                },
            };
        }

        Ok(feature)
    }

    fn from_rows(rows: Vec<FeatureRow>) -> FeatureResult<Vec<Feature>> {
        rows.into_iter().map(Self::from_row).collect()
    }
}

#[async_trait]
impl<S: FeatureStore> FeatureRepository for StoreFeatureRepository<S> {
    async fn insert(&self, feature: &Feature) -> FeatureResult<Feature> {
        info!("Inserting feature {} into {}", feature.id, self.table);

        match self.store.execute(&self.table, Statement::Insert(Self::to_row(feature))).await {
            Ok(_) => {
                info!("Feature {} inserted successfully", feature.id);
                Ok(feature.clone())
            },
            Err(e) => {
                error!("Error inserting feature {}: {}", feature.id, e);
                Err(e)
            },
        }
    }

    async fn insert_many(&self, features: &[Feature]) -> FeatureResult<usize> {
        info!("Inserting {} feature(s) into {}", features.len(), self.table);
        if features.is_empty() {
            return Ok(0);
        }

        let rows = features.iter().map(Self::to_row).collect();
        match self.store.execute(&self.table, Statement::InsertMany(rows)).await {
            Ok(count) => {
                info!("{} feature(s) inserted successfully", count);
                Ok(count as usize)
            },
            Err(e) => {
                error!("Error inserting batch of {} feature(s): {}", features.len(), e);
                Err(e)
            },
        }
    }

    async fn update(&self, feature: &Feature) -> FeatureResult<Feature> {
        info!("Updating feature {} in {}", feature.id, self.table);

        let mut updated = feature.clone();
        updated.updated_at = Some(Utc::now());

        match self.store.execute(&self.table, Statement::Update(Self::to_row(&updated))).await {
            Ok(0) => {
                warn!("Feature {} not found for update", feature.id);
                Err(FeatureError::NotFound(feature.id.clone()))
            },
            Ok(_) => {
                info!("Feature {} updated successfully", feature.id);
                Ok(updated)
            },
            Err(e) => {
                error!("Error updating feature {}: {}", feature.id, e);
                Err(e)
            },
        }
    }

    async fn delete(&self, id: &str) -> FeatureResult<bool> {
        info!("Deleting feature {} from {}", id, self.table);

        match self.store.execute(&self.table, Statement::Delete { id: id.to_string() }).await {
            Ok(0) => {
                warn!("Feature {} not found for deletion", id);
                Ok(false)
            },
            Ok(_) => {
                info!("Feature {} deleted successfully", id);
                Ok(true)
            },
            Err(e) => {
                error!("Error deleting feature {}: {}", id, e);
                Err(e)
            },
        }
    }

    async fn get_by_id(&self, id: &str) -> FeatureResult<Option<Feature>> {
        let rows = self
            .store
            .query(&self.table, Statement::SelectById { id: id.to_string() })
            .await?;
        rows.into_iter().next().map(Self::from_row).transpose()
    }

    async fn get_all(&self) -> FeatureResult<Vec<Feature>> {
        let rows = self.store.query(&self.table, Statement::SelectAll).await?;
        debug!("Read {} feature(s) from {}", rows.len(), self.table);
        Self::from_rows(rows)
    }

    async fn query_bbox(&self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> FeatureResult<Vec<Feature>> {
        let bbox = BoundingBox::new(min_lon, min_lat, max_lon, max_lat);
        let rows = self
            .store
            .query(&self.table, Statement::SelectIntersecting { bbox })
            .await?;
        debug!(
            "Box ({}, {}, {}, {}) matched {} feature(s) in {}",
            bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y, rows.len(), self.table
        );
        Self::from_rows(rows)
    }
}
