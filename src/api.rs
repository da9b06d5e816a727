use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use log::{info, warn};

use crate::compression::CompressionFactory;
use crate::config::StoreConfig;
use crate::coordinate::{BoundingBox, Coordinate, CoordinateSystem};
use crate::errors::{FeatureError, FeatureResult};
use crate::feature::{Attributes, Feature};
use crate::import;
use crate::repository::{FeatureRepository, StoreFeatureRepository};
use crate::store::{FeatureStore, FileStore, MemoryStore, TableName};
use crate::utils::ProgressTracker;

/// Outcome of a bulk import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub imported: usize,
    /// Rows rejected for bad coordinates or an id already in the store
    pub skipped: usize,
}

/// Main interface to the FeatureKit library
pub struct FeatureKit {
    repository: Box<dyn FeatureRepository>,
    default_srid: i32,
    description: String,
}

impl FeatureKit {
    /// Open the store described by `config`
    ///
    /// A configured `path` opens (or creates) a snapshot file; without one
    /// the features live in memory.
    pub async fn open(config: &StoreConfig) -> FeatureResult<Self> {
        match &config.path {
            Some(path) => {
                let compression = CompressionFactory::from_config(&config.compression, config.compression_level)?;
                let store = FileStore::open(path, compression).await?;
                let description = format!("{} table {}", store.describe(), config.table);
                let repository = StoreFeatureRepository::open(store, config.table.clone()).await?;
                Ok(Self::from_repository(Box::new(repository), config.default_srid, description))
            },
            None => Self::in_memory(config.table.clone(), config.default_srid).await,
        }
    }

    /// Memory-backed instance
    pub async fn in_memory(table: TableName, default_srid: i32) -> FeatureResult<Self> {
        let description = format!("memory table {}", table);
        let repository = StoreFeatureRepository::open(MemoryStore::new(), table).await?;
        Ok(Self::from_repository(Box::new(repository), default_srid, description))
    }

    /// Wrap an existing repository
    pub fn from_repository(repository: Box<dyn FeatureRepository>, default_srid: i32, description: String) -> Self {
        FeatureKit {
            repository,
            default_srid,
            description,
        }
    }

    pub fn repository(&self) -> &dyn FeatureRepository {
        self.repository.as_ref()
    }

    pub fn default_srid(&self) -> i32 {
        self.default_srid
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Insert a point feature
    ///
    /// With a geographic SRID the position is validated as a latitude and
    /// longitude first.
    pub async fn insert_point(
        &self,
        id: Option<&str>,
        x: f64,
        y: f64,
        srid: Option<i32>,
        attributes: Attributes,
    ) -> FeatureResult<Feature> {
        let srid = srid.unwrap_or(self.default_srid);
        let mut builder = Feature::builder().with_srid(srid).with_attributes(attributes);
        builder = if CoordinateSystem::from_srid(srid).is_geographic() {
            builder.with_coordinate(&Coordinate::from_lat_lon(y, x)?)
        } else {
            builder.with_point(x, y)
        };
        if let Some(id) = id {
            builder = builder.with_id(id);
        }

        self.repository.insert(&builder.build()).await
    }

    pub async fn get(&self, id: &str) -> FeatureResult<Option<Feature>> {
        self.repository.get_by_id(id).await
    }

    pub async fn delete(&self, id: &str) -> FeatureResult<bool> {
        self.repository.delete(id).await
    }

    pub async fn list(&self) -> FeatureResult<Vec<Feature>> {
        self.repository.get_all().await
    }

    pub async fn query(&self, bbox: BoundingBox) -> FeatureResult<Vec<Feature>> {
        self.repository.query_box(&bbox).await
    }

    /// Import point features from a CSV file
    ///
    /// Rows with invalid coordinates or ids already stored are skipped and
    /// logged. The remaining rows are written in one batch; any store
    /// failure stops the import with nothing written.
    pub async fn import_csv(&self, path: impl AsRef<Path>, show_progress: bool) -> FeatureResult<ImportSummary> {
        let path = path.as_ref();
        info!("Importing points from {}", path.display());

        let file = File::open(path)?;
        let rows = import::read_point_features(file, self.default_srid)?;

        let progress = if show_progress {
            ProgressTracker::new(rows.len() as u64, "Importing features")
        } else {
            ProgressTracker::hidden(rows.len() as u64)
        };

        let mut summary = ImportSummary::default();
        let mut seen = HashSet::new();
        let mut staged = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            let checked = match row {
                Ok(feature) if seen.contains(&feature.id) => Err(FeatureError::DuplicateId(feature.id)),
                Ok(feature) => match self.repository.get_by_id(&feature.id).await {
                    Ok(Some(_)) => Err(FeatureError::DuplicateId(feature.id)),
                    Ok(None) => Ok(feature),
                    Err(e) => {
                        progress.finish("Import aborted");
                        return Err(e);
                    },
                },
                Err(e) => Err(e),
            };

            match checked {
                Ok(feature) => {
                    seen.insert(feature.id.clone());
                    staged.push(feature);
                },
                Err(e) => {
                    warn!("Skipping CSV row {}: {}", index + 2, e);
                    summary.skipped += 1;
                },
            }
            progress.increment(1);
        }

        summary.imported = match self.repository.insert_many(&staged).await {
            Ok(count) => count,
            Err(e) => {
                progress.finish("Import aborted");
                return Err(e);
            },
        };

        progress.finish("Import complete");
        info!(
            "Imported {} feature(s) from {}, skipped {}",
            summary.imported,
            path.display(),
            summary.skipped
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_insert_point_validates_geographic_positions() {
        let kit = FeatureKit::in_memory(TableName::default(), 4326).await.unwrap();

        let result = kit.insert_point(Some("bad"), 0.0, 95.0, None, Attributes::new()).await;
        assert!(matches!(result, Err(FeatureError::OutOfRange { field: "latitude", .. })));

        let feature = kit
            .insert_point(Some("istanbul"), 28.9784, 41.0082, None, Attributes::new())
            .await
            .unwrap();
        assert_eq!(feature.srid(), 4326);
        assert!(kit.get("istanbul").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_insert_point_projected() {
        let kit = FeatureKit::in_memory(TableName::default(), 4326).await.unwrap();
        let feature = kit
            .insert_point(None, 664274.0, 4550917.0, Some(32635), Attributes::new())
            .await
            .unwrap();
        assert_eq!(feature.geometry().unwrap().srid, 32635);
    }

    #[tokio::test]
    async fn test_import_csv_counts_skips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cities.csv");
        std::fs::write(
            &path,
            "id,name,lat,lon\nistanbul,Istanbul,41.0082,28.9784\nnowhere,Nowhere,123.0,0.0\nistanbul,Again,41.0,29.0\nankara,Ankara,39.9334,32.8597\n",
        )
        .unwrap();

        let kit = FeatureKit::in_memory(TableName::default(), 4326).await.unwrap();
        let summary = kit.import_csv(&path, false).await.unwrap();

        assert_eq!(summary, ImportSummary { imported: 2, skipped: 2 });
        assert_eq!(kit.list().await.unwrap().len(), 2);
        let hits = kit.query(BoundingBox::new(28.0, 40.0, 29.0, 42.0)).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].attribute("name").and_then(|v| v.as_str()), Some("Istanbul"));
    }

    #[tokio::test]
    async fn test_open_file_store_from_config() {
        let dir = tempdir().unwrap();
        let config = StoreConfig {
            path: Some(dir.path().join("features.fks")),
            compression: "deflate".to_string(),
            ..StoreConfig::default()
        };

        {
            let kit = FeatureKit::open(&config).await.unwrap();
            kit.insert_point(Some("a"), 1.0, 1.0, None, Attributes::new()).await.unwrap();
        }

        let kit = FeatureKit::open(&config).await.unwrap();
        assert!(kit.get("a").await.unwrap().is_some());
        assert!(kit.description().contains("features.fks"));
    }

    #[tokio::test]
    async fn test_import_csv_into_file_store_skips_stored_ids() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("points.csv");
        let mut csv = String::from("id,lat,lon\n");
        for i in 0..500 {
            csv.push_str(&format!("p{:03},{}.0,{}.0\n", i, i % 90, i % 180));
        }
        std::fs::write(&csv_path, csv).unwrap();

        let config = StoreConfig {
            path: Some(dir.path().join("bulk.fks")),
            compression: "zstd".to_string(),
            ..StoreConfig::default()
        };
        let kit = FeatureKit::open(&config).await.unwrap();
        kit.insert_point(Some("p007"), 7.0, 7.0, None, Attributes::new()).await.unwrap();

        let summary = kit.import_csv(&csv_path, false).await.unwrap();
        assert_eq!(summary, ImportSummary { imported: 499, skipped: 1 });

        let reopened = FeatureKit::open(&config).await.unwrap();
        assert_eq!(reopened.list().await.unwrap().len(), 500);
    }
}
