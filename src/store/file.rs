//! Store persisted to a single snapshot file

use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::compression::CompressionHandler;
use crate::errors::{FeatureError, FeatureResult};
use super::identifier::TableName;
use super::memory::missing_table;
use super::row::{FeatureRow, Statement};
use super::snapshot;
use super::table::Table;
use super::traits::FeatureStore;

/// Store that keeps tables in memory and rewrites a snapshot file on every change
///
/// A mutation is applied to the live table, then the snapshot is written to a
/// sibling temporary file and renamed over the old one. When writing fails the
/// rows the statement touched are put back as they were. Nothing after the
/// lock acquisition awaits, so a dropped future either finished the whole
/// sequence or never started it.
pub struct FileStore {
    path: PathBuf,
    compression: Box<dyn CompressionHandler>,
    tables: RwLock<HashMap<TableName, Table>>,
}

impl FileStore {
    /// Open the snapshot at `path`, starting empty when the file does not exist
    pub async fn open(path: impl AsRef<Path>, compression: Box<dyn CompressionHandler>) -> FeatureResult<Self> {
        let path = path.as_ref().to_path_buf();
        let tables = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let tables = snapshot::decode(&bytes)?;
                info!("Opened snapshot {} with {} table(s)", path.display(), tables.len());
                tables
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Snapshot {} not found, starting empty", path.display());
                HashMap::new()
            },
            Err(e) => return Err(unavailable(&path, e)),
        };

        Ok(FileStore {
            path,
            compression,
            tables: RwLock::new(tables),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the snapshot file with the contents of `tables`
    fn persist(&self, tables: &HashMap<TableName, Table>) -> FeatureResult<()> {
        let bytes = snapshot::encode(tables, self.compression.as_ref())
            .map_err(|e| FeatureError::StoreUnavailable(format!("snapshot encoding failed: {}", e)))?;

        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        fs::write(&temp, &bytes).map_err(|e| unavailable(&temp, e))?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(unavailable(&self.path, e));
        }
        debug!("Wrote {} byte snapshot to {}", bytes.len(), self.path.display());
        Ok(())
    }
}

fn unavailable(path: &Path, e: std::io::Error) -> FeatureError {
    FeatureError::StoreUnavailable(format!("{}: {}", path.display(), e))
}

#[async_trait]
impl FeatureStore for FileStore {
    async fn create_table(&self, table: &TableName) -> FeatureResult<()> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(table) {
            return Ok(());
        }
        tables.insert(table.clone(), Table::new());
        if let Err(e) = self.persist(&tables) {
            tables.remove(table);
            return Err(e);
        }
        debug!("Created table {}", table);
        Ok(())
    }

    async fn execute(&self, table: &TableName, statement: Statement) -> FeatureResult<u64> {
        let mut tables = self.tables.write().await;
        let target = tables.get_mut(table).ok_or_else(|| missing_table(table))?;

        let previous: Vec<(String, Option<FeatureRow>)> = statement
            .target_ids()
            .into_iter()
            .map(|id| (id.to_string(), target.get(id).cloned()))
            .collect();
        let affected = target.apply(statement)?;
        if affected == 0 {
            return Ok(0);
        }

        if let Err(e) = self.persist(&tables) {
            if let Some(target) = tables.get_mut(table) {
                for (id, row) in previous.into_iter().rev() {
                    target.restore(&id, row);
                }
            }
            return Err(e);
        }
        Ok(affected)
    }

    async fn query(&self, table: &TableName, statement: Statement) -> FeatureResult<Vec<FeatureRow>> {
        let tables = self.tables.read().await;
        let target = tables.get(table).ok_or_else(|| missing_table(table))?;
        target.select(&statement)
    }

    fn describe(&self) -> String {
        format!("file:{} ({})", self.path.display(), self.compression.name())
    }
}
