//! Volatile store backed by in-memory tables

use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::errors::{FeatureError, FeatureResult};
use super::identifier::TableName;
use super::row::{FeatureRow, Statement};
use super::table::Table;
use super::traits::FeatureStore;

/// Store whose tables live only as long as the process
///
/// Each statement commits inside one synchronous section after the lock is
/// acquired, so a dropped future never leaves a partial write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<TableName, Table>>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the store unreachable; later calls fail with `StoreUnavailable`
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> FeatureResult<()> {
        if self.is_closed() {
            Err(FeatureError::StoreUnavailable("memory store is closed".to_string()))
        } else {
            Ok(())
        }
    }
}

pub(crate) fn missing_table(table: &TableName) -> FeatureError {
    FeatureError::StoreUnavailable(format!("no such table: {}", table))
}

#[async_trait]
impl FeatureStore for MemoryStore {
    async fn create_table(&self, table: &TableName) -> FeatureResult<()> {
        self.ensure_open()?;
        let mut tables = self.tables.write().await;
        self.ensure_open()?;
        tables.entry(table.clone()).or_insert_with(|| {
            debug!("Created table {}", table);
            Table::new()
        });
        Ok(())
    }

    async fn execute(&self, table: &TableName, statement: Statement) -> FeatureResult<u64> {
        self.ensure_open()?;
        let mut tables = self.tables.write().await;
        self.ensure_open()?;
        let target = tables.get_mut(table).ok_or_else(|| missing_table(table))?;
        target.apply(statement)
    }

    async fn query(&self, table: &TableName, statement: Statement) -> FeatureResult<Vec<FeatureRow>> {
        self.ensure_open()?;
        let tables = self.tables.read().await;
        self.ensure_open()?;
        let target = tables.get(table).ok_or_else(|| missing_table(table))?;
        target.select(&statement)
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
