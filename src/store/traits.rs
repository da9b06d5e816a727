//! Store capability trait

use async_trait::async_trait;

use crate::errors::FeatureResult;
use super::identifier::TableName;
use super::row::{FeatureRow, Statement};

/// Abstract persistent store with parameterized execute/query primitives
///
/// Implementations commit each statement atomically: a call that fails or
/// whose future is dropped leaves the table as it was.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Create the table if it does not exist yet
    async fn create_table(&self, table: &TableName) -> FeatureResult<()>;

    /// Run a mutating statement and return the number of rows affected
    ///
    /// Inserting an existing id fails with `DuplicateId`.
    async fn execute(&self, table: &TableName, statement: Statement) -> FeatureResult<u64>;

    /// Run a select statement and return the matching rows
    async fn query(&self, table: &TableName, statement: Statement) -> FeatureResult<Vec<FeatureRow>>;

    /// Short description for logs
    fn describe(&self) -> String;
}
