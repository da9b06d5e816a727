//! Persistent stores behind an abstract statement interface
//!
//! The repository talks to a `FeatureStore` through parameterized
//! `Statement`s against a validated `TableName`. Both stores share the same
//! table engine, which keeps an R-tree of geometry MBRs for box queries.

mod file;
mod identifier;
mod memory;
mod row;
mod snapshot;
mod table;
mod traits;

pub use file::FileStore;
pub use identifier::{TableName, DEFAULT_TABLE};
pub use memory::MemoryStore;
pub use row::{FeatureRow, Statement};
pub use table::Table;
pub use traits::FeatureStore;
