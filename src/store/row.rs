//! Row layout and parameterized statements

use chrono::{DateTime, Utc};

use crate::coordinate::BoundingBox;

/// One stored feature in the six-column table layout
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub id: String,
    /// WKB bytes; `None` when the feature has no geometry
    pub geometry: Option<Vec<u8>>,
    /// Flat JSON object text
    pub attributes: Option<String>,
    pub srid: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A parameterized statement against one table
///
/// Values travel as data; only the validated table name selects the target.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(FeatureRow),
    /// Insert every row or none; any id already present or repeated fails the batch
    InsertMany(Vec<FeatureRow>),
    /// Replace geometry, attributes, srid and updated_at of the row with the same id
    ///
    /// The stored `created_at` is kept.
    Update(FeatureRow),
    Delete { id: String },
    SelectById { id: String },
    SelectAll,
    /// Rows whose geometry MBR intersects the box, edges inclusive
    SelectIntersecting { bbox: BoundingBox },
}

impl Statement {
    /// Ids of the rows a mutation may change; empty for selects
    pub fn target_ids(&self) -> Vec<&str> {
        match self {
            Statement::Insert(row) | Statement::Update(row) => vec![row.id.as_str()],
            Statement::InsertMany(rows) => rows.iter().map(|row| row.id.as_str()).collect(),
            Statement::Delete { id } => vec![id.as_str()],
            _ => Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Statement::Insert(_) => "INSERT",
            Statement::InsertMany(_) => "INSERT MANY",
            Statement::Update(_) => "UPDATE",
            Statement::Delete { .. } => "DELETE",
            Statement::SelectById { .. } => "SELECT BY ID",
            Statement::SelectAll => "SELECT ALL",
            Statement::SelectIntersecting { .. } => "SELECT INTERSECTING",
        }
    }
}
