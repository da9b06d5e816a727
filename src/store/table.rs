//! In-memory table engine with an R-tree over row MBRs

use log::debug;
use rstar::{RTree, RTreeObject, AABB};
use std::collections::{BTreeMap, HashSet};

use crate::coordinate::BoundingBox;
use crate::errors::{FeatureError, FeatureResult};
use crate::wkb;
use super::row::{FeatureRow, Statement};

/// R-tree entry: a row id and the MBR of its geometry
#[derive(Debug, Clone, PartialEq)]
struct IndexedRow {
    id: String,
    bbox: BoundingBox,
}

impl RTreeObject for IndexedRow {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.bbox.min_x, self.bbox.min_y], [self.bbox.max_x, self.bbox.max_y])
    }
}

#[derive(Debug, Clone)]
struct StoredRow {
    row: FeatureRow,
    mbr: Option<BoundingBox>,
}

/// Rows keyed by id plus a spatial index of their geometry MBRs
///
/// Rows without geometry, with an empty geometry or with bytes that do not
/// decode are kept but never indexed, so no box query returns them. MBRs
/// reaching past `INDEX_LIMIT` stay out of the R-tree and are scanned
/// linearly instead.
#[derive(Debug, Clone, Default)]
pub struct Table {
    rows: BTreeMap<String, StoredRow>,
    index: RTree<IndexedRow>,
    wide: BTreeMap<String, BoundingBox>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows read back from storage
    pub fn from_rows(rows: Vec<FeatureRow>) -> Self {
        let mut stored = BTreeMap::new();
        let mut entries = Vec::new();
        let mut wide = BTreeMap::new();
        for row in rows {
            let mbr = row_mbr(&row);
            match mbr {
                Some(bbox) if fits_index(&bbox) => entries.push(IndexedRow { id: row.id.clone(), bbox }),
                Some(bbox) => {
                    wide.insert(row.id.clone(), bbox);
                },
                None => {},
            }
            stored.insert(row.id.clone(), StoredRow { row, mbr });
        }

        Table {
            rows: stored,
            index: RTree::bulk_load(entries),
            wide,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows a box query can return
    pub fn indexed_len(&self) -> usize {
        self.index.size() + self.wide.len()
    }

    pub fn get(&self, id: &str) -> Option<&FeatureRow> {
        self.rows.get(id).map(|stored| &stored.row)
    }

    /// Put back the row an id held before a statement touched it
    ///
    /// `None` removes whatever the id holds now.
    pub fn restore(&mut self, id: &str, previous: Option<FeatureRow>) {
        self.remove(id);
        if let Some(row) = previous {
            self.put(row);
        }
    }

    /// Rows in id order
    pub fn rows(&self) -> impl Iterator<Item = &FeatureRow> {
        self.rows.values().map(|stored| &stored.row)
    }

    /// Apply a mutating statement, returning the rows affected
    ///
    /// Either the whole statement takes effect or nothing changes.
    pub fn apply(&mut self, statement: Statement) -> FeatureResult<u64> {
        match statement {
            Statement::Insert(row) => {
                if self.rows.contains_key(&row.id) {
                    return Err(FeatureError::DuplicateId(row.id));
                }
                self.put(row);
                Ok(1)
            },
            Statement::InsertMany(rows) => {
                let mut ids = HashSet::with_capacity(rows.len());
                for row in &rows {
                    if self.rows.contains_key(&row.id) || !ids.insert(row.id.as_str()) {
                        return Err(FeatureError::DuplicateId(row.id.clone()));
                    }
                }
                let count = rows.len() as u64;
                for row in rows {
                    self.put(row);
                }
                Ok(count)
            },
            Statement::Update(mut row) => {
                let created_at = match self.rows.get(&row.id) {
                    Some(existing) => existing.row.created_at,
                    None => return Ok(0),
                };
                row.created_at = created_at;
                self.remove(&row.id);
                self.put(row);
                Ok(1)
            },
            Statement::Delete { id } => Ok(if self.remove(&id) { 1 } else { 0 }),
            other => Err(FeatureError::StoreUnavailable(format!(
                "{} cannot be executed as a mutation",
                other.name()
            ))),
        }
    }

    /// Run a select statement
    pub fn select(&self, statement: &Statement) -> FeatureResult<Vec<FeatureRow>> {
        match statement {
            Statement::SelectById { id } => Ok(self.rows.get(id).map(|s| s.row.clone()).into_iter().collect()),
            Statement::SelectAll => Ok(self.rows().cloned().collect()),
            Statement::SelectIntersecting { bbox } => Ok(self.intersecting(bbox)),
            other => Err(FeatureError::StoreUnavailable(format!(
                "{} cannot be run as a query",
                other.name()
            ))),
        }
    }

    /// Rows whose MBR intersects the box, in id order
    fn intersecting(&self, bbox: &BoundingBox) -> Vec<FeatureRow> {
        // AABB::from_corners would silently normalize an inverted box
        if !bbox.is_valid() {
            debug!("Query box {:?} is inverted or not a number, matching nothing", bbox);
            return Vec::new();
        }

        let envelope = AABB::from_corners([bbox.min_x, bbox.min_y], [bbox.max_x, bbox.max_y]);
        let mut ids: Vec<&str> = self
            .index
            .locate_in_envelope_intersecting(&envelope)
            .filter(|entry| entry.bbox.intersects(bbox))
            .map(|entry| entry.id.as_str())
            .chain(
                self.wide
                    .iter()
                    .filter(|(_, mbr)| mbr.intersects(bbox))
                    .map(|(id, _)| id.as_str()),
            )
            .collect();
        ids.sort_unstable();

        ids.into_iter()
            .filter_map(|id| self.rows.get(id))
            .map(|stored| stored.row.clone())
            .collect()
    }

    fn put(&mut self, row: FeatureRow) {
        let mbr = row_mbr(&row);
        match mbr {
            Some(bbox) if fits_index(&bbox) => self.index.insert(IndexedRow { id: row.id.clone(), bbox }),
            Some(bbox) => {
                debug!("Row {} has an MBR too large for the R-tree, scanning it linearly", row.id);
                self.wide.insert(row.id.clone(), bbox);
            },
            None => {},
        }
        self.rows.insert(row.id.clone(), StoredRow { row, mbr });
    }

    fn remove(&mut self, id: &str) -> bool {
        match self.rows.remove(id) {
            Some(stored) => {
                if self.wide.remove(id).is_none() {
                    if let Some(bbox) = stored.mbr {
                        self.index.remove(&IndexedRow { id: id.to_string(), bbox });
                    }
                }
                true
            },
            None => false,
        }
    }
}

/// Largest coordinate magnitude the R-tree accepts
///
/// R* insertion compares areas of merged node envelopes; below this bound
/// those products stay finite.
const INDEX_LIMIT: f64 = 1e150;

fn fits_index(bbox: &BoundingBox) -> bool {
    [bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y]
        .iter()
        .all(|v| v.abs() <= INDEX_LIMIT)
}

/// MBR of a row's stored geometry, if it has a usable one
fn row_mbr(row: &FeatureRow) -> Option<BoundingBox> {
    let bytes = row.geometry.as_deref()?;
    match wkb::envelope(bytes) {
        Ok(mbr) => mbr,
        Err(e) => {
            debug!("Row {} not indexed: {}", row.id, e);
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use chrono::Utc;

    fn row(id: &str, geometry: Option<Geometry>) -> FeatureRow {
        FeatureRow {
            id: id.to_string(),
            geometry: geometry.as_ref().map(wkb::encode),
            attributes: None,
            srid: 4326,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn query(table: &Table, bbox: BoundingBox) -> Vec<String> {
        table
            .select(&Statement::SelectIntersecting { bbox })
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect()
    }

    #[test]
    fn test_point_intersection() {
        let mut table = Table::new();
        table.apply(Statement::Insert(row("istanbul", Some(Geometry::point(28.9784, 41.0082))))).unwrap();

        assert_eq!(query(&table, BoundingBox::new(28.0, 40.0, 29.0, 42.0)), vec!["istanbul"]);
        assert!(query(&table, BoundingBox::new(0.0, 0.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_touching_edges_match() {
        let mut table = Table::new();
        let square = Geometry::polygon(&[vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]]);
        table.apply(Statement::Insert(row("square", Some(square)))).unwrap();

        assert_eq!(query(&table, BoundingBox::new(1.0, 1.0, 2.0, 2.0)), vec!["square"]);
        assert_eq!(query(&table, BoundingBox::new(-1.0, 0.5, 0.0, 0.6)), vec!["square"]);
        assert!(query(&table, BoundingBox::new(1.000001, 0.0, 2.0, 1.0)).is_empty());
    }

    #[test]
    fn test_line_mbr_matches_between_vertices() {
        let mut table = Table::new();
        table.apply(Statement::Insert(row("line", Some(Geometry::line_string(&[(0.0, 0.0), (10.0, 10.0)]))))).unwrap();
        assert_eq!(query(&table, BoundingBox::new(4.0, 6.0, 5.0, 7.0)), vec!["line"]);
    }

    #[test]
    fn test_inverted_and_nan_boxes_match_nothing() {
        let mut table = Table::new();
        table.apply(Statement::Insert(row("p", Some(Geometry::point(0.5, 0.5))))).unwrap();

        assert!(query(&table, BoundingBox::new(1.0, 1.0, 0.0, 0.0)).is_empty());
        assert!(query(&table, BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_rows_without_geometry_are_not_indexed() {
        let mut table = Table::new();
        table.apply(Statement::Insert(row("none", None))).unwrap();
        table.apply(Statement::Insert(row("empty", Some(Geometry::line_string(&[]))))).unwrap();
        let mut garbage = row("garbage", None);
        garbage.geometry = Some(vec![0x07, 0x01]);
        table.apply(Statement::Insert(garbage)).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.indexed_len(), 0);
        assert!(query(&table, BoundingBox::new(-180.0, -90.0, 180.0, 90.0)).is_empty());
    }

    #[test]
    fn test_duplicate_insert_leaves_table_unchanged() {
        let mut table = Table::new();
        table.apply(Statement::Insert(row("a", Some(Geometry::point(1.0, 1.0))))).unwrap();
        let result = table.apply(Statement::Insert(row("a", Some(Geometry::point(50.0, 50.0)))));

        assert!(matches!(result, Err(FeatureError::DuplicateId(id)) if id == "a"));
        assert_eq!(query(&table, BoundingBox::new(0.0, 0.0, 2.0, 2.0)), vec!["a"]);
        assert!(query(&table, BoundingBox::new(49.0, 49.0, 51.0, 51.0)).is_empty());
    }

    #[test]
    fn test_update_moves_index_entry() {
        let mut table = Table::new();
        table.apply(Statement::Insert(row("a", Some(Geometry::point(1.0, 1.0))))).unwrap();
        assert_eq!(table.apply(Statement::Update(row("a", Some(Geometry::point(50.0, 50.0))))).unwrap(), 1);

        assert!(query(&table, BoundingBox::new(0.0, 0.0, 2.0, 2.0)).is_empty());
        assert_eq!(query(&table, BoundingBox::new(49.0, 49.0, 51.0, 51.0)), vec!["a"]);
        assert_eq!(table.indexed_len(), 1);
    }

    #[test]
    fn test_update_keeps_created_at() {
        let mut table = Table::new();
        let original = row("a", None);
        table.apply(Statement::Insert(original.clone())).unwrap();

        let mut changed = row("a", Some(Geometry::point(2.0, 2.0)));
        changed.created_at = original.created_at + chrono::Duration::days(1);
        table.apply(Statement::Update(changed)).unwrap();

        let stored = table.select(&Statement::SelectById { id: "a".to_string() }).unwrap();
        assert_eq!(stored[0].created_at, original.created_at);
        assert!(stored[0].geometry.is_some());
    }

    #[test]
    fn test_update_and_delete_of_missing_row() {
        let mut table = Table::new();
        assert_eq!(table.apply(Statement::Update(row("ghost", None))).unwrap(), 0);
        assert_eq!(table.apply(Statement::Delete { id: "ghost".to_string() }).unwrap(), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_delete_removes_from_index() {
        let mut table = Table::new();
        table.apply(Statement::Insert(row("a", Some(Geometry::point(1.0, 1.0))))).unwrap();
        assert_eq!(table.apply(Statement::Delete { id: "a".to_string() }).unwrap(), 1);
        assert_eq!(table.indexed_len(), 0);
        assert!(query(&table, BoundingBox::new(0.0, 0.0, 2.0, 2.0)).is_empty());
    }

    #[test]
    fn test_from_rows_bulk_loads_index() {
        let rows = (0..100)
            .map(|i| row(&format!("p{:03}", i), Some(Geometry::point(i as f64, i as f64))))
            .collect();
        let table = Table::from_rows(rows);

        assert_eq!(table.indexed_len(), 100);
        assert_eq!(query(&table, BoundingBox::new(10.0, 10.0, 12.0, 12.0)), vec!["p010", "p011", "p012"]);
    }

    #[test]
    fn test_insert_many_is_all_or_nothing() {
        let mut table = Table::new();
        table.apply(Statement::Insert(row("a", None))).unwrap();

        let clash = vec![row("b", None), row("a", None)];
        assert!(matches!(table.apply(Statement::InsertMany(clash)), Err(FeatureError::DuplicateId(id)) if id == "a"));
        let repeated = vec![row("c", None), row("c", None)];
        assert!(matches!(table.apply(Statement::InsertMany(repeated)), Err(FeatureError::DuplicateId(_))));
        assert_eq!(table.len(), 1);

        let batch = (0..50).map(|i| row(&format!("p{:02}", i), Some(Geometry::point(i as f64, 0.0)))).collect();
        assert_eq!(table.apply(Statement::InsertMany(batch)).unwrap(), 50);
        assert_eq!(table.len(), 51);
        assert_eq!(query(&table, BoundingBox::new(9.5, -1.0, 11.0, 1.0)), vec!["p10", "p11"]);
    }

    #[test]
    fn test_restore_undoes_statements() {
        let mut table = Table::new();
        table.apply(Statement::Insert(row("a", Some(Geometry::point(1.0, 1.0))))).unwrap();
        let before = table.get("a").cloned();

        table.apply(Statement::Update(row("a", Some(Geometry::point(50.0, 50.0))))).unwrap();
        table.restore("a", before);
        assert_eq!(query(&table, BoundingBox::new(0.0, 0.0, 2.0, 2.0)), vec!["a"]);
        assert!(query(&table, BoundingBox::new(49.0, 49.0, 51.0, 51.0)).is_empty());

        table.apply(Statement::Insert(row("b", Some(Geometry::point(5.0, 5.0))))).unwrap();
        table.restore("b", None);
        assert!(table.get("b").is_none());
        assert_eq!(table.indexed_len(), 1);
    }

    #[test]
    fn test_infinite_coordinates_do_not_break_the_index() {
        let mut table = Table::new();
        for i in 0..200 {
            let geometry = match i % 3 {
                0 => Geometry::point(f64::INFINITY, i as f64),
                1 => Geometry::line_string(&[(f64::NEG_INFINITY, 0.0), (f64::INFINITY, 1.0)]),
                _ => Geometry::point(i as f64, i as f64),
            };
            table.apply(Statement::Insert(row(&format!("f{:03}", i), Some(geometry)))).unwrap();
        }

        assert_eq!(table.len(), 200);
        assert_eq!(query(&table, BoundingBox::new(1.5, 1.5, 2.5, 2.5)), vec!["f002"]);

        for i in 0..200 {
            assert_eq!(table.apply(Statement::Delete { id: format!("f{:03}", i) }).unwrap(), 1);
        }
        assert!(table.is_empty());
        assert_eq!(table.indexed_len(), 0);
    }

    #[test]
    fn test_huge_finite_mbrs_are_still_queryable() {
        let mut table = Table::new();
        let span = Geometry::line_string(&[(-f64::MAX, -f64::MAX), (f64::MAX, f64::MAX)]);
        table.apply(Statement::Insert(row("span", Some(span)))).unwrap();
        table.apply(Statement::Insert(row("far", Some(Geometry::point(1e200, 1e200))))).unwrap();
        for i in 0..100 {
            table.apply(Statement::Insert(row(&format!("p{:03}", i), Some(Geometry::point(i as f64, 0.0))))).unwrap();
        }

        assert_eq!(query(&table, BoundingBox::new(0.5, -0.5, 1.5, 0.5)), vec!["p001", "span"]);
        assert_eq!(table.apply(Statement::Delete { id: "span".to_string() }).unwrap(), 1);
        assert_eq!(table.indexed_len(), 101);
        assert_eq!(query(&table, BoundingBox::new(1e199, 1e199, f64::MAX, f64::MAX)), vec!["far", "span"]);
    }

    #[test]
    fn test_select_statements_are_not_mutations() {
        let mut table = Table::new();
        assert!(table.apply(Statement::SelectAll).is_err());
        assert!(table.select(&Statement::Delete { id: "x".to_string() }).is_err());
    }
}
