//! Ordered collections of [`NodeRecord`]s used as the open and closed
//! sets of a search.

use std::slice;

use gridnav_core::{Cell, NavError};

use crate::record::NodeRecord;

/// Records ordered by ascending [`NodeRecord::cost_so_far`].
///
/// Insertion is stable: a new record goes before the first record with a
/// strictly greater cost, so equal-cost records keep insertion order.
/// Records mutated in place through [`try_get_mut`](Self::try_get_mut)
/// are not reordered.
///
/// Lookup is linear in the list length. Lists hold at most one record per
/// cell when driven by the search loop; the list itself does not enforce
/// uniqueness.
#[derive(Clone, Debug, Default)]
pub struct PriorityList {
    records: Vec<NodeRecord>,
}

impl PriorityList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` in cost order.
    pub fn add(&mut self, record: NodeRecord) {
        let index = self
            .records
            .iter()
            .position(|r| record.cost_so_far < r.cost_so_far)
            .unwrap_or(self.records.len());
        self.records.insert(index, record);
    }

    /// The front record, if any.
    pub fn lowest_cost_so_far(&self) -> Option<&NodeRecord> {
        self.records.first()
    }

    /// Remove the record for `record.node`.
    ///
    /// Returns `Err(NavError::RecordNotFound)` if no record for that cell
    /// is present.
    pub fn remove(&mut self, record: &NodeRecord) -> Result<NodeRecord, NavError> {
        let index = self
            .index_of(&record.node)
            .ok_or(NavError::RecordNotFound { cell: record.node })?;
        Ok(self.records.remove(index))
    }

    /// The record for `cell`.
    ///
    /// Returns `Err(NavError::CellNotFound)` if absent.
    pub fn get(&self, cell: &Cell) -> Result<&NodeRecord, NavError> {
        self.try_get(cell)
            .ok_or(NavError::CellNotFound { cell: *cell })
    }

    /// The record for `cell`, if present.
    pub fn try_get(&self, cell: &Cell) -> Option<&NodeRecord> {
        self.records.iter().find(|r| r.node == *cell)
    }

    /// Mutable access to the record for `cell`. Changing its cost does not
    /// move it.
    pub fn try_get_mut(&mut self, cell: &Cell) -> Option<&mut NodeRecord> {
        self.records.iter_mut().find(|r| r.node == *cell)
    }

    /// Whether a record for `cell` is present.
    pub fn contains(&self, cell: &Cell) -> bool {
        self.index_of(cell).is_some()
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in list order.
    pub fn iter(&self) -> slice::Iter<'_, NodeRecord> {
        self.records.iter()
    }

    fn index_of(&self, cell: &Cell) -> Option<usize> {
        self.records.iter().position(|r| r.node == *cell)
    }
}

impl<'a> IntoIterator for &'a PriorityList {
    type Item = &'a NodeRecord;
    type IntoIter = slice::Iter<'a, NodeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
