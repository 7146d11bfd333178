use std::collections::HashMap;

use crate::cell::CellId;

/// A cell's recorded state once it has diverged from its generated default.
///
/// Distinct from "no override": absence from the [`OverrideStore`] means the
/// generator's decision still applies, while `Empty` means a spawned token was
/// taken and the cell must stay empty on every revisit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue {
    Empty,
    Token(u32),
}

impl CellValue {
    pub fn token(self) -> Option<u32> {
        match self {
            CellValue::Empty => None,
            CellValue::Token(value) => Some(value),
        }
    }
}

impl From<Option<u32>> for CellValue {
    fn from(value: Option<u32>) -> Self {
        match value {
            None => CellValue::Empty,
            Some(v) => CellValue::Token(v),
        }
    }
}

/// Sparse record of every cell the player has ever changed.
///
/// Size is bounded by the number of cells interacted with, never by the number
/// of cells viewed: the materializer reads from here but never writes.
#[derive(Debug, Clone, Default)]
pub struct OverrideStore {
    entries: HashMap<CellId, CellValue>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, cell: CellId) -> Option<CellValue> {
        self.entries.get(&cell).copied()
    }

    /// Idempotent upsert; the latest write for a cell wins.
    pub fn set(&mut self, cell: CellId, value: CellValue) {
        self.entries.insert(cell, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate all override records; order is unspecified. Used by the
    /// persistence gateway, which sorts before writing.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, CellValue)> + '_ {
        self.entries.iter().map(|(cell, value)| (*cell, *value))
    }

    /// Drop every record. The only removal path; individual overrides are
    /// permanent for the life of a world.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<(CellId, CellValue)> for OverrideStore {
    fn from_iter<T: IntoIterator<Item = (CellId, CellValue)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_prior_value() {
        let mut store = OverrideStore::new();
        let cell = CellId::new(2, 1);
        store.set(cell, CellValue::Token(1));
        store.set(cell, CellValue::Empty);
        assert_eq!(store.get(cell), Some(CellValue::Empty));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn untouched_cells_have_no_footprint() {
        let store = OverrideStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get(CellId::new(100, -100)), None);
    }

    #[test]
    fn clear_removes_everything() {
        let mut store = OverrideStore::new();
        store.set(CellId::new(0, 0), CellValue::Token(4));
        store.set(CellId::new(1, 1), CellValue::Empty);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn empty_and_token_are_distinct_from_absence() {
        let mut store = OverrideStore::new();
        store.set(CellId::new(0, 0), CellValue::Empty);
        assert_eq!(store.get(CellId::new(0, 0)), Some(CellValue::Empty));
        assert_eq!(store.get(CellId::new(0, 1)), None);
        assert_eq!(CellValue::Empty.token(), None);
        assert_eq!(CellValue::Token(8).token(), Some(8));
    }
}
