// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Id-keyed row collection with a monotonically increasing id counter.

use std::collections::BTreeMap;

/// One entity collection.
///
/// Rows are keyed by id; because ids only ever grow, iteration order is
/// insertion order. Ids are never reused, even after a row is removed.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    /// Allocate the next id, build the row with it and store it.
    pub fn insert_with(&mut self, build: impl FnOnce(u64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    pub fn get(&self, id: u64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Rows matching `predicate`, in insertion order.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|r| predicate(r)).cloned().collect()
    }

    /// Merge into an existing row in place. `None` if the id is absent.
    pub fn update_with(&mut self, id: u64, apply: impl FnOnce(&mut T)) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        apply(row);
        Some(row.clone())
    }

    /// Like [`Table::update_with`], but the merge may fail.
    ///
    /// The merge runs on a copy, so a failed merge leaves the stored row
    /// untouched.
    pub fn try_update_with<E>(
        &mut self,
        id: u64,
        apply: impl FnOnce(&mut T) -> Result<(), E>,
    ) -> Result<Option<T>, E> {
        let Some(current) = self.rows.get(&id) else {
            return Ok(None);
        };
        let mut updated = current.clone();
        apply(&mut updated)?;
        self.rows.insert(id, updated.clone());
        Ok(Some(updated))
    }

    /// Returns whether a row was actually removed.
    pub fn remove(&mut self, id: u64) -> bool {
        self.rows.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_and_not_reused() {
        let mut table: Table<(u64, &str)> = Table::default();
        let a = table.insert_with(|id| (id, "a"));
        let b = table.insert_with(|id| (id, "b"));
        assert_eq!((a.0, b.0), (1, 2));

        assert!(table.remove(2));
        assert!(!table.remove(2));

        let c = table.insert_with(|id| (id, "c"));
        assert_eq!(c.0, 3);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_failed_update_leaves_row_untouched() {
        let mut table: Table<u32> = Table::default();
        table.insert_with(|_| 10);

        let result: Result<Option<u32>, &str> = table.try_update_with(1, |v| {
            *v = 99;
            Err("rejected")
        });
        assert_eq!(result, Err("rejected"));
        assert_eq!(table.get(1), Some(10));
    }

    #[test]
    fn test_update_missing_row() {
        let mut table: Table<u32> = Table::default();
        assert_eq!(table.update_with(5, |v| *v += 1), None);
        assert!(table.is_empty());
    }
}
