//! In-memory record table with sequential ID assignment
//!
//! Shared by the in-memory and JSON-file repositories. IDs start at 1 and are
//! never reused, even after deletes.

use std::collections::BTreeMap;

use crate::models::{Entry, EntryId, User, UserId};

/// A record whose ID is assigned by storage
pub trait Record: Clone {
    fn raw_id(&self) -> Option<u64>;

    fn assign_id(&mut self, raw: u64);
}

impl Record for User {
    fn raw_id(&self) -> Option<u64> {
        self.id.map(|id| id.get())
    }

    fn assign_id(&mut self, raw: u64) {
        self.id = Some(UserId::new(raw));
    }
}

impl Record for Entry {
    fn raw_id(&self) -> Option<u64> {
        self.id.map(|id| id.get())
    }

    fn assign_id(&mut self, raw: u64) {
        self.id = Some(EntryId::new(raw));
    }
}

/// Records keyed by ID, plus the next ID to hand out
#[derive(Debug, Clone)]
pub struct Table<T: Record> {
    next_id: u64,
    rows: BTreeMap<u64, T>,
}

impl<T: Record> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T: Record> Table<T> {
    /// Rebuild a table from persisted rows, keeping IDs monotonic
    pub fn from_rows(next_id: u64, rows: Vec<T>) -> Self {
        let mut table = Self {
            next_id: next_id.max(1),
            rows: BTreeMap::new(),
        };
        for row in rows {
            table.upsert(row);
        }
        table
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Insert or replace a record, assigning an ID if it has none
    ///
    /// Returns the stored record and whatever it replaced.
    pub fn upsert(&mut self, mut record: T) -> (T, Option<T>) {
        let id = match record.raw_id() {
            Some(id) => id,
            None => {
                let id = self.next_id;
                record.assign_id(id);
                id
            }
        };

        self.next_id = self.next_id.max(id.saturating_add(1));
        let previous = self.rows.insert(id, record.clone());
        (record, previous)
    }

    /// Undo an `upsert` given the record it replaced
    pub fn restore(&mut self, id: u64, previous: Option<T>, next_id: u64) {
        match previous {
            Some(row) => {
                self.rows.insert(id, row);
            }
            None => {
                self.rows.remove(&id);
            }
        }
        self.next_id = next_id;
    }

    pub fn remove(&mut self, id: u64) -> Option<T> {
        self.rows.remove(&id)
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
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
    fn test_ids_assigned_sequentially() {
        let mut table = Table::default();
        let (a, _) = table.upsert(User::new("A", "a@email.com", "x"));
        let (b, _) = table.upsert(User::new("B", "b@email.com", "x"));

        assert_eq!(a.id, Some(UserId::new(1)));
        assert_eq!(b.id, Some(UserId::new(2)));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut table = Table::default();
        let (a, _) = table.upsert(User::new("A", "a@email.com", "x"));
        table.remove(a.id.unwrap().get());

        let (b, _) = table.upsert(User::new("B", "b@email.com", "x"));
        assert_eq!(b.id, Some(UserId::new(2)));
        assert!(!table.is_empty());
    }

    #[test]
    fn test_explicit_id_advances_counter() {
        let mut table = Table::default();
        table.upsert(User::new("A", "a@email.com", "x").with_id(UserId::new(10)));
        let (b, _) = table.upsert(User::new("B", "b@email.com", "x"));
        assert_eq!(b.id, Some(UserId::new(11)));
    }

    #[test]
    fn test_restore_undoes_insert_and_replace() {
        let mut table = Table::default();
        let (a, _) = table.upsert(User::new("A", "a@email.com", "x"));
        let id = a.id.unwrap().get();

        let next_id = table.next_id();
        let mut changed = a.clone();
        changed.name = "Changed".into();
        let (_, previous) = table.upsert(changed);
        table.restore(id, previous, next_id);
        assert_eq!(table.get(id).unwrap().name, "A");

        let next_id = table.next_id();
        let (c, previous) = table.upsert(User::new("C", "c@email.com", "x"));
        table.restore(c.id.unwrap().get(), previous, next_id);
        assert_eq!(table.len(), 1);
        assert_eq!(table.next_id(), next_id);
    }

    #[test]
    fn test_from_rows_repairs_next_id() {
        let rows = vec![User::new("A", "a@email.com", "x").with_id(UserId::new(5))];
        let table = Table::from_rows(1, rows);
        assert_eq!(table.next_id(), 6);
    }

    #[test]
    fn test_largest_id_does_not_overflow_counter() {
        let rows = vec![User::new("A", "a@email.com", "x").with_id(UserId::new(u64::MAX))];
        let table = Table::from_rows(1, rows);
        assert_eq!(table.next_id(), u64::MAX);
        assert_eq!(table.len(), 1);
    }
}
