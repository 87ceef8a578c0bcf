//! Entry repository for JSON storage
//!
//! Manages loading and saving financial entries to entries.json

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FinanceResult;
use crate::models::{Entry, EntryFilter, EntryId};

use super::file_table::{DataFile, FileTable};
use super::repository::EntryRepository;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EntryData {
    #[serde(default)]
    next_id: u64,
    entries: Vec<Entry>,
}

impl DataFile for EntryData {
    type Row = Entry;

    fn into_parts(self) -> (u64, Vec<Entry>) {
        (self.next_id, self.entries)
    }

    fn from_parts(next_id: u64, entries: Vec<Entry>) -> Self {
        Self { next_id, entries }
    }
}

/// Repository for entry persistence
pub struct EntryFileRepository {
    table: FileTable<EntryData>,
}

impl EntryFileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: FileTable::new(path),
        }
    }

    pub fn load(&self) -> FinanceResult<()> {
        self.table.load()
    }

    pub fn save_all(&self) -> FinanceResult<()> {
        self.table.save()
    }

    pub fn count(&self) -> FinanceResult<usize> {
        Ok(self.table.read()?.len())
    }
}

impl EntryRepository for EntryFileRepository {
    fn save(&self, entry: Entry) -> FinanceResult<Entry> {
        self.table.upsert(entry)
    }

    fn delete(&self, entry: &Entry) -> FinanceResult<()> {
        if let Some(id) = entry.id {
            self.table.remove(id.get())?;
        }
        Ok(())
    }

    fn find_by_id(&self, id: EntryId) -> FinanceResult<Option<Entry>> {
        self.table.get(id.get())
    }

    fn find_by_filter(&self, filter: &EntryFilter) -> FinanceResult<Vec<Entry>> {
        Ok(self
            .table
            .read()?
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryStatus, EntryType, Money, UserId};
    use tempfile::TempDir;

    fn groceries(user: u64, month: u32) -> Entry {
        Entry::with_details(
            "Groceries",
            month,
            2024,
            UserId::new(user),
            Money::from_cents(25000),
            EntryType::Expense,
        )
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.json");

        let repo = EntryFileRepository::new(path.clone());
        repo.load().unwrap();
        let saved = repo.save(groceries(1, 5)).unwrap();

        let reopened = EntryFileRepository::new(path);
        reopened.load().unwrap();
        assert_eq!(reopened.find_by_id(saved.id.unwrap()).unwrap(), Some(saved));
    }

    #[test]
    fn test_update_replaces_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let repo = EntryFileRepository::new(temp_dir.path().join("entries.json"));

        let mut saved = repo.save(groceries(1, 5)).unwrap();
        saved.status = EntryStatus::Settled;
        repo.save(saved.clone()).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        let found = repo.find_by_id(saved.id.unwrap()).unwrap().unwrap();
        assert_eq!(found.status, EntryStatus::Settled);
    }

    #[test]
    fn test_filter_by_user_and_month() {
        let temp_dir = TempDir::new().unwrap();
        let repo = EntryFileRepository::new(temp_dir.path().join("entries.json"));

        repo.save(groceries(1, 5)).unwrap();
        repo.save(groceries(1, 6)).unwrap();
        repo.save(groceries(2, 5)).unwrap();

        let found = repo
            .find_by_filter(&EntryFilter::new().with_user(UserId::new(1)).with_month(5))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, Some(EntryId::new(1)));
    }

    #[test]
    fn test_delete_unknown_entry_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let repo = EntryFileRepository::new(temp_dir.path().join("entries.json"));

        let mut ghost = groceries(1, 5);
        ghost.id = Some(EntryId::new(99));
        repo.delete(&ghost).unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }
}
