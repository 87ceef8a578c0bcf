//! In-memory repositories
//!
//! Non-persistent implementations of the repository traits. They also count
//! calls and can be told to fail the next save, which the service tests use
//! to observe exactly how storage was touched.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Entry, EntryFilter, EntryId, User, UserId};

use super::repository::{EntryRepository, UserRepository};
use super::table::{Record, Table};

/// Lock, counters and failure switch shared by both in-memory repositories
#[derive(Debug)]
struct MemoryTable<T: Record> {
    table: RwLock<Table<T>>,
    saves: AtomicUsize,
    deletes: AtomicUsize,
    fail_next_save: AtomicBool,
}

impl<T: Record> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            table: RwLock::new(Table::default()),
            saves: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            fail_next_save: AtomicBool::new(false),
        }
    }
}

impl<T: Record> MemoryTable<T> {
    fn read(&self) -> FinanceResult<RwLockReadGuard<'_, Table<T>>> {
        self.table
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FinanceResult<RwLockWriteGuard<'_, Table<T>>> {
        self.table
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn save(&self, record: T) -> FinanceResult<T> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_next_save.swap(false, Ordering::SeqCst) {
            return Err(FinanceError::Storage("Simulated save failure".into()));
        }
        let (saved, _) = self.write()?.upsert(record);
        Ok(saved)
    }

    fn delete(&self, record: &T) -> FinanceResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = record.raw_id() {
            self.write()?.remove(id);
        }
        Ok(())
    }

    fn find(&self, id: u64) -> FinanceResult<Option<T>> {
        Ok(self.read()?.get(id).cloned())
    }
}

/// In-memory user repository
#[derive(Debug, Default)]
pub struct InMemoryUsers {
    inner: MemoryTable<User>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far, including failed ones
    pub fn save_calls(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.inner.deletes.load(Ordering::SeqCst)
    }

    /// Make the next `save` fail with a storage error without storing anything
    pub fn fail_next_save(&self) {
        self.inner.fail_next_save.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> FinanceResult<usize> {
        Ok(self.inner.read()?.len())
    }

    pub fn is_empty(&self) -> FinanceResult<bool> {
        Ok(self.inner.read()?.is_empty())
    }
}

impl UserRepository for InMemoryUsers {
    fn save(&self, user: User) -> FinanceResult<User> {
        self.inner.save(user)
    }

    fn delete(&self, user: &User) -> FinanceResult<()> {
        self.inner.delete(user)
    }

    fn find_by_id(&self, id: UserId) -> FinanceResult<Option<User>> {
        self.inner.find(id.get())
    }

    fn find_by_email(&self, email: &str) -> FinanceResult<Option<User>> {
        Ok(self
            .inner
            .read()?
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    fn exists_by_email(&self, email: &str) -> FinanceResult<bool> {
        Ok(self.inner.read()?.values().any(|u| u.email == email))
    }
}

/// In-memory entry repository
#[derive(Debug, Default)]
pub struct InMemoryEntries {
    inner: MemoryTable<Entry>,
}

impl InMemoryEntries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far, including failed ones
    pub fn save_calls(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.inner.deletes.load(Ordering::SeqCst)
    }

    /// Make the next `save` fail with a storage error without storing anything
    pub fn fail_next_save(&self) {
        self.inner.fail_next_save.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> FinanceResult<usize> {
        Ok(self.inner.read()?.len())
    }

    pub fn is_empty(&self) -> FinanceResult<bool> {
        Ok(self.inner.read()?.is_empty())
    }
}

impl EntryRepository for InMemoryEntries {
    fn save(&self, entry: Entry) -> FinanceResult<Entry> {
        self.inner.save(entry)
    }

    fn delete(&self, entry: &Entry) -> FinanceResult<()> {
        self.inner.delete(entry)
    }

    fn find_by_id(&self, id: EntryId) -> FinanceResult<Option<Entry>> {
        self.inner.find(id.get())
    }

    fn find_by_filter(&self, filter: &EntryFilter) -> FinanceResult<Vec<Entry>> {
        Ok(self
            .inner
            .read()?
            .values()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }
}
