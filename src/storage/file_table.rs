//! JSON-file-backed record table
//!
//! Keeps a [`Table`] in memory and rewrites the whole file after every
//! change. A change that cannot be written is rolled back, so callers never
//! observe state that is not on disk.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinanceError, FinanceResult};

use super::file_io::{read_json, write_json_atomic};
use super::table::{Record, Table};

/// On-disk layout of one data file
pub trait DataFile: Serialize + DeserializeOwned + Default {
    type Row: Record;

    fn into_parts(self) -> (u64, Vec<Self::Row>);

    fn from_parts(next_id: u64, rows: Vec<Self::Row>) -> Self;
}

/// A table persisted to a single JSON file
pub struct FileTable<F: DataFile> {
    path: PathBuf,
    table: RwLock<Table<F::Row>>,
}

impl<F: DataFile> FileTable<F> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: RwLock::new(Table::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> FinanceResult<RwLockReadGuard<'_, Table<F::Row>>> {
        self.table
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FinanceResult<RwLockWriteGuard<'_, Table<F::Row>>> {
        self.table
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Replace the in-memory table with the file contents
    pub fn load(&self) -> FinanceResult<()> {
        let (next_id, rows) = read_json::<F, _>(&self.path)?.into_parts();
        let loaded = Table::from_rows(next_id, rows);
        tracing::debug!(path = %self.path.display(), rows = loaded.len(), "loaded data file");
        *self.write()? = loaded;
        Ok(())
    }

    /// Write the current table to disk
    pub fn save(&self) -> FinanceResult<()> {
        let table = self.read()?;
        persist::<F>(&self.path, &table)
    }

    /// Insert or replace a record and persist; rolled back if the write fails
    pub fn upsert(&self, record: F::Row) -> FinanceResult<F::Row> {
        let mut table = self.write()?;
        let next_id = table.next_id();
        let (saved, previous) = table.upsert(record);

        if let Err(e) = persist::<F>(&self.path, &table) {
            if let Some(id) = saved.raw_id() {
                table.restore(id, previous, next_id);
            }
            return Err(e);
        }

        Ok(saved)
    }

    /// Remove a record by ID and persist; rolled back if the write fails
    pub fn remove(&self, id: u64) -> FinanceResult<bool> {
        let mut table = self.write()?;
        let next_id = table.next_id();

        let Some(removed) = table.remove(id) else {
            return Ok(false);
        };

        if let Err(e) = persist::<F>(&self.path, &table) {
            table.restore(id, Some(removed), next_id);
            return Err(e);
        }

        Ok(true)
    }

    pub fn get(&self, id: u64) -> FinanceResult<Option<F::Row>> {
        Ok(self.read()?.get(id).cloned())
    }
}

fn persist<F: DataFile>(path: &Path, table: &Table<F::Row>) -> FinanceResult<()> {
    let data = F::from_parts(table.next_id(), table.values().cloned().collect());
    write_json_atomic(path, &data)?;
    tracing::debug!(path = %path.display(), rows = table.len(), "persisted data file");
    Ok(())
}
