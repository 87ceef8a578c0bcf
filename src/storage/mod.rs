//! Storage layer for the finance tracker
//!
//! Services depend only on the [`UserRepository`] and [`EntryRepository`]
//! traits. Two backends implement them:
//!
//! - `memory`: plain in-memory tables, used by tests and embedders
//! - `users` / `entries`: JSON files with atomic writes, used by the CLI

pub mod entries;
pub mod file_io;
pub mod file_table;
pub mod memory;
pub mod repository;
pub mod table;
pub mod users;

pub use entries::EntryFileRepository;
pub use memory::{InMemoryEntries, InMemoryUsers};
pub use repository::{EntryRepository, UserRepository};
pub use users::UserFileRepository;

use crate::audit::AuditLogger;
use crate::config::paths::FinancePaths;
use crate::error::FinanceError;

/// Main storage coordinator that owns the file repositories and audit log
pub struct Storage {
    paths: FinancePaths,
    pub users: UserFileRepository,
    pub entries: EntryFileRepository,
    pub audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserFileRepository::new(paths.users_file()),
            entries: EntryFileRepository::new(paths.entries_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), FinanceError> {
        self.users.load()?;
        self.entries.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), FinanceError> {
        self.users.save_all()?;
        self.entries.save_all()?;
        Ok(())
    }
}
