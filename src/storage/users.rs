//! User repository for JSON storage
//!
//! Manages loading and saving users to users.json

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::FinanceResult;
use crate::models::{User, UserId};

use super::file_table::{DataFile, FileTable};
use super::repository::UserRepository;

/// Serializable user data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserData {
    #[serde(default)]
    next_id: u64,
    users: Vec<User>,
}

impl DataFile for UserData {
    type Row = User;

    fn into_parts(self) -> (u64, Vec<User>) {
        (self.next_id, self.users)
    }

    fn from_parts(next_id: u64, users: Vec<User>) -> Self {
        Self { next_id, users }
    }
}

/// Repository for user persistence
pub struct UserFileRepository {
    table: FileTable<UserData>,
}

impl UserFileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            table: FileTable::new(path),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> FinanceResult<()> {
        self.table.load()
    }

    /// Save users to disk
    pub fn save_all(&self) -> FinanceResult<()> {
        self.table.save()
    }

    pub fn count(&self) -> FinanceResult<usize> {
        Ok(self.table.read()?.len())
    }
}

impl UserRepository for UserFileRepository {
    fn save(&self, user: User) -> FinanceResult<User> {
        self.table.upsert(user)
    }

    fn delete(&self, user: &User) -> FinanceResult<()> {
        if let Some(id) = user.id {
            self.table.remove(id.get())?;
        }
        Ok(())
    }

    fn find_by_id(&self, id: UserId) -> FinanceResult<Option<User>> {
        self.table.get(id.get())
    }

    fn find_by_email(&self, email: &str) -> FinanceResult<Option<User>> {
        Ok(self
            .table
            .read()?
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    fn exists_by_email(&self, email: &str) -> FinanceResult<bool> {
        Ok(self.table.read()?.values().any(|u| u.email == email))
    }
}
