//! Repository traits: the persistence boundary of the services
//!
//! Services only ever talk to storage through these traits, so any backend
//! (the JSON files, the in-memory tables, a database) can be swapped in.

use crate::error::FinanceResult;
use crate::models::{Entry, EntryFilter, EntryId, User, UserId};

/// Persistence for users
pub trait UserRepository {
    /// Insert or replace a user, assigning an ID if it has none
    fn save(&self, user: User) -> FinanceResult<User>;

    /// Remove a user; removing an unknown user is not an error
    fn delete(&self, user: &User) -> FinanceResult<()>;

    fn find_by_id(&self, id: UserId) -> FinanceResult<Option<User>>;

    /// Exact, case-sensitive email lookup
    fn find_by_email(&self, email: &str) -> FinanceResult<Option<User>>;

    fn exists_by_email(&self, email: &str) -> FinanceResult<bool>;
}

/// Persistence for financial entries
pub trait EntryRepository {
    /// Insert or replace an entry, assigning an ID if it has none
    fn save(&self, entry: Entry) -> FinanceResult<Entry>;

    /// Remove an entry; removing an unknown entry is not an error
    fn delete(&self, entry: &Entry) -> FinanceResult<()>;

    fn find_by_id(&self, id: EntryId) -> FinanceResult<Option<Entry>>;

    /// All entries matching the filter, in ID order
    fn find_by_filter(&self, filter: &EntryFilter) -> FinanceResult<Vec<Entry>>;
}
