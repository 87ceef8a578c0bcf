//! Entry service
//!
//! Lifecycle management of financial entries: validation, save, update,
//! delete, search and status changes.
//!
//! Updating or deleting an entry that was never saved is a caller bug, not a
//! business error, so those calls panic instead of returning `Err`.

use crate::audit::{AuditLogger, AuditRecord, EntityType};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Entry, EntryFilter, EntryId, EntryStatus, Money, UserId};
use crate::storage::EntryRepository;

use super::record_audit;

/// Service for entry management
pub struct EntryService<'a> {
    entries: &'a dyn EntryRepository,
    audit: Option<&'a AuditLogger>,
}

impl<'a> EntryService<'a> {
    pub fn new(entries: &'a dyn EntryRepository) -> Self {
        Self {
            entries,
            audit: None,
        }
    }

    /// Also record every change in the audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Validate and store a new entry; it always starts out pending
    ///
    /// Audit failures are logged and do not undo the save.
    pub fn save(&self, mut entry: Entry) -> FinanceResult<Entry> {
        self.validate(&entry)?;

        entry.status = EntryStatus::Pending;
        let saved = self.entries.save(entry)?;

        record_audit(self.audit, || {
            AuditRecord::create(
                EntityType::Entry,
                saved.id.map(|id| id.to_string()).unwrap_or_default(),
                saved.description.clone(),
                &saved,
            )
        });

        tracing::debug!(entry = ?saved.id, "entry saved");
        Ok(saved)
    }

    /// Validate and store changes to a saved entry
    ///
    /// The repository upserts, so an ID it does not hold is stored as given
    /// and audited as an update with no previous state.
    ///
    /// # Panics
    ///
    /// Panics if the entry has no ID.
    pub fn update(&self, entry: Entry) -> FinanceResult<Entry> {
        let id = require_id(&entry, "update");
        self.validate(&entry)?;

        let before = match self.audit {
            Some(_) => self.entries.find_by_id(id)?,
            None => None,
        };

        let saved = self.entries.save(entry)?;

        record_audit(self.audit, || {
            AuditRecord::update(
                EntityType::Entry,
                id.to_string(),
                saved.description.clone(),
                before.as_ref(),
                &saved,
            )
        });

        tracing::debug!(entry = %id, "entry updated");
        Ok(saved)
    }

    /// Remove a saved entry
    ///
    /// # Panics
    ///
    /// Panics if the entry has no ID.
    pub fn delete(&self, entry: &Entry) -> FinanceResult<()> {
        let id = require_id(entry, "delete");

        self.entries.delete(entry)?;

        record_audit(self.audit, || {
            AuditRecord::delete(
                EntityType::Entry,
                id.to_string(),
                entry.description.clone(),
                entry,
            )
        });

        tracing::debug!(entry = %id, "entry deleted");
        Ok(())
    }

    /// All entries matching the filter, in storage order
    pub fn search(&self, filter: &EntryFilter) -> FinanceResult<Vec<Entry>> {
        self.entries.find_by_filter(filter)
    }

    /// Overwrite the status and persist it through [`EntryService::update`]
    ///
    /// Any status may follow any other.
    ///
    /// # Panics
    ///
    /// Panics if the entry has no ID.
    pub fn update_status(&self, entry: &mut Entry, status: EntryStatus) -> FinanceResult<Entry> {
        entry.status = status;
        self.update(entry.clone())
    }

    pub fn find_by_id(&self, id: EntryId) -> FinanceResult<Option<Entry>> {
        self.entries.find_by_id(id)
    }

    /// Check the entry's fields, failing with the first problem found
    pub fn validate(&self, entry: &Entry) -> FinanceResult<()> {
        entry
            .validate()
            .map_err(|e| FinanceError::BusinessRule(e.to_string()))
    }

    /// Net of a user's settled entries: income minus expenses
    pub fn balance_for_user(&self, user_id: UserId) -> FinanceResult<Money> {
        let settled = self.search(
            &EntryFilter::new()
                .with_user(user_id)
                .with_status(EntryStatus::Settled),
        )?;

        Ok(settled.iter().map(Entry::signed_value).sum())
    }
}

fn require_id(entry: &Entry, operation: &str) -> EntryId {
    match entry.id {
        Some(id) => id,
        None => panic!("cannot {} an entry that has not been saved", operation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryType, User};
    use crate::storage::InMemoryEntries;
    use std::panic::{catch_unwind, AssertUnwindSafe};
    use tempfile::TempDir;

    fn create_entry() -> Entry {
        Entry::with_details(
            "Salário",
            1,
            2019,
            UserId::new(1),
            Money::from_cents(1000),
            EntryType::Income,
        )
    }

    fn stored(repo: &InMemoryEntries) -> Entry {
        repo.save(create_entry()).unwrap()
    }

    fn assert_rule(result: FinanceResult<()>, message: &str) {
        match result {
            Err(FinanceError::BusinessRule(m)) => assert_eq!(m, message),
            other => panic!("expected business rule error {:?}, got {:?}", message, other),
        }
    }

    #[test]
    fn test_save_entry() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);

        let saved = service.save(create_entry()).unwrap();

        assert_eq!(saved.id, Some(EntryId::new(1)));
        assert_eq!(saved.status, EntryStatus::Pending);
        assert_eq!(repo.save_calls(), 1);
    }

    #[test]
    fn test_save_forces_pending_status() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);

        let mut entry = create_entry();
        entry.status = EntryStatus::Settled;

        assert_eq!(service.save(entry).unwrap().status, EntryStatus::Pending);
    }

    #[test]
    fn test_save_skips_storage_when_invalid() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);

        let mut entry = create_entry();
        entry.value = None;

        assert_rule(service.save(entry).map(|_| ()), "Enter a valid Value!");
        assert_eq!(repo.save_calls(), 0);
    }

    #[test]
    fn test_update_entry() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);
        let mut entry = stored(&repo);

        entry.description = Some("Bônus".into());
        let updated = service.update(entry).unwrap();

        assert_eq!(updated.description.as_deref(), Some("Bônus"));
        assert_eq!(repo.save_calls(), 2);
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    #[should_panic(expected = "cannot update an entry that has not been saved")]
    fn test_update_unsaved_entry_panics() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);
        let _ = service.update(create_entry());
    }

    #[test]
    fn test_update_unsaved_entry_never_touches_storage() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);

        let result = catch_unwind(AssertUnwindSafe(|| service.update(create_entry())));

        assert!(result.is_err());
        assert_eq!(repo.save_calls(), 0);
    }

    #[test]
    fn test_update_checks_id_before_validating() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);

        let result = catch_unwind(AssertUnwindSafe(|| service.update(Entry::new())));
        assert!(result.is_err());
    }

    #[test]
    fn test_delete_entry() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);
        let entry = stored(&repo);

        service.delete(&entry).unwrap();

        assert_eq!(repo.delete_calls(), 1);
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_delete_unsaved_entry_never_touches_storage() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);

        let result = catch_unwind(AssertUnwindSafe(|| service.delete(&create_entry())));

        assert!(result.is_err());
        assert_eq!(repo.delete_calls(), 0);
    }

    #[test]
    fn test_search_entries() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);
        let entry = stored(&repo);

        let found = service
            .search(&EntryFilter::new().with_description("salá"))
            .unwrap();

        assert_eq!(found, vec![entry]);
        assert!(service
            .search(&EntryFilter::new().with_year(2020))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_update_status() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);
        let mut entry = stored(&repo);
        let saves_before = repo.save_calls();

        service
            .update_status(&mut entry, EntryStatus::Settled)
            .unwrap();

        assert_eq!(entry.status, EntryStatus::Settled);
        assert_eq!(repo.save_calls(), saves_before + 1);
        let persisted = repo.find_by_id(entry.id.unwrap()).unwrap().unwrap();
        assert_eq!(persisted.status, EntryStatus::Settled);
    }

    #[test]
    fn test_update_status_allows_any_transition() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);
        let mut entry = stored(&repo);

        for status in [
            EntryStatus::Canceled,
            EntryStatus::Pending,
            EntryStatus::Settled,
            EntryStatus::Settled,
        ] {
            service.update_status(&mut entry, status).unwrap();
            assert_eq!(entry.status, status);
        }
    }

    #[test]
    fn test_find_by_id() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);
        let entry = stored(&repo);

        assert!(service.find_by_id(entry.id.unwrap()).unwrap().is_some());
        assert!(service.find_by_id(EntryId::new(99)).unwrap().is_none());
    }

    #[test]
    fn test_validation_messages_in_order() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);
        let mut entry = Entry::new();

        assert_rule(service.validate(&entry), "Enter a valid Description!");

        entry.description = Some(String::new());
        assert_rule(service.validate(&entry), "Enter a valid Description!");

        entry.description = Some("Salário".into());
        assert_rule(service.validate(&entry), "Enter a valid Month!");

        entry.month = Some(1);
        assert_rule(service.validate(&entry), "Enter a valid Year!");

        entry.year = Some(1997);
        assert_rule(service.validate(&entry), "Enter a User!");

        let owner = User::new("nome", "email@gmail.com", "senha").with_id(UserId::new(1));
        entry.user_id = owner.id;
        assert_rule(service.validate(&entry), "Enter a valid Value!");

        entry.value = Some(Money::from_units_cents(10, 0));
        assert_rule(service.validate(&entry), "Enter an Entry type!");

        entry.entry_type = Some(EntryType::Income);
        service.validate(&entry).unwrap();
    }

    #[test]
    fn test_earlier_failures_win() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);

        let mut entry = create_entry();
        entry.month = Some(13);
        entry.value = Some(Money::zero());
        assert_rule(service.validate(&entry), "Enter a valid Month!");
    }

    #[test]
    fn test_balance_counts_only_settled_entries() {
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo);
        let user = UserId::new(1);

        let mut salary = service.save(create_entry()).unwrap();
        service
            .update_status(&mut salary, EntryStatus::Settled)
            .unwrap();

        let mut rent = service
            .save(Entry::with_details(
                "Rent",
                1,
                2019,
                user,
                Money::from_cents(400),
                EntryType::Expense,
            ))
            .unwrap();
        service
            .update_status(&mut rent, EntryStatus::Settled)
            .unwrap();

        // Pending and canceled entries do not count
        service.save(create_entry()).unwrap();
        let mut canceled = service.save(create_entry()).unwrap();
        service
            .update_status(&mut canceled, EntryStatus::Canceled)
            .unwrap();

        assert_eq!(service.balance_for_user(user).unwrap().cents(), 600);
        assert!(service.balance_for_user(UserId::new(2)).unwrap().is_zero());
    }

    #[test]
    fn test_changes_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let audit = AuditLogger::new(temp_dir.path().join("audit.log"));
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo).with_audit(&audit);

        let mut entry = service.save(create_entry()).unwrap();
        service
            .update_status(&mut entry, EntryStatus::Settled)
            .unwrap();
        service.delete(&entry).unwrap();

        let records = audit.read_all().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].operation, crate::audit::Operation::Create);
        assert_eq!(records[1].operation, crate::audit::Operation::Update);
        assert_eq!(
            records[1].diff_summary.as_deref(),
            Some("status: \"pending\" -> \"settled\"")
        );
        assert_eq!(records[2].operation, crate::audit::Operation::Delete);
        assert_eq!(records[2].entity_id, "ent-1");
    }

    #[test]
    fn test_update_of_unknown_id_is_audited_as_update() {
        let temp_dir = TempDir::new().unwrap();
        let audit = AuditLogger::new(temp_dir.path().join("audit.log"));
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo).with_audit(&audit);

        let mut entry = create_entry();
        entry.id = Some(EntryId::new(7));
        service.update(entry).unwrap();

        let records = audit.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operation, crate::audit::Operation::Update);
        assert!(records[0].before.is_none());
        assert_eq!(records[0].entity_id, "ent-7");
    }

    #[test]
    fn test_changes_survive_audit_failure() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let audit = AuditLogger::new(temp_dir.path().to_path_buf());
        let repo = InMemoryEntries::new();
        let service = EntryService::new(&repo).with_audit(&audit);

        let mut entry = service.save(create_entry()).unwrap();
        let id = entry.id.unwrap();
        assert_eq!(repo.find_by_id(id).unwrap(), Some(entry.clone()));

        service
            .update_status(&mut entry, EntryStatus::Settled)
            .unwrap();
        let persisted = repo.find_by_id(id).unwrap().unwrap();
        assert_eq!(persisted.status, EntryStatus::Settled);

        service.delete(&entry).unwrap();
        assert!(repo.is_empty().unwrap());
    }
}
