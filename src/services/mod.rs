//! Service layer for the finance tracker
//!
//! The service layer provides business logic on top of the repository
//! traits: input validation, authentication and status transitions.

pub mod entry;
pub mod user;

pub use entry::EntryService;
pub use user::UserService;

use crate::audit::{AuditLogger, AuditRecord};

/// Append to the audit log after a change has been committed
///
/// The change already happened, so a failed write is only warned about.
fn record_audit(audit: Option<&AuditLogger>, record: impl FnOnce() -> AuditRecord) {
    let Some(audit) = audit else {
        return;
    };

    let record = record();
    if let Err(e) = audit.log(&record) {
        tracing::warn!(
            error = %e,
            operation = %record.operation,
            entity = %record.entity_id,
            "failed to write audit record"
        );
    }
}
