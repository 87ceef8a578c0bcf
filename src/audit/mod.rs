//! Audit logging
//!
//! Records create, update and delete operations with before/after snapshots
//! in an append-only JSONL file.
//!
//! - `AuditRecord`: one operation on one entity.
//! - `AuditLogger`: appends records to the log file and reads them back.
//! - `generate_diff`: one-line summary of what changed in an update.

mod diff;
mod logger;
mod record;

pub use diff::generate_diff;
pub use logger::AuditLogger;
pub use record::{AuditRecord, EntityType, Operation};
