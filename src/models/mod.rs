//! Core data models for the finance tracker
//!
//! This module contains the data structures that represent the domain:
//! users, financial entries and the money amounts they carry.

pub mod entry;
pub mod ids;
pub mod money;
pub mod user;

pub use entry::{Entry, EntryFilter, EntryStatus, EntryType, EntryValidationError};
pub use ids::{EntryId, UserId};
pub use money::Money;
pub use user::{RedactedUser, User};
