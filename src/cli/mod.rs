//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod entry;
pub mod user;

pub use audit::handle_audit_command;
pub use entry::{handle_entry_command, EntryCommands};
pub use user::{handle_user_command, UserCommands};

use crate::config::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{EntryId, UserId};
use crate::services::{EntryService, UserService};
use crate::storage::Storage;

/// Build a user service over the file storage, audited if enabled
fn user_service<'a>(storage: &'a Storage, settings: &Settings) -> UserService<'a> {
    let service = UserService::new(&storage.users);
    if settings.audit_enabled {
        service.with_audit(&storage.audit)
    } else {
        service
    }
}

/// Build an entry service over the file storage, audited if enabled
fn entry_service<'a>(storage: &'a Storage, settings: &Settings) -> EntryService<'a> {
    let service = EntryService::new(&storage.entries);
    if settings.audit_enabled {
        service.with_audit(&storage.audit)
    } else {
        service
    }
}

fn parse_user_id(raw: &str) -> FinanceResult<UserId> {
    UserId::parse(raw)
        .map_err(|_| FinanceError::Validation(format!("Invalid user ID: '{}'", raw)))
}

fn parse_entry_id(raw: &str) -> FinanceResult<EntryId> {
    EntryId::parse(raw)
        .map_err(|_| FinanceError::Validation(format!("Invalid entry ID: '{}'", raw)))
}

/// Use the given password or prompt for one with hidden input
fn password_or_prompt(password: Option<String>) -> FinanceResult<String> {
    match password {
        Some(password) => Ok(password),
        None => rpassword::prompt_password("Password: ")
            .map_err(|e| FinanceError::Io(format!("Failed to read password: {}", e))),
    }
}
