//! Entry CLI commands
//!
//! Implements CLI commands for income and expense entries.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_entry_details, format_entry_list};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Entry, EntryFilter, EntryStatus, EntryType, Money};
use crate::storage::Storage;

use super::{entry_service, parse_entry_id, parse_user_id, user_service};

/// Entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record a new entry (starts out pending)
    Add {
        /// Owning user ID
        #[arg(short, long)]
        user: String,
        /// What the money is for
        #[arg(short, long)]
        description: String,
        /// Month (1-12)
        #[arg(short, long)]
        month: u32,
        /// Four-digit year
        #[arg(short, long)]
        year: i32,
        /// Amount, e.g. "1500.00" or "1500,00"
        #[arg(short, long)]
        value: String,
        /// income or expense
        #[arg(short = 't', long = "type")]
        entry_type: String,
    },
    /// Change fields of an existing entry
    Update {
        /// Entry ID
        entry: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        month: Option<u32>,
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short, long)]
        value: Option<String>,
        #[arg(short = 't', long = "type")]
        entry_type: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        entry: String,
    },
    /// Show entry details
    Show {
        /// Entry ID
        entry: String,
    },
    /// List entries matching the given filters
    List {
        #[arg(short, long)]
        user: Option<String>,
        /// Case-insensitive text contained in the description
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        month: Option<u32>,
        #[arg(short, long)]
        year: Option<i32>,
        #[arg(short = 't', long = "type")]
        entry_type: Option<String>,
        /// pending, settled or canceled
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Set an entry's status (pending, settled, canceled)
    Status {
        /// Entry ID
        entry: String,
        /// New status
        status: String,
    },
}

fn parse_value(raw: &str) -> FinanceResult<Money> {
    Money::parse(raw).map_err(|e| {
        FinanceError::Validation(format!(
            "Invalid value: '{}'. Use a format like '1500.00'. Error: {}",
            raw, e
        ))
    })
}

fn parse_type(raw: &str) -> FinanceResult<EntryType> {
    EntryType::parse(raw).ok_or_else(|| {
        FinanceError::Validation(format!(
            "Invalid entry type: '{}'. Valid types: income, expense",
            raw
        ))
    })
}

fn parse_status(raw: &str) -> FinanceResult<EntryStatus> {
    EntryStatus::parse(raw).ok_or_else(|| {
        FinanceError::Validation(format!(
            "Invalid status: '{}'. Valid statuses: pending, settled, canceled",
            raw
        ))
    })
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EntryCommands,
) -> FinanceResult<()> {
    let service = entry_service(storage, settings);
    let currency = settings.currency_symbol.as_str();

    let find = |raw: &str| -> FinanceResult<Entry> {
        service
            .find_by_id(parse_entry_id(raw)?)?
            .ok_or_else(|| FinanceError::entry_not_found(raw))
    };

    match cmd {
        EntryCommands::Add {
            user,
            description,
            month,
            year,
            value,
            entry_type,
        } => {
            let user_id = parse_user_id(&user)?;
            if user_service(storage, settings).find_by_id(user_id)?.is_none() {
                return Err(FinanceError::user_not_found(&user));
            }

            let mut entry = Entry::new();
            entry.description = Some(description);
            entry.month = Some(month);
            entry.year = Some(year);
            entry.user_id = Some(user_id);
            entry.value = Some(parse_value(&value)?);
            entry.entry_type = Some(parse_type(&entry_type)?);

            let saved = service.save(entry)?;
            println!("Recorded entry: {}", saved);
            if let Some(id) = saved.id {
                println!("  ID: {}", id);
            }
        }

        EntryCommands::Update {
            entry,
            description,
            month,
            year,
            value,
            entry_type,
        } => {
            let mut found = find(&entry)?;

            if description.is_none()
                && month.is_none()
                && year.is_none()
                && value.is_none()
                && entry_type.is_none()
            {
                println!("No changes specified.");
                return Ok(());
            }

            if let Some(description) = description {
                found.description = Some(description);
            }
            if let Some(month) = month {
                found.month = Some(month);
            }
            if let Some(year) = year {
                found.year = Some(year);
            }
            if let Some(value) = value {
                found.value = Some(parse_value(&value)?);
            }
            if let Some(entry_type) = entry_type {
                found.entry_type = Some(parse_type(&entry_type)?);
            }

            let updated = service.update(found)?;
            println!("Updated entry: {}", updated);
        }

        EntryCommands::Delete { entry } => {
            let found = find(&entry)?;
            service.delete(&found)?;
            println!("Deleted entry: {}", found);
        }

        EntryCommands::Show { entry } => {
            let found = find(&entry)?;
            print!("{}", format_entry_details(&found, currency));
        }

        EntryCommands::List {
            user,
            description,
            month,
            year,
            entry_type,
            status,
        } => {
            let filter = EntryFilter {
                description,
                month,
                year,
                user_id: user.as_deref().map(parse_user_id).transpose()?,
                entry_type: entry_type.as_deref().map(parse_type).transpose()?,
                status: status.as_deref().map(parse_status).transpose()?,
            };

            let entries = service.search(&filter)?;
            print!("{}", format_entry_list(&entries, currency));
        }

        EntryCommands::Status { entry, status } => {
            let status = parse_status(&status)?;
            let mut found = find(&entry)?;
            service.update_status(&mut found, status)?;
            println!("Entry {} is now {}", entry, found.status);
        }
    }

    Ok(())
}
