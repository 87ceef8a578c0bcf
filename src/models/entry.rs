//! Entry model
//!
//! A single income or expense record for a month/year, owned by a user.
//! Entries move between pending, settled and canceled without restriction.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{EntryId, UserId};
use super::money::Money;

/// Whether an entry brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    /// Parse entry type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// Lifecycle state of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    #[default]
    Pending,
    Settled,
    Canceled,
}

impl EntryStatus {
    /// Parse status from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "settled" => Some(Self::Settled),
            "canceled" | "cancelled" => Some(Self::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Settled => write!(f, "Settled"),
            Self::Canceled => write!(f, "Canceled"),
        }
    }
}

/// A financial entry
///
/// Every field checked by [`Entry::validate`] is optional so that partially
/// filled records can be represented and rejected with a precise message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Assigned by the repository on first save
    pub id: Option<EntryId>,

    pub description: Option<String>,

    /// 1 through 12
    pub month: Option<u32>,

    pub year: Option<i32>,

    /// Owning user
    pub user_id: Option<UserId>,

    /// Strictly positive; the direction comes from `entry_type`
    pub value: Option<Money>,

    pub entry_type: Option<EntryType>,

    #[serde(default)]
    pub status: EntryStatus,

    /// Day the entry was first recorded
    pub registered_at: NaiveDate,
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

impl Entry {
    /// Create an empty, unsaved entry dated today
    pub fn new() -> Self {
        Self {
            id: None,
            description: None,
            month: None,
            year: None,
            user_id: None,
            value: None,
            entry_type: None,
            status: EntryStatus::Pending,
            registered_at: Local::now().date_naive(),
        }
    }

    /// Create an entry with every required field filled in
    pub fn with_details(
        description: impl Into<String>,
        month: u32,
        year: i32,
        user_id: UserId,
        value: Money,
        entry_type: EntryType,
    ) -> Self {
        Self {
            description: Some(description.into()),
            month: Some(month),
            year: Some(year),
            user_id: Some(user_id),
            value: Some(value),
            entry_type: Some(entry_type),
            ..Self::new()
        }
    }

    /// Signed contribution to a balance: income adds, expense subtracts
    pub fn signed_value(&self) -> Money {
        let value = self.value.unwrap_or_default();
        match self.entry_type {
            Some(EntryType::Income) => value,
            Some(EntryType::Expense) => -value,
            None => Money::zero(),
        }
    }

    /// Check the fields in a fixed order, reporting only the first failure
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        match &self.description {
            Some(d) if !d.trim().is_empty() => {}
            _ => return Err(EntryValidationError::Description),
        }

        match self.month {
            Some(m) if (1..=12).contains(&m) => {}
            _ => return Err(EntryValidationError::Month),
        }

        match self.year {
            Some(y) if (1000..=9999).contains(&y) => {}
            _ => return Err(EntryValidationError::Year),
        }

        if self.user_id.is_none() {
            return Err(EntryValidationError::User);
        }

        match self.value {
            Some(v) if v.is_positive() => {}
            _ => return Err(EntryValidationError::Value),
        }

        if self.entry_type.is_none() {
            return Err(EntryValidationError::Type);
        }

        Ok(())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:02}/{})",
            self.description.as_deref().unwrap_or("(no description)"),
            self.month.unwrap_or_default(),
            self.year.unwrap_or_default()
        )
    }
}

/// Validation errors for entries, in check order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    Description,
    Month,
    Year,
    User,
    Value,
    Type,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Description => write!(f, "Enter a valid Description!"),
            Self::Month => write!(f, "Enter a valid Month!"),
            Self::Year => write!(f, "Enter a valid Year!"),
            Self::User => write!(f, "Enter a User!"),
            Self::Value => write!(f, "Enter a valid Value!"),
            Self::Type => write!(f, "Enter an Entry type!"),
        }
    }
}

impl std::error::Error for EntryValidationError {}

/// Query object for entry searches
///
/// Unset fields match everything. The description matches as a
/// case-insensitive substring; every other field matches exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    pub description: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub user_id: Option<UserId>,
    pub entry_type: Option<EntryType>,
    pub status: Option<EntryStatus>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Check whether an entry satisfies every set constraint
    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(needle) = &self.description {
            let needle = needle.to_lowercase();
            let found = entry
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }

        (self.month.is_none() || self.month == entry.month)
            && (self.year.is_none() || self.year == entry.year)
            && (self.user_id.is_none() || self.user_id == entry.user_id)
            && (self.entry_type.is_none() || self.entry_type == entry.entry_type)
            && self.status.map_or(true, |s| s == entry.status)
    }
}
