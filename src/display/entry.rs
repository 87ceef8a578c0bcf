//! Entry display formatting
//!
//! Formats entries for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Entry, EntryStatus, EntryType};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Type")]
    entry_type: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn status_icon(status: EntryStatus) -> &'static str {
    match status {
        EntryStatus::Pending => "…",
        EntryStatus::Settled => "✓",
        EntryStatus::Canceled => "✗",
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

fn row(entry: &Entry, currency: &str) -> EntryRow {
    let value = match (entry.value, entry.entry_type) {
        (Some(v), Some(EntryType::Expense)) => (-v).format_with_symbol(currency),
        (Some(v), _) => v.format_with_symbol(currency),
        (None, _) => "-".into(),
    };

    EntryRow {
        id: opt(entry.id),
        period: match (entry.month, entry.year) {
            (Some(m), Some(y)) => format!("{:02}/{}", m, y),
            _ => "-".into(),
        },
        description: entry.description.clone().unwrap_or_default(),
        entry_type: opt(entry.entry_type),
        value,
        status: format!("{} {}", status_icon(entry.status), entry.status),
    }
}

/// Format a list of entries as a table
pub fn format_entry_list(entries: &[Entry], currency: &str) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let rows: Vec<EntryRow> = entries.iter().map(|e| row(e, currency)).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format a single entry's details
pub fn format_entry_details(entry: &Entry, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry:       {}\n", opt(entry.id)));
    output.push_str(&format!(
        "Description: {}\n",
        entry.description.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!(
        "Period:      {}/{}\n",
        opt(entry.month),
        opt(entry.year)
    ));
    output.push_str(&format!("User:        {}\n", opt(entry.user_id)));
    output.push_str(&format!(
        "Value:       {}\n",
        entry
            .value
            .map(|v| v.format_with_symbol(currency))
            .unwrap_or_else(|| "-".into())
    ));
    output.push_str(&format!("Type:        {}\n", opt(entry.entry_type)));
    output.push_str(&format!("Status:      {}\n", entry.status));
    output.push_str(&format!(
        "Registered:  {}\n",
        entry.registered_at.format("%Y-%m-%d")
    ));

    output
}
