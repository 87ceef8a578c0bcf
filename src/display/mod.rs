//! Display formatting for terminal output
//!
//! Turns models into tables and detail views for the CLI.

pub mod entry;
pub mod user;

pub use entry::{format_entry_details, format_entry_list};
pub use user::{format_balance, format_user_details};
