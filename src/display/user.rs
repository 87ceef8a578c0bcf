//! User display formatting

use crate::models::{Money, User};

/// Format a user's profile; the password is never shown
pub fn format_user_details(user: &User) -> String {
    let id = user
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "(unsaved)".into());

    format!("User:  {}\nName:  {}\nEmail: {}\n", id, user.name, user.email)
}

/// Format a user's settled balance
pub fn format_balance(user: &User, balance: Money, currency: &str) -> String {
    format!(
        "Settled balance for {}: {}\n",
        user.name,
        balance.format_with_symbol(currency)
    )
}
