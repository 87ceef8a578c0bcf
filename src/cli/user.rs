//! User CLI commands
//!
//! Registration, login check, profile and balance.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_balance, format_user_details};
use crate::error::{FinanceError, FinanceResult};
use crate::models::User;
use crate::storage::Storage;

use super::{entry_service, parse_user_id, password_or_prompt, user_service};

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a new user
    Register {
        /// Full name
        name: String,
        /// Email address (must be unique)
        email: String,
        /// Password; prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Check a user's credentials
    Login {
        /// Email address
        email: String,
        /// Password; prompted for when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Show a user's profile
    Show {
        /// User ID
        user: String,
    },
    /// Show a user's settled balance
    Balance {
        /// User ID
        user: String,
    },
}

/// Handle a user command
pub fn handle_user_command(
    storage: &Storage,
    settings: &Settings,
    cmd: UserCommands,
) -> FinanceResult<()> {
    let service = user_service(storage, settings);

    match cmd {
        UserCommands::Register {
            name,
            email,
            password,
        } => {
            let password = password_or_prompt(password)?;
            let user = service.save(User::new(name, email, password))?;

            println!("Registered user: {}", user);
            if let Some(id) = user.id {
                println!("  ID: {}", id);
            }
        }

        UserCommands::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let user = service.authenticate(&email, &password)?;
            println!("Welcome, {}!", user.name);
        }

        UserCommands::Show { user } => {
            let id = parse_user_id(&user)?;
            let found = service
                .find_by_id(id)?
                .ok_or_else(|| FinanceError::user_not_found(&user))?;
            print!("{}", format_user_details(&found));
        }

        UserCommands::Balance { user } => {
            let id = parse_user_id(&user)?;
            let found = service
                .find_by_id(id)?
                .ok_or_else(|| FinanceError::user_not_found(&user))?;

            let balance = entry_service(storage, settings).balance_for_user(id)?;
            print!(
                "{}",
                format_balance(&found, balance, &settings.currency_symbol)
            );
        }
    }

    Ok(())
}
