//! Finance Tracker - personal finance tracking backend
//!
//! This library tracks users and their financial entries: income and
//! expenses for a given month, each pending, settled or canceled.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (users, entries, money)
//! - `storage`: Repository traits with in-memory and JSON file backends
//! - `services`: Business logic layer (validation, authentication)
//! - `audit`: Audit logging system
//! - `display`, `cli`: Terminal front end
//!
//! # Example
//!
//! ```rust
//! use finance_tracker::models::{Entry, EntryType, Money, User};
//! use finance_tracker::services::{EntryService, UserService};
//! use finance_tracker::storage::{InMemoryEntries, InMemoryUsers};
//!
//! let users = InMemoryUsers::new();
//! let entries = InMemoryEntries::new();
//!
//! let user = UserService::new(&users)
//!     .save(User::new("Maria", "maria@email.com", "secret"))
//!     .unwrap();
//!
//! let entry = Entry::with_details(
//!     "Salary",
//!     1,
//!     2024,
//!     user.id.unwrap(),
//!     Money::from_cents(500000),
//!     EntryType::Income,
//! );
//! let saved = EntryService::new(&entries).save(entry).unwrap();
//! assert!(saved.id.is_some());
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FinanceError, FinanceResult};
