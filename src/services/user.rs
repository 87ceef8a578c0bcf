//! User service
//!
//! Registration with email uniqueness, authentication by email and password,
//! and lookup by ID.

use crate::audit::{AuditLogger, AuditRecord, EntityType};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{User, UserId};
use crate::storage::UserRepository;

use super::record_audit;

pub const USER_NOT_FOUND: &str = "User not found for the given email!";
pub const INVALID_PASSWORD: &str = "Invalid password!";
pub const EMAIL_TAKEN: &str = "A user with this email is already registered.";

/// Service for user management
pub struct UserService<'a> {
    users: &'a dyn UserRepository,
    audit: Option<&'a AuditLogger>,
}

impl<'a> UserService<'a> {
    pub fn new(users: &'a dyn UserRepository) -> Self {
        Self { users, audit: None }
    }

    /// Also record successful registrations in the audit log
    pub fn with_audit(mut self, audit: &'a AuditLogger) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Check credentials and return the matching user
    ///
    /// The password is compared exactly as stored.
    pub fn authenticate(&self, email: &str, password: &str) -> FinanceResult<User> {
        let user = self
            .users
            .find_by_email(email)?
            .ok_or_else(|| FinanceError::Authentication(USER_NOT_FOUND.into()))?;

        if user.password != password {
            return Err(FinanceError::Authentication(INVALID_PASSWORD.into()));
        }

        tracing::info!(user = ?user.id, "user authenticated");
        Ok(user)
    }

    /// Register a user after checking that the email is free
    ///
    /// The user is stored even if the audit record cannot be written.
    pub fn save(&self, user: User) -> FinanceResult<User> {
        self.validate_email(&user.email)?;

        let saved = self.users.save(user)?;

        record_audit(self.audit, || {
            AuditRecord::create(
                EntityType::User,
                saved.id.map(|id| id.to_string()).unwrap_or_default(),
                Some(saved.email.clone()),
                &saved.redacted(),
            )
        });

        tracing::info!(user = ?saved.id, "user registered");
        Ok(saved)
    }

    /// Fail if any user is already registered with this email
    pub fn validate_email(&self, email: &str) -> FinanceResult<()> {
        if self.users.exists_by_email(email)? {
            return Err(FinanceError::BusinessRule(EMAIL_TAKEN.into()));
        }
        Ok(())
    }

    pub fn find_by_id(&self, id: UserId) -> FinanceResult<Option<User>> {
        self.users.find_by_id(id)
    }
}
