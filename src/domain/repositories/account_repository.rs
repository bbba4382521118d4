//! Repository trait for account data access.

use crate::domain::entities::{Account, AccountPatch, NewAccount};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for account storage.
///
/// Usernames and emails are unique across the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryAccountRepository`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Finds an account by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError>;

    /// Finds an account by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Finds an account by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError>;

    /// Inserts a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or email is already
    /// taken and [`AppError::Internal`] on store errors.
    async fn insert(&self, new_account: NewAccount) -> Result<Account, AppError>;

    /// Partially updates an account.
    ///
    /// Only fields present in [`AccountPatch`] are modified. Updating the
    /// password hash rotates `password_changed_at`, which invalidates
    /// session tokens issued before the rotation. Returns the updated row,
    /// or `None` if no account matches the id.
    async fn update(&self, id: i64, patch: AccountPatch) -> Result<Option<Account>, AppError>;

    /// Deletes an account by id.
    ///
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Lists every account, oldest first.
    async fn list(&self) -> Result<Vec<Account>, AppError>;

    /// Counts registered accounts.
    async fn count(&self) -> Result<i64, AppError>;
}
