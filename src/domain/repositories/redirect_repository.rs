//! Repository trait for redirect data access.

use crate::domain::entities::{NewRedirect, Redirect};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for redirect storage.
///
/// Keyed by alias, which is globally unique across the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRedirectRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryRedirectRepository`] - in-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectRepository: Send + Sync {
    /// Finds a redirect by its alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Redirect>, AppError>;

    /// Inserts a new redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the alias is already taken and
    /// [`AppError::Internal`] on store errors.
    async fn insert(&self, new_redirect: NewRedirect) -> Result<Redirect, AppError>;

    /// Re-points an existing redirect at a new target.
    ///
    /// Returns the updated row, or `None` if no redirect matches the alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn update_target(&self, alias: &str, target: &str)
    -> Result<Option<Redirect>, AppError>;

    /// Atomically increments the hit counter for an alias.
    ///
    /// Performed as a single store-side increment so concurrent resolutions
    /// never lose updates. Returns the new count, or `None` if the alias
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn increment_hits(&self, alias: &str) -> Result<Option<i64>, AppError>;

    /// Deletes a redirect by alias.
    ///
    /// Returns `true` if a row was deleted, `false` if the alias was absent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn delete(&self, alias: &str) -> Result<bool, AppError>;

    /// Lists redirects owned by an account, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Redirect>, AppError>;

    /// Lists every redirect, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn list_all(&self) -> Result<Vec<Redirect>, AppError>;
}
