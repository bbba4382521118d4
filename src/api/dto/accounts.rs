//! DTOs for administrative account management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Account;

/// An account as exposed through the admin API. Excludes the hash.
#[derive(Debug, Serialize)]
pub struct AccountItem {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub password_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountItem {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            is_admin: account.is_admin,
            password_changed_at: account.password_changed_at,
            created_at: account.created_at,
        }
    }
}

/// Admin request to create an account.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAccountRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[serde(default)]
    pub is_admin: bool,
}

/// Admin request to partially update an account.
///
/// Absent fields are left unchanged; a new password rotates
/// `password_changed_at` and invalidates previously issued sessions.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    pub is_admin: Option<bool>,
}
