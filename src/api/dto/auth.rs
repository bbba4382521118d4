//! DTOs for registration, login, and session responses.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Account;

/// Compiled regex for username validation.
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").unwrap());

/// Self-registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    #[validate(regex(path = "*USERNAME_REGEX"))]
    pub username: String,

    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub confirm_password: String,

    /// Turnstile challenge token; required only when CAPTCHA is configured.
    pub captcha_token: Option<String>,
}

/// Login request. Accounts authenticate by email.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    /// Turnstile challenge token; required only when CAPTCHA is configured.
    pub captcha_token: Option<String>,
}

/// The authenticated identity returned on register/login.
///
/// Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<&Account> for SessionResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            is_admin: account.is_admin,
        }
    }
}
