//! Account entity for authenticated link management.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `password_hash` carries the tagged `pbkdf2:<iterations>:<base64>`
/// encoding produced by the credential hasher; it must never be exposed
/// outside the credential path (API DTOs exclude it).
/// `password_changed_at` is rotated whenever the password changes and is
/// what invalidates session tokens issued before the rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub password_changed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
}

/// Partial update for an existing account.
///
/// `None` fields are left unchanged. Setting `password_hash` rotates
/// `password_changed_at` at the repository layer.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_admin: Option<bool>,
}

impl AccountPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.is_admin.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch() {
        assert!(AccountPatch::default().is_empty());
    }

    #[test]
    fn patch_with_password_is_not_empty() {
        let patch = AccountPatch {
            password_hash: Some("pbkdf2:100000:abcd".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
