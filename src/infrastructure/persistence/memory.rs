//! In-memory repository implementations backed by DashMap.
//!
//! Used by integration tests and database-less ephemeral runs. DashMap's
//! sharded locks allow concurrent reads and writes to different buckets
//! without a global lock.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Account, AccountPatch, NewAccount, NewRedirect, Redirect};
use crate::domain::repositories::{AccountRepository, RedirectRepository};
use crate::error::AppError;

/// In-memory implementation of [`RedirectRepository`], keyed by alias.
#[derive(Default)]
pub struct InMemoryRedirectRepository {
    entries: DashMap<String, Redirect>,
    next_id: AtomicI64,
}

impl InMemoryRedirectRepository {
    /// Creates an empty in-memory repository.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl RedirectRepository for InMemoryRedirectRepository {
    async fn find_by_alias(&self, alias: &str) -> Result<Option<Redirect>, AppError> {
        Ok(self.entries.get(alias).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, new_redirect: NewRedirect) -> Result<Redirect, AppError> {
        if self.entries.contains_key(&new_redirect.alias) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "alias": new_redirect.alias }),
            ));
        }

        let redirect = Redirect {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            alias: new_redirect.alias.clone(),
            target: new_redirect.target,
            hits: 0,
            owner_id: new_redirect.owner_id,
            created_at: Utc::now(),
        };

        self.entries.insert(new_redirect.alias, redirect.clone());
        Ok(redirect)
    }

    async fn update_target(
        &self,
        alias: &str,
        target: &str,
    ) -> Result<Option<Redirect>, AppError> {
        let Some(mut entry) = self.entries.get_mut(alias) else {
            return Ok(None);
        };

        entry.target = target.to_string();
        Ok(Some(entry.value().clone()))
    }

    async fn increment_hits(&self, alias: &str) -> Result<Option<i64>, AppError> {
        let Some(mut entry) = self.entries.get_mut(alias) else {
            return Ok(None);
        };

        entry.hits += 1;
        Ok(Some(entry.hits))
    }

    async fn delete(&self, alias: &str) -> Result<bool, AppError> {
        Ok(self.entries.remove(alias).is_some())
    }

    async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Redirect>, AppError> {
        let mut redirects: Vec<Redirect> = self
            .entries
            .iter()
            .filter(|entry| entry.owner_id == Some(owner_id))
            .map(|entry| entry.value().clone())
            .collect();

        redirects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(redirects)
    }

    async fn list_all(&self) -> Result<Vec<Redirect>, AppError> {
        let mut redirects: Vec<Redirect> =
            self.entries.iter().map(|entry| entry.value().clone()).collect();

        redirects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(redirects)
    }
}

/// In-memory implementation of [`AccountRepository`], keyed by id.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    entries: DashMap<i64, Account>,
    next_id: AtomicI64,
}

impl InMemoryAccountRepository {
    /// Creates an empty in-memory repository.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .entries
            .iter()
            .find(|entry| entry.username == username)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError> {
        Ok(self
            .entries
            .iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AppError> {
        Ok(self.entries.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let username_taken = self
            .entries
            .iter()
            .any(|entry| entry.username == new_account.username);
        if username_taken {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "username": new_account.username }),
            ));
        }

        let email_taken = self
            .entries
            .iter()
            .any(|entry| entry.email == new_account.email);
        if email_taken {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "email": new_account.email }),
            ));
        }

        let now = Utc::now();
        let account = Account {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: new_account.username,
            email: new_account.email,
            password_hash: new_account.password_hash,
            is_admin: new_account.is_admin,
            password_changed_at: now,
            created_at: now,
        };

        self.entries.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, id: i64, patch: AccountPatch) -> Result<Option<Account>, AppError> {
        let Some(mut entry) = self.entries.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(username) = patch.username {
            entry.username = username;
        }
        if let Some(email) = patch.email {
            entry.email = email;
        }
        if let Some(password_hash) = patch.password_hash {
            entry.password_hash = password_hash;
            entry.password_changed_at = Utc::now();
        }
        if let Some(is_admin) = patch.is_admin {
            entry.is_admin = is_admin;
        }

        Ok(Some(entry.value().clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.entries.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let mut accounts: Vec<Account> =
            self.entries.iter().map(|entry| entry.value().clone()).collect();

        accounts.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.entries.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_redirect(alias: &str, owner_id: Option<i64>) -> NewRedirect {
        NewRedirect {
            alias: alias.to_string(),
            target: "https://example.com/".to_string(),
            owner_id,
        }
    }

    fn new_account(username: &str, email: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "pbkdf2:1000:AAAA".to_string(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn insert_and_find_redirect() {
        let repo = InMemoryRedirectRepository::new();

        let inserted = repo.insert(new_redirect("abc12345", None)).await.unwrap();
        assert_eq!(inserted.hits, 0);

        let found = repo.find_by_alias("abc12345").await.unwrap().unwrap();
        assert_eq!(found, inserted);
    }

    #[tokio::test]
    async fn insert_duplicate_alias_conflicts() {
        let repo = InMemoryRedirectRepository::new();

        repo.insert(new_redirect("abc12345", None)).await.unwrap();
        let err = repo.insert(new_redirect("abc12345", None)).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn increment_hits_counts_up() {
        let repo = InMemoryRedirectRepository::new();
        repo.insert(new_redirect("abc12345", None)).await.unwrap();

        assert_eq!(repo.increment_hits("abc12345").await.unwrap(), Some(1));
        assert_eq!(repo.increment_hits("abc12345").await.unwrap(), Some(2));
        assert_eq!(repo.increment_hits("ghost").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_redirect() {
        let repo = InMemoryRedirectRepository::new();
        repo.insert(new_redirect("abc12345", None)).await.unwrap();

        assert!(repo.delete("abc12345").await.unwrap());
        assert!(!repo.delete("abc12345").await.unwrap());
    }

    #[tokio::test]
    async fn list_for_owner_is_scoped_and_newest_first() {
        let repo = InMemoryRedirectRepository::new();

        repo.insert(new_redirect("first", Some(1))).await.unwrap();
        repo.insert(new_redirect("second", Some(1))).await.unwrap();
        repo.insert(new_redirect("other", Some(2))).await.unwrap();

        let owned = repo.list_for_owner(1).await.unwrap();

        assert_eq!(owned.len(), 2);
        assert_eq!(owned[0].alias, "second");
        assert_eq!(owned[1].alias, "first");
    }

    #[tokio::test]
    async fn account_uniqueness() {
        let repo = InMemoryAccountRepository::new();

        repo.insert(new_account("trung", "trung@example.com"))
            .await
            .unwrap();

        let err = repo
            .insert(new_account("trung", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));

        let err = repo
            .insert(new_account("other", "trung@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn password_patch_rotates_timestamp() {
        let repo = InMemoryAccountRepository::new();
        let account = repo
            .insert(new_account("trung", "trung@example.com"))
            .await
            .unwrap();

        // Email-only patch leaves the rotation timestamp alone.
        let patched = repo
            .update(
                account.id,
                AccountPatch {
                    email: Some("new@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched.password_changed_at, account.password_changed_at);

        let rotated = repo
            .update(
                account.id,
                AccountPatch {
                    password_hash: Some("pbkdf2:1000:BBBB".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(rotated.password_changed_at >= account.password_changed_at);
        assert_eq!(rotated.password_hash, "pbkdf2:1000:BBBB");
    }

    #[tokio::test]
    async fn count_tracks_inserts_and_deletes() {
        let repo = InMemoryAccountRepository::new();
        assert_eq!(repo.count().await.unwrap(), 0);

        let account = repo
            .insert(new_account("trung", "trung@example.com"))
            .await
            .unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete(account.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
