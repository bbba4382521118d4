//! Handlers for administrative account management.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::accounts::{AccountItem, CreateAccountRequest, UpdateAccountRequest};
use crate::application::services::SessionClaims;
use crate::domain::entities::{AccountPatch, NewAccount};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every account.
///
/// # Endpoint
///
/// `GET /api/admin/accounts`
pub async fn list_accounts_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AccountItem>>, AppError> {
    let accounts = state.accounts.list().await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// Creates an account on behalf of an administrator.
///
/// # Endpoint
///
/// `POST /api/admin/accounts`
pub async fn create_account_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<Json<AccountItem>, AppError> {
    payload.validate()?;

    if state
        .accounts
        .find_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::conflict(
            "Username already taken",
            json!({ "username": payload.username }),
        ));
    }

    if state
        .accounts
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::conflict(
            "Email already registered",
            json!({ "email": payload.email }),
        ));
    }

    let password_hash = state.hasher.hash(payload.password).await?;

    let account = state
        .accounts
        .insert(NewAccount {
            username: payload.username,
            email: payload.email,
            password_hash,
            is_admin: payload.is_admin,
        })
        .await?;

    Ok(Json(account.into()))
}

/// Partially updates an account.
///
/// # Endpoint
///
/// `PATCH /api/admin/accounts/{id}`
///
/// A password change rotates `password_changed_at`, invalidating every
/// session issued before the rotation.
pub async fn update_account_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Json<AccountItem>, AppError> {
    payload.validate()?;

    let password_hash = match payload.password {
        Some(password) => Some(state.hasher.hash(password).await?),
        None => None,
    };

    let patch = AccountPatch {
        username: payload.username,
        email: payload.email,
        password_hash,
        is_admin: payload.is_admin,
    };

    if patch.is_empty() {
        return Err(AppError::bad_request("Nothing to update", json!({})));
    }

    let account = state
        .accounts
        .update(id, patch)
        .await?
        .ok_or_else(|| AppError::not_found("Account not found", json!({ "id": id })))?;

    Ok(Json(account.into()))
}

/// Deletes an account.
///
/// # Endpoint
///
/// `DELETE /api/admin/accounts/{id}`
///
/// Administrators cannot delete their own account.
pub async fn delete_account_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    if id == claims.sub {
        return Err(AppError::bad_request(
            "You cannot delete yourself",
            json!({ "id": id }),
        ));
    }

    if !state.accounts.delete(id).await? {
        return Err(AppError::not_found(
            "Account not found",
            json!({ "id": id }),
        ));
    }

    Ok(Json(json!({ "success": true })))
}
