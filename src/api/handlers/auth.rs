//! Handlers for registration, login, and logout.

use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{LoginRequest, RegisterRequest, SessionResponse};
use crate::domain::entities::NewAccount;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account and starts a session.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Policy
///
/// The first account can always register and becomes the administrator.
/// After that, self-registration is only available when
/// `ALLOW_SELF_REGISTRATION` is set. A configured CAPTCHA must be solved.
pub async fn register_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    payload.validate()?;

    if payload.password != payload.confirm_password {
        return Err(AppError::bad_request("Passwords do not match", json!({})));
    }

    let first_account = state.accounts.count().await? == 0;

    if !first_account && !state.allow_self_registration {
        return Err(AppError::forbidden(
            "Self-registration is disabled",
            json!({}),
        ));
    }

    if !state
        .captcha
        .verify(payload.captcha_token.as_deref(), None)
        .await
    {
        return Err(AppError::bad_request(
            "Please complete the CAPTCHA verification",
            json!({}),
        ));
    }

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
            is_admin: first_account,
        })
        .await?;

    tracing::info!(username = %account.username, admin = account.is_admin, "account registered");

    let cookie = state.sessions.issue(&account)?;

    Ok((jar.add(cookie), Json(SessionResponse::from(&account))))
}

/// Authenticates by email and password and starts a session.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// The same "Invalid email or password" response covers both unknown
/// emails and wrong passwords.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    payload.validate()?;

    if !state
        .captcha
        .verify(payload.captcha_token.as_deref(), None)
        .await
    {
        return Err(AppError::bad_request(
            "Please complete the CAPTCHA verification",
            json!({}),
        ));
    }

    let invalid_credentials =
        || AppError::unauthorized("Invalid email or password", json!({}));

    let Some(account) = state.accounts.find_by_email(&payload.email).await? else {
        return Err(invalid_credentials());
    };

    if !state
        .hasher
        .verify(account.password_hash.clone(), payload.password)
        .await
    {
        return Err(invalid_credentials());
    }

    let cookie = state.sessions.issue(&account)?;

    Ok((jar.add(cookie), Json(SessionResponse::from(&account))))
}

/// Ends the session by clearing the cookie.
///
/// # Endpoint
///
/// `POST /api/auth/logout`
pub async fn logout_handler(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<serde_json::Value>) {
    (
        jar.add(state.sessions.invalidate()),
        Json(json!({ "success": true })),
    )
}
