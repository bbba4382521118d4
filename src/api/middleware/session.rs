//! Session cookie authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde_json::json;

use crate::application::services::AuthCheck;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticates requests carrying the `session` cookie.
///
/// # Authentication Flow
///
/// 1. Extract the `session` cookie from the request
/// 2. Verify the token signature and expiry
/// 3. Re-check the account against the store: it must still exist and the
///    token must postdate the current password rotation
/// 4. On success, insert the re-derived
///    [`crate::application::services::SessionClaims`] into request
///    extensions and continue
///
/// A missing or invalid session redirects to `/login` (the browser-facing
/// outcome of `AuthRequired`) rather than returning 401.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(req.headers());

    match st
        .sessions
        .require_authenticated(&jar, st.accounts.as_ref())
        .await?
    {
        AuthCheck::Authorized(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        AuthCheck::AuthRequired => Ok(Redirect::to("/login").into_response()),
        AuthCheck::Forbidden => Err(AppError::forbidden("Forbidden", json!({}))),
    }
}

/// Like [`layer`], but additionally requires admin privilege.
///
/// Valid non-admin sessions receive `403 Forbidden`.
pub async fn admin_layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let jar = CookieJar::from_headers(req.headers());

    match st
        .sessions
        .require_admin(&jar, st.accounts.as_ref())
        .await?
    {
        AuthCheck::Authorized(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        AuthCheck::AuthRequired => Ok(Redirect::to("/login").into_response()),
        AuthCheck::Forbidden => Err(AppError::forbidden(
            "Forbidden: Admin access required",
            json!({}),
        )),
    }
}
