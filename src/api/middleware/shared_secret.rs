//! Shared-secret authentication middleware for the legacy surface.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Authenticates automation requests using a single pre-shared secret.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <shared secret>
/// ```
///
/// The secret is verified against the `SHARED_SECRET_HASH` configuration
/// value via the credential hasher, independent of account sessions.
/// When no hash is configured, the legacy surface is closed entirely.
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Shared-secret access is not configured
/// - The Authorization header is missing or malformed
/// - The presented secret does not verify against the configured hash
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected_hash) = st.shared_secret_hash.clone() else {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Shared-secret access is not configured" }),
        ));
    };

    let (mut parts, body) = req.into_parts();

    let AuthBearer(secret) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Authorization header is missing or invalid" }),
            )
        })?;

    let req = Request::from_parts(parts, body);

    if !st.hasher.verify(expected_hash, secret).await {
        return Err(AppError::unauthorized(
            "Unauthorized",
            json!({ "reason": "Invalid shared secret" }),
        ));
    }

    Ok(next.run(req).await)
}
