//! Handlers for the legacy shared-secret automation surface.
//!
//! Mirrors the session-gated link mutations but is guarded by a single
//! pre-shared secret (see
//! [`crate::api::middleware::shared_secret`]) instead of per-account
//! sessions. Links created here carry no owner.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::links::{
    BatchSummary, CreateLinksRequest, DeleteLinksRequest, DeleteLinksResponse,
    MutateLinksResponse, UpdateLinksRequest,
};
use crate::error::AppError;
use crate::state::AppState;

/// Creates ownerless redirects for automation clients.
///
/// # Endpoint
///
/// `POST /api/legacy/create`
pub async fn legacy_create_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinksRequest>,
) -> Result<Json<MutateLinksResponse>, AppError> {
    payload.validate()?;

    let aliases = if payload.aliases.is_empty() {
        vec![state.generator.generate().await?]
    } else {
        payload.aliases
    };

    let created = state.directory.create(&payload.url, &aliases, None).await?;

    Ok(Json(MutateLinksResponse {
        summary: BatchSummary {
            requested: aliases.len(),
            succeeded: created.len(),
        },
        items: created.into_iter().map(Into::into).collect(),
    }))
}

/// Re-points aliases for automation clients.
///
/// # Endpoint
///
/// `POST /api/legacy/update`
pub async fn legacy_update_handler(
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinksRequest>,
) -> Result<Json<MutateLinksResponse>, AppError> {
    payload.validate()?;

    let updated = state
        .directory
        .update(&payload.url, &payload.aliases)
        .await?;

    Ok(Json(MutateLinksResponse {
        summary: BatchSummary {
            requested: payload.aliases.len(),
            succeeded: updated.len(),
        },
        items: updated.into_iter().map(Into::into).collect(),
    }))
}

/// Deletes aliases for automation clients.
///
/// # Endpoint
///
/// `POST /api/legacy/delete`
pub async fn legacy_delete_handler(
    State(state): State<AppState>,
    Json(payload): Json<DeleteLinksRequest>,
) -> Result<Json<DeleteLinksResponse>, AppError> {
    let deleted = state.directory.delete(&payload.aliases).await?;

    Ok(Json(DeleteLinksResponse { deleted }))
}
