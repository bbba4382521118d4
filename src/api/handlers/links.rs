//! Handlers for session-gated link management.

use axum::{Extension, Json, extract::State};
use validator::Validate;

use crate::api::dto::links::{
    BatchSummary, CreateLinksRequest, DeleteLinksRequest, DeleteLinksResponse, LinksListResponse,
    MutateLinksResponse, UpdateLinksRequest,
};
use crate::application::services::SessionClaims;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links; administrators see every link.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// Ordered newest first, with aggregate link and hit counters.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
) -> Result<Json<LinksListResponse>, AppError> {
    let redirects = if claims.admin {
        state.directory.list_all().await?
    } else {
        state.directory.list_for_owner(claims.sub).await?
    };

    Ok(Json(LinksListResponse::from_redirects(redirects)))
}

/// Creates a redirect under one or more aliases owned by the caller.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// When no alias is supplied, a collision-free random alias is generated.
/// The whole call fails if any requested alias is taken or the target is
/// invalid; individual insert failures within an accepted batch are
/// skipped and reflected in the summary.
pub async fn create_links_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<SessionClaims>,
    Json(payload): Json<CreateLinksRequest>,
) -> Result<Json<MutateLinksResponse>, AppError> {
    payload.validate()?;

    let aliases = if payload.aliases.is_empty() {
        vec![state.generator.generate().await?]
    } else {
        payload.aliases
    };

    let created = state
        .directory
        .create(&payload.url, &aliases, Some(claims.sub))
        .await?;

    Ok(Json(MutateLinksResponse {
        summary: BatchSummary {
            requested: aliases.len(),
            succeeded: created.len(),
        },
        items: created.into_iter().map(Into::into).collect(),
    }))
}

/// Re-points existing aliases at a new target.
///
/// # Endpoint
///
/// `PATCH /api/links`
pub async fn update_links_handler(
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

/// Deletes aliases, silently skipping those that do not exist.
///
/// # Endpoint
///
/// `DELETE /api/links`
///
/// Returns the count actually deleted; 0 is a success.
pub async fn delete_links_handler(
    State(state): State<AppState>,
    Json(payload): Json<DeleteLinksRequest>,
) -> Result<Json<DeleteLinksResponse>, AppError> {
    let deleted = state.directory.delete(&payload.aliases).await?;

    Ok(Json(DeleteLinksResponse { deleted }))
}
