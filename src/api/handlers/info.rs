//! Handler for public alias information.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::links::LinkItem;
use crate::error::AppError;
use crate::state::AppState;

/// Returns redirect metadata for an alias without counting a hit.
///
/// # Endpoint
///
/// `GET /api/info/{alias}`
///
/// Uses the same cache-backed lookup as the mutation precondition checks,
/// so inspecting an alias does not disturb its hit count.
pub async fn info_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkItem>, AppError> {
    let redirect = state
        .directory
        .lookup(&alias)
        .await?
        .ok_or_else(|| AppError::not_found("Alias not found", json!({ "alias": alias })))?;

    Ok(Json(redirect.into()))
}
