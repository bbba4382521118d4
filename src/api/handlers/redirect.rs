//! Handler for the public short link redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Resolves an alias and redirects to its target.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Request Flow
///
/// 1. Resolve through the directory (cache first, store on miss)
/// 2. On success, the stored hit counter is incremented atomically
/// 3. Return 307 Temporary Redirect to the target
///
/// Unknown aliases redirect to the home page rather than erroring; the
/// not-found result is cached so repeat probes of the same dead alias
/// never reach the store.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    match state.directory.resolve(&alias).await? {
        Some(redirect) => Ok(Redirect::temporary(&redirect.target)),
        None => Ok(Redirect::to("/")),
    }
}
