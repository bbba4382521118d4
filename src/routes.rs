//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /{alias}`    - Short link redirect (public)
//! - `/api/auth/*`     - Registration, login, logout (public)
//! - `/api/info/*`     - Alias metadata (public)
//! - `/api/links`      - Link management (session cookie required)
//! - `/api/admin/*`    - Account administration (admin session required)
//! - `/api/legacy/*`   - Automation surface (pre-shared secret required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Session cookie, admin session, or shared secret
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::{session, shared_secret, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the fully composed router with its auth guards attached.
///
/// Used directly by in-process HTTP tests; production wraps it with path
/// normalization via [`app_router`].
pub fn router(state: AppState) -> Router {
    let session_router = api::routes::session_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), session::layer),
    );

    let admin_router = api::routes::admin_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), session::admin_layer),
    );

    let legacy_router = api::routes::legacy_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), shared_secret::layer),
    );

    let api_router = api::routes::public_routes()
        .merge(session_router)
        .nest("/admin", admin_router)
        .nest("/legacy", legacy_router);

    Router::new()
        .route("/{alias}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
