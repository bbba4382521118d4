//! API route configuration.
//!
//! Routes are grouped by their guard: public, session-gated, admin-gated,
//! and shared-secret-gated (see [`crate::routes::app_router`] for how the
//! guards are attached).

use crate::api::handlers::{
    create_account_handler, create_links_handler, delete_account_handler, delete_links_handler,
    info_handler, legacy_create_handler, legacy_delete_handler, legacy_update_handler,
    list_accounts_handler, list_links_handler, login_handler, logout_handler, register_handler,
    update_account_handler, update_links_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public authentication and information routes.
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account (policy-gated)
/// - `POST /auth/login`    - Start a session
/// - `POST /auth/logout`   - Clear the session cookie
/// - `GET  /info/{alias}`  - Alias metadata without counting a hit
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/info/{alias}", get(info_handler))
}

/// Link management routes, protected by session authentication.
///
/// # Endpoints
///
/// - `GET    /links` - List own links (admins see all)
/// - `POST   /links` - Create redirects (batch-capable, random alias when none given)
/// - `PATCH  /links` - Re-point aliases at a new target
/// - `DELETE /links` - Delete aliases, returning the count removed
pub fn session_routes() -> Router<AppState> {
    Router::new().route(
        "/links",
        get(list_links_handler)
            .post(create_links_handler)
            .patch(update_links_handler)
            .delete(delete_links_handler),
    )
}

/// Account administration routes, protected by admin sessions.
///
/// # Endpoints
///
/// - `GET    /accounts`      - List accounts
/// - `POST   /accounts`      - Create an account
/// - `PATCH  /accounts/{id}` - Update an account (password change rotates sessions)
/// - `DELETE /accounts/{id}` - Delete an account (not your own)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts",
            get(list_accounts_handler).post(create_account_handler),
        )
        .route(
            "/accounts/{id}",
            axum::routing::patch(update_account_handler).delete(delete_account_handler),
        )
}

/// Legacy automation routes, protected by the pre-shared secret.
///
/// # Endpoints
///
/// - `POST /create` - Create ownerless redirects
/// - `POST /update` - Re-point aliases
/// - `POST /delete` - Delete aliases
pub fn legacy_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(legacy_create_handler))
        .route("/update", post(legacy_update_handler))
        .route("/delete", post(legacy_delete_handler))
}
