//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod accounts;
pub mod auth;
pub mod info;
pub mod legacy;
pub mod links;
pub mod redirect;

pub use accounts::{
    create_account_handler, delete_account_handler, list_accounts_handler, update_account_handler,
};
pub use auth::{login_handler, logout_handler, register_handler};
pub use info::info_handler;
pub use legacy::{legacy_create_handler, legacy_delete_handler, legacy_update_handler};
pub use links::{
    create_links_handler, delete_links_handler, list_links_handler, update_links_handler,
};
pub use redirect::redirect_handler;
