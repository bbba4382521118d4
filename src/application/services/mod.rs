//! Business logic services for the application layer.

pub mod alias_generator;
pub mod credential_hasher;
pub mod link_directory;
pub mod session_service;

pub use alias_generator::AliasGenerator;
pub use credential_hasher::CredentialHasher;
pub use link_directory::LinkDirectory;
pub use session_service::{AuthCheck, SESSION_COOKIE, SessionClaims, SessionService};
