//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository
//! calls, validation, and business rules. Services consume repository
//! traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_directory::LinkDirectory`] - Cache-backed alias resolution and mutation
//! - [`services::alias_generator::AliasGenerator`] - Collision-free random alias generation
//! - [`services::credential_hasher::CredentialHasher`] - PBKDF2 password hashing
//! - [`services::session_service::SessionService`] - Session token lifecycle

pub mod services;
