//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching, and third-party
//! service calls.
//!
//! # Modules
//!
//! - [`cache`] - Alias caching abstractions (in-process and no-op implementations)
//! - [`persistence`] - PostgreSQL and in-memory repository implementations
//! - [`captcha`] - Cloudflare Turnstile verification client

pub mod cache;
pub mod captcha;
pub mod persistence;
