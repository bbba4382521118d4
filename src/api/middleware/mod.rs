//! HTTP middleware for request processing and protection.
//!
//! Provides session authentication, shared-secret authentication, and
//! observability middleware.

pub mod session;
pub mod shared_secret;
pub mod tracing;
