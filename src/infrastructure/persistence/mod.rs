//! Repository implementations for the persistent store.
//!
//! - [`PgRedirectRepository`] / [`PgAccountRepository`] - PostgreSQL
//! - [`InMemoryRedirectRepository`] / [`InMemoryAccountRepository`] -
//!   DashMap-backed, for tests and database-less runs

mod memory;
mod pg_account_repository;
mod pg_redirect_repository;

pub use memory::{InMemoryAccountRepository, InMemoryRedirectRepository};
pub use pg_account_repository::PgAccountRepository;
pub use pg_redirect_repository::PgRedirectRepository;
