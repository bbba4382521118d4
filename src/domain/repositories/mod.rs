//! Repository trait definitions for the domain layer.
//!
//! These traits are the narrow store contract: everything above them is
//! independent of the SQL dialect and of any query-builder syntax.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`RedirectRepository`] - Alias-keyed redirect storage
//! - [`AccountRepository`] - Account storage for authentication

pub mod account_repository;
pub mod redirect_repository;

pub use account_repository::AccountRepository;
pub use redirect_repository::RedirectRepository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use redirect_repository::MockRedirectRepository;
