//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Redirect`] - An alias to target URL mapping with hit accounting
//! - [`Account`] - A registered account gating mutation operations
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for creation:
//! - `NewRedirect`, `NewAccount` - For inserting new records
//! - `AccountPatch` - For partial updates

pub mod account;
pub mod redirect;

pub use account::{Account, AccountPatch, NewAccount};
pub use redirect::{NewRedirect, Redirect};
