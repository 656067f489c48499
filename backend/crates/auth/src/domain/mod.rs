//! Domain Layer
//!
//! Contains the account entity, its value objects, and the credential store
//! trait.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::account::{Account, AccountSummary, NewAccount};
pub use repository::AccountRepository;
