//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the backend crates:
//! - Password hashing (Argon2id) behind the [`password::PasswordHasher`] trait
//! - Signed session tokens (JWT) behind the [`token::TokenIssuer`] trait
//! - Session cookie construction and extraction
//! - Random bytes and Base64 helpers

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
