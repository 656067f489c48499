//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Use cases and the session manager
//! - `infra/` - PostgreSQL and in-memory credential stores
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Sign-up with username, email and password
//! - Sign-in returning a signed session token in an HttpOnly cookie
//! - Sign-out clearing the cookie
//! - `GET /me` for the account behind the current session
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Stateless HS256 session tokens; expiry is the only server-side revocation
//! - Unknown user and wrong password are reported identically

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::{AuthConfig, AuthSessionManager, SessionIdentity};
pub use error::{AuthError, AuthResult};
pub use infra::{MemoryAccountRepository, PgAccountRepository};
pub use presentation::router::{auth_router, auth_router_with};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
