//! Presentation Layer
//!
//! HTTP handlers, DTOs, request validation, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod validation;

pub use handlers::AuthAppState;
pub use middleware::require_session;
pub use router::{auth_router, auth_router_with};
