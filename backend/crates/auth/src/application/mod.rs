//! Application Layer
//!
//! Use cases and the session manager composing them.

pub mod check_session;
pub mod config;
pub mod manager;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

use crate::error::{AuthError, AuthResult};

// Re-exports
pub use check_session::{CheckSessionUseCase, SessionIdentity, SessionInfoOutput};
pub use config::AuthConfig;
pub use manager::AuthSessionManager;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};

/// Run Argon2 work on the blocking pool so it never stalls the async workers
pub(crate) async fn run_blocking<F, O>(work: F) -> AuthResult<O>
where
    F: FnOnce() -> AuthResult<O> + Send + 'static,
    O: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| AuthError::Internal(format!("Blocking task failed: {e}")))?
}
