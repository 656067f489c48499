//! Auth Middleware
//!
//! Middleware for requiring authentication on protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use platform::password::PasswordHasher;
use platform::token::TokenIssuer;

use crate::domain::repository::AccountRepository;
use crate::error::AuthError;
use crate::presentation::handlers::AuthAppState;

/// Middleware that requires a valid session cookie.
///
/// On success the request carries the caller's `SessionIdentity` and
/// `AccountSummary` as extensions.
pub async fn require_session<R, H, T>(
    State(state): State<AuthAppState<R, H, T>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    let token = state
        .session_token(req.headers())
        .ok_or(AuthError::SessionInvalid)?;

    let session = state.manager.check_session(&token).await?;

    tracing::debug!(account_id = %session.identity.account_id, "Session accepted");

    req.extensions_mut().insert(session.identity);
    req.extensions_mut().insert(session.account);

    Ok(next.run(req).await)
}
