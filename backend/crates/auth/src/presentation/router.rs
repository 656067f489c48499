//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use platform::password::{Argon2idHasher, PasswordHasher};
use platform::token::{JwtTokenIssuer, TokenIssuer};

use crate::application::AuthSessionManager;
use crate::application::config::{AuthConfig, JWT_SECRET_LENGTH};
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_session;

/// Create the Auth router backed by Argon2id hashing and JWT sessions.
///
/// Fails when the JWT secret is shorter than [`JWT_SECRET_LENGTH`] bytes.
pub fn auth_router<R>(repo: R, config: AuthConfig) -> AuthResult<Router>
where
    R: AccountRepository + Send + Sync + 'static,
{
    if config.jwt_secret.len() < JWT_SECRET_LENGTH {
        return Err(AuthError::InvalidConfig(format!(
            "JWT secret must be at least {JWT_SECRET_LENGTH} bytes, got {}",
            config.jwt_secret.len()
        )));
    }

    let hasher = Argon2idHasher::new(config.pepper().map(<[u8]>::to_vec));
    let tokens = JwtTokenIssuer::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
        config.session_ttl,
    );

    let manager = AuthSessionManager::new(Arc::new(repo), Arc::new(hasher), Arc::new(tokens));
    Ok(auth_router_with(AuthAppState::new(manager, config)))
}

/// Create the Auth router for any set of collaborators
pub fn auth_router_with<R, H, T>(state: AuthAppState<R, H, T>) -> Router
where
    R: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    let protected = Router::new()
        .route("/me", get(handlers::me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session::<R, H, T>,
        ));

    Router::new()
        .route("/signup", post(handlers::sign_up::<R, H, T>))
        .route("/signin", post(handlers::sign_in::<R, H, T>))
        .route("/signout", post(handlers::sign_out::<R, H, T>))
        .merge(protected)
        .with_state(state)
}
