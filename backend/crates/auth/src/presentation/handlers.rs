//! HTTP Handlers

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use std::sync::Arc;

use platform::cookie::{extract_cookie, to_header_value};
use platform::password::PasswordHasher;
use platform::token::TokenIssuer;

use crate::application::AuthSessionManager;
use crate::application::config::AuthConfig;
use crate::domain::entity::account::AccountSummary;
use crate::domain::repository::AccountRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{MessageResponse, SignInRequest, SignUpRequest, UserInfoResponse};
use crate::presentation::validation::{json_body, validate_sign_in, validate_sign_up};

pub const SIGN_UP_SUCCESS_MESSAGE: &str = "User registered successfully!";
pub const SIGN_OUT_MESSAGE: &str = "You've been signed out!";

/// Shared state for auth handlers
pub struct AuthAppState<R, H, T>
where
    R: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    pub manager: Arc<AuthSessionManager<R, H, T>>,
    pub config: Arc<AuthConfig>,
}

impl<R, H, T> AuthAppState<R, H, T>
where
    R: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    pub fn new(manager: AuthSessionManager<R, H, T>, config: AuthConfig) -> Self {
        Self {
            manager: Arc::new(manager),
            config: Arc::new(config),
        }
    }

    pub(crate) fn session_token(&self, headers: &HeaderMap) -> Option<String> {
        extract_cookie(headers, &self.config.session_cookie_name)
    }
}

// Manual impl: the repository and collaborators themselves need not be Clone
impl<R, H, T> Clone for AuthAppState<R, H, T>
where
    R: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R, H, T>(
    State(state): State<AuthAppState<R, H, T>>,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    let input = validate_sign_up(json_body(payload)?, &state.config)?;

    state.manager.sign_up(input).await?;

    Ok(Json(MessageResponse::new(SIGN_UP_SUCCESS_MESSAGE)))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R, H, T>(
    State(state): State<AuthAppState<R, H, T>>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    let input = validate_sign_in(json_body(payload)?)?;

    let output = state.manager.sign_in(input).await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, to_header_value(&cookie))],
        Json(UserInfoResponse::from(output.account)),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
///
/// Always succeeds and always clears the cookie.
pub async fn sign_out<R, H, T>(
    State(state): State<AuthAppState<R, H, T>>,
    headers: HeaderMap,
) -> impl IntoResponse
where
    R: AccountRepository + Send + Sync + 'static,
    H: PasswordHasher + 'static,
    T: TokenIssuer + 'static,
{
    let token = state.session_token(&headers);
    state.manager.sign_out(token.as_deref());

    let cookie = state.config.session_cookie().build_delete_cookie();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, to_header_value(&cookie))],
        Json(MessageResponse::new(SIGN_OUT_MESSAGE)),
    )
}

// ============================================================================
// Current Account (requires session)
// ============================================================================

/// GET /api/auth/me
pub async fn me(Extension(account): Extension<AccountSummary>) -> Json<UserInfoResponse> {
    Json(UserInfoResponse::from(account))
}
