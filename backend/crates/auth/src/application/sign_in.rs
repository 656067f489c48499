//! Sign In Use Case
//!
//! Verifies credentials and issues a session token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::password::PasswordHasher;
use platform::token::TokenIssuer;

use crate::application::run_blocking;
use crate::domain::entity::account::AccountSummary;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
#[derive(Debug)]
pub struct SignInInput {
    pub user_name: UserName,
    pub password: RawPassword,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed token for the session cookie
    pub session_token: String,
    pub expires_at: DateTime<Utc>,
    pub account: AccountSummary,
}

/// Sign in use case
pub struct SignInUseCase<R, H, T>
where
    R: AccountRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    account_repo: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> SignInUseCase<R, H, T>
where
    R: AccountRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(account_repo: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            account_repo,
            hasher,
            tokens,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Unknown user and wrong password are indistinguishable to the caller
        let account = self
            .account_repo
            .find_by_user_name(&input.user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hasher = Arc::clone(&self.hasher);
        let password = input.password;
        let stored = account.password_hash.as_hashed().clone();
        let password_valid =
            run_blocking(move || Ok(hasher.verify(password.inner(), &stored)?)).await?;

        if !password_valid {
            tracing::debug!(account_id = %account.account_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .tokens
            .issue(&account.account_id.to_string())
            .map_err(AuthError::Token)?;

        tracing::info!(
            account_id = %account.account_id,
            expires_at = %issued.expires_at,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token: issued.token,
            expires_at: issued.expires_at,
            account: account.summary(),
        })
    }
}
