//! Authentication Session Manager
//!
//! Single entry point over the account use cases. Collaborators are passed
//! in at construction: a credential store, a password hasher and a token
//! issuer.

use std::sync::Arc;

use platform::password::PasswordHasher;
use platform::token::TokenIssuer;

use crate::application::check_session::{CheckSessionUseCase, SessionIdentity, SessionInfoOutput};
use crate::application::sign_in::{SignInInput, SignInOutput, SignInUseCase};
use crate::application::sign_out::SignOutUseCase;
use crate::application::sign_up::{SignUpInput, SignUpUseCase};
use crate::domain::entity::account::AccountSummary;
use crate::domain::repository::AccountRepository;
use crate::error::AuthResult;

pub struct AuthSessionManager<R, H, T>
where
    R: AccountRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    sign_up: SignUpUseCase<R, H>,
    sign_in: SignInUseCase<R, H, T>,
    sign_out: SignOutUseCase<T>,
    check_session: CheckSessionUseCase<R, T>,
}

impl<R, H, T> AuthSessionManager<R, H, T>
where
    R: AccountRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    pub fn new(account_repo: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            sign_up: SignUpUseCase::new(account_repo.clone(), hasher.clone()),
            sign_in: SignInUseCase::new(account_repo.clone(), hasher, tokens.clone()),
            sign_out: SignOutUseCase::new(tokens.clone()),
            check_session: CheckSessionUseCase::new(account_repo, tokens),
        }
    }

    /// Register a new account.
    ///
    /// Fails with `DuplicateUsername` before `DuplicateEmail`.
    pub async fn sign_up(&self, input: SignUpInput) -> AuthResult<AccountSummary> {
        self.sign_up.execute(input).await
    }

    /// Exchange credentials for a session token
    pub async fn sign_in(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        self.sign_in.execute(input).await
    }

    /// Never fails; returns who signed out when the token was still valid
    pub fn sign_out(&self, session_token: Option<&str>) -> Option<SessionIdentity> {
        self.sign_out.execute(session_token)
    }

    /// Verify a token and load its account
    pub async fn check_session(&self, session_token: &str) -> AuthResult<SessionInfoOutput> {
        self.check_session.execute(session_token).await
    }
}
