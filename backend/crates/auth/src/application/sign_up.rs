//! Sign Up Use Case
//!
//! Creates a new account.

use std::sync::Arc;

use platform::password::PasswordHasher;

use crate::application::run_blocking;
use crate::domain::entity::account::{AccountSummary, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign up input (already validated)
#[derive(Debug)]
pub struct SignUpInput {
    pub user_name: UserName,
    pub email: Email,
    pub password: RawPassword,
}

/// Sign up use case
pub struct SignUpUseCase<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    account_repo: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> SignUpUseCase<R, H>
where
    R: AccountRepository,
    H: PasswordHasher,
{
    pub fn new(account_repo: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            account_repo,
            hasher,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<AccountSummary> {
        // User name is checked before email
        if self
            .account_repo
            .exists_by_user_name(&input.user_name)
            .await?
        {
            return Err(AuthError::DuplicateUsername);
        }

        if self.account_repo.exists_by_email(&input.email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let hasher = Arc::clone(&self.hasher);
        let password = input.password;
        let hashed = run_blocking(move || Ok(hasher.hash(password.inner())?)).await?;
        let password_hash = UserPassword::from_hashed(hashed);

        // The store re-checks both constraints atomically with the insert
        let account = self
            .account_repo
            .create(NewAccount {
                user_name: input.user_name,
                email: input.email,
                password_hash,
            })
            .await?;

        tracing::info!(
            account_id = %account.account_id,
            user_name = %account.user_name,
            "User signed up"
        );

        Ok(account.summary())
    }
}
