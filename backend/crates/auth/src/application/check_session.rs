//! Check Session Use Case
//!
//! Verifies a session token and loads the account it belongs to.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use platform::token::{SessionClaims, TokenError, TokenIssuer};

use crate::domain::entity::account::AccountSummary;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{AuthError, AuthResult};

/// Authenticated caller, handed to handlers through request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIdentity {
    pub account_id: AccountId,
    pub expires_at: DateTime<Utc>,
}

impl SessionIdentity {
    /// Verify a token and read the identity out of its claims
    pub fn from_token<T: TokenIssuer + ?Sized>(tokens: &T, token: &str) -> AuthResult<Self> {
        let claims = tokens.validate(token).map_err(|e| {
            match &e {
                TokenError::Expired => tracing::debug!("Session token expired"),
                other => tracing::debug!(error = %other, "Session token rejected"),
            }
            AuthError::SessionInvalid
        })?;

        Self::try_from(claims)
    }
}

impl TryFrom<SessionClaims> for SessionIdentity {
    type Error = AuthError;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        let account_id = claims
            .sub
            .parse::<AccountId>()
            .map_err(|_| AuthError::SessionInvalid)?;

        Ok(Self {
            account_id,
            expires_at: claims.expires_at(),
        })
    }
}

/// Session info output
#[derive(Debug)]
pub struct SessionInfoOutput {
    pub identity: SessionIdentity,
    pub account: AccountSummary,
}

/// Check session use case
pub struct CheckSessionUseCase<R, T>
where
    R: AccountRepository,
    T: TokenIssuer,
{
    account_repo: Arc<R>,
    tokens: Arc<T>,
}

impl<R, T> CheckSessionUseCase<R, T>
where
    R: AccountRepository,
    T: TokenIssuer,
{
    pub fn new(account_repo: Arc<R>, tokens: Arc<T>) -> Self {
        Self {
            account_repo,
            tokens,
        }
    }

    /// Check that the session is valid and the account still exists
    pub async fn execute(&self, session_token: &str) -> AuthResult<SessionInfoOutput> {
        let identity = SessionIdentity::from_token(self.tokens.as_ref(), session_token)?;

        let account = self
            .account_repo
            .find_by_id(identity.account_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        Ok(SessionInfoOutput {
            identity,
            account: account.summary(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::account::NewAccount;
    use crate::domain::value_object::{
        email::Email,
        user_name::{UserName, UserNameLimits},
        user_password::{RawPassword, UserPassword},
    };
    use crate::infra::memory::MemoryAccountRepository;
    use platform::password::{Argon2idHasher, PasswordHasher};
    use platform::token::JwtTokenIssuer;
    use std::time::Duration;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    async fn setup() -> (
        CheckSessionUseCase<MemoryAccountRepository, JwtTokenIssuer>,
        Arc<JwtTokenIssuer>,
        AccountId,
    ) {
        let repo = Arc::new(MemoryAccountRepository::new());
        let tokens = Arc::new(JwtTokenIssuer::new(SECRET, "auth-test", Duration::from_secs(60)));

        let account = repo
            .create(NewAccount {
                user_name: UserName::new("alice", UserNameLimits::default()).unwrap(),
                email: Email::new("a@x.com").unwrap(),
                password_hash: UserPassword::from_hashed(
                    Argon2idHasher::default()
                        .hash(RawPassword::new("pw1".to_string(), 3).unwrap().inner())
                        .unwrap(),
                ),
            })
            .await
            .unwrap();

        (
            CheckSessionUseCase::new(repo, tokens.clone()),
            tokens,
            account.account_id,
        )
    }

    #[tokio::test]
    async fn test_valid_token_loads_account() {
        let (use_case, tokens, account_id) = setup().await;
        let issued = tokens.issue(&account_id.to_string()).unwrap();

        let output = use_case.execute(&issued.token).await.unwrap();
        assert_eq!(output.identity.account_id, account_id);
        assert_eq!(output.account.user_name, "alice");
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let (use_case, _, _) = setup().await;
        let err = use_case.execute("not-a-token").await.unwrap_err();
        assert!(matches!(err, AuthError::SessionInvalid));
    }

    #[tokio::test]
    async fn test_unknown_account() {
        let (use_case, tokens, _) = setup().await;
        let issued = tokens.issue("999").unwrap();
        let err = use_case.execute(&issued.token).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionInvalid));
    }

    #[tokio::test]
    async fn test_non_numeric_subject() {
        let (use_case, tokens, _) = setup().await;
        let issued = tokens.issue("alice").unwrap();
        let err = use_case.execute(&issued.token).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionInvalid));
    }
}
