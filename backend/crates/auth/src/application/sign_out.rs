//! Sign Out Use Case
//!
//! Tokens are not stored server-side, so signing out always succeeds; the
//! caller clears the client's cookie.

use std::sync::Arc;

use platform::token::TokenIssuer;

use crate::application::check_session::SessionIdentity;

/// Sign out use case
pub struct SignOutUseCase<T>
where
    T: TokenIssuer,
{
    tokens: Arc<T>,
}

impl<T> SignOutUseCase<T>
where
    T: TokenIssuer,
{
    pub fn new(tokens: Arc<T>) -> Self {
        Self { tokens }
    }

    /// Returns the identity of the caller when a valid token was presented
    pub fn execute(&self, session_token: Option<&str>) -> Option<SessionIdentity> {
        let identity = session_token
            .and_then(|token| SessionIdentity::from_token(self.tokens.as_ref(), token).ok());

        match &identity {
            Some(identity) => {
                tracing::info!(account_id = %identity.account_id, "User signed out");
            }
            None => {
                tracing::debug!("Sign out without a valid session");
            }
        }

        identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::account_id::AccountId;
    use platform::token::JwtTokenIssuer;
    use std::time::Duration;

    fn use_case() -> (SignOutUseCase<JwtTokenIssuer>, Arc<JwtTokenIssuer>) {
        let tokens = Arc::new(JwtTokenIssuer::new(
            b"0123456789abcdef0123456789abcdef",
            "auth-test",
            Duration::from_secs(60),
        ));
        (SignOutUseCase::new(tokens.clone()), tokens)
    }

    #[test]
    fn test_sign_out_with_valid_token() {
        let (use_case, tokens) = use_case();
        let issued = tokens.issue("7").unwrap();

        let identity = use_case.execute(Some(&issued.token)).unwrap();
        assert_eq!(identity.account_id, AccountId::new(7));
    }

    #[test]
    fn test_sign_out_without_session_still_succeeds() {
        let (use_case, _) = use_case();
        assert!(use_case.execute(None).is_none());
        assert!(use_case.execute(Some("garbage")).is_none());
    }
}
