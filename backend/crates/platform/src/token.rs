//! Session Token Issuing
//!
//! Stateless, signed, time-bounded session credentials. The server keeps no
//! record of issued tokens; a token is valid while its signature checks out
//! and `exp` has not passed.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clock skew tolerated when checking `exp`
const LEEWAY_SECS: u64 = 60;

/// Token errors
#[derive(Debug, Error)]
pub enum TokenError {
    /// `exp` is in the past
    #[error("Session token has expired")]
    Expired,

    /// Bad signature, wrong issuer/algorithm, or malformed token
    #[error("Session token is invalid: {0}")]
    Invalid(String),

    /// Signing failed; a server-side problem, never the client's
    #[error("Session token could not be encoded: {0}")]
    Encoding(String),
}

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (account identifier)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
}

impl SessionClaims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// A freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Creates and validates signed session tokens
pub trait TokenIssuer: Send + Sync {
    /// Sign a token for `subject` valid for the issuer's TTL
    fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError>;

    /// Check signature, issuer and expiry and return the claims
    fn validate(&self, token: &str) -> Result<SessionClaims, TokenError>;
}

/// HS256 JSON Web Token issuer
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: Duration,
}

impl JwtTokenIssuer {
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl: Duration) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer,
            ttl,
        }
    }

    fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        let expires_at = now + ttl;

        let claims = SessionClaims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = self.sign(&claims)?;
        Ok(IssuedToken { token, expires_at })
    }

    fn sign(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    fn validate(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

impl fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenIssuer")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
