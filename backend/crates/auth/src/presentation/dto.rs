//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::account::AccountSummary;

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Clone, Deserialize)]
pub struct SignUpRequest {
    #[serde(rename = "username")]
    pub user_name: String,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Clone, Deserialize)]
pub struct SignInRequest {
    #[serde(rename = "username")]
    pub user_name: String,
    pub password: String,
}

// ============================================================================
// Shared responses
// ============================================================================

/// Plain confirmation message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Account info returned on sign-in and by `/me`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserInfoResponse {
    pub id: i64,
    #[serde(rename = "username")]
    pub user_name: String,
    pub email: String,
}

impl From<AccountSummary> for UserInfoResponse {
    fn from(summary: AccountSummary) -> Self {
        Self {
            id: summary.account_id.value(),
            user_name: summary.user_name,
            email: summary.email,
        }
    }
}

// Passwords never reach logs
impl std::fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
