//! Account Entity
//!
//! Identity record owned by the credential store. Immutable once created.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, email::Email, user_name::UserName, user_password::UserPassword,
};

/// Persisted account
#[derive(Debug, Clone)]
pub struct Account {
    /// Store-assigned identifier
    pub account_id: AccountId,
    /// Unique (by canonical form) login handle
    pub user_name: UserName,
    /// Unique email address
    pub email: Email,
    /// Argon2id hash
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            account_id: self.account_id,
            user_name: self.user_name.original().to_string(),
            email: self.email.as_str().to_string(),
        }
    }
}

/// Account not yet persisted; the store assigns id and timestamp
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub user_name: UserName,
    pub email: Email,
    pub password_hash: UserPassword,
}

/// Non-sensitive view returned to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub account_id: AccountId,
    pub user_name: String,
    pub email: String,
}
