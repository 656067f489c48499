//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::value_object::{account_id::AccountId, email::Email, user_name::UserName};
use crate::error::AuthResult;

/// Credential store
///
/// Implementations must make the uniqueness check and the insert in
/// [`create`](LocalAccountRepository::create) atomic and report a conflict as
/// `AuthError::DuplicateUsername` / `AuthError::DuplicateEmail`, username
/// taking precedence when both collide.
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account and return it with its assigned id
    async fn create(&self, account: NewAccount) -> AuthResult<Account>;

    /// Find account by ID
    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>>;

    /// Find account by canonical user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<Account>>;

    /// Check if a user name (canonical form) is taken
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Check if an email is taken
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;
}
