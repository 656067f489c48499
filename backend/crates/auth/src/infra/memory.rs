//! In-Memory Repository Implementation
//!
//! Used when no database is configured and by the test suite. State is lost
//! on restart.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, email::Email, user_name::UserName};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Accounts {
    last_id: i64,
    by_id: HashMap<AccountId, Account>,
    /// canonical user name -> id
    by_user_name: HashMap<String, AccountId>,
    /// email -> id
    by_email: HashMap<String, AccountId>,
}

/// Account store held in process memory
#[derive(Default)]
pub struct MemoryAccountRepository {
    accounts: RwLock<Accounts>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> AuthResult<Account> {
        // One write guard covers the duplicate checks and the insert
        let mut accounts = self.accounts.write().await;

        if accounts
            .by_user_name
            .contains_key(account.user_name.canonical())
        {
            return Err(AuthError::DuplicateUsername);
        }
        if accounts.by_email.contains_key(account.email.as_str()) {
            return Err(AuthError::DuplicateEmail);
        }

        accounts.last_id += 1;
        let account_id = AccountId::new(accounts.last_id);

        let account = Account {
            account_id,
            user_name: account.user_name,
            email: account.email,
            password_hash: account.password_hash,
            created_at: Utc::now(),
        };

        accounts
            .by_user_name
            .insert(account.user_name.canonical().to_string(), account_id);
        accounts
            .by_email
            .insert(account.email.as_str().to_string(), account_id);
        accounts.by_id.insert(account_id, account.clone());

        Ok(account)
    }

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        Ok(self.accounts.read().await.by_id.get(&account_id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .by_user_name
            .get(user_name.canonical())
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self
            .accounts
            .read()
            .await
            .by_user_name
            .contains_key(user_name.canonical()))
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self
            .accounts
            .read()
            .await
            .by_email
            .contains_key(email.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{user_name::UserNameLimits, user_password::UserPassword};
    use platform::password::{Argon2idHasher, ClearTextPassword, PasswordHasher};

    fn new_account(user_name: &str, email: &str) -> NewAccount {
        let hash = Argon2idHasher::default()
            .hash(&ClearTextPassword::new("pw1".to_string(), 3).unwrap())
            .unwrap();
        NewAccount {
            user_name: UserName::new(user_name, UserNameLimits::default()).unwrap(),
            email: Email::new(email).unwrap(),
            password_hash: UserPassword::from_hashed(hash),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let repo = MemoryAccountRepository::new();
        assert!(repo.is_empty().await);

        let first = repo.create(new_account("alice", "a@x.com")).await.unwrap();
        let second = repo.create(new_account("bob", "b@x.com")).await.unwrap();
        assert_eq!(first.account_id, AccountId::new(1));
        assert_eq!(second.account_id, AccountId::new(2));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let repo = MemoryAccountRepository::new();
        repo.create(new_account("alice", "a@x.com")).await.unwrap();

        let err = repo
            .create(new_account("Alice", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateUsername));

        let err = repo.create(new_account("bob", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateEmail));

        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_lookup_by_canonical_name() {
        let repo = MemoryAccountRepository::new();
        repo.create(new_account("Alice", "a@x.com")).await.unwrap();

        let found = repo
            .find_by_user_name(&UserName::for_lookup("ALICE").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user_name.original(), "Alice");
        assert!(repo
            .exists_by_email(&Email::new("A@X.COM").unwrap())
            .await
            .unwrap());
    }
}
