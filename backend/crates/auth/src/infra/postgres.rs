//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;

use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId, email::Email, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `accounts.user_name_canonical`
pub const USER_NAME_UNIQUE_CONSTRAINT: &str = "accounts_username_canonical_key";

/// Unique constraint on `accounts.email`
pub const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: NewAccount) -> AuthResult<Account> {
        // Uniqueness is enforced by the table constraints; a lost race
        // surfaces here as a unique violation
        let (account_id, created_at) = sqlx::query_as::<_, (i64, DateTime<Utc>)>(
            r#"
            INSERT INTO accounts (
                user_name,
                user_name_canonical,
                email,
                password_hash
            ) VALUES ($1, $2, $3, $4)
            RETURNING account_id, created_at
            "#,
        )
        .bind(account.user_name.original())
        .bind(account.user_name.canonical())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(Account {
            account_id: AccountId::new(account_id),
            user_name: account.user_name,
            email: account.email,
            password_hash: account.password_hash,
            created_at,
        })
    }

    async fn find_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                user_name,
                email,
                password_hash,
                created_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                user_name,
                email,
                password_hash,
                created_at
            FROM accounts
            WHERE user_name_canonical = $1
            "#,
        )
        .bind(user_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE user_name_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}

/// Translate a unique violation on one of the account constraints into the
/// matching duplicate error
fn map_unique_violation(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            if let Some(duplicate) = duplicate_for_constraint(db_err.constraint()) {
                tracing::debug!(
                    constraint = db_err.constraint().unwrap_or_default(),
                    "Account insert lost a uniqueness race"
                );
                return duplicate;
            }
        }
    }
    AuthError::Database(err)
}

fn duplicate_for_constraint(constraint: Option<&str>) -> Option<AuthError> {
    match constraint? {
        USER_NAME_UNIQUE_CONSTRAINT => Some(AuthError::DuplicateUsername),
        EMAIL_UNIQUE_CONSTRAINT => Some(AuthError::DuplicateEmail),
        _ => None,
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: i64,
    user_name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash).map_err(|e| {
            AuthError::Internal(format!(
                "Stored password hash for account {} is unusable: {}",
                self.account_id, e
            ))
        })?;

        Ok(Account {
            account_id: AccountId::new(self.account_id),
            user_name: UserName::from_db(self.user_name),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_hashed(password_hash),
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_names_map_to_duplicates() {
        assert!(matches!(
            duplicate_for_constraint(Some(USER_NAME_UNIQUE_CONSTRAINT)),
            Some(AuthError::DuplicateUsername)
        ));
        assert!(matches!(
            duplicate_for_constraint(Some(EMAIL_UNIQUE_CONSTRAINT)),
            Some(AuthError::DuplicateEmail)
        ));
        assert!(duplicate_for_constraint(Some("accounts_pkey")).is_none());
        assert!(duplicate_for_constraint(None).is_none());
    }

    #[test]
    fn test_other_errors_stay_database_errors() {
        assert!(matches!(
            map_unique_violation(sqlx::Error::PoolTimedOut),
            AuthError::Database(_)
        ));
    }

    const MIGRATIONS: [&str; 2] = [
        include_str!("../../../../../database/migrations/0001_create_accounts.sql"),
        include_str!("../../../../../database/migrations/0002_drop_case_checks.sql"),
    ];

    #[test]
    fn test_constraint_names_match_migration() {
        assert!(MIGRATIONS[0].contains(USER_NAME_UNIQUE_CONSTRAINT));
        assert!(MIGRATIONS[0].contains(EMAIL_UNIQUE_CONSTRAINT));
    }

    #[test]
    fn test_collation_dependent_checks_are_dropped() {
        for constraint in ["accounts_user_name_canonical_lower", "accounts_email_lower"] {
            assert!(MIGRATIONS[1].contains(&format!("DROP CONSTRAINT IF EXISTS {constraint};")));
        }
    }

    /// Runs only when `DATABASE_URL` points at a disposable database
    async fn pg_repo() -> Option<PgAccountRepository> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = PgPool::connect(&url).await.unwrap();
        for migration in MIGRATIONS {
            sqlx::raw_sql(migration).execute(&pool).await.unwrap();
        }
        Some(PgAccountRepository::new(pool))
    }

    fn new_account(user_name: &str, email: &str) -> NewAccount {
        use crate::domain::value_object::{user_name::UserNameLimits, user_password::RawPassword};
        use platform::password::{Argon2idHasher, PasswordHasher};

        let password = RawPassword::new("pw1".to_string(), 3).unwrap();
        NewAccount {
            user_name: UserName::new(user_name, UserNameLimits::default()).unwrap(),
            email: Email::new(email).unwrap(),
            password_hash: UserPassword::from_hashed(
                Argon2idHasher::default().hash(password.inner()).unwrap(),
            ),
        }
    }

    #[tokio::test]
    async fn test_create_accepts_non_ascii_case() {
        let Some(repo) = pg_repo().await else {
            eprintln!("DATABASE_URL not set, skipping");
            return;
        };
        let run = Utc::now().timestamp_micros() % 1_000_000_000;

        for (user_name, email) in [
            (format!("Élodie{run}"), format!("Élodie{run}@example.com")),
            (format!("ΟΔΟΣ{run}"), format!("ΟΔΟΣ{run}@example.com")),
        ] {
            let created = repo.create(new_account(&user_name, &email)).await.unwrap();
            assert_eq!(created.user_name.original(), user_name);

            let lookup = UserName::for_lookup(&user_name.to_uppercase()).unwrap();
            let found = repo.find_by_user_name(&lookup).await.unwrap().unwrap();
            assert_eq!(found.account_id, created.account_id);
            assert_eq!(found.email.as_str(), email.to_lowercase());

            let err = repo
                .create(new_account(&user_name.to_lowercase(), &format!("other{run}@x.com")))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::DuplicateUsername));
        }
    }
}
