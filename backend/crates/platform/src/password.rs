//! Password Hashing and Verification
//!
//! - [`ClearTextPassword`]: user input, NFKC normalized, zeroized on drop
//! - [`HashedPassword`]: Argon2id PHC string, safe to persist
//! - [`PasswordHasher`]: the seam the auth crate hashes and verifies through
//!
//! Passwords are never logged; both wrappers redact themselves in `Debug`.

use std::fmt;

use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier as _};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Hard upper bound on password length (characters)
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization.
///
/// Not `Clone`, so the plaintext exists exactly once.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate a new password chosen at sign-up.
    ///
    /// The input is NFKC normalized first; length is counted in code points.
    pub fn new(raw: String, min_length: usize) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw)?;

        let char_count = password.0.chars().count();
        if char_count < min_length {
            return Err(PasswordPolicyError::TooShort {
                min: min_length,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Space, tab and newline are fine; other control characters are not
        if password
            .0
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(password)
    }

    /// Wrap a password presented at sign-in.
    ///
    /// Only normalization and the blank check apply; the stored hash decides
    /// the rest.
    pub fn for_verification(raw: String) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        Ok(Self(normalized))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Password bytes with the pepper appended, zeroized on drop
    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut bytes = self.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        Zeroizing::new(bytes)
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
/// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher
// ============================================================================

/// One-way password transform used to store and verify passwords
pub trait PasswordHasher: Send + Sync + 'static {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError>;

    /// `Ok(false)` on mismatch; `Err` only when the hash itself is unusable.
    fn verify(
        &self,
        password: &ClearTextPassword,
        hashed: &HashedPassword,
    ) -> Result<bool, PasswordHashError>;
}

/// Argon2id with the crate's default (OWASP) parameters:
/// m=19456 KiB, t=2, p=1 and a random 16-byte salt.
#[derive(Clone, Default)]
pub struct Argon2idHasher {
    pepper: Option<Vec<u8>>,
}

impl Argon2idHasher {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self { pepper }
    }
}

impl fmt::Debug for Argon2idHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2idHasher")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl PasswordHasher for Argon2idHasher {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let bytes = password.peppered(self.pepper.as_deref());
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(&bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    fn verify(
        &self,
        password: &ClearTextPassword,
        hashed: &HashedPassword,
    ) -> Result<bool, PasswordHashError> {
        let parsed =
            PasswordHash::new(&hashed.hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        let bytes = password.peppered(self.pepper.as_deref());

        // Argon2 compares in constant time
        match Argon2::default().verify_password(&bytes, &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordHashError::HashingFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(raw: &str) -> ClearTextPassword {
        ClearTextPassword::for_verification(raw.to_string()).unwrap()
    }

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("pw".to_string(), 3);
        assert!(matches!(
            result,
            Err(PasswordPolicyError::TooShort { min: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_password_minimum_accepted() {
        assert!(ClearTextPassword::new("pw1".to_string(), 3).is_ok());
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = ClearTextPassword::new(long_password, 3);
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_blank() {
        assert_eq!(
            ClearTextPassword::new("".to_string(), 3).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
        assert_eq!(
            ClearTextPassword::new("      ".to_string(), 3).unwrap_err(),
            PasswordPolicyError::EmptyOrWhitespace
        );
        assert!(ClearTextPassword::for_verification(" \t".to_string()).is_err());
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("abc\u{0007}def".to_string(), 3);
        assert_eq!(result.unwrap_err(), PasswordPolicyError::InvalidCharacter);
    }

    #[test]
    fn test_unicode_password_length_in_chars() {
        // 5 code points, 15 bytes
        assert!(ClearTextPassword::new("パスワード".to_string(), 5).is_ok());
    }

    #[test]
    fn test_nfkc_normalization() {
        let hasher = Argon2idHasher::default();
        let fullwidth = password("ｐｗ１");
        let hashed = hasher.hash(&fullwidth).unwrap();
        assert!(hasher.verify(&password("pw1"), &hashed).unwrap());
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2idHasher::default();
        let hashed = hasher.hash(&password("TestPassword123!")).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hasher.verify(&password("TestPassword123!"), &hashed).unwrap());
        assert!(!hasher.verify(&password("WrongPassword123!"), &hashed).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let hasher = Argon2idHasher::default();
        let a = hasher.hash(&password("pw1")).unwrap();
        let b = hasher.hash(&password("pw1")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_with_pepper() {
        let peppered = Argon2idHasher::new(Some(b"my_secret_pepper".to_vec()));
        let hashed = peppered.hash(&password("TestPassword123!")).unwrap();

        assert!(peppered.verify(&password("TestPassword123!"), &hashed).unwrap());

        let plain = Argon2idHasher::default();
        assert!(!plain.verify(&password("TestPassword123!"), &hashed).unwrap());

        let wrong = Argon2idHasher::new(Some(b"wrong_pepper".to_vec()));
        assert!(!wrong.verify(&password("TestPassword123!"), &hashed).unwrap());
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = Argon2idHasher::default();
        let hashed = hasher.hash(&password("TestPassword123!")).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&password("TestPassword123!"), &restored).unwrap());
    }

    #[test]
    fn test_invalid_phc_string() {
        assert!(matches!(
            HashedPassword::from_phc_string("not_a_valid_hash"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", password("secret-value"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret-value"));

        let hasher = Argon2idHasher::new(Some(b"pepper".to_vec()));
        assert!(format!("{:?}", hasher).contains("[REDACTED]"));
    }
}
