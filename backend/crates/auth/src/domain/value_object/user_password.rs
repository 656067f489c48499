//! User Password Value Objects
//!
//! Domain wrappers over `platform::password`:
//! - [`RawPassword`]: what the user typed, zeroized on drop
//! - [`UserPassword`]: the stored Argon2id hash

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

/// Default minimum password length accepted at sign-up
pub const PASSWORD_MIN_LENGTH: usize = 3;

/// Raw password from user input
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a password chosen at sign-up
    pub fn new(raw: String, min_length: usize) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::new(raw, min_length).map(Self)
    }

    /// Wrap a password presented at sign-in (blank check only)
    pub fn for_sign_in(raw: String) -> Result<Self, PasswordPolicyError> {
        ClearTextPassword::for_verification(raw).map(Self)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Hashed user password, safe to store
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_hashed(hashed: HashedPassword) -> Self {
        Self(hashed)
    }

    pub fn as_hashed(&self) -> &HashedPassword {
        &self.0
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
