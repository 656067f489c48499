//! User Name Value Object
//!
//! The login handle of an account.
//!
//! ## Normalization
//! NFKC → trim. The result is kept as `original` for display; its lowercase
//! form (`canonical`) is what uniqueness and sign-in lookups compare.
//!
//! ## Invariants (sign-up)
//! - length within the configured bounds, counted in characters
//! - no whitespace and no control characters

use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Default minimum length for user names (characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Default maximum length for user names (characters)
pub const USER_NAME_MAX_LENGTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name cannot be empty")]
    Empty,

    #[error("User name is too short ({length} chars, minimum {min})")]
    TooShort { length: usize, min: usize },

    #[error("User name is too long ({length} chars, maximum {max})")]
    TooLong { length: usize, max: usize },

    #[error("User name cannot contain whitespace")]
    ContainsWhitespace,

    #[error("User name contains an invalid character at position {position}")]
    InvalidCharacter { position: usize },
}

/// Length bounds applied when a user name is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserNameLimits {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for UserNameLimits {
    fn default() -> Self {
        Self {
            min_length: USER_NAME_MIN_LENGTH,
            max_length: USER_NAME_MAX_LENGTH,
        }
    }
}

/// Validated, normalized user name
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct UserName {
    /// Trimmed, NFKC normalized input (preserves case)
    original: String,
    /// Lowercase form, used for uniqueness
    canonical: String,
}

impl UserName {
    /// Validate a user name chosen at sign-up
    pub fn new(input: impl AsRef<str>, limits: UserNameLimits) -> Result<Self, UserNameError> {
        let name = Self::for_lookup(input)?;

        let length = name.original.chars().count();
        if length < limits.min_length {
            return Err(UserNameError::TooShort {
                length,
                min: limits.min_length,
            });
        }
        if length > limits.max_length {
            return Err(UserNameError::TooLong {
                length,
                max: limits.max_length,
            });
        }

        for (position, c) in name.original.chars().enumerate() {
            if c.is_whitespace() {
                return Err(UserNameError::ContainsWhitespace);
            }
            if c.is_control() {
                return Err(UserNameError::InvalidCharacter { position });
            }
        }

        Ok(name)
    }

    /// Normalize a user name presented at sign-in.
    ///
    /// Only emptiness is rejected; a name that could never have been
    /// registered simply finds no account.
    pub fn for_lookup(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let normalized: String = input.as_ref().nfkc().collect();
        let original = normalized.trim().to_string();

        if original.is_empty() {
            return Err(UserNameError::Empty);
        }

        let canonical = original.to_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Rebuild from a stored value (validated on insert)
    pub fn from_db(original: impl Into<String>) -> Self {
        let original = original.into();
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserName({:?})", self.original)
    }
}
