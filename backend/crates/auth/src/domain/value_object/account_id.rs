use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric account identifier, assigned by the credential store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(i64);

impl AccountId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i64> for AccountId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_roundtrip() {
        let id = AccountId::new(42);
        let subject = id.to_string();
        assert_eq!(subject, "42");
        assert_eq!(subject.parse::<AccountId>().unwrap(), id);
    }

    #[test]
    fn test_invalid_subject() {
        assert!("forty-two".parse::<AccountId>().is_err());
        assert!("".parse::<AccountId>().is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&AccountId::new(7)).unwrap(), "7");
    }
}
