//! Family code — the multi-tenancy boundary.
//!
//! A family code names exactly one family tree. Codes are case-normalized
//! (uppercase) at parse time so that `fam123` and `FAM123` address the same
//! tree everywhere; raw strings never cross a crate boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A normalized, validated family code.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FamilyCode(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FamilyCodeError {
    #[error("family code must be {min}–{max} characters, got {got}", min = FamilyCode::MIN_LEN, max = FamilyCode::MAX_LEN)]
    BadLength { got: usize },

    #[error("family code contains invalid character {0:?}")]
    InvalidCharacter(char),
}

impl FamilyCode {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 32;

    /// Parse and normalize a raw code. Whitespace is trimmed and the result
    /// is uppercased; only ASCII alphanumerics, `-` and `_` are accepted.
    pub fn parse(raw: &str) -> Result<Self, FamilyCodeError> {
        let trimmed = raw.trim();
        if trimmed.len() < Self::MIN_LEN || trimmed.len() > Self::MAX_LEN {
            return Err(FamilyCodeError::BadLength { got: trimmed.len() });
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(FamilyCodeError::InvalidCharacter(bad));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FamilyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let a = FamilyCode::parse("  fam123 ").unwrap();
        let b = FamilyCode::parse("FAM123").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "FAM123");
    }

    #[test]
    fn rejects_short_and_long() {
        assert!(matches!(
            FamilyCode::parse("ab"),
            Err(FamilyCodeError::BadLength { got: 2 })
        ));
        let long = "X".repeat(FamilyCode::MAX_LEN + 1);
        assert!(FamilyCode::parse(&long).is_err());
    }

    #[test]
    fn rejects_invalid_characters() {
        assert_eq!(
            FamilyCode::parse("FAM 123"),
            Err(FamilyCodeError::InvalidCharacter(' '))
        );
        assert!(FamilyCode::parse("FAM#1").is_err());
    }

    #[test]
    fn accepts_dash_and_underscore() {
        assert!(FamilyCode::parse("smith-family_2").is_ok());
    }
}
