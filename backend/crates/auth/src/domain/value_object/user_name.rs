//! User Name Value Object
//!
//! The unique login handle. Input is trimmed; the stored form is exactly what
//! was accepted, and comparison is case-sensitive.

use std::fmt;

pub const USER_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserNameError {
    #[error("User name is empty")]
    Empty,
    #[error("User name must be at most {USER_NAME_MAX_LENGTH} characters")]
    TooLong,
    #[error("User name contains whitespace or control characters")]
    InvalidCharacter,
}

impl UserName {
    pub fn new(raw: &str) -> Result<Self, UserNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }
        if trimmed.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }
        if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(UserNameError::InvalidCharacter);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(UserName::new("admin").unwrap().as_str(), "admin");
        assert_eq!(UserName::new("  viewer ").unwrap().as_str(), "viewer");
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
        assert_eq!(UserName::new("a b"), Err(UserNameError::InvalidCharacter));
        assert_eq!(
            UserName::new(&"x".repeat(USER_NAME_MAX_LENGTH + 1)),
            Err(UserNameError::TooLong)
        );
    }
}
