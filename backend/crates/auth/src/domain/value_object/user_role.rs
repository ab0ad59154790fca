//! User Role
//!
//! Two peer roles. Authorization compares roles for equality only; there is
//! deliberately no ordering between them.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum UserRole {
    Admin = 1,
    Viewer = 2,
}

/// Stored role id outside the known set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown user role: {0}")]
pub struct UnknownRole(pub String);

impl UserRole {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Viewer => "viewer",
        }
    }

    pub fn from_id(id: i16) -> Result<Self, UnknownRole> {
        match id {
            1 => Ok(UserRole::Admin),
            2 => Ok(UserRole::Viewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_id() {
        assert_eq!(UserRole::from_id(1), Ok(UserRole::Admin));
        assert_eq!(UserRole::from_id(2), Ok(UserRole::Viewer));
        assert!(UserRole::from_id(0).is_err());
        assert!(UserRole::from_id(3).is_err());
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert_eq!(UserRole::Viewer.to_string(), "viewer");
    }

    #[test]
    fn test_roles_are_peers() {
        assert_ne!(UserRole::Admin, UserRole::Viewer);
        assert_eq!(UserRole::from_id(UserRole::Viewer.id()), Ok(UserRole::Viewer));
        assert_eq!(UnknownRole("7".into()).to_string(), "Unknown user role: 7");
    }
}
