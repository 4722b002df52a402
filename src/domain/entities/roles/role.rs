//! Role Entity
//!
//! 역할은 `admin`과 `user` 두 가지이며, 매핑 행이 없는 사용자는 `user`로 간주합니다.

use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// 사용자 역할
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// 문자열에서 역할을 생성합니다. 알 수 없는 역할이면 에러 메시지를 반환합니다.
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(format!("Unsupported role: {}", s)),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `roles` 테이블 레코드
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRecord {
    pub id: i64,
    pub role: String,
}

impl<'r> FromRow<'r, SqliteRow> for RoleRecord {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            role: row.try_get("role")?,
        })
    }
}

/// `users_has_roles` 테이블 레코드
#[derive(Debug, Clone, PartialEq)]
pub struct RoleAssignment {
    pub id: i64,
    pub user_id: i64,
    pub role_id: i64,
}

impl<'r> FromRow<'r, SqliteRow> for RoleAssignment {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            role_id: row.try_get("role_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_string() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("USER").unwrap(), Role::User);
        assert!(Role::from_str("moderator").is_err());
    }

    #[test]
    fn test_role_defaults_to_user() {
        assert_eq!(Role::default(), Role::User);
        assert!(!Role::default().is_admin());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::User.to_string(), "user");
    }
}
