//! 관리자 사용자 목록 조회용 조인 레코드

use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// users × users_has_roles × roles × profiles 조인 결과 한 행
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserFullInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub profile_id: i64,
    pub nickname: String,
}

impl<'r> FromRow<'r, SqliteRow> for UserFullInfo {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            role: row.try_get("role")?,
            profile_id: row.try_get("profile_id")?,
            nickname: row.try_get("nickname")?,
        })
    }
}
