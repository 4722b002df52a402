//! Profile Entity

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// `profiles` 테이블 레코드. 사용자당 하나이며 사용자 삭제 시 함께 삭제됩니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub nickname: String,
}

impl<'r> FromRow<'r, SqliteRow> for Profile {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            nickname: row.try_get("nickname")?,
        })
    }
}
