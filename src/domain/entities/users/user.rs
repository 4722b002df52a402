//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬(패스워드) 가입 사용자와 Google 로그인으로 생성된 사용자를 하나의 모델로 표현합니다.
//! Google 사용자는 패스워드가 빈 문자열입니다.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// `users` 테이블 레코드
///
/// 패스워드 해시와 리프레시 토큰은 직렬화되지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 저장 전에는 0
    pub id: i64,
    pub username: String,
    pub email: String,
    /// bcrypt 해시. Google 사용자는 빈 문자열
    #[serde(skip_serializing, default)]
    pub password: String,
    /// 현재 유효한 리프레시 토큰. 새로 발급되면 덮어써집니다.
    #[serde(skip_serializing, default)]
    pub refresh_token: String,
}

impl User {
    /// 패스워드 가입 사용자를 생성합니다.
    pub fn new_local(username: String, email: String, password_hash: String) -> Self {
        Self {
            id: 0,
            username,
            email,
            password: password_hash,
            refresh_token: String::new(),
        }
    }

    /// Google 로그인으로 처음 들어온 사용자를 생성합니다.
    ///
    /// 사용자명은 이메일과 같게 설정합니다.
    pub fn new_federated(email: String) -> Self {
        Self {
            id: 0,
            username: email.clone(),
            email,
            password: String::new(),
            refresh_token: String::new(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }

    pub fn can_authenticate_with_password(&self) -> bool {
        !self.password.is_empty()
    }
}

impl<'r> FromRow<'r, SqliteRow> for User {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password: row.try_get("password")?,
            refresh_token: row.try_get("refresh_token")?,
        })
    }
}
