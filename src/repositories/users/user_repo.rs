//! # 사용자 리포지토리 구현
//!
//! `users` 테이블의 데이터 액세스 계층입니다.
//!
//! ## 특징
//!
//! - **삽입 전용 생성**: 생성은 `insert_one`, 유일 키 충돌은 `ConflictError`
//! - **Upsert 갱신**: ID를 포함한 전체 행 덮어쓰기는 `upsert_one`
//! - **부재는 에러가 아님**: 조회 결과가 없으면 `Ok(None)`
//! - **빈 키 단락**: 0 이하의 ID나 빈 문자열 키는 쿼리 없이 `None`

use std::sync::Arc;

use crate::{
    db::{with_fields_values, with_where, Collection, Database, FieldValue, SqlCollection},
    domain::entities::{User, USERS_TABLE},
    errors::AppResult,
};

/// 사용자 데이터 액세스 리포지토리
///
/// ## 에러 처리
///
/// 모든 메서드는 `AppResult<T>`를 반환하며, 저장소 실패는 `AppError::DatabaseError`입니다.
/// 가입 파이프라인이 먼저 중복을 조회하지만, 그 사이에 끼어든 동시 가입은
/// [`create_user`](Self::create_user)가 `AppError::ConflictError`로 돌려줍니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let repo = UserRepository::new(database.clone());
///
/// let user = User::new_local("john".into(), "john@example.com".into(), hash);
/// let id = repo.create_user(&user).await?;
///
/// let found = repo.get_user_by_username_or_email(Some("john"), None).await?;
/// ```
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn users(&self) -> SqlCollection {
        self.db.collection(USERS_TABLE)
    }

    /// 새 사용자를 저장하고 행 ID를 반환합니다.
    ///
    /// 사용자명이나 이메일이 이미 있으면 기존 행을 건드리지 않고 `ConflictError`입니다.
    /// 리프레시 토큰은 토큰 발급 단계에서 [`update_user`](Self::update_user)로 기록됩니다.
    pub async fn create_user(&self, user: &User) -> AppResult<i64> {
        self.users()
            .insert_one(vec![with_fields_values([
                ("username", FieldValue::from(&user.username)),
                ("email", FieldValue::from(&user.email)),
                ("password", FieldValue::from(&user.password)),
            ])])
            .await
    }

    /// ID를 포함해 사용자 행 전체를 덮어씁니다.
    ///
    /// 새 리프레시 토큰을 기록하면 이전 토큰은 더 이상 일치하지 않게 되어 사실상 폐기됩니다.
    pub async fn update_user(&self, user: &User) -> AppResult<i64> {
        self.users()
            .upsert_one(vec![with_fields_values([
                ("id", FieldValue::from(user.id)),
                ("username", FieldValue::from(&user.username)),
                ("email", FieldValue::from(&user.email)),
                ("password", FieldValue::from(&user.password)),
                ("refresh_token", FieldValue::from(&user.refresh_token)),
            ])])
            .await
    }

    pub async fn get_user_by_id(&self, id: i64) -> AppResult<Option<User>> {
        if id <= 0 {
            return Ok(None);
        }

        self.users()
            .find_one(vec![with_where("id = ?", vec![id.into()])])
            .await?
            .decode()
    }

    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        if email.is_empty() {
            return Ok(None);
        }

        self.users()
            .find_one(vec![with_where("email = ?", vec![email.into()])])
            .await?
            .decode()
    }

    pub async fn get_user_by_name(&self, username: &str) -> AppResult<Option<User>> {
        if username.is_empty() {
            return Ok(None);
        }

        self.users()
            .find_one(vec![with_where("username = ?", vec![username.into()])])
            .await?
            .decode()
    }

    /// 사용자명 또는 이메일 중 어느 하나라도 일치하는 사용자를 조회합니다.
    ///
    /// 둘 다 주어지면 `username = ? OR email = ?`로 조회하며, 둘 다 없으면 `None`입니다.
    pub async fn get_user_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> AppResult<Option<User>> {
        let mut predicates = Vec::new();
        let mut args = Vec::new();

        if let Some(username) = username.filter(|u| !u.is_empty()) {
            predicates.push("username = ?");
            args.push(FieldValue::from(username));
        }
        if let Some(email) = email.filter(|e| !e.is_empty()) {
            predicates.push("email = ?");
            args.push(FieldValue::from(email));
        }

        if predicates.is_empty() {
            return Ok(None);
        }

        self.users()
            .find_one(vec![with_where(predicates.join(" OR "), args)])
            .await?
            .decode()
    }
}
