//! 프로필 리포지토리
//!
//! 프로필은 사용자와 1:1이며 `user_id`가 유일 키이므로,
//! 같은 사용자에 대해 다시 저장하면 기존 행의 닉네임이 갱신됩니다.

use std::sync::Arc;

use crate::{
    db::{with_fields_values, with_where, Collection, Database, FieldValue, SqlCollection},
    domain::entities::{Profile, PROFILES_TABLE},
    errors::AppResult,
};

#[derive(Clone)]
pub struct ProfileRepository {
    db: Arc<Database>,
}

impl ProfileRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn profiles(&self) -> SqlCollection {
        self.db.collection(PROFILES_TABLE)
    }

    pub async fn create_profile(&self, user_id: i64, nickname: &str) -> AppResult<i64> {
        self.profiles()
            .upsert_one(vec![with_fields_values([
                ("user_id", FieldValue::from(user_id)),
                ("nickname", FieldValue::from(nickname)),
            ])])
            .await
    }

    pub async fn get_profile_by_user_id(&self, user_id: i64) -> AppResult<Option<Profile>> {
        if user_id <= 0 {
            return Ok(None);
        }

        self.profiles()
            .find_one(vec![with_where("user_id = ?", vec![user_id.into()])])
            .await?
            .decode()
    }
}
