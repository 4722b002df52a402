//! 본인 프로필 조회 서비스

use std::sync::Arc;

use crate::{
    db::Database,
    domain::entities::Profile,
    errors::{AppError, AppResult},
    repositories::ProfileRepository,
};

pub struct ProfileService {
    profiles: ProfileRepository,
}

impl ProfileService {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            profiles: ProfileRepository::new(db),
        }
    }

    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자의 프로필이 없는 경우
    pub async fn get_profile(&self, user_id: i64) -> AppResult<Profile> {
        self.profiles
            .get_profile_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("프로필을 찾을 수 없습니다: {}", user_id)))
    }
}
