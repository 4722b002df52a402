//! 역할 기반 권한 검사
//!
//! | 상황 | 결과 |
//! |------|------|
//! | subject 없음 | `AuthenticationError` (401) |
//! | 역할이 `admin`이 아님 | `AuthorizationError` (403) |
//! | 역할이 `admin` | 통과 |
//!
//! 진단용 우회 subject는 테스트 환경에서 명시적으로 설정된 경우에만 존재합니다
//! ([`RbacConfig::bypass_subject_id`](crate::config::RbacConfig::bypass_subject_id)).

use std::sync::Arc;

use crate::{
    db::Database,
    domain::entities::Role,
    errors::{AppError, AppResult},
    repositories::RoleRepository,
};

pub struct RoleGuard {
    roles: RoleRepository,
    bypass_subject_id: Option<i64>,
}

impl RoleGuard {
    pub fn new(db: Arc<Database>, bypass_subject_id: Option<i64>) -> Self {
        Self {
            roles: RoleRepository::new(db),
            bypass_subject_id,
        }
    }

    /// 사용자의 역할. 매핑이 없으면 `user`입니다.
    pub async fn get_role(&self, user_id: i64) -> AppResult<Role> {
        self.roles.get_role(user_id).await
    }

    pub async fn require_admin(&self, subject: Option<i64>) -> AppResult<()> {
        let user_id = subject
            .ok_or_else(|| AppError::AuthenticationError("인증되지 않은 요청입니다".to_string()))?;

        if self.bypass_subject_id == Some(user_id) {
            log::warn!("⚠️ 진단용 우회 subject로 관리자 검사를 통과합니다: {}", user_id);
            return Ok(());
        }

        if !self.get_role(user_id).await?.is_admin() {
            return Err(AppError::AuthorizationError("관리자 권한이 필요합니다".to_string()));
        }

        Ok(())
    }
}
