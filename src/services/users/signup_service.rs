//! # 가입 서비스 구현
//!
//! 패스워드 가입을 단계 파이프라인으로 실행합니다.
//!
//! ## 처리 흐름
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────┐   ┌─────────────┐   ┌───────────────────┐   ┌──────────────┐
//! │CheckUserAbsent│ → │ HashPassword │ → │ SaveUser │ → │ SaveProfile │ → │ AssignDefaultRole │ → │ IssueTokens  │
//! └──────────────┘   └──────────────┘   └──────────┘   └─────────────┘   └───────────────────┘   └──────────────┘
//!        │ 중복이면 409, 이후 단계 실행 안 함
//! ```
//!
//! 파이프라인 전체는 [`run_compensated`]로 감싸져 있어서, 중간 단계가 실패하면
//! 요청 시작 시점의 스냅샷으로 저장소를 되돌립니다.

use std::sync::Arc;

use crate::{
    core::{run_compensated, Compensation, Pipeline},
    db::Database,
    domain::{dto::SignupRequest, models::TokenPair},
    errors::AppResult,
    repositories::{ProfileRepository, RoleRepository, UserRepository},
    services::auth::TokenService,
    services::steps::{
        AccountRequest, AssignDefaultRoleStep, CheckUserAbsentStep, HashPasswordStep,
        IssueTokensStep, SaveProfileStep, SaveUserStep, UserComposition,
    },
};

pub struct SignupService {
    pipeline: Pipeline<UserComposition, TokenPair>,
    compensation: Arc<dyn Compensation>,
}

impl SignupService {
    pub fn new(
        db: Arc<Database>,
        tokens: TokenService,
        bcrypt_cost: u32,
        compensation: Arc<dyn Compensation>,
    ) -> Self {
        let users = UserRepository::new(db.clone());

        let pipeline = Pipeline::new("signup")
            .then(CheckUserAbsentStep::new(users.clone()))
            .then(HashPasswordStep::new(bcrypt_cost))
            .then(SaveUserStep::new(users.clone()))
            .then(SaveProfileStep::new(ProfileRepository::new(db.clone())))
            .then(AssignDefaultRoleStep::new(RoleRepository::new(db)))
            .then(IssueTokensStep::new(tokens, users));

        Self {
            pipeline,
            compensation,
        }
    }

    /// 새 사용자를 등록하고 토큰 쌍을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 사용자명 또는 이메일이 이미 존재
    /// * `AppError::DatabaseError` - 저장소 실패
    /// * `AppError::InternalError` - 해싱/서명 실패 또는 백업·복원 실패
    pub async fn signup(&self, request: SignupRequest) -> AppResult<TokenPair> {
        let username = request.username.clone();
        let mut context = UserComposition::new(AccountRequest::Signup(request));
        let mut tokens = TokenPair::default();

        run_compensated(self.compensation.as_ref(), &self.pipeline, &mut context, &mut tokens).await?;

        log::info!("✅ 가입 완료: {}", username);
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NoopCompensation;
    use crate::db::testing::memory_database;
    use crate::db::SqliteSnapshotBackup;
    use crate::errors::AppError;
    use crate::repositories::AdminRepository;
    use crate::services::auth::token_service::tests::test_settings;

    fn request(username: &str, email: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    async fn count_rows(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[actix_web::test]
    async fn test_signup_creates_user_profile_and_role() {
        let db = memory_database().await;
        let service = SignupService::new(
            db.clone(),
            TokenService::new(test_settings()),
            4,
            Arc::new(NoopCompensation),
        );

        let tokens = service.signup(request("alice", "alice@example.com")).await.unwrap();
        assert!(!tokens.access_token.is_empty());

        let users = AdminRepository::new(db.clone()).get_users_full_info(10, 0).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, "user");
        assert_eq!(users[0].nickname, "alice");

        let stored = UserRepository::new(db).get_user_by_name("alice").await.unwrap().unwrap();
        assert_eq!(stored.refresh_token, tokens.refresh_token);
        assert_ne!(stored.password, "secret");
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_conflict_without_writes() {
        let db = memory_database().await;
        let service = SignupService::new(
            db.clone(),
            TokenService::new(test_settings()),
            4,
            Arc::new(NoopCompensation),
        );
        service.signup(request("alice", "alice@example.com")).await.unwrap();

        let result = service.signup(request("alice2", "alice@example.com")).await;

        assert!(matches!(result, Err(AppError::ConflictError(_))));
        assert_eq!(count_rows(&db, "users").await, 1);
        assert_eq!(count_rows(&db, "profiles").await, 1);
        assert_eq!(count_rows(&db, "users_has_roles").await, 1);
    }

    #[actix_web::test]
    async fn test_concurrent_signups_with_same_username_create_one_account() {
        let db = memory_database().await;
        let service = SignupService::new(
            db.clone(),
            TokenService::new(test_settings()),
            4,
            Arc::new(NoopCompensation),
        );

        let (first, second) = futures_util::join!(
            service.signup(request("alice", "a1@example.com")),
            service.signup(request("alice", "a2@example.com")),
        );

        let (winner, email) = match (&first, &second) {
            (Ok(tokens), Err(AppError::ConflictError(_))) => (tokens, "a1@example.com"),
            (Err(AppError::ConflictError(_)), Ok(tokens)) => (tokens, "a2@example.com"),
            other => panic!("한 가입만 성공해야 합니다: {:?}", other),
        };

        assert_eq!(count_rows(&db, "users").await, 1);
        assert_eq!(count_rows(&db, "profiles").await, 1);
        assert_eq!(count_rows(&db, "users_has_roles").await, 1);

        let stored = UserRepository::new(db).get_user_by_name("alice").await.unwrap().unwrap();
        assert_eq!(stored.email, email);
        assert_eq!(stored.refresh_token, winner.refresh_token);
    }

    #[actix_web::test]
    async fn test_failure_after_save_restores_snapshot() {
        let db = memory_database().await;
        let mut settings = test_settings();
        // 사용자/프로필/역할 저장 후 토큰 서명 단계에서 실패합니다
        settings.access_ttl_hours = i64::MAX;
        let service = SignupService::new(
            db.clone(),
            TokenService::new(settings),
            4,
            Arc::new(SqliteSnapshotBackup::new(db.clone(), std::env::temp_dir())),
        );

        let result = service.signup(request("alice", "alice@example.com")).await;

        assert!(matches!(result, Err(AppError::InternalError(_))));
        assert_eq!(count_rows(&db, "users").await, 0);
        assert_eq!(count_rows(&db, "profiles").await, 0);
        assert_eq!(count_rows(&db, "users_has_roles").await, 0);
    }
}
