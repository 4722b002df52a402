//! 토큰 갱신 서비스
//!
//! ```text
//! ExtractRefreshSubject → FetchUser → VerifyStoredRefreshToken → IssueTokens
//! ```
//!
//! 갱신할 때마다 새 리프레시 토큰이 저장되므로, 한 번 사용한 리프레시 토큰은 다시 쓸 수 없습니다.

use std::sync::Arc;

use crate::{
    core::{run_compensated, Compensation, Pipeline},
    db::Database,
    domain::models::TokenPair,
    errors::AppResult,
    repositories::UserRepository,
    services::auth::TokenService,
    services::steps::{
        AccountRequest, ExtractRefreshSubjectStep, FetchUserStep, IssueTokensStep, UserComposition,
        VerifyStoredRefreshTokenStep,
    },
};

pub struct RefreshService {
    pipeline: Pipeline<UserComposition, TokenPair>,
    compensation: Arc<dyn Compensation>,
}

impl RefreshService {
    pub fn new(db: Arc<Database>, tokens: TokenService, compensation: Arc<dyn Compensation>) -> Self {
        let users = UserRepository::new(db);

        let pipeline = Pipeline::new("refresh")
            .then(ExtractRefreshSubjectStep::new(tokens.clone()))
            .then(FetchUserStep::new(users.clone()))
            .then(VerifyStoredRefreshTokenStep)
            .then(IssueTokensStep::new(tokens, users));

        Self {
            pipeline,
            compensation,
        }
    }

    pub async fn refresh(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let mut context = UserComposition::new(AccountRequest::Refresh {
            refresh_token: refresh_token.to_string(),
        });
        let mut tokens = TokenPair::default();

        run_compensated(self.compensation.as_ref(), &self.pipeline, &mut context, &mut tokens).await?;

        log::debug!("토큰 갱신 완료: subject {:?}", context.subject_id);
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NoopCompensation;
    use crate::db::testing::memory_database;
    use crate::domain::dto::SignupRequest;
    use crate::errors::AppError;
    use crate::services::auth::token_service::tests::test_settings;
    use crate::services::users::SignupService;

    async fn signed_up() -> (RefreshService, TokenPair) {
        let db = memory_database().await;
        let tokens = TokenService::new(test_settings());
        let pair = SignupService::new(db.clone(), tokens.clone(), 4, Arc::new(NoopCompensation))
            .signup(SignupRequest {
                username: "alice".into(),
                email: "alice@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        (RefreshService::new(db, tokens, Arc::new(NoopCompensation)), pair)
    }

    #[actix_web::test]
    async fn test_refresh_rotates_token() {
        let (service, pair) = signed_up().await;

        let refreshed = service.refresh(&pair.refresh_token).await.unwrap();

        assert!(!refreshed.access_token.is_empty());
        assert_ne!(refreshed.refresh_token, pair.refresh_token);
        assert!(service.refresh(&refreshed.refresh_token).await.is_ok());
    }

    #[actix_web::test]
    async fn test_replaying_rotated_token_is_rejected() {
        let (service, pair) = signed_up().await;

        service.refresh(&pair.refresh_token).await.unwrap();

        assert!(matches!(
            service.refresh(&pair.refresh_token).await,
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_access_token_cannot_refresh() {
        let (service, pair) = signed_up().await;
        let result = service.refresh(&pair.access_token).await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_garbage_token_is_unauthorized() {
        let (service, _) = signed_up().await;
        assert!(matches!(
            service.refresh("not-a-token").await,
            Err(AppError::AuthenticationError(_))
        ));
    }
}
