//! 토큰 발급/갱신 단계

use async_trait::async_trait;

use crate::{
    core::Step,
    domain::models::TokenPair,
    errors::{AppError, AppResult},
    repositories::UserRepository,
    services::auth::TokenService,
    services::steps::{AccountRequest, UserComposition},
};

/// 토큰 쌍을 발급하고 새 리프레시 토큰을 사용자 행에 기록합니다.
///
/// 이전 리프레시 토큰은 덮어써지므로 더 이상 갱신에 쓸 수 없습니다.
pub struct IssueTokensStep {
    tokens: TokenService,
    users: UserRepository,
}

impl IssueTokensStep {
    pub fn new(tokens: TokenService, users: UserRepository) -> Self {
        Self { tokens, users }
    }
}

#[async_trait]
impl Step<UserComposition, TokenPair> for IssueTokensStep {
    fn name(&self) -> &'static str {
        "IssueTokens"
    }

    async fn execute(&self, context: &mut UserComposition, result: &mut TokenPair) -> AppResult<()> {
        let user = context.current_user_mut()?;
        let pair = self.tokens.generate_token_pair(user)?;

        user.refresh_token = pair.refresh_token.clone();
        self.users.update_user(user).await?;

        *result = pair;
        Ok(())
    }
}

/// 리프레시 토큰을 검증하고 subject를 컨텍스트에 기록합니다.
pub struct ExtractRefreshSubjectStep {
    tokens: TokenService,
}

impl ExtractRefreshSubjectStep {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl Step<UserComposition, TokenPair> for ExtractRefreshSubjectStep {
    fn name(&self) -> &'static str {
        "ExtractRefreshSubject"
    }

    async fn execute(&self, context: &mut UserComposition, _: &mut TokenPair) -> AppResult<()> {
        let AccountRequest::Refresh { refresh_token } = &context.request else {
            return Err(context.unexpected(self.name()));
        };

        context.subject_id = Some(self.tokens.refresh_token_subject(refresh_token)?);
        Ok(())
    }
}

/// 제시된 리프레시 토큰이 사용자에게 마지막으로 발급된 토큰인지 확인합니다.
pub struct VerifyStoredRefreshTokenStep;

#[async_trait]
impl Step<UserComposition, TokenPair> for VerifyStoredRefreshTokenStep {
    fn name(&self) -> &'static str {
        "VerifyStoredRefreshToken"
    }

    async fn execute(&self, context: &mut UserComposition, _: &mut TokenPair) -> AppResult<()> {
        let AccountRequest::Refresh { refresh_token } = &context.request else {
            return Err(context.unexpected(self.name()));
        };
        let user = context
            .existing_user
            .as_ref()
            .ok_or_else(|| AppError::InternalError("검증할 사용자가 없습니다".to_string()))?;

        if user.refresh_token.is_empty() || user.refresh_token != *refresh_token {
            return Err(AppError::AuthenticationError(
                "더 이상 유효하지 않은 리프레시 토큰입니다".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::memory_database;
    use crate::domain::entities::User;
    use crate::services::auth::token_service::tests::test_settings;

    #[actix_web::test]
    async fn test_issue_tokens_persists_refresh_token() {
        let users = UserRepository::new(memory_database().await);
        let mut user = User::new_local("alice".into(), "alice@example.com".into(), "h".into());
        user.id = users.create_user(&user).await.unwrap();

        let mut context = UserComposition::new(AccountRequest::Google { code: "c".into() });
        context.existing_user = Some(user.clone());

        let step = IssueTokensStep::new(TokenService::new(test_settings()), users.clone());
        let mut tokens = TokenPair::default();
        step.execute(&mut context, &mut tokens).await.unwrap();

        let stored = users.get_user_by_id(user.id).await.unwrap().unwrap();
        assert!(!tokens.access_token.is_empty());
        assert_eq!(stored.refresh_token, tokens.refresh_token);
    }

    #[actix_web::test]
    async fn test_rotated_refresh_token_is_rejected() {
        let mut context = UserComposition::new(AccountRequest::Refresh {
            refresh_token: "old".into(),
        });
        let mut user = User::new_federated("g@example.com".into());
        user.refresh_token = "new".into();
        context.existing_user = Some(user);

        let result = VerifyStoredRefreshTokenStep
            .execute(&mut context, &mut TokenPair::default())
            .await;
        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_extract_refresh_subject() {
        let service = TokenService::new(test_settings());
        let mut user = User::new_federated("g@example.com".into());
        user.id = 9;
        let pair = service.generate_token_pair(&user).unwrap();

        let mut context = UserComposition::new(AccountRequest::Refresh {
            refresh_token: pair.refresh_token,
        });
        ExtractRefreshSubjectStep::new(service)
            .execute(&mut context, &mut TokenPair::default())
            .await
            .unwrap();

        assert_eq!(context.subject_id, Some(9));
    }
}
