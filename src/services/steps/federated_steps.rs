//! 외부 인증 제공자 단계

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    core::Step,
    domain::{entities::User, models::TokenPair},
    errors::{AppError, AppResult},
    services::auth::IdentityProvider,
    services::steps::{AccountRequest, UserComposition},
};

/// Authorization Code를 교환하고 제공자 사용자 정보를 가져옵니다.
///
/// 제공자 이메일로 만든 사용자 후보를 `new_user`에 올려 두며,
/// 이후 단계가 기존 사용자 여부에 따라 저장하거나 건너뜁니다.
pub struct FetchFederatedIdentityStep {
    provider: Arc<dyn IdentityProvider>,
}

impl FetchFederatedIdentityStep {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Step<UserComposition, TokenPair> for FetchFederatedIdentityStep {
    fn name(&self) -> &'static str {
        "FetchFederatedIdentity"
    }

    async fn execute(&self, context: &mut UserComposition, _: &mut TokenPair) -> AppResult<()> {
        let AccountRequest::Google { code } = &context.request else {
            return Err(context.unexpected(self.name()));
        };

        let access_token = self.provider.exchange_code(code).await?;
        let info = self.provider.fetch_user_info(&access_token).await?;

        let email = info.email.trim();
        if email.is_empty() {
            return Err(AppError::ExternalServiceError(
                "제공자 응답에 이메일이 없습니다".to_string(),
            ));
        }

        log::info!("🔑 Google 사용자 확인: {}", email);
        context.new_user = Some(User::new_federated(email.to_string()));
        Ok(())
    }
}
