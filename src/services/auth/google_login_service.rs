//! Google 로그인 서비스
//!
//! 한 파이프라인이 신규 사용자와 재방문 사용자를 모두 처리합니다.
//!
//! ```text
//! FetchFederatedIdentity → FetchUser → SaveUser* → SaveProfile* → AssignDefaultRole* → IssueTokens
//!                                       * 기존 사용자가 있으면 건너뜀
//! ```
//!
//! Google 클라이언트 설정이 없으면 로그인 URL과 콜백 모두 서버 에러를 반환합니다.

use std::sync::Arc;

use crate::{
    core::{run_compensated, Compensation, Pipeline},
    db::Database,
    domain::models::TokenPair,
    errors::{AppError, AppResult},
    repositories::{ProfileRepository, RoleRepository, UserRepository},
    services::auth::{IdentityProvider, OAuthStateSigner, TokenService},
    services::steps::{
        AccountRequest, AssignDefaultRoleStep, FetchFederatedIdentityStep, FetchUserStep,
        IssueTokensStep, SaveProfileStep, SaveUserStep, UserComposition,
    },
};

struct Federation {
    provider: Arc<dyn IdentityProvider>,
    pipeline: Pipeline<UserComposition, TokenPair>,
}

pub struct GoogleLoginService {
    federation: Option<Federation>,
    state: OAuthStateSigner,
    compensation: Arc<dyn Compensation>,
}

impl GoogleLoginService {
    pub fn new(
        db: Arc<Database>,
        tokens: TokenService,
        provider: Option<Arc<dyn IdentityProvider>>,
        state: OAuthStateSigner,
        compensation: Arc<dyn Compensation>,
    ) -> Self {
        let federation = provider.map(|provider| {
            let users = UserRepository::new(db.clone());
            let pipeline = Pipeline::new("google-login")
                .then(FetchFederatedIdentityStep::new(provider.clone()))
                .then(FetchUserStep::new(users.clone()))
                .then(SaveUserStep::new(users.clone()))
                .then(SaveProfileStep::new(ProfileRepository::new(db.clone())))
                .then(AssignDefaultRoleStep::new(RoleRepository::new(db.clone())))
                .then(IssueTokensStep::new(tokens, users));

            Federation { provider, pipeline }
        });

        if federation.is_none() {
            log::warn!("⚠️ Google OAuth 설정이 없어 Google 로그인이 비활성화됩니다");
        }

        Self {
            federation,
            state,
            compensation,
        }
    }

    fn federation(&self) -> AppResult<&Federation> {
        self.federation
            .as_ref()
            .ok_or_else(|| AppError::InternalError("Google OAuth가 설정되지 않았습니다".to_string()))
    }

    /// 서명된 state를 포함한 Google 인증 페이지 URL
    pub fn login_url(&self) -> AppResult<String> {
        let federation = self.federation()?;
        Ok(federation.provider.authorization_url(&self.state.issue()))
    }

    /// 콜백의 code로 로그인하고 토큰 쌍을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - state가 위조되었거나 만료된 경우
    /// * `AppError::ConflictError` - 제공자 이메일을 다른 계정이 사용자명으로 쓰는 경우
    /// * `AppError::ExternalServiceError` - 제공자 호출 실패 또는 이메일 누락
    /// * `AppError::InternalError` - Google OAuth 미설정
    pub async fn login_with_code(&self, code: &str, state: &str) -> AppResult<TokenPair> {
        let federation = self.federation()?;
        self.state.verify(state)?;

        let mut context = UserComposition::new(AccountRequest::Google {
            code: code.to_string(),
        });
        let mut tokens = TokenPair::default();

        run_compensated(
            self.compensation.as_ref(),
            &federation.pipeline,
            &mut context,
            &mut tokens,
        )
        .await?;

        log::info!("✅ Google 로그인 성공 (신규 사용자: {})", context.existing_user.is_none());
        Ok(tokens)
    }
}
