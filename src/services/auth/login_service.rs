//! 패스워드 로그인 서비스
//!
//! ```text
//! FetchUser → VerifyPassword → IssueTokens
//! ```
//!
//! 사용자가 없으면 `NotFound`, 패스워드가 틀리면 `AuthenticationError`입니다.

use std::sync::Arc;

use crate::{
    core::{run_compensated, Compensation, Pipeline},
    db::Database,
    domain::{dto::LoginRequest, models::TokenPair},
    errors::AppResult,
    repositories::UserRepository,
    services::auth::TokenService,
    services::steps::{AccountRequest, FetchUserStep, IssueTokensStep, UserComposition, VerifyPasswordStep},
};

pub struct LoginService {
    pipeline: Pipeline<UserComposition, TokenPair>,
    compensation: Arc<dyn Compensation>,
}

impl LoginService {
    pub fn new(db: Arc<Database>, tokens: TokenService, compensation: Arc<dyn Compensation>) -> Self {
        let users = UserRepository::new(db);

        let pipeline = Pipeline::new("login")
            .then(FetchUserStep::new(users.clone()))
            .then(VerifyPasswordStep)
            .then(IssueTokensStep::new(tokens, users));

        Self {
            pipeline,
            compensation,
        }
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenPair> {
        let identity = request
            .username
            .clone()
            .or_else(|| request.email.clone())
            .unwrap_or_default();
        let mut context = UserComposition::new(AccountRequest::Login(request));
        let mut tokens = TokenPair::default();

        run_compensated(self.compensation.as_ref(), &self.pipeline, &mut context, &mut tokens).await?;

        log::info!("✅ 로그인 성공: {}", identity);
        Ok(tokens)
    }
}
