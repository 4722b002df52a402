//! # Google OAuth 2.0 인증 서비스
//!
//! Authorization Code 플로우에서 외부 호출을 담당합니다.
//!
//! ## 인증 플로우
//!
//! ```text
//! 1. GET /web/login/google
//!    └─► authorization_url(state) 로 307 리다이렉트
//! 2. Google 인증 후 /web/auth/google/callback?code=..&state=..
//!    ├─► state 검증 (OAuthStateSigner)
//!    ├─► exchange_code(code)          POST token_uri
//!    └─► fetch_user_info(access_token) GET userinfo_uri
//! 3. 로그인 파이프라인이 사용자 조회/생성 후 토큰 쌍 발급
//! ```
//!
//! 모든 외부 호출은 설정된 HTTP 타임아웃 안에서 끝나며, 실패는
//! `AppError::ExternalServiceError`(서버 에러)로 보고됩니다.
//!
//! 로그인 파이프라인은 [`IdentityProvider`] 트레이트에만 의존하므로
//! 테스트에서는 네트워크 없이 가짜 제공자를 주입합니다.

use async_trait::async_trait;

use crate::{
    config::GoogleOAuthSettings,
    domain::{dto::GoogleTokenResponse, models::GoogleUserInfo},
    errors::{AppError, AppResult, ErrorContext},
};

/// 외부 인증 제공자
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 사용자를 보낼 제공자 인증 페이지 URL
    fn authorization_url(&self, state: &str) -> String;

    /// Authorization Code를 제공자 액세스 토큰으로 교환합니다.
    async fn exchange_code(&self, code: &str) -> AppResult<String>;

    /// 제공자 액세스 토큰으로 사용자 정보를 조회합니다.
    async fn fetch_user_info(&self, access_token: &str) -> AppResult<GoogleUserInfo>;
}

/// Google OAuth 2.0 클라이언트
pub struct GoogleAuthService {
    settings: GoogleOAuthSettings,
    client: reqwest::Client,
}

impl GoogleAuthService {
    /// 타임아웃이 적용된 HTTP 클라이언트로 서비스를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - HTTP 클라이언트 생성 실패
    pub fn new(settings: GoogleOAuthSettings) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.http_timeout)
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self { settings, client })
    }
}

#[async_trait]
impl IdentityProvider for GoogleAuthService {
    fn authorization_url(&self, state: &str) -> String {
        let scope = self.settings.scopes.join(" ");
        let params = [
            ("client_id", self.settings.client_id.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("response_type", "code"),
            ("state", state),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.settings.auth_uri, query_string)
    }

    async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let params = [
            ("code", code),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let response = self
            .client
            .post(&self.settings.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 토큰 교환 실패 ({}): {}",
                status, error_text
            )));
        }

        let token = response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 토큰 응답 파싱 실패: {}", e)))?;

        Ok(token.access_token)
    }

    async fn fetch_user_info(&self, access_token: &str) -> AppResult<GoogleUserInfo> {
        let response = self
            .client
            .get(&self.settings.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "Google 사용자 정보 조회 실패 ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// 네트워크 없이 고정된 사용자 정보를 돌려주는 제공자
    pub(crate) struct FakeIdentityProvider {
        pub email: String,
        pub exchanges: AtomicUsize,
    }

    impl FakeIdentityProvider {
        pub(crate) fn with_email(email: &str) -> Self {
            Self {
                email: email.to_string(),
                exchanges: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeIdentityProvider {
        fn authorization_url(&self, state: &str) -> String {
            format!("https://provider.test/auth?state={}", state)
        }

        async fn exchange_code(&self, code: &str) -> AppResult<String> {
            self.exchanges.fetch_add(1, Ordering::SeqCst);
            if code == "bad-code" {
                return Err(AppError::ExternalServiceError("invalid_grant".to_string()));
            }
            Ok(format!("provider-token-{}", code))
        }

        async fn fetch_user_info(&self, _access_token: &str) -> AppResult<GoogleUserInfo> {
            Ok(GoogleUserInfo {
                email: self.email.clone(),
                ..Default::default()
            })
        }
    }

    fn settings() -> GoogleOAuthSettings {
        GoogleOAuthSettings {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_uri: "http://localhost:8080/web/auth/google/callback".to_string(),
            auth_uri: "https://accounts.google.com/o/oauth2/auth".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_uri: "https://www.googleapis.com/oauth2/v2/userinfo".to_string(),
            scopes: vec!["openid".into(), "email".into(), "profile".into()],
            http_timeout: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_authorization_url_is_encoded() {
        let service = GoogleAuthService::new(settings()).unwrap();
        let url = service.authorization_url("123.abc");

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("scope=openid%20email%20profile"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fweb%2Fauth%2Fgoogle%2Fcallback"
        ));
        assert!(url.contains("state=123.abc"));
        assert!(url.contains("response_type=code"));
    }
}
