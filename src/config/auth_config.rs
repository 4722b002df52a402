//! # Authentication Configuration Module
//!
//! JWT 토큰, Google OAuth, 관리자 권한 검사 등 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 지원하는 인증 방식
//!
//! 1. **로컬 인증**: 사용자명 또는 이메일 + 패스워드
//! 2. **Google OAuth 2.0**: Authorization Code 플로우 기반 소셜 로그인
//! 3. **JWT 토큰**: 액세스/리프레시 토큰을 서로 다른 비밀키로 서명 (HS256)
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export TOKEN_ACCESS_TOKEN_SECRET="access-secret"
//! export TOKEN_REFRESH_TOKEN_SECRET="refresh-secret"
//! export TOKEN_ACCESS_TOKEN_EXPIRY_HOUR="1"
//! export TOKEN_REFRESH_TOKEN_EXPIRY_HOUR="168"
//! ```
//!
//! ### Google OAuth 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:8080/web/auth/google/callback"
//! ```
//!
//! ### OAuth 보안 설정
//! ```bash
//! export OAUTH_STATE_SECRET="your-oauth-state-secret"
//! export OAUTH_SESSION_TIMEOUT_MINUTES="10"
//! ```

use std::env;
use std::time::Duration;

use crate::config::Environment;

/// Google OAuth 2.0 설정을 관리하는 구조체
///
/// 클라이언트 자격 증명이 없으면 `None`을 반환하며, 이 경우 Google 로그인은 비활성화됩니다.
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    pub fn client_id() -> Option<String> {
        non_empty_var("GOOGLE_CLIENT_ID")
    }

    pub fn client_secret() -> Option<String> {
        non_empty_var("GOOGLE_CLIENT_SECRET")
    }

    pub fn redirect_uri() -> Option<String> {
        non_empty_var("GOOGLE_REDIRECT_URI")
    }

    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/auth".to_string())
    }

    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string())
    }

    /// 토큰 교환 및 사용자 정보 조회 HTTP 타임아웃 (기본값: 10초)
    pub fn http_timeout_secs() -> u64 {
        env::var("GOOGLE_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }
}

/// Google OAuth 클라이언트 설정 값 묶음
#[derive(Debug, Clone)]
pub struct GoogleOAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
    pub scopes: Vec<String>,
    pub http_timeout: Duration,
}

impl GoogleOAuthSettings {
    /// 환경 변수에서 설정을 읽습니다.
    ///
    /// 클라이언트 ID, 시크릿, 리다이렉트 URI 중 하나라도 없으면 `None`을 반환합니다.
    pub fn from_env() -> Option<Self> {
        let client_id = GoogleOAuthConfig::client_id()?;
        let client_secret = GoogleOAuthConfig::client_secret()?;
        let redirect_uri = GoogleOAuthConfig::redirect_uri()?;

        Some(Self {
            client_id,
            client_secret,
            redirect_uri,
            auth_uri: GoogleOAuthConfig::auth_uri(),
            token_uri: GoogleOAuthConfig::token_uri(),
            userinfo_uri: GoogleOAuthConfig::userinfo_uri(),
            scopes: vec!["openid".to_string(), "email".to_string(), "profile".to_string()],
            http_timeout: Duration::from_secs(GoogleOAuthConfig::http_timeout_secs()),
        })
    }
}

/// JWT 토큰 설정
///
/// 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키로 서명합니다.
pub struct JwtConfig;

impl JwtConfig {
    pub fn access_secret() -> String {
        env::var("TOKEN_ACCESS_TOKEN_SECRET").unwrap_or_else(|_| {
            log::warn!("TOKEN_ACCESS_TOKEN_SECRET not set, using default (not secure for production!)");
            "access-secret-key".to_string()
        })
    }

    pub fn refresh_secret() -> String {
        env::var("TOKEN_REFRESH_TOKEN_SECRET").unwrap_or_else(|_| {
            log::warn!("TOKEN_REFRESH_TOKEN_SECRET not set, using default (not secure for production!)");
            "refresh-secret-key".to_string()
        })
    }

    pub fn access_expiry_hours() -> i64 {
        env::var("TOKEN_ACCESS_TOKEN_EXPIRY_HOUR")
            .unwrap_or_else(|_| "1".to_string())
            .parse()
            .unwrap_or(1)
    }

    pub fn refresh_expiry_hours() -> i64 {
        env::var("TOKEN_REFRESH_TOKEN_EXPIRY_HOUR")
            .unwrap_or_else(|_| "168".to_string())
            .parse()
            .unwrap_or(168)
    }
}

/// 토큰 발급/검증에 쓰이는 설정 값 묶음
///
/// [`crate::services::auth::TokenService`]에 주입됩니다.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_hours: i64,
    pub refresh_ttl_hours: i64,
}

impl TokenSettings {
    pub fn from_env() -> Self {
        Self {
            access_secret: JwtConfig::access_secret(),
            refresh_secret: JwtConfig::refresh_secret(),
            access_ttl_hours: JwtConfig::access_expiry_hours(),
            refresh_ttl_hours: JwtConfig::refresh_expiry_hours(),
        }
    }
}

/// OAuth state 서명 설정
pub struct OAuthConfig;

impl OAuthConfig {
    pub fn state_secret() -> String {
        env::var("OAUTH_STATE_SECRET").unwrap_or_else(|_| {
            log::warn!("OAUTH_STATE_SECRET not set, using default (not secure for production!)");
            "oauth-state-secret".to_string()
        })
    }

    pub fn session_timeout_minutes() -> i64 {
        env::var("OAUTH_SESSION_TIMEOUT_MINUTES")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }
}

/// 관리자 권한 검사 설정
pub struct RbacConfig;

impl RbacConfig {
    /// 진단용 우회 subject ID
    ///
    /// `ENVIRONMENT=test`일 때만 `RBAC_DIAGNOSTIC_SUBJECT_ID`를 읽습니다.
    /// 그 외 환경에서는 값이 설정되어 있어도 항상 `None`입니다.
    pub fn bypass_subject_id() -> Option<i64> {
        Self::bypass_subject_id_for_env(&Environment::current())
    }

    pub fn bypass_subject_id_for_env(env: &Environment) -> Option<i64> {
        if *env != Environment::Test {
            return None;
        }

        let id = non_empty_var("RBAC_DIAGNOSTIC_SUBJECT_ID")?.parse::<i64>().ok()?;
        log::warn!("⚠️ 테스트 모드 관리자 우회 subject 활성화: {}", id);
        Some(id)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
