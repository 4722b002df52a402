//! JWT 토큰 관리 서비스 구현
//!
//! 설정으로 주입받은 비밀키와 만료 시간으로 토큰 쌍을 발급하고 검증합니다.
//! 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키로 서명됩니다.

use crate::{
    config::TokenSettings,
    domain::{entities::User, models::{AccessClaims, TokenPair}},
    errors::{AppError, AppResult},
    services::auth::credentials,
};

/// JWT 토큰 관리 서비스
///
/// HMAC-SHA256 서명을 사용하며, 기본 만료는 액세스 1시간, 리프레시 168시간입니다.
#[derive(Debug, Clone)]
pub struct TokenService {
    settings: TokenSettings,
}

impl TokenService {
    pub fn new(settings: TokenSettings) -> Self {
        Self { settings }
    }

    /// 저장된 사용자를 위한 토큰 쌍 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 사용자 ID가 없거나 서명에 실패한 경우
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token_pair = token_service.generate_token_pair(&user)?;
    /// user.refresh_token = token_pair.refresh_token.clone();
    /// ```
    pub fn generate_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        if !user.is_persisted() {
            return Err(AppError::InternalError("사용자 ID가 없습니다".to_string()));
        }

        let access_token = credentials::issue_access_token(
            user.id,
            &user.username,
            &self.settings.access_secret,
            self.settings.access_ttl_hours,
        )?;
        let refresh_token = credentials::issue_refresh_token(
            user.id,
            &self.settings.refresh_secret,
            self.settings.refresh_ttl_hours,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            expires_in: self.settings.access_ttl_hours.saturating_mul(3600),
            token_type: "Bearer".to_string(),
        })
    }

    /// 액세스 토큰 검증 및 클레임 추출
    ///
    /// subject가 정수가 아니면 인증 실패로 처리합니다.
    pub fn verify_access_token(&self, token: &str) -> AppResult<AccessClaims> {
        let claims = credentials::decode_access_claims(token, &self.settings.access_secret)?;
        claims
            .sub
            .parse::<i64>()
            .map_err(|_| credentials::TokenError::InvalidSubject(claims.sub.clone()))?;
        Ok(claims)
    }

    /// 리프레시 토큰에서 사용자 ID 추출
    pub fn refresh_token_subject(&self, token: &str) -> AppResult<i64> {
        Ok(credentials::extract_subject(token, &self.settings.refresh_secret)?)
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = TokenService::extract_bearer_token("Bearer eyJhbGciOi...")?;
    /// ```
    pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            )),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_settings() -> TokenSettings {
        TokenSettings {
            access_secret: "access-test-secret".to_string(),
            refresh_secret: "refresh-test-secret".to_string(),
            access_ttl_hours: 1,
            refresh_ttl_hours: 168,
        }
    }

    fn persisted_user() -> User {
        let mut user = User::new_local("alice".into(), "alice@example.com".into(), "h".into());
        user.id = 5;
        user
    }

    #[test]
    fn test_generate_token_pair() {
        let service = TokenService::new(test_settings());
        let pair = service.generate_token_pair(&persisted_user()).unwrap();

        assert_eq!(pair.expires_in, 3600);
        assert_eq!(pair.token_type, "Bearer");

        let claims = service.verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.sub, "5");
        assert_eq!(claims.name, "alice");
        assert_eq!(service.refresh_token_subject(&pair.refresh_token).unwrap(), 5);
    }

    #[test]
    fn test_access_and_refresh_secrets_are_not_interchangeable() {
        let service = TokenService::new(test_settings());
        let pair = service.generate_token_pair(&persisted_user()).unwrap();

        assert!(service.verify_access_token(&pair.refresh_token).is_err());
        assert!(service.refresh_token_subject(&pair.access_token).is_err());
    }

    #[test]
    fn test_unsaved_user_cannot_get_tokens() {
        let service = TokenService::new(test_settings());
        let user = User::new_federated("g@example.com".into());
        assert!(matches!(service.generate_token_pair(&user), Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(TokenService::extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(TokenService::extract_bearer_token("Basic abc").is_err());
        assert!(TokenService::extract_bearer_token("Bearer ").is_err());
    }
}
