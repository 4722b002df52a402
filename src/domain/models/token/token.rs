//! JWT 클레임 구조체 및 토큰 쌍
//!
//! 액세스 토큰은 subject(사용자 ID)와 표시 이름을, 리프레시 토큰은 subject만 담습니다.
//! subject는 RFC 7519 관례에 따라 문자열로 직렬화한 정수 ID입니다.
//! 같은 초에 발급된 토큰도 서로 다르도록 매번 새 `jti`를 담습니다.

use serde::{Deserialize, Serialize};

/// 액세스 토큰 클레임
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub name: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// 리프레시 토큰 클레임
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// 로그인/가입/갱신 결과로 발급되는 토큰 쌍
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// 액세스 토큰 만료까지 남은 시간 (초)
    pub expires_in: i64,
    pub token_type: String,
}
