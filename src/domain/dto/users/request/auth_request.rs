//! 인증 요청관련 DTO
//!
//! 가입, 로그인, 토큰 갱신, Google 콜백 요청 정보를 매핑합니다.
//!
//! | DTO | 규칙 |
//! |-----|------|
//! | [`SignupRequest`] | 사용자명 3-50자, 이메일 필수, 패스워드 3-50자 |
//! | [`LoginRequest`] | 사용자명(3-50자) 또는 이메일 중 하나 이상, 패스워드 3-50자 |
//! | [`RefreshTokenRequest`] | 리프레시 토큰 필수 |
//! | [`OAuthCallbackQuery`] | code, state 필수 |

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, max = 50, message = "사용자명은 3-50자 사이여야 합니다"))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 3, max = 50, message = "비밀번호는 3-50자 사이여야 합니다"))]
    pub password: String,
}

/// 패스워드 로그인 요청
///
/// 사용자명과 이메일 중 하나 이상이 있어야 하며, 둘 다 있으면 어느 쪽이든 일치하는 사용자를 찾습니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_login_identity"))]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 3, max = 50, message = "사용자명은 3-50자 사이여야 합니다"))]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,

    #[validate(length(min = 3, max = 50, message = "비밀번호는 3-50자 사이여야 합니다"))]
    pub password: String,
}

fn validate_login_identity(req: &LoginRequest) -> Result<(), ValidationError> {
    if req.username.is_none() && req.email.is_none() {
        return Err(ValidationError::new("missing_identity")
            .with_message("사용자명 또는 이메일이 필요합니다".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OAuthCallbackQuery {
    #[validate(length(min = 1, message = "Authorization code가 필요합니다"))]
    #[serde(default)]
    pub code: String,

    #[validate(length(min = 1, message = "State가 필요합니다"))]
    #[serde(default)]
    pub state: String,

    pub error: Option<String>,
    pub error_description: Option<String>,
}
