//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 계정 서비스의 모든 실패를 하나의 열거형으로 표현합니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류와 HTTP 매핑
//!
//! | 분류 | 변형 | 상태 코드 |
//! |------|------|-----------|
//! | 저장소 실패 | [`AppError::DatabaseError`] | 500 |
//! | 중복 가입 | [`AppError::ConflictError`] | 409 |
//! | 대상 없음 | [`AppError::NotFound`] | 404 |
//! | 인증 실패 | [`AppError::AuthenticationError`] | 401 |
//! | 권한 부족 | [`AppError::AuthorizationError`] | 403 |
//! | 입력 검증 실패 | [`AppError::ValidationError`] | 400 |
//! | 외부 서비스 실패 | [`AppError::ExternalServiceError`] | 500 |
//! | 그 외 서버 에러 | [`AppError::InternalError`] | 500 |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! async fn signup(request: SignupRequest) -> Result<TokenPair, AppError> {
//!     if user_repo.get_user_by_email(&request.email).await?.is_some() {
//!         return Err(AppError::ConflictError("이미 존재하는 사용자입니다".to_string()));
//!     }
//!     // ...
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
///
/// 파이프라인의 각 단계는 첫 번째 실패를 그대로 반환하며,
/// 핸들러 계층에서 자동으로 HTTP 응답으로 변환됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    ///
    /// 가입 시 사용자명 또는 이메일이 이미 존재하는 경우입니다.
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스 에러 (500 Internal Server Error)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
