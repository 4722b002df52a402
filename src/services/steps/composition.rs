//! 파이프라인 컴포지션 컨텍스트
//!
//! 요청 하나의 수명 동안만 존재하며 저장되지 않습니다.

use crate::domain::dto::{LoginRequest, SignupRequest};
use crate::domain::entities::User;
use crate::errors::{AppError, AppResult};

/// 파이프라인에 들어온 요청 본문
#[derive(Debug, Clone)]
pub enum AccountRequest {
    Signup(SignupRequest),
    Login(LoginRequest),
    Google { code: String },
    Refresh { refresh_token: String },
}

impl AccountRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            AccountRequest::Signup(_) => "signup",
            AccountRequest::Login(_) => "login",
            AccountRequest::Google { .. } => "google",
            AccountRequest::Refresh { .. } => "refresh",
        }
    }
}

/// 단계 간에 공유되는 상태
///
/// - `existing_user`: 저장소에서 찾은 기존 사용자
/// - `new_user`: 이번 요청에서 만들고 있는 사용자
/// - `subject_id`: 리프레시 토큰에서 꺼낸 사용자 ID
#[derive(Debug, Clone)]
pub struct UserComposition {
    pub request: AccountRequest,
    pub subject_id: Option<i64>,
    pub existing_user: Option<User>,
    pub new_user: Option<User>,
}

impl UserComposition {
    pub fn new(request: AccountRequest) -> Self {
        Self {
            request,
            subject_id: None,
            existing_user: None,
            new_user: None,
        }
    }

    /// 토큰을 발급받을 사용자. 기존 사용자가 우선입니다.
    pub fn current_user_mut(&mut self) -> AppResult<&mut User> {
        match self.existing_user.as_mut() {
            Some(user) => Ok(user),
            None => self.new_user.as_mut().ok_or_else(|| {
                AppError::InternalError("컴포지션에 사용자가 없습니다".to_string())
            }),
        }
    }

    /// 새 사용자를 만드는 단계가 참조하는 사용자
    pub fn new_user_mut(&mut self) -> AppResult<&mut User> {
        self.new_user.as_mut().ok_or_else(|| {
            AppError::InternalError("컴포지션에 새 사용자가 없습니다".to_string())
        })
    }

    /// 단계가 기대하지 않은 요청 종류를 받았을 때의 에러
    pub fn unexpected(&self, step: &str) -> AppError {
        AppError::InternalError(format!(
            "{} 단계는 {} 요청을 처리할 수 없습니다",
            step,
            self.request.kind()
        ))
    }
}
