//! 인증된 요청 주체
//!
//! 인증 미들웨어가 액세스 토큰을 검증한 뒤 Request Extensions에 저장하며,
//! 핸들러는 추출자(extractor)로 바로 받아 사용합니다.
//!
//! ```rust,ignore
//! #[get("/profile")]
//! pub async fn get_profile(user: AuthenticatedUser, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
//!     let profile = state.profile_service.get_profile(user.user_id).await?;
//!     Ok(HttpResponse::Ok().json(profile))
//! }
//! ```

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 토큰 subject에서 얻은 사용자 ID
    pub user_id: i64,

    /// 액세스 토큰의 표시 이름
    pub name: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}
