//! # User HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/profile` | 호출자 프로필 조회 | 200 OK / 404 |

use actix_web::{get, web, HttpResponse};

use crate::{domain::models::AuthenticatedUser, errors::AppError, state::AppState};

/// 호출자 프로필 조회
///
/// 인증 미들웨어가 저장한 사용자 ID로 프로필을 찾습니다.
#[get("")]
pub async fn get_profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = state.profile_service.get_profile(user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}
