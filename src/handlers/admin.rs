//! # Admin HTTP Handlers
//!
//! 관리자 역할이 필요한 사용자/역할 관리 엔드포인트입니다.
//! 접근 제어는 스코프에 걸린 `AuthMiddleware::admin_only()`가 담당합니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/api/admin/users?take=&skip=` | 역할/프로필 포함 사용자 목록 |
//! | `DELETE` | `/api/admin/user?user_id=` | 사용자 삭제 |
//! | `PATCH` | `/api/admin/user/role` | 역할 부여 |

use actix_web::{delete, get, patch, web, HttpResponse};
use validator::Validate;

use crate::{
    domain::{
        dto::{DeleteUserQuery, PaginationRequest, RoleAssignRequest},
        models::AuthenticatedUser,
    },
    errors::AppError,
    state::AppState,
};

#[get("/users")]
pub async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<PaginationRequest>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let users = state.admin_service.list_users(&query).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[delete("/user")]
pub async fn delete_user(
    state: web::Data<AppState>,
    admin: AuthenticatedUser,
    query: web::Query<DeleteUserQuery>,
) -> Result<HttpResponse, AppError> {
    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    log::info!("🗑️ 사용자 삭제 요청 - 관리자 {}, 대상 {}", admin.user_id, query.user_id);
    let response = state.admin_service.delete_user(query.user_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[patch("/user/role")]
pub async fn assign_role(
    state: web::Data<AppState>,
    admin: AuthenticatedUser,
    payload: web::Json<RoleAssignRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    log::info!(
        "역할 변경 요청 - 관리자 {}, 대상 {}, 역할 {}",
        admin.user_id,
        payload.user_id,
        payload.role_id
    );
    let response = state.admin_service.assign_role(&payload).await?;
    Ok(HttpResponse::Ok().json(response))
}
