//! 관리자 API 응답 DTO

use serde::Serialize;

use crate::domain::entities::UserFullInfo;

#[derive(Debug, Serialize)]
pub struct UsersListResponse {
    pub users: Vec<UserFullInfo>,
    pub take: i64,
    pub skip: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub deleted: bool,
}

/// 역할 변경 결과. `id`는 users_has_roles 행 ID입니다.
#[derive(Debug, Serialize)]
pub struct RoleAssignResponse {
    pub id: i64,
    pub user_id: i64,
    pub role: String,
}
