//! 관리자 API 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 사용자 목록 조회 쿼리 (`?take=&skip=`)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PaginationRequest {
    #[validate(range(min = 1, max = 500, message = "take는 1-500 사이여야 합니다"))]
    pub take: Option<i64>,

    #[validate(range(min = 0, message = "skip은 0 이상이어야 합니다"))]
    pub skip: Option<i64>,
}

impl PaginationRequest {
    pub const DEFAULT_TAKE: i64 = 1;
    pub const DEFAULT_SKIP: i64 = 0;

    pub fn take(&self) -> i64 {
        self.take.unwrap_or(Self::DEFAULT_TAKE)
    }

    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(Self::DEFAULT_SKIP)
    }
}

/// 사용자 삭제 쿼리 (`?user_id=`)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeleteUserQuery {
    #[validate(range(min = 1, message = "user_id는 양수여야 합니다"))]
    pub user_id: i64,
}

/// 역할 변경 요청 본문
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RoleAssignRequest {
    #[validate(range(min = 1, message = "user_id는 양수여야 합니다"))]
    pub user_id: i64,

    #[validate(range(min = 1, message = "role_id는 양수여야 합니다"))]
    pub role_id: i64,
}
