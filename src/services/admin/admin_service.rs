//! 관리자 서비스
//!
//! 사용자 목록 조회, 사용자 삭제, 역할 변경을 제공합니다.
//! 권한 검사는 관리자 미들웨어가 먼저 수행합니다.

use std::sync::Arc;

use crate::{
    db::Database,
    domain::dto::{
        DeleteUserResponse, PaginationRequest, RoleAssignRequest, RoleAssignResponse,
        UsersListResponse,
    },
    errors::AppResult,
    repositories::AdminRepository,
};

pub struct AdminService {
    admin: AdminRepository,
}

impl AdminService {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            admin: AdminRepository::new(db),
        }
    }

    pub async fn list_users(&self, page: &PaginationRequest) -> AppResult<UsersListResponse> {
        let (take, skip) = (page.take(), page.skip());
        let users = self.admin.get_users_full_info(take, skip).await?;

        Ok(UsersListResponse { users, take, skip })
    }

    pub async fn delete_user(&self, user_id: i64) -> AppResult<DeleteUserResponse> {
        let deleted = self.admin.delete_user(user_id).await?;
        if deleted {
            log::warn!("🗑️ 사용자 삭제: {}", user_id);
        }

        Ok(DeleteUserResponse { deleted })
    }

    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자 또는 역할이 없는 경우
    pub async fn assign_role(&self, request: &RoleAssignRequest) -> AppResult<RoleAssignResponse> {
        let (assignment, role) = self
            .admin
            .update_user_role(request.user_id, request.role_id)
            .await?;

        log::info!("🔐 역할 변경: 사용자 {} → {}", assignment.user_id, role.role);
        Ok(RoleAssignResponse {
            id: assignment.id,
            user_id: assignment.user_id,
            role: role.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NoopCompensation;
    use crate::db::testing::memory_database;
    use crate::domain::dto::SignupRequest;
    use crate::services::auth::token_service::tests::test_settings;
    use crate::services::auth::TokenService;
    use crate::services::users::SignupService;

    async fn seeded(count: usize) -> Arc<Database> {
        let db = memory_database().await;
        let signup = SignupService::new(
            db.clone(),
            TokenService::new(test_settings()),
            4,
            Arc::new(NoopCompensation),
        );
        for i in 0..count {
            signup
                .signup(SignupRequest {
                    username: format!("user{}", i),
                    email: format!("user{}@example.com", i),
                    password: "secret".into(),
                })
                .await
                .unwrap();
        }
        db
    }

    #[actix_web::test]
    async fn test_list_users_defaults_to_one() {
        let service = AdminService::new(seeded(3).await);

        let page = service.list_users(&PaginationRequest::default()).await.unwrap();
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.take, 1);
        assert_eq!(page.skip, 0);

        let rest = service
            .list_users(&PaginationRequest { take: Some(10), skip: Some(1) })
            .await
            .unwrap();
        assert_eq!(rest.users.len(), 2);
        assert_eq!(rest.users[0].username, "user1");
    }

    #[actix_web::test]
    async fn test_assign_role_and_delete() {
        let service = AdminService::new(seeded(1).await);
        let user_id = service.list_users(&PaginationRequest::default()).await.unwrap().users[0].id;

        let first = service
            .assign_role(&RoleAssignRequest { user_id, role_id: 1 })
            .await
            .unwrap();
        let second = service
            .assign_role(&RoleAssignRequest { user_id, role_id: 1 })
            .await
            .unwrap();
        assert_eq!(first.role, "admin");
        assert_eq!(first.id, second.id);

        assert!(service.delete_user(user_id).await.unwrap().deleted);
        assert!(!service.delete_user(user_id).await.unwrap().deleted);
    }
}
