//! 역할 리포지토리
//!
//! `roles`(역할 정의)와 `users_has_roles`(사용자별 역할 매핑)를 다룹니다.
//! 매핑 행이 없는 사용자는 기본 역할 `user`로 간주합니다.

use std::sync::Arc;

use crate::{
    db::{
        with_fields, with_fields_values, with_joins, with_where, Collection, Database, FieldValue,
        Joins, SqlCollection,
    },
    domain::entities::{Role, RoleRecord, ROLES_TABLE, USERS_HAS_ROLES_TABLE},
    errors::{AppError, AppResult},
};

#[derive(Clone)]
pub struct RoleRepository {
    db: Arc<Database>,
}

impl RoleRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn roles(&self) -> SqlCollection {
        self.db.collection(ROLES_TABLE)
    }

    fn assignments(&self) -> SqlCollection {
        self.db.collection(USERS_HAS_ROLES_TABLE)
    }

    /// 사용자의 역할을 조회합니다. 매핑이 없으면 [`Role::User`]입니다.
    pub async fn get_role(&self, user_id: i64) -> AppResult<Role> {
        let record: Option<RoleRecord> = self
            .assignments()
            .find_one(vec![
                with_fields(["roles.id AS id", "roles.role AS role"]),
                with_joins(Joins::new().join(ROLES_TABLE, "roles.id = users_has_roles.role_id")),
                with_where("users_has_roles.user_id = ?", vec![user_id.into()]),
            ])
            .await?
            .decode()?;

        match record {
            Some(record) => Role::from_str(&record.role).map_err(AppError::DatabaseError),
            None => Ok(Role::default()),
        }
    }

    pub async fn get_role_by_name(&self, role: &str) -> AppResult<Option<RoleRecord>> {
        self.roles()
            .find_one(vec![with_where("role = ?", vec![role.into()])])
            .await?
            .decode()
    }

    pub async fn get_role_by_id(&self, role_id: i64) -> AppResult<Option<RoleRecord>> {
        self.roles()
            .find_one(vec![with_where("id = ?", vec![role_id.into()])])
            .await?
            .decode()
    }

    /// 역할 이름으로 사용자에게 역할을 부여하고 매핑 행 ID를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - 역할 정의가 저장소에 없는 경우
    pub async fn create_role(&self, user_id: i64, role: Role) -> AppResult<i64> {
        let record = self.get_role_by_name(role.as_str()).await?.ok_or_else(|| {
            AppError::DatabaseError(format!("역할 정의를 찾을 수 없습니다: {}", role))
        })?;

        self.assignments()
            .upsert_one(vec![with_fields_values([
                ("user_id", FieldValue::from(user_id)),
                ("role_id", FieldValue::from(record.id)),
            ])])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::memory_database;
    use crate::domain::entities::User;
    use crate::repositories::UserRepository;

    async fn setup() -> (RoleRepository, i64) {
        let db = memory_database().await;
        let user_id = UserRepository::new(db.clone())
            .create_user(&User::new_local("alice".into(), "alice@example.com".into(), "h".into()))
            .await
            .unwrap();
        (RoleRepository::new(db), user_id)
    }

    #[actix_web::test]
    async fn test_missing_assignment_defaults_to_user() {
        let (repo, user_id) = setup().await;
        assert_eq!(repo.get_role(user_id).await.unwrap(), Role::User);
    }

    #[actix_web::test]
    async fn test_reassignment_updates_in_place() {
        let (repo, user_id) = setup().await;

        let first = repo.create_role(user_id, Role::User).await.unwrap();
        let second = repo.create_role(user_id, Role::Admin).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.get_role(user_id).await.unwrap(), Role::Admin);
    }

    #[actix_web::test]
    async fn test_seeded_roles() {
        let (repo, _) = setup().await;

        let admin = repo.get_role_by_name("admin").await.unwrap().unwrap();
        let user = repo.get_role_by_id(2).await.unwrap().unwrap();
        assert_eq!(admin.id, 1);
        assert_eq!(user.role, "user");
        assert!(repo.get_role_by_name("moderator").await.unwrap().is_none());
    }
}
