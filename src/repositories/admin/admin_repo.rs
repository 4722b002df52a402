//! 관리자 리포지토리
//!
//! 사용자 목록(역할·프로필 조인), 사용자 삭제, 역할 변경을 제공합니다.
//! 사용자를 삭제하면 프로필과 역할 매핑은 외래 키 `ON DELETE CASCADE`로 함께 삭제됩니다.

use std::sync::Arc;

use crate::{
    db::{
        delete_where, with_fields, with_fields_values, with_joins, with_order_by, with_pagination,
        with_where, Collection, Database, FieldValue, Joins, SqlCollection,
    },
    domain::entities::{
        RoleAssignment, RoleRecord, UserFullInfo, PROFILES_TABLE, ROLES_TABLE,
        USERS_HAS_ROLES_TABLE, USERS_TABLE,
    },
    errors::{AppError, AppResult},
    repositories::{RoleRepository, UserRepository},
};

#[derive(Clone)]
pub struct AdminRepository {
    db: Arc<Database>,
    users: UserRepository,
    roles: RoleRepository,
}

impl AdminRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            roles: RoleRepository::new(db.clone()),
            db,
        }
    }

    fn collection(&self, name: &str) -> SqlCollection {
        self.db.collection(name)
    }

    /// 사용자 ID 순으로 정렬된 사용자 목록 한 페이지를 조회합니다.
    ///
    /// ```text
    /// SELECT users.id AS id, ..., profiles.nickname AS nickname FROM users
    ///   JOIN users_has_roles ON users_has_roles.user_id = users.id
    ///   JOIN roles ON roles.id = users_has_roles.role_id
    ///   JOIN profiles ON profiles.user_id = users.id
    ///   ORDER BY users.id LIMIT {take} OFFSET {skip}
    /// ```
    pub async fn get_users_full_info(&self, take: i64, skip: i64) -> AppResult<Vec<UserFullInfo>> {
        let joins = Joins::new()
            .join(USERS_HAS_ROLES_TABLE, "users_has_roles.user_id = users.id")
            .join(ROLES_TABLE, "roles.id = users_has_roles.role_id")
            .join(PROFILES_TABLE, "profiles.user_id = users.id");

        self.collection(USERS_TABLE)
            .find_many(vec![
                with_fields([
                    "users.id AS id",
                    "users.username AS username",
                    "users.email AS email",
                    "roles.role AS role",
                    "profiles.id AS profile_id",
                    "profiles.nickname AS nickname",
                ]),
                with_joins(joins),
                with_order_by(["users.id"]),
                with_pagination(take, skip),
            ])
            .await?
            .decode()
    }

    /// 사용자를 삭제합니다. 정확히 한 행이 삭제된 경우에만 `true`입니다.
    pub async fn delete_user(&self, user_id: i64) -> AppResult<bool> {
        let affected = self
            .collection(USERS_TABLE)
            .delete_one(vec![delete_where("id = ?", vec![user_id.into()])])
            .await?;

        Ok(affected == 1)
    }

    /// 사용자의 역할을 변경합니다.
    ///
    /// 이미 같은 역할이 부여되어 있으면 쓰기 없이 기존 매핑 ID를 그대로 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자 또는 역할이 존재하지 않는 경우
    pub async fn update_user_role(
        &self,
        user_id: i64,
        role_id: i64,
    ) -> AppResult<(RoleAssignment, RoleRecord)> {
        let role = self
            .roles
            .get_role_by_id(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("역할을 찾을 수 없습니다: {}", role_id)))?;

        if self.users.get_user_by_id(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)));
        }

        let assignments = self.collection(USERS_HAS_ROLES_TABLE);
        let existing: Option<RoleAssignment> = assignments
            .find_one(vec![with_where("user_id = ?", vec![user_id.into()])])
            .await?
            .decode()?;

        if let Some(existing) = existing {
            if existing.role_id == role_id {
                log::debug!("사용자 {}는 이미 역할 {}을(를) 가지고 있습니다", user_id, role.role);
                return Ok((existing, role));
            }
        }

        let id = assignments
            .upsert_one(vec![with_fields_values([
                ("user_id", FieldValue::from(user_id)),
                ("role_id", FieldValue::from(role_id)),
            ])])
            .await?;

        Ok((RoleAssignment { id, user_id, role_id }, role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testing::memory_database;
    use crate::domain::entities::{Role, User};
    use crate::repositories::ProfileRepository;

    async fn seed_users(db: &Arc<Database>, count: usize) -> Vec<i64> {
        let users = UserRepository::new(db.clone());
        let profiles = ProfileRepository::new(db.clone());
        let roles = RoleRepository::new(db.clone());

        let mut ids = Vec::new();
        for i in 0..count {
            let name = format!("user{:02}", i);
            let id = users
                .create_user(&User::new_local(name.clone(), format!("{}@example.com", name), "h".into()))
                .await
                .unwrap();
            profiles.create_profile(id, &name).await.unwrap();
            roles.create_role(id, Role::User).await.unwrap();
            ids.push(id);
        }
        ids
    }

    #[actix_web::test]
    async fn test_users_full_info_is_paginated_in_id_order() {
        let db = memory_database().await;
        let ids = seed_users(&db, 5).await;
        let repo = AdminRepository::new(db);

        let page = repo.get_users_full_info(2, 1).await.unwrap();

        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, ids[1]);
        assert_eq!(page[1].id, ids[2]);
        assert_eq!(page[0].role, "user");
        assert_eq!(page[0].nickname, "user01");
    }

    #[actix_web::test]
    async fn test_delete_user_cascades() {
        let db = memory_database().await;
        let ids = seed_users(&db, 1).await;
        let repo = AdminRepository::new(db.clone());

        assert!(repo.delete_user(ids[0]).await.unwrap());
        assert!(!repo.delete_user(ids[0]).await.unwrap());

        let profile = ProfileRepository::new(db.clone())
            .get_profile_by_user_id(ids[0])
            .await
            .unwrap();
        assert!(profile.is_none());
        assert!(repo.get_users_full_info(10, 0).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_update_user_role_is_idempotent() {
        let db = memory_database().await;
        let ids = seed_users(&db, 1).await;
        let repo = AdminRepository::new(db.clone());

        let (promoted, role) = repo.update_user_role(ids[0], 1).await.unwrap();
        let (again, _) = repo.update_user_role(ids[0], 1).await.unwrap();

        assert_eq!(role.role, "admin");
        assert_eq!(promoted.id, again.id);
        assert_eq!(RoleRepository::new(db).get_role(ids[0]).await.unwrap(), Role::Admin);
    }

    #[actix_web::test]
    async fn test_update_user_role_unknown_role_or_user() {
        let db = memory_database().await;
        let ids = seed_users(&db, 1).await;
        let repo = AdminRepository::new(db);

        assert!(matches!(repo.update_user_role(ids[0], 99).await, Err(AppError::NotFound(_))));
        assert!(matches!(repo.update_user_role(999, 1).await, Err(AppError::NotFound(_))));
    }
}
