//! # Domain Entities
//!
//! 저장소 테이블과 1:1로 대응하는 엔티티들입니다.
//! 각 엔티티는 행 → 레코드 변환을 위한 `sqlx::FromRow`를 직접 구현합니다.

pub mod profiles;
pub mod roles;
pub mod users;

pub use profiles::*;
pub use roles::*;
pub use users::*;

/// 테이블 이름
pub const USERS_TABLE: &str = "users";
pub const PROFILES_TABLE: &str = "profiles";
pub const ROLES_TABLE: &str = "roles";
pub const USERS_HAS_ROLES_TABLE: &str = "users_has_roles";
