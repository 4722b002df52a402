//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 리포지토리는 `Arc<Database>`를 주입받아 테이블 [`Collection`](crate::db::Collection)
//! 연산만으로 동작하며, SQL 문을 직접 작성하지 않습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::UserRepository;
//!
//! let user_repo = UserRepository::new(database.clone());
//! let user = user_repo.get_user_by_email("user@example.com").await?;
//! ```

pub mod admin;
pub mod profiles;
pub mod roles;
pub mod users;

pub use admin::AdminRepository;
pub use profiles::ProfileRepository;
pub use roles::RoleRepository;
pub use users::UserRepository;
