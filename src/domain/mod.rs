//! # Domain Layer Module
//!
//! 계정 서비스의 도메인 계층입니다. 저장소 테이블에 대응하는 엔티티, API 경계의 DTO,
//! 토큰과 외부 인증 제공자 모델을 담습니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - users, profiles, roles, users_has_roles 행
//! ├── DTOs      - 요청/응답 본문 (validator 검증)
//! └── Models    - JWT 클레임, 토큰 쌍, Google 사용자 정보, 인증 주체
//!      │
//!      ▼
//! Application Layer (Services, 파이프라인)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, SQLite)
//! ```
//!
//! ## 사용자 등록 흐름
//!
//! ```rust,ignore
//! use crate::domain::{dto::SignupRequest, entities::User};
//!
//! request.validate()?;
//! let hash = hash_password(&request.password, cost).await?;
//! let user = User::new_local(request.username, request.email, hash);
//! let id = user_repository.create_user(&user).await?;
//! ```
//!
//! 엔티티의 비밀 필드(`password`, `refresh_token`)는 직렬화에서 제외되므로
//! 엔티티를 그대로 응답에 실어도 노출되지 않습니다.

pub mod dto;
pub mod entities;
pub mod models;

pub use dto::*;
pub use entities::*;
pub use models::*;
