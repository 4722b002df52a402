//! 계정 서비스 백엔드
//!
//! 회원가입, 패스워드/Google 로그인, 리프레시 토큰 회전, 관리자 RBAC를 제공하는
//! 관계형 저장소 기반 인증 서비스입니다.
//!
//! # Features
//!
//! - **사용자 관리**: 로컬 가입, 프로필, 관리자 삭제
//! - **JWT 인증**: HS256 액세스/리프레시 토큰
//! - **OAuth 2.0**: Google 로그인 (서명된 state)
//! - **파이프라인 유스케이스**: 단계 실패 시 스냅샷 복원
//! - **SQLite**: `sqlx` 커넥션 풀과 마이그레이션
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← Pipeline + Step, Compensation
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 옵션 기반 Collection 호출
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │     SQLite      │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use account_service_backend::{config::DatabaseSettings, db::Database, state::AppState};
//!
//! let settings = DatabaseSettings::from_env();
//! let database = Arc::new(Database::connect(&settings).await?);
//! let state = AppState::from_env(database, &settings)?;
//! let tokens = state.signup_service.signup(request).await?;
//! ```

pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
