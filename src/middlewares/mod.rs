//! 미들웨어 모듈
//!
//! ActixWeb 애플리케이션의 요청 처리 파이프라인에서 사용되는 미들웨어들을 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <access token>` 추출 및 검증
//! - 사용자 정보를 request extension에 저장 ([`AuthenticatedUser`](crate::domain::models::AuthenticatedUser))
//! - 관리자 모드에서는 역할 검사 후 403 응답
//!
//! 미들웨어는 `web::Data<AppState>`에서 토큰 서비스와 역할 검사기를 꺼내 씁니다.
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! use actix_web::web;
//!
//! cfg.service(
//!     web::scope("/api/admin")
//!         .wrap(AuthMiddleware::admin_only())
//!         .service(handlers::admin::list_users)
//! );
//! ```

mod auth_inner;
pub mod auth_middleware;

pub use auth_middleware::{AuthMiddleware, AuthMode};
