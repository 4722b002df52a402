//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 입력 검증 후 `web::Data<AppState>`의 서비스에 위임하고,
//! 실패는 `AppError`로 돌려 일관된 `{"error": ...}` 응답을 만듭니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 파이프라인 유스케이스                 ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! ├─────────────────────────────────────────────┤
//!   Entities/Models - 도메인 모델                  ← Domain Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 가입, 로그인, 토큰 갱신, Google OAuth
//! - **`users`**: 호출자 프로필
//! - **`admin`**: 사용자 목록/삭제, 역할 부여

pub mod admin;
pub mod auth;
pub mod users;
