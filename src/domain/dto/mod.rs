//! # Data Transfer Objects
//!
//! HTTP 요청/응답 본문 구조체입니다. 요청 DTO는 `validator`로 검증 규칙을 선언하고,
//! 핸들러가 `validate()`를 명시적으로 호출합니다.

pub mod admin;
pub mod users;

pub use admin::*;
pub use users::*;
