//! 에러 모듈
//!
//! [`AppError`]와 [`AppResult`]를 crate 전역에 재export 합니다.

pub mod errors;

pub use errors::{AppError, AppResult, ErrorContext};
