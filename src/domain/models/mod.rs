//! # Domain Models
//!
//! 저장소 테이블에 대응하지 않는 도메인 모델들입니다.
//!
//! - [`auth`] - 인증된 요청 주체
//! - [`token`] - JWT 클레임과 토큰 쌍
//! - [`oauth`] - Google 사용자 정보

pub mod auth;
pub mod oauth;
pub mod token;

pub use auth::*;
pub use oauth::*;
pub use token::*;
