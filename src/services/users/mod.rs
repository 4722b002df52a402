//! 사용자 관리 서비스 모듈
//!
//! 가입 유스케이스와 본인 프로필 조회를 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (블로킹 스레드 풀)
//! - 이메일/사용자명 중복 방지
//! - 실패 시 스냅샷 복원
//!
//! # Examples
//!
//! ```rust,ignore
//! let tokens = state.signup_service.signup(request).await?;
//! let profile = state.profile_service.get_profile(user.user_id).await?;
//! ```

pub mod profile_service;
pub mod signup_service;

pub use profile_service::ProfileService;
pub use signup_service::SignupService;
