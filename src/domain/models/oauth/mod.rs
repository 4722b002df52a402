//! # OAuth Domain Models
//!
//! Google OAuth 2.0 Authorization Code 플로우에서 받는 사용자 정보 모델입니다.
//!
//! ```text
//! 1. 사용자 → /web/login/google → Google 인증 페이지로 리다이렉트
//! 2. Google → /web/auth/google/callback?code=..&state=..
//! 3. 서버 → code를 access_token으로 교환
//! 4. 서버 → access_token으로 userinfo 조회 → GoogleUserInfo
//! ```
//!
//! 이메일은 필수이며, 비어 있으면 로그인 파이프라인이 서버 에러로 중단됩니다.

pub mod google_user;

pub use google_user::GoogleUserInfo;
