//! 인증 및 보안 서비스 모듈
//!
//! JWT 기반 토큰 인증, 패스워드/Google 로그인, 토큰 갱신, 역할 검사를 담당합니다.
//!
//! # Features
//!
//! - 자격 증명 유틸리티 (bcrypt, HS256 JWT)
//! - 패스워드 로그인 / Google OAuth 2.0 로그인 파이프라인
//! - 리프레시 토큰 회전
//! - 역할 기반 권한 검사
//!
//! # Security
//!
//! - HMAC-SHA256 토큰 서명, 다른 알고리즘 거부
//! - 액세스/리프레시 토큰 비밀키 분리
//! - 서명된 OAuth state (CSRF 방지)
//!
//! # Examples
//!
//! ```rust,ignore
//! let tokens = state.login_service.login(request).await?;
//! let refreshed = state.refresh_service.refresh(&tokens.refresh_token).await?;
//! state.role_guard.require_admin(Some(user.user_id)).await?;
//! ```

pub mod credentials;
pub mod google_auth_service;
pub mod google_login_service;
pub mod login_service;
pub mod oauth_state;
pub mod refresh_service;
pub mod role_guard;
pub mod token_service;

pub use credentials::TokenError;
pub use google_auth_service::{GoogleAuthService, IdentityProvider};
pub use google_login_service::GoogleLoginService;
pub use login_service::LoginService;
pub use oauth_state::OAuthStateSigner;
pub use refresh_service::RefreshService;
pub use role_guard::RoleGuard;
pub use token_service::TokenService;
