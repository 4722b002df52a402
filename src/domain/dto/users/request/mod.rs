pub mod auth_request;

pub use auth_request::{LoginRequest, OAuthCallbackQuery, RefreshTokenRequest, SignupRequest};
