//! Authentication HTTP Handlers
//!
//! 가입, 패스워드 로그인, Google OAuth 로그인, 토큰 갱신 엔드포인트입니다.
//! 성공 응답은 모두 같은 토큰 쌍 형태입니다.
//!
//! ```json
//! {
//!   "access_token": "eyJhbGciOiJIUzI1NiIs...",
//!   "refresh_token": "eyJhbGciOiJIUzI1NiIs...",
//!   "expires_in": 3600,
//!   "token_type": "Bearer"
//! }
//! ```
//!
//! # Auth Providers
//!
//! - **로컬 인증**: 사용자명 또는 이메일 + 패스워드 (`POST /api/login`)
//! - **OAuth 2.0**: Google (`GET /web/login/google`, `GET /web/auth/google/callback`)
//! - **토큰 갱신**: 리프레시 토큰 회전 (`POST /api/refresh`)
use actix_web::{get, http::header, post, web, HttpResponse};
use validator::Validate;

use crate::{
    domain::dto::{LoginRequest, OAuthCallbackQuery, RefreshTokenRequest, SignupRequest},
    errors::AppError,
    state::AppState,
};

/// 회원가입 핸들러
///
/// 사용자, 프로필, 기본 역할을 만들고 토큰 쌍을 발급합니다.
///
/// # Endpoint
/// `POST /api/signup`
///
/// # Errors
///
/// * `400` - 입력 검증 실패
/// * `409` - 사용자명 또는 이메일 중복
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    log::info!("회원가입 요청 - 사용자: {}", payload.username);
    let token_pair = state.signup_service.signup(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(token_pair))
}

/// 로컬 로그인 핸들러
///
/// # Endpoint
/// `POST /api/login`
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token_pair = state.login_service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(token_pair))
}

/// 토큰 갱신 핸들러
///
/// 새 토큰 쌍을 발급하면 이전 리프레시 토큰은 더 이상 사용할 수 없습니다.
///
/// # Endpoint
/// `POST /api/refresh`
#[post("/refresh")]
pub async fn refresh(
    state: web::Data<AppState>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token_pair = state.refresh_service.refresh(&payload.refresh_token).await?;

    Ok(HttpResponse::Ok().json(token_pair))
}

/// Google 로그인 시작
///
/// 서명된 state를 붙인 Google 인증 페이지로 307 리다이렉트합니다.
///
/// # Endpoint
/// `GET /web/login/google`
#[get("/login/google")]
pub async fn google_login(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let url = state.google_login_service.login_url()?;

    Ok(HttpResponse::TemporaryRedirect()
        .insert_header((header::LOCATION, url))
        .finish())
}

/// Google OAuth 콜백 핸들러
///
/// # Endpoint
/// `GET /web/auth/google/callback?code=..&state=..`
///
/// # Errors
///
/// * `401` - 제공자가 에러를 돌려주었거나 state 검증 실패
/// * `500` - 코드 교환 또는 사용자 정보 조회 실패
#[get("/auth/google/callback")]
pub async fn google_callback(
    state: web::Data<AppState>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    if let Some(error) = &query.error {
        let description = query.error_description.as_deref().unwrap_or_default();
        log::warn!("Google 인증 거부: {} {}", error, description);
        return Err(AppError::AuthenticationError(format!("Google 인증 실패: {}", error)));
    }

    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let token_pair = state
        .google_login_service
        .login_with_code(&query.code, &query.state)
        .await?;

    Ok(HttpResponse::Ok().json(token_pair))
}
