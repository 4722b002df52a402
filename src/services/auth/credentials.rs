//! 자격 증명 유틸리티
//!
//! 패스워드 해싱/검증과 HS256 JWT 발급/검증을 담당하는 순수 함수 모음입니다.
//!
//! | 함수 | 설명 |
//! |------|------|
//! | [`hash_password`] | bcrypt 해시 (솔트 자동 생성, cost 조절) |
//! | [`verify_password`] | bcrypt 검증 |
//! | [`issue_access_token`] | subject + 표시 이름 + 만료 |
//! | [`issue_refresh_token`] | subject + 만료 |
//! | [`verify_token`] | 서명/만료 검증, HS256 외 알고리즘 거부 |
//! | [`extract_subject`] | 검증 후 정수 subject 추출 |
//!
//! bcrypt는 CPU를 오래 점유하므로 블로킹 스레드 풀에서 실행합니다.

use actix_web::rt::task::spawn_blocking;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::{AccessClaims, RefreshClaims};
use crate::errors::{AppError, AppResult, ErrorContext};

/// 토큰 발급/검증 실패
///
/// subject가 정수가 아닌 경우를 다른 검증 실패와 구분합니다.
#[derive(Debug, Error, PartialEq)]
pub enum TokenError {
    #[error("토큰이 만료되었습니다")]
    Expired,

    #[error("유효하지 않은 토큰입니다: {0}")]
    Invalid(String),

    #[error("토큰 subject가 정수가 아닙니다: {0}")]
    InvalidSubject(String),

    #[error("토큰 서명 실패: {0}")]
    Signing(String),
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Signing(_) => AppError::InternalError(e.to_string()),
            _ => AppError::AuthenticationError(e.to_string()),
        }
    }
}

/// subject만 필요한 경우의 최소 클레임
#[derive(Debug, Deserialize)]
struct SubjectClaims {
    sub: String,
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

fn sign<T: serde::Serialize>(claims: &T, secret: &str) -> Result<String, TokenError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// 발급 시각과 만료 시각. 표현할 수 없는 TTL은 발급 실패입니다.
fn window(ttl_hours: i64) -> Result<(i64, i64), TokenError> {
    let now = Utc::now();
    let exp = Duration::try_hours(ttl_hours)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or_else(|| TokenError::Signing(format!("만료 시간 범위 초과: {}시간", ttl_hours)))?;

    Ok((now.timestamp(), exp.timestamp()))
}

/// 패스워드를 bcrypt로 해시합니다.
///
/// # Errors
///
/// * `AppError::InternalError` - 해싱 실패 또는 블로킹 작업 실패
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_owned();
    let started = std::time::Instant::now();

    let hashed = spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("해싱 작업 실패")?
        .context("비밀번호 해싱 실패")?;

    log::debug!("Password hashing took: {:?}", started.elapsed());
    Ok(hashed)
}

/// 평문 패스워드가 해시와 일치하는지 확인합니다.
///
/// 비교는 bcrypt가 상수 시간으로 수행합니다.
pub async fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let hash = hash.to_owned();
    let password = password.to_owned();

    spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("검증 작업 실패")?
        .context("비밀번호 검증 실패")
}

pub fn issue_access_token(
    subject: i64,
    name: &str,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, TokenError> {
    let (iat, exp) = window(ttl_hours)?;
    let claims = AccessClaims {
        sub: subject.to_string(),
        name: name.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat,
        exp,
    };
    sign(&claims, secret)
}

pub fn issue_refresh_token(subject: i64, secret: &str, ttl_hours: i64) -> Result<String, TokenError> {
    let (iat, exp) = window(ttl_hours)?;
    let claims = RefreshClaims {
        sub: subject.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat,
        exp,
    };
    sign(&claims, secret)
}

/// 서명과 만료를 검증하고 액세스 토큰 클레임을 반환합니다.
pub fn decode_access_claims(token: &str, secret: &str) -> Result<AccessClaims, TokenError> {
    decode::<AccessClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation())
        .map(|data| data.claims)
        .map_err(classify)
}

/// 서명과 만료만 확인합니다.
pub fn verify_token(token: &str, secret: &str) -> bool {
    decode::<SubjectClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation()).is_ok()
}

/// 검증된 토큰에서 정수 subject를 꺼냅니다.
///
/// # Errors
///
/// * `TokenError::Expired` / `TokenError::Invalid` - 검증 실패
/// * `TokenError::InvalidSubject` - subject가 정수로 해석되지 않는 경우
pub fn extract_subject(token: &str, secret: &str) -> Result<i64, TokenError> {
    let claims = decode::<SubjectClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation())
        .map_err(classify)?
        .claims;

    claims
        .sub
        .parse::<i64>()
        .map_err(|_| TokenError::InvalidSubject(claims.sub))
}

fn classify(e: jsonwebtoken::errors::Error) -> TokenError {
    match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e.to_string()),
    }
}
