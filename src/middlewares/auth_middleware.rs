//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 사용자 정보를 추출합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 라우트 스코프가 요구하는 접근 수준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 유효한 액세스 토큰 필요
    Required,
    /// 유효한 액세스 토큰 + `admin` 역할 필요
    AdminOnly,
}

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    mode: AuthMode,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self { mode }
    }

    /// 인증된 사용자만 허용
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 관리자만 허용
    pub fn admin_only() -> Self {
        Self::new(AuthMode::AdminOnly)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode,
        }))
    }
}
