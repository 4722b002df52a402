//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::domain::models::AuthenticatedUser;
use crate::errors::{AppError, AppResult};
use crate::middlewares::auth_middleware::AuthMode;
use crate::services::auth::TokenService;
use crate::state::AppState;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode;

        Box::pin(async move {
            if let Err(err) = authorize(&req, mode).await {
                log::warn!("🔒 접근 거부 {} {}: {}", req.method(), req.path(), err);
                let response = err.error_response();
                let (req, _) = req.into_parts();
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// 토큰을 검증하고, 관리자 모드라면 역할까지 확인한 뒤 사용자를 Extensions에 저장합니다.
async fn authorize(req: &ServiceRequest, mode: AuthMode) -> AppResult<()> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalError("애플리케이션 상태가 등록되지 않았습니다".to_string()))?;

    let user = extract_user(req, &state.token_service)?;

    if mode == AuthMode::AdminOnly {
        state.role_guard.require_admin(Some(user.user_id)).await?;
    }

    log::debug!("인증 성공: 사용자 ID {}", user.user_id);
    req.extensions_mut().insert(user);
    Ok(())
}

/// 요청에서 JWT 토큰을 추출하고 검증
fn extract_user(req: &ServiceRequest, tokens: &TokenService) -> AppResult<AuthenticatedUser> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = TokenService::extract_bearer_token(auth_header)?;
    let claims = tokens.verify_access_token(token)?;
    let user_id = claims
        .sub
        .parse::<i64>()
        .map_err(|_| AppError::AuthenticationError("유효하지 않은 토큰 subject입니다".to_string()))?;

    Ok(AuthenticatedUser {
        user_id,
        name: claims.name,
    })
}
