//! 애플리케이션 공유 상태
//!
//! 애플리케이션 시작 시 서비스 그래프를 한 번 조립하고 `web::Data<AppState>`로 공유합니다.
//! 요청 간에 공유되는 가변 상태는 없으며, 커넥션 풀만 [`Database`]를 통해 공유됩니다.
//!
//! ```text
//! AppState
//! ├── TokenService        (토큰 설정)
//! ├── SignupService       ─┐
//! ├── LoginService         │ 파이프라인 + Compensation
//! ├── GoogleLoginService   │ (+ IdentityProvider)
//! ├── RefreshService      ─┘
//! ├── ProfileService
//! ├── AdminService
//! └── RoleGuard           (관리자 검사)
//! ```

use std::sync::Arc;

use crate::{
    config::{
        DatabaseSettings, GoogleOAuthSettings, PasswordConfig, RbacConfig, TokenSettings,
    },
    core::{Compensation, NoopCompensation},
    db::{Database, SqliteSnapshotBackup},
    errors::AppResult,
    services::{
        admin::AdminService,
        auth::{
            GoogleAuthService, GoogleLoginService, IdentityProvider, LoginService,
            OAuthStateSigner, RefreshService, RoleGuard, TokenService,
        },
        users::{ProfileService, SignupService},
    },
};

/// 서비스 조립에 필요한 설정 값
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub tokens: TokenSettings,
    pub bcrypt_cost: u32,
    pub oauth_state: OAuthStateSigner,
    pub bypass_subject_id: Option<i64>,
}

impl ServiceSettings {
    pub fn from_env() -> Self {
        Self {
            tokens: TokenSettings::from_env(),
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
            oauth_state: OAuthStateSigner::from_env(),
            bypass_subject_id: RbacConfig::bypass_subject_id(),
        }
    }
}

pub struct AppState {
    pub database: Arc<Database>,
    pub token_service: TokenService,
    pub signup_service: SignupService,
    pub login_service: LoginService,
    pub google_login_service: GoogleLoginService,
    pub refresh_service: RefreshService,
    pub profile_service: ProfileService,
    pub admin_service: AdminService,
    pub role_guard: RoleGuard,
}

impl AppState {
    pub fn new(
        database: Arc<Database>,
        settings: ServiceSettings,
        compensation: Arc<dyn Compensation>,
        provider: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        let tokens = TokenService::new(settings.tokens);

        Self {
            signup_service: SignupService::new(
                database.clone(),
                tokens.clone(),
                settings.bcrypt_cost,
                compensation.clone(),
            ),
            login_service: LoginService::new(database.clone(), tokens.clone(), compensation.clone()),
            google_login_service: GoogleLoginService::new(
                database.clone(),
                tokens.clone(),
                provider,
                settings.oauth_state,
                compensation.clone(),
            ),
            refresh_service: RefreshService::new(database.clone(), tokens.clone(), compensation),
            profile_service: ProfileService::new(database.clone()),
            admin_service: AdminService::new(database.clone()),
            role_guard: RoleGuard::new(database.clone(), settings.bypass_subject_id),
            token_service: tokens,
            database,
        }
    }

    /// 환경 변수 설정으로 서비스 그래프를 조립합니다.
    ///
    /// - `DATABASE_BACKUP_ENABLED=false`이면 보상 동작 없이 실행합니다.
    /// - Google 클라이언트 설정이 없으면 Google 로그인은 비활성화됩니다.
    pub fn from_env(database: Arc<Database>, db_settings: &DatabaseSettings) -> AppResult<Self> {
        let compensation: Arc<dyn Compensation> = if db_settings.backup_enabled {
            log::info!("💾 스냅샷 백업 디렉토리: {}", db_settings.backup_dir.display());
            Arc::new(SqliteSnapshotBackup::new(database.clone(), db_settings.backup_dir.clone()))
        } else {
            log::warn!("⚠️ DATABASE_BACKUP_ENABLED=false: 실패 시 복원하지 않습니다");
            Arc::new(NoopCompensation)
        };

        let provider = match GoogleOAuthSettings::from_env() {
            Some(settings) => {
                Some(Arc::new(GoogleAuthService::new(settings)?) as Arc<dyn IdentityProvider>)
            }
            None => None,
        };

        Ok(Self::new(database, ServiceSettings::from_env(), compensation, provider))
    }
}
