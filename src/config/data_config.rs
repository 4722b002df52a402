//! 데이터 및 서버 설정 관리 모듈
//!
//! 데이터베이스, 서버, 환경 및 보안 관련 설정을 관리합니다.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경 - 빠른 개발을 위한 설정
    Development,
    /// 테스트 환경 - 자동화된 테스트용 설정
    Test,
    /// 스테이징 환경 - 프로덕션 유사 환경
    Staging,
    /// 프로덕션 환경 - 최고 수준의 보안 및 성능
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Production`을 기본값으로 사용합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let env = Environment::current();
    /// match env {
    ///     Environment::Development => println!("개발 환경"),
    ///     Environment::Production => println!("프로덕션 환경"),
    ///     _ => {}
    /// }
    /// ```
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    /// 문자열에서 Environment를 생성합니다.
    ///
    /// # Arguments
    ///
    /// * `s` - 환경 이름 문자열 (대소문자 무관)
    ///
    /// # Returns
    ///
    /// 해당하는 Environment 값. 알 수 없는 값인 경우 `Production`을 반환합니다.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 현재 환경에 맞는 bcrypt cost를 반환합니다.
    ///
    /// # Returns
    ///
    /// 4-15 범위의 bcrypt cost 값
    ///
    /// # Environment Defaults
    ///
    /// - Development/Test: 4 (빠른 처리)
    /// - Staging: 10 (중간 보안)
    /// - Production: 12 (bcrypt 기본 cost)
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
            log::warn!("BCRYPT_COST 값이 올바르지 않습니다: {}. 환경 기본값 사용", cost_str);
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    /// 특정 환경에 대한 bcrypt cost를 반환합니다.
    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => bcrypt::DEFAULT_COST,
        }
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트를 반환합니다. 기본값: 8080
    pub fn port() -> u16 {
        env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .unwrap_or(8080)
    }

    /// 서버가 바인딩할 호스트 주소를 반환합니다. 기본값: "0.0.0.0"
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }
}

/// 관계형 저장소(SQLite) 연결 설정
///
/// # Environment Variables
///
/// - `DATABASE_URL`: 연결 문자열 (기본값: `sqlite://account_service.db?mode=rwc`)
/// - `DATABASE_MAX_CONNECTIONS`: 커넥션 풀 최대 크기 (기본값: 10)
/// - `DATABASE_QUERY_TIMEOUT_SECS`: 쿼리 단위 데드라인 (기본값: 5초)
/// - `DATABASE_BACKUP_ENABLED`: 보상 백업 사용 여부 (기본값: true)
/// - `DATABASE_BACKUP_DIR`: 스냅샷 파일 디렉토리 (기본값: OS 임시 디렉토리)
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| {
            log::warn!("DATABASE_URL not set, using local sqlite file");
            "sqlite://account_service.db?mode=rwc".to_string()
        })
    }

    pub fn max_connections() -> u32 {
        env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10)
    }

    pub fn query_timeout_secs() -> u64 {
        env::var("DATABASE_QUERY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .unwrap_or(5)
    }

    pub fn backup_enabled() -> bool {
        env::var("DATABASE_BACKUP_ENABLED")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | "off"))
            .unwrap_or(true)
    }

    pub fn backup_dir() -> PathBuf {
        env::var("DATABASE_BACKUP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir())
    }
}

/// 데이터베이스 연결 시 사용하는 설정 값 묶음
///
/// 환경 변수에서 한 번 읽어 [`crate::db::Database::connect`]에 주입합니다.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub query_timeout: Duration,
    pub backup_enabled: bool,
    pub backup_dir: PathBuf,
}

impl DatabaseSettings {
    pub fn from_env() -> Self {
        Self {
            url: DatabaseConfig::url(),
            max_connections: DatabaseConfig::max_connections(),
            query_timeout: Duration::from_secs(DatabaseConfig::query_timeout_secs()),
            backup_enabled: DatabaseConfig::backup_enabled(),
            backup_dir: DatabaseConfig::backup_dir(),
        }
    }
}
