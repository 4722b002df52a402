//! 계정 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! 저장소 연결과 마이그레이션에 실패하면 프로세스를 종료합니다.

use std::io;
use std::sync::Arc;

use account_service_backend::config::{DatabaseSettings, ServerConfig};
use account_service_backend::db::Database;
use account_service_backend::routes::configure_all_routes;
use account_service_backend::state::AppState;
use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 계정 서비스 시작중...");

    let db_settings = DatabaseSettings::from_env();
    let database = initialize_database(&db_settings).await?;

    let state = AppState::from_env(database, &db_settings).map_err(|e| {
        error!("❌ 서비스 초기화 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(web::Data::new(state)).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// Rate Limiting, CORS, 요청 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(state: web::Data<AppState>) -> io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second, rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_default();

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=account_service_backend::db=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 저장소 연결과 스키마 마이그레이션
///
/// 저장소가 없으면 서비스할 수 없으므로 실패는 그대로 프로세스 종료로 이어집니다.
async fn initialize_database(settings: &DatabaseSettings) -> io::Result<Arc<Database>> {
    info!("📡 데이터베이스 연결 중... ({})", settings.url);

    let database = Database::connect(settings).await.map_err(|e| {
        error!("❌ 데이터베이스 연결 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    database.migrate().await.map_err(|e| {
        error!("❌ 마이그레이션 실패: {}", e);
        io::Error::other(e.to_string())
    })?;

    info!("✅ 데이터베이스 연결 및 마이그레이션 완료");
    Ok(Arc::new(database))
}

/// CORS 설정을 구성합니다
///
/// 로컬 프론트엔드 개발 서버와 자체 서버 Origin을 허용합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .supports_credentials()
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or_else(|| {
            warn!("RATE_LIMIT_PER_SECOND 미설정 또는 잘못된 값, 기본값 100 사용");
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or_else(|| {
            warn!("RATE_LIMIT_BURST_SIZE 미설정 또는 잘못된 값, 기본값 200 사용");
            200
        });

    RateLimitConfig {
        per_second,
        burst_size,
    }
}
