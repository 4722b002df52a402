//! 관계형 저장소 연결 및 데이터 접근 계층
//!
//! SQLite 커넥션 풀을 생성하고 마이그레이션을 적용하며,
//! 테이블 단위 [`Collection`]과 보상용 스냅샷 백업을 제공합니다.
//!
//! ## 구성
//!
//! - [`options`] - 조회/저장/삭제 옵션과 바인딩 값
//! - [`query`] - 옵션 → SQL 문 생성 (I/O 없음)
//! - [`collection`] - 데드라인이 적용된 `Collection` 구현
//! - [`results`] - 단건/다건 결과와 엔티티 변환
//! - [`backup`] - `VACUUM INTO` 기반 스냅샷 백업/복원
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! let database = Database::connect(&DatabaseSettings::from_env()).await?;
//! database.migrate().await?;
//!
//! let users = database.collection("users");
//! let user: Option<User> = users
//!     .find_one(vec![with_where("email = ?", vec![email.into()])])
//!     .await?
//!     .decode()?;
//! ```

pub mod backup;
pub mod collection;
pub mod options;
pub mod query;
pub mod results;

#[cfg(test)]
pub(crate) mod testing;

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseSettings;
use crate::errors::{AppError, AppResult};

pub use backup::SqliteSnapshotBackup;
pub use collection::{Collection, SqlCollection};
pub use options::*;
pub use results::{MultiResult, SingleResult};

/// 커넥션 풀과 쿼리 데드라인을 보유하는 데이터베이스 핸들
///
/// 요청 간에 공유되는 유일한 자원이며 `Arc<Database>`로 각 저장소에 주입됩니다.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl Database {
    /// 설정에 따라 커넥션 풀을 생성합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - 연결 문자열이 잘못되었거나 연결에 실패한 경우
    pub async fn connect(settings: &DatabaseSettings) -> AppResult<Self> {
        log::info!("📡 데이터베이스 연결 중: {}", settings.url);

        let options = SqliteConnectOptions::from_str(&settings.url)
            .map_err(|e| AppError::DatabaseError(format!("잘못된 DATABASE_URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.query_timeout)
            .connect_with(options)
            .await
            .map_err(|e| AppError::DatabaseError(format!("데이터베이스 연결 실패: {}", e)))?;

        log::info!(
            "✅ 데이터베이스 연결 성공 (최대 커넥션 {}개, 쿼리 데드라인 {:?})",
            settings.max_connections,
            settings.query_timeout
        );

        Ok(Self::from_pool(pool, settings.query_timeout))
    }

    pub fn from_pool(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// `migrations/` 디렉토리의 스키마를 적용합니다.
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(format!("마이그레이션 실패: {}", e)))?;

        log::info!("✅ 마이그레이션 적용 완료");
        Ok(())
    }

    /// 이름으로 테이블 컬렉션을 얻습니다.
    pub fn collection(&self, name: &str) -> SqlCollection {
        SqlCollection::new(self.pool.clone(), name, self.query_timeout)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 헬스 체크용 연결 확인
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| AppError::DatabaseError(format!("ping 실패: {}", e)))
    }
}
