//! 테스트용 인메모리 데이터베이스

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::db::Database;

/// 마이그레이션이 적용된 인메모리 SQLite 데이터베이스를 만듭니다.
///
/// `:memory:` 데이터베이스는 커넥션마다 별개이므로 커넥션을 하나로 고정하고
/// 유휴 종료를 끕니다.
pub(crate) async fn memory_database() -> Arc<Database> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory sqlite pool");

    let database = Database::from_pool(pool, Duration::from_secs(5));
    database.migrate().await.expect("migrations apply");
    Arc::new(database)
}
