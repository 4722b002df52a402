//! SQLite 스냅샷 기반 보상 구현
//!
//! `VACUUM INTO`로 요청마다 고유한 스냅샷 파일을 만들고, 복원 시에는 스냅샷을
//! `ATTACH`한 뒤 애플리케이션 테이블의 행을 하나의 트랜잭션 안에서 교체합니다.
//! `AUTOINCREMENT` 카운터(`sqlite_sequence`)도 마지막에 함께 교체하므로, 복원 이후 발급되는
//! id는 스냅샷 시점부터 다시 이어집니다. 복원 중에는 외래 키 검사를 끄고, 끝나면 다시 켭니다.
//!
//! 저장소 전체를 되돌리므로 같은 시점에 다른 요청이 쓴 내용도 함께 되돌려질 수 있습니다.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use actix_web::rt::task::spawn_blocking;
use async_trait::async_trait;
use sqlx::sqlite::SqliteConnection;
use sqlx::Connection;

use crate::core::compensation::{BackupId, Compensation};
use crate::db::Database;
use crate::db::query::is_identifier;
use crate::errors::{AppError, AppResult, ErrorContext};

pub struct SqliteSnapshotBackup {
    database: Arc<Database>,
    backup_dir: PathBuf,
}

impl SqliteSnapshotBackup {
    pub fn new(database: Arc<Database>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            database,
            backup_dir: backup_dir.into(),
        }
    }

    fn path_for(&self, backup: &BackupId) -> PathBuf {
        self.backup_dir
            .join(format!("account_snapshot_{}.db", backup.as_str()))
    }

    fn path_string(path: &Path) -> AppResult<String> {
        path.to_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::DatabaseError(format!("백업 경로가 UTF-8이 아닙니다: {:?}", path)))
    }

    async fn copy_from_snapshot(conn: &mut SqliteConnection, snapshot: &str) -> AppResult<()> {
        sqlx::query("ATTACH DATABASE ? AS snapshot")
            .bind(snapshot)
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::DatabaseError(format!("스냅샷 연결 실패: {}", e)))?;

        let replaced = Self::replace_tables(conn).await;

        let detached = sqlx::query("DETACH DATABASE snapshot")
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::DatabaseError(format!("스냅샷 해제 실패: {}", e)));

        replaced?;
        detached.map(|_| ())
    }

    async fn replace_tables(conn: &mut SqliteConnection) -> AppResult<()> {
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM snapshot.sqlite_master \
             WHERE type = 'table' AND name <> '_sqlx_migrations' \
               AND (name NOT LIKE 'sqlite_%' OR name = 'sqlite_sequence') \
             ORDER BY name = 'sqlite_sequence', name",
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AppError::DatabaseError(format!("스냅샷 테이블 목록 조회 실패: {}", e)))?;

        let mut tx = conn
            .begin()
            .await
            .map_err(|e| AppError::DatabaseError(format!("복원 트랜잭션 시작 실패: {}", e)))?;

        for table in tables.iter().filter(|t| is_identifier(t)) {
            sqlx::query(&format!("DELETE FROM main.{}", table))
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::DatabaseError(format!("{} 비우기 실패: {}", table, e)))?;

            sqlx::query(&format!("INSERT INTO main.{0} SELECT * FROM snapshot.{0}", table))
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::DatabaseError(format!("{} 복원 실패: {}", table, e)))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::DatabaseError(format!("복원 커밋 실패: {}", e)))
    }
}

#[async_trait]
impl Compensation for SqliteSnapshotBackup {
    async fn create_backup(&self) -> AppResult<BackupId> {
        let backup = BackupId::new(uuid::Uuid::new_v4().simple().to_string());
        let path = Self::path_string(&self.path_for(&backup))?;

        sqlx::query("VACUUM INTO ?")
            .bind(&path)
            .execute(self.database.pool())
            .await
            .map_err(|e| AppError::DatabaseError(format!("스냅샷 생성 실패: {}", e)))?;

        log::debug!("💾 스냅샷 생성: {}", path);
        Ok(backup)
    }

    async fn delete_backup(&self, backup: &BackupId) -> AppResult<()> {
        let path = self.path_for(backup);
        let target = path.clone();

        spawn_blocking(move || std::fs::remove_file(target))
            .await
            .context("스냅샷 삭제 작업 실패")?
            .map_err(|e| AppError::DatabaseError(format!("스냅샷 삭제 실패 {:?}: {}", path, e)))?;

        log::debug!("🗑️ 스냅샷 삭제: {:?}", path);
        Ok(())
    }

    async fn restore(&self, backup: &BackupId) -> AppResult<()> {
        let path = self.path_for(backup);
        if !path.exists() {
            return Err(AppError::DatabaseError(format!("스냅샷 파일이 없습니다: {:?}", path)));
        }
        let snapshot = Self::path_string(&path)?;

        let mut conn = self
            .database
            .pool()
            .acquire()
            .await
            .map_err(|e| AppError::DatabaseError(format!("복원용 커넥션 획득 실패: {}", e)))?;

        sqlx::query("PRAGMA foreign_keys = OFF")
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::DatabaseError(format!("외래 키 비활성화 실패: {}", e)))?;

        let copied = Self::copy_from_snapshot(&mut conn, &snapshot).await;

        let reenabled = sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&mut *conn)
            .await
            .map_err(|e| AppError::DatabaseError(format!("외래 키 활성화 실패: {}", e)));

        copied?;
        reenabled?;

        log::info!("♻️ 스냅샷으로 복원 완료: {}", backup);
        Ok(())
    }
}
