//! 테이블 단위 데이터 접근 추상화
//!
//! 저장소 계층은 SQL을 직접 작성하지 않고 [`Collection`]의 연산만 사용합니다.
//!
//! | 연산 | 반환 | 설명 |
//! |------|------|------|
//! | `insert_one` | `i64` | 삽입 전용, 유일 키 충돌 시 `ConflictError` |
//! | `upsert_one` | `i64` | 삽입 또는 유일 키 충돌 시 갱신, 행 id 반환 |
//! | `find_many` | [`MultiResult`] | 조인/조건/그룹/정렬/페이지 적용 다건 조회 |
//! | `find_one` | [`SingleResult`] | 첫 번째 행 조회, 없으면 빈 결과 |
//! | `delete_one` | `u64` | 조건에 맞는 행 삭제, 삭제된 행 수 반환 |
//!
//! 모든 문장은 설정된 쿼리 데드라인 안에서 실행되며, 데드라인 초과는 `DatabaseError`입니다.

use std::future::Future;
use std::time::Duration;

use actix_web::rt::time::timeout;
use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments, SqlitePool};
use sqlx::Row;

use crate::db::options::{
    DeletionOption, DeletionOptions, FieldValue, SelectionOption, SelectionOptions,
    UpsertionOption, UpsertionOptions,
};
use crate::db::query::{self, Statement};
use crate::db::results::{MultiResult, SingleResult};
use crate::errors::{AppError, AppResult};

#[async_trait]
pub trait Collection: Send + Sync {
    /// 컬렉션(테이블) 이름
    fn name(&self) -> &str;

    async fn insert_one(&self, options: Vec<UpsertionOption>) -> AppResult<i64>;

    async fn upsert_one(&self, options: Vec<UpsertionOption>) -> AppResult<i64>;

    async fn find_many(&self, options: Vec<SelectionOption>) -> AppResult<MultiResult>;

    async fn find_one(&self, options: Vec<SelectionOption>) -> AppResult<SingleResult>;

    async fn delete_one(&self, options: Vec<DeletionOption>) -> AppResult<u64>;
}

/// SQLite 커넥션 풀 위의 [`Collection`] 구현
#[derive(Clone)]
pub struct SqlCollection {
    pool: SqlitePool,
    table: String,
    query_timeout: Duration,
}

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

impl SqlCollection {
    pub fn new(pool: SqlitePool, table: impl Into<String>, query_timeout: Duration) -> Self {
        Self {
            pool,
            table: table.into(),
            query_timeout,
        }
    }

    fn bind_all<'q>(statement: &'q Statement) -> SqliteQuery<'q> {
        statement
            .args
            .iter()
            .fold(sqlx::query(&statement.sql), |query, value| match value {
                FieldValue::Integer(v) => query.bind(*v),
                FieldValue::Text(v) => query.bind(v.clone()),
                FieldValue::Bool(v) => query.bind(*v),
                FieldValue::Null => query.bind(Option::<String>::None),
            })
    }

    /// 쿼리 데드라인을 적용하고 실패를 연산별 메시지로 감쌉니다.
    async fn run<T, F>(&self, operation: &str, future: F) -> AppResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match timeout(self.query_timeout, future).await {
            Ok(result) => result.map_err(|e| {
                AppError::DatabaseError(format!("{} {} 실행 실패: {}", self.table, operation, e))
            }),
            Err(_) => Err(AppError::DatabaseError(format!(
                "{} {} 시간 초과 ({:?})",
                self.table, operation, self.query_timeout
            ))),
        }
    }
}

#[async_trait]
impl Collection for SqlCollection {
    fn name(&self) -> &str {
        &self.table
    }

    async fn insert_one(&self, options: Vec<UpsertionOption>) -> AppResult<i64> {
        let options = UpsertionOptions::from_options(options);
        let statement = query::insert_statement(&self.table, &options)?;
        log::debug!("InsertOne: {}", statement.sql);

        let row = self
            .run("InsertOne", Self::bind_all(&statement).fetch_optional(&self.pool))
            .await?
            .ok_or_else(|| {
                AppError::ConflictError(format!("{} 유일 키가 이미 존재합니다", self.table))
            })?;

        row.try_get::<i64, _>("id").map_err(|e| {
            AppError::DatabaseError(format!("{} InsertOne id 조회 실패: {}", self.table, e))
        })
    }

    async fn upsert_one(&self, options: Vec<UpsertionOption>) -> AppResult<i64> {
        let options = UpsertionOptions::from_options(options);
        let statement = query::upsert_statement(&self.table, &options)?;
        log::debug!("UpsertOne: {}", statement.sql);

        let row = self
            .run("UpsertOne", Self::bind_all(&statement).fetch_one(&self.pool))
            .await?;

        row.try_get::<i64, _>("id").map_err(|e| {
            AppError::DatabaseError(format!("{} UpsertOne id 조회 실패: {}", self.table, e))
        })
    }

    async fn find_many(&self, options: Vec<SelectionOption>) -> AppResult<MultiResult> {
        let options = SelectionOptions::from_options(options);
        let statement = query::select_statement(&self.table, &options)?;
        log::debug!("FindMany: {}", statement.sql);

        let rows = self
            .run("FindMany", Self::bind_all(&statement).fetch_all(&self.pool))
            .await?;

        Ok(MultiResult::new(&self.table, rows))
    }

    async fn find_one(&self, options: Vec<SelectionOption>) -> AppResult<SingleResult> {
        let options = SelectionOptions::from_options(options);
        let statement = query::select_one_statement(&self.table, &options)?;
        log::debug!("FindOne: {}", statement.sql);

        let row = self
            .run("FindOne", Self::bind_all(&statement).fetch_optional(&self.pool))
            .await?;

        Ok(SingleResult::new(&self.table, row))
    }

    async fn delete_one(&self, options: Vec<DeletionOption>) -> AppResult<u64> {
        let options = DeletionOptions::from_options(options);
        let statement = query::delete_statement(&self.table, &options)?;
        log::debug!("DeleteOne: {}", statement.sql);

        let result = self
            .run("DeleteOne", Self::bind_all(&statement).execute(&self.pool))
            .await?;

        Ok(result.rows_affected())
    }
}
