//! 조회 결과 래퍼
//!
//! 행을 엔티티로 변환하는 작업은 각 엔티티의 `sqlx::FromRow` 구현이 담당합니다.
//! 다건 결과는 행마다 새 레코드를 만들어 반환합니다.

use sqlx::FromRow;
use sqlx::sqlite::SqliteRow;

use crate::errors::{AppError, AppResult};

/// `find_one` 결과
///
/// 행이 없는 것은 에러가 아니며 [`SingleResult::decode`]가 `None`을 반환합니다.
pub struct SingleResult {
    table: String,
    row: Option<SqliteRow>,
}

impl SingleResult {
    pub(crate) fn new(table: impl Into<String>, row: Option<SqliteRow>) -> Self {
        Self {
            table: table.into(),
            row,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.row.is_none()
    }

    /// 첫 번째 행을 `T`로 변환합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(T))` - 행이 존재하고 변환에 성공한 경우
    /// * `Ok(None)` - 조회된 행이 없는 경우 (경고 로그만 남김)
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - 컬럼 타입/이름이 엔티티와 맞지 않는 경우
    pub fn decode<T>(&self) -> AppResult<Option<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow>,
    {
        match &self.row {
            Some(row) => T::from_row(row).map(Some).map_err(|e| {
                AppError::DatabaseError(format!("{} 행 변환 실패: {}", self.table, e))
            }),
            None => {
                log::warn!("{} 조회 결과가 없습니다", self.table);
                Ok(None)
            }
        }
    }
}

/// `find_many` 결과
pub struct MultiResult {
    table: String,
    rows: Vec<SqliteRow>,
}

impl MultiResult {
    pub(crate) fn new(table: impl Into<String>, rows: Vec<SqliteRow>) -> Self {
        Self {
            table: table.into(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 모든 행을 `T`로 변환합니다. 행이 없으면 빈 벡터를 반환합니다.
    pub fn decode<T>(&self) -> AppResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow>,
    {
        if self.rows.is_empty() {
            log::warn!("{} 조회 결과가 없습니다", self.table);
        }

        self.rows
            .iter()
            .map(|row| {
                T::from_row(row).map_err(|e| {
                    AppError::DatabaseError(format!("{} 행 변환 실패: {}", self.table, e))
                })
            })
            .collect()
    }
}
