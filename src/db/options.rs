//! 쿼리 옵션 정의
//!
//! `Collection`의 각 연산은 옵션 목록을 받아 하나의 옵션 구조체로 접어(fold) 사용합니다.
//! 같은 종류의 옵션이 여러 번 주어지면 마지막 값이 적용되며,
//! 유효하지 않은 옵션(빈 필드 목록, 음수 페이지 등)은 경고 로그를 남기고 무시합니다.
//!
//! ```rust,ignore
//! let result = collection
//!     .find_many(vec![
//!         with_fields(["users.id AS id", "roles.role AS role"]),
//!         with_joins(Joins::new().join("users_has_roles", "users.id = users_has_roles.user_id")),
//!         with_order_by(["users.id"]),
//!         with_pagination(10, 20),
//!     ])
//!     .await?;
//! ```
//!
//! SQL 조각(필드, 조인 조건, where 조건식)은 저장소 코드가 작성하는 신뢰된 문자열이며,
//! 사용자 입력 값은 항상 [`FieldValue`]로 바인딩됩니다.

use std::collections::BTreeMap;

/// 바인딩 파라미터 값
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
    Bool(bool),
    Null,
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        FieldValue::Text(value.clone())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// 필드 이름 → 값 매핑. 필드 순서를 고정하기 위해 정렬된 맵을 사용합니다.
pub type FieldsValues = BTreeMap<String, FieldValue>;

/// where 조건식과 바인딩 인자
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub predicate: String,
    pub args: Vec<FieldValue>,
}

/// 조인 절 하나
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: String,
    pub on: String,
}

/// 순서가 보장되는 조인 목록
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Joins(Vec<Join>);

impl Joins {
    pub fn new() -> Self {
        Self::default()
    }

    /// `JOIN {table} ON {on}` 절을 목록 끝에 추가합니다.
    pub fn join(mut self, table: impl Into<String>, on: impl Into<String>) -> Self {
        self.0.push(Join {
            table: table.into(),
            on: on.into(),
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Join> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// LIMIT / OFFSET 페이지 정보
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub take: i64,
    pub skip: i64,
}

/// 조회 옵션
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOption {
    Where(Filter),
    Fields(Vec<String>),
    Joins(Joins),
    GroupBy(Vec<String>),
    OrderBy(Vec<String>),
    Pagination(Pagination),
}

/// 접힌 조회 옵션. 필드가 비어 있으면 `*`를 조회합니다.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionOptions {
    pub filter: Option<Filter>,
    pub fields: Vec<String>,
    pub joins: Joins,
    pub group_by: Vec<String>,
    pub order_by: Vec<String>,
    pub pagination: Option<Pagination>,
}

impl SelectionOptions {
    pub fn from_options(options: impl IntoIterator<Item = SelectionOption>) -> Self {
        let mut folded = Self::default();

        for option in options {
            match option {
                SelectionOption::Where(filter) => {
                    if filter.predicate.trim().is_empty() {
                        log::warn!("빈 where 조건은 무시합니다");
                        continue;
                    }
                    folded.filter = Some(filter);
                }
                SelectionOption::Fields(fields) => {
                    if fields.is_empty() {
                        log::warn!("빈 필드 목록은 무시합니다");
                        continue;
                    }
                    folded.fields = fields;
                }
                SelectionOption::Joins(joins) => folded.joins = joins,
                SelectionOption::GroupBy(columns) => folded.group_by = columns,
                SelectionOption::OrderBy(columns) => folded.order_by = columns,
                SelectionOption::Pagination(pagination) => {
                    if pagination.take <= 0 || pagination.skip < 0 {
                        log::warn!(
                            "유효하지 않은 페이지 옵션은 무시합니다: take={}, skip={}",
                            pagination.take,
                            pagination.skip
                        );
                        continue;
                    }
                    folded.pagination = Some(pagination);
                }
            }
        }

        folded
    }
}

/// 저장(upsert) 옵션
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertionOption {
    FieldsValues(FieldsValues),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpsertionOptions {
    pub fields_values: Option<FieldsValues>,
}

impl UpsertionOptions {
    pub fn from_options(options: impl IntoIterator<Item = UpsertionOption>) -> Self {
        let mut folded = Self::default();

        for option in options {
            match option {
                UpsertionOption::FieldsValues(values) => {
                    if values.is_empty() {
                        log::warn!("빈 필드-값 매핑은 무시합니다");
                        continue;
                    }
                    folded.fields_values = Some(values);
                }
            }
        }

        folded
    }
}

/// 삭제 옵션
#[derive(Debug, Clone, PartialEq)]
pub enum DeletionOption {
    Where(Filter),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeletionOptions {
    pub filter: Option<Filter>,
}

impl DeletionOptions {
    pub fn from_options(options: impl IntoIterator<Item = DeletionOption>) -> Self {
        let mut folded = Self::default();

        for option in options {
            match option {
                DeletionOption::Where(filter) => {
                    if filter.predicate.trim().is_empty() {
                        log::warn!("빈 where 조건은 무시합니다");
                        continue;
                    }
                    folded.filter = Some(filter);
                }
            }
        }

        folded
    }
}

pub fn with_where(predicate: impl Into<String>, args: Vec<FieldValue>) -> SelectionOption {
    SelectionOption::Where(Filter {
        predicate: predicate.into(),
        args,
    })
}

pub fn with_fields<I, S>(fields: I) -> SelectionOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectionOption::Fields(fields.into_iter().map(Into::into).collect())
}

pub fn with_joins(joins: Joins) -> SelectionOption {
    SelectionOption::Joins(joins)
}

pub fn with_group_by<I, S>(columns: I) -> SelectionOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectionOption::GroupBy(columns.into_iter().map(Into::into).collect())
}

pub fn with_order_by<I, S>(columns: I) -> SelectionOption
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectionOption::OrderBy(columns.into_iter().map(Into::into).collect())
}

pub fn with_pagination(take: i64, skip: i64) -> SelectionOption {
    SelectionOption::Pagination(Pagination { take, skip })
}

/// 필드-값 쌍 목록으로 upsert 옵션을 만듭니다.
///
/// ```rust,ignore
/// with_fields_values([
///     ("user_id", user_id.into()),
///     ("nickname", nickname.into()),
/// ])
/// ```
pub fn with_fields_values<I, K>(pairs: I) -> UpsertionOption
where
    I: IntoIterator<Item = (K, FieldValue)>,
    K: Into<String>,
{
    UpsertionOption::FieldsValues(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
}

pub fn delete_where(predicate: impl Into<String>, args: Vec<FieldValue>) -> DeletionOption {
    DeletionOption::Where(Filter {
        predicate: predicate.into(),
        args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_option_of_a_kind_wins() {
        let options = SelectionOptions::from_options(vec![
            with_fields(["id"]),
            with_fields(["id", "username"]),
            with_pagination(5, 0),
            with_pagination(10, 20),
        ]);

        assert_eq!(options.fields, vec!["id".to_string(), "username".to_string()]);
        assert_eq!(options.pagination, Some(Pagination { take: 10, skip: 20 }));
    }

    #[test]
    fn test_invalid_options_are_skipped() {
        let options = SelectionOptions::from_options(vec![
            with_fields(["id"]),
            with_fields(Vec::<String>::new()),
            with_pagination(0, 0),
            with_pagination(10, -1),
            with_where("   ", vec![]),
        ]);

        assert_eq!(options.fields, vec!["id".to_string()]);
        assert_eq!(options.pagination, None);
        assert_eq!(options.filter, None);
    }

    #[test]
    fn test_joins_keep_insertion_order() {
        let joins = Joins::new()
            .join("users_has_roles", "users.id = users_has_roles.user_id")
            .join("roles", "users_has_roles.role_id = roles.id");

        let tables: Vec<&str> = joins.iter().map(|j| j.table.as_str()).collect();
        assert_eq!(tables, vec!["users_has_roles", "roles"]);
    }

    #[test]
    fn test_fields_values_are_sorted_by_name() {
        let UpsertionOption::FieldsValues(values) = with_fields_values([
            ("username", "alice".into()),
            ("email", "alice@example.com".into()),
            ("id", 3i64.into()),
        ]);

        let keys: Vec<&str> = values.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["email", "id", "username"]);
    }

    #[test]
    fn test_empty_fields_values_are_skipped() {
        let options = UpsertionOptions::from_options(vec![UpsertionOption::FieldsValues(FieldsValues::new())]);
        assert!(options.fields_values.is_none());
    }

    #[test]
    fn test_optional_value_becomes_null() {
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("x")), FieldValue::Text("x".to_string()));
    }
}
