//! SQL 문 생성기
//!
//! 접힌 옵션 구조체를 `?` 플레이스홀더 기반 SQL 문과 바인딩 인자 목록으로 변환합니다.
//! 이 모듈은 I/O를 하지 않으므로 생성되는 문장을 그대로 단위 테스트할 수 있습니다.

use crate::db::options::{DeletionOptions, FieldValue, SelectionOptions, UpsertionOptions};
use crate::errors::{AppError, AppResult};

/// 실행 가능한 SQL 문과 바인딩 인자
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<FieldValue>,
}

/// 테이블/컬럼 식별자 검사
///
/// 영문자, 숫자, 밑줄만 허용하며 숫자로 시작할 수 없습니다.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn ensure_identifier(name: &str, kind: &str) -> AppResult<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(AppError::DatabaseError(format!(
            "유효하지 않은 {} 이름입니다: {:?}",
            kind, name
        )))
    }
}

/// 삽입 문 공통부: 검증된 컬럼 목록과 바인딩 인자
fn insert_columns<'a>(
    table: &str,
    options: &'a UpsertionOptions,
) -> AppResult<(Vec<&'a str>, Vec<FieldValue>)> {
    ensure_identifier(table, "테이블")?;

    let fields_values = options.fields_values.as_ref().ok_or_else(|| {
        AppError::DatabaseError(format!("{} 저장에 필드-값 매핑이 없습니다", table))
    })?;

    let mut columns = Vec::with_capacity(fields_values.len());
    let mut args = Vec::with_capacity(fields_values.len());
    for (field, value) in fields_values {
        ensure_identifier(field, "필드")?;
        columns.push(field.as_str());
        args.push(value.clone());
    }

    Ok((columns, args))
}

/// upsert 문을 생성합니다.
///
/// 유일 키가 충돌하면 새 행을 만들지 않고 기존 행의 값을 갱신하며,
/// 어느 쪽이든 해당 행의 `id`를 반환합니다.
///
/// ```text
/// INSERT INTO users (email, password, username) VALUES (?, ?, ?)
///   ON CONFLICT DO UPDATE SET email = excluded.email, ... RETURNING id
/// ```
///
/// # Errors
///
/// * `AppError::DatabaseError` - 필드-값 매핑이 없거나 식별자가 올바르지 않은 경우
pub fn upsert_statement(table: &str, options: &UpsertionOptions) -> AppResult<Statement> {
    let (columns, args) = insert_columns(table, options)?;

    let placeholders = vec!["?"; columns.len()].join(", ");
    let updates = columns
        .iter()
        .map(|c| format!("{c} = excluded.{c}"))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(Statement {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT DO UPDATE SET {} RETURNING id",
            table,
            columns.join(", "),
            placeholders,
            updates
        ),
        args,
    })
}

/// 삽입 전용 문을 생성합니다.
///
/// 유일 키가 충돌하면 아무 행도 쓰지 않고 `RETURNING`도 비어 있으므로,
/// 실행 측은 "반환 행 없음"을 중복으로 판단합니다.
///
/// ```text
/// INSERT INTO users (email, password, username) VALUES (?, ?, ?)
///   ON CONFLICT DO NOTHING RETURNING id
/// ```
pub fn insert_statement(table: &str, options: &UpsertionOptions) -> AppResult<Statement> {
    let (columns, args) = insert_columns(table, options)?;

    Ok(Statement {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT DO NOTHING RETURNING id",
            table,
            columns.join(", "),
            vec!["?"; columns.len()].join(", ")
        ),
        args,
    })
}

/// 다건 조회 문을 생성합니다.
///
/// `SELECT {fields} FROM {table} [JOIN ..]* [WHERE ..] [GROUP BY ..] [ORDER BY ..] [LIMIT n OFFSET m]`
pub fn select_statement(table: &str, options: &SelectionOptions) -> AppResult<Statement> {
    let mut statement = select_without_paging(table, options)?;

    if let Some(page) = options.pagination {
        statement
            .sql
            .push_str(&format!(" LIMIT {} OFFSET {}", page.take, page.skip));
    }

    Ok(statement)
}

/// 단건 조회 문을 생성합니다. 페이지 옵션은 무시합니다.
pub fn select_one_statement(table: &str, options: &SelectionOptions) -> AppResult<Statement> {
    select_without_paging(table, options)
}

fn select_without_paging(table: &str, options: &SelectionOptions) -> AppResult<Statement> {
    ensure_identifier(table, "테이블")?;

    let fields = if options.fields.is_empty() {
        "*".to_string()
    } else {
        options.fields.join(", ")
    };

    let mut sql = format!("SELECT {} FROM {}", fields, table);
    let mut args = Vec::new();

    for join in options.joins.iter() {
        ensure_identifier(&join.table, "조인 테이블")?;
        sql.push_str(&format!(" JOIN {} ON {}", join.table, join.on));
    }

    if let Some(filter) = &options.filter {
        sql.push_str(&format!(" WHERE {}", filter.predicate));
        args.extend(filter.args.iter().cloned());
    }

    if !options.group_by.is_empty() {
        sql.push_str(&format!(" GROUP BY {}", options.group_by.join(", ")));
    }

    if !options.order_by.is_empty() {
        sql.push_str(&format!(" ORDER BY {}", options.order_by.join(", ")));
    }

    Ok(Statement { sql, args })
}

/// 삭제 문을 생성합니다.
///
/// where 조건 없는 삭제는 테이블 전체를 지우게 되므로 거부합니다.
pub fn delete_statement(table: &str, options: &DeletionOptions) -> AppResult<Statement> {
    ensure_identifier(table, "테이블")?;

    let filter = options.filter.as_ref().ok_or_else(|| {
        AppError::DatabaseError(format!("{} 삭제에는 where 조건이 필요합니다", table))
    })?;

    Ok(Statement {
        sql: format!("DELETE FROM {} WHERE {}", table, filter.predicate),
        args: filter.args.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::options::*;

    #[test]
    fn test_upsert_statement_uses_sorted_fields() {
        let options = UpsertionOptions::from_options(vec![with_fields_values([
            ("username", "alice".into()),
            ("password", "hash".into()),
            ("email", "alice@example.com".into()),
        ])]);

        let statement = upsert_statement("users", &options).unwrap();

        assert_eq!(
            statement.sql,
            "INSERT INTO users (email, password, username) VALUES (?, ?, ?) \
             ON CONFLICT DO UPDATE SET email = excluded.email, password = excluded.password, \
             username = excluded.username RETURNING id"
        );
        assert_eq!(
            statement.args,
            vec![
                FieldValue::Text("alice@example.com".to_string()),
                FieldValue::Text("hash".to_string()),
                FieldValue::Text("alice".to_string()),
            ]
        );
    }

    #[test]
    fn test_insert_statement_never_updates() {
        let options = UpsertionOptions::from_options(vec![with_fields_values([
            ("username", "alice".into()),
            ("email", "alice@example.com".into()),
        ])]);

        let statement = insert_statement("users", &options).unwrap();

        assert_eq!(
            statement.sql,
            "INSERT INTO users (email, username) VALUES (?, ?) ON CONFLICT DO NOTHING RETURNING id"
        );
        assert_eq!(statement.args.len(), 2);
        assert!(insert_statement("users", &UpsertionOptions::default()).is_err());
    }

    #[test]
    fn test_upsert_without_fields_values_fails() {
        let result = upsert_statement("users", &UpsertionOptions::default());
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[test]
    fn test_upsert_rejects_invalid_identifiers() {
        let options = UpsertionOptions::from_options(vec![with_fields_values([(
            "name; DROP TABLE users",
            "x".into(),
        )])]);

        assert!(upsert_statement("users", &options).is_err());
        assert!(upsert_statement("users x", &options).is_err());
    }

    #[test]
    fn test_select_defaults_to_all_columns() {
        let statement = select_statement("roles", &SelectionOptions::default()).unwrap();
        assert_eq!(statement.sql, "SELECT * FROM roles");
        assert!(statement.args.is_empty());
    }

    #[test]
    fn test_select_with_every_clause_in_order() {
        let options = SelectionOptions::from_options(vec![
            with_fields(["users.id AS id", "roles.role AS role"]),
            with_joins(
                Joins::new()
                    .join("users_has_roles", "users.id = users_has_roles.user_id")
                    .join("roles", "users_has_roles.role_id = roles.id"),
            ),
            with_where("roles.role = ?", vec!["admin".into()]),
            with_group_by(["roles.role"]),
            with_order_by(["users.id"]),
            with_pagination(10, 20),
        ]);

        let statement = select_statement("users", &options).unwrap();

        assert_eq!(
            statement.sql,
            "SELECT users.id AS id, roles.role AS role FROM users \
             JOIN users_has_roles ON users.id = users_has_roles.user_id \
             JOIN roles ON users_has_roles.role_id = roles.id \
             WHERE roles.role = ? GROUP BY roles.role ORDER BY users.id LIMIT 10 OFFSET 20"
        );
        assert_eq!(statement.args, vec![FieldValue::Text("admin".to_string())]);
    }

    #[test]
    fn test_select_one_ignores_pagination() {
        let options = SelectionOptions::from_options(vec![
            with_where("id = ?", vec![1i64.into()]),
            with_pagination(10, 20),
        ]);

        let statement = select_one_statement("users", &options).unwrap();
        assert_eq!(statement.sql, "SELECT * FROM users WHERE id = ?");
    }

    #[test]
    fn test_delete_requires_where() {
        assert!(delete_statement("users", &DeletionOptions::default()).is_err());

        let options = DeletionOptions::from_options(vec![delete_where("id = ?", vec![7i64.into()])]);
        let statement = delete_statement("users", &options).unwrap();
        assert_eq!(statement.sql, "DELETE FROM users WHERE id = ?");
        assert_eq!(statement.args, vec![FieldValue::Integer(7)]);
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("users_has_roles"));
        assert!(is_identifier("_sqlx"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1users"));
        assert!(!is_identifier("users.id"));
    }
}
