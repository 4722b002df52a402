//! # 문자열 유틸리티
//!
//! 요청 본문의 선택 문자열 필드를 정리하는 serde 보조 함수입니다.

use serde::Deserialize;

/// 선택적 문자열 정리
///
/// 값이 없거나 공백뿐이면 `None`, 그 외에는 앞뒤 공백을 제거한 값을 돌려줍니다.
///
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  alice  ".to_string())), Some("alice".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// 로그인 요청처럼 "사용자명 또는 이메일" 중 하나만 채워 보내는 클라이언트가
/// 빈 문자열을 보내도 필드가 없는 것과 같게 취급됩니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct LoginRequest {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     username: Option<String>,
/// }
///
/// // {"username": "  alice  "} → Some("alice")
/// // {"username": ""}          → None
/// // {"username": null}        → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Identity {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        username: Option<String>,
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("  bob  ".to_string())), Some("bob".to_string()));
        assert_eq!(clean_optional_string(Some("\t\n".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        let parsed: Identity = serde_json::from_str(r#"{"username": "  bob  "}"#).unwrap();
        assert_eq!(parsed.username.as_deref(), Some("bob"));

        let parsed: Identity = serde_json::from_str(r#"{"username": ""}"#).unwrap();
        assert!(parsed.username.is_none());

        let parsed: Identity = serde_json::from_str(r#"{"username": null}"#).unwrap();
        assert!(parsed.username.is_none());

        let parsed: Identity = serde_json::from_str("{}").unwrap();
        assert!(parsed.username.is_none());
    }

    #[test]
    fn test_deserialize_keeps_inner_whitespace() {
        let parsed: Identity = serde_json::from_str(r#"{"username": "  김 철수  "}"#).unwrap();
        assert_eq!(parsed.username.as_deref(), Some("김 철수"));
    }
}
