use serde::Deserialize;

/// Google userinfo 응답
///
/// 이메일 외의 필드는 동의 범위에 따라 빠질 수 있으므로 모두 선택 값입니다.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoogleUserInfo {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,

    #[serde(default)]
    pub verified_email: Option<bool>,
}
