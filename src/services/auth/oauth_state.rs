//! OAuth `state` 매개변수 서명/검증
//!
//! 서버에 세션을 저장하지 않고 CSRF를 막기 위해, state에 발급 시각과 서명을 함께 담습니다.
//!
//! ```text
//! state = "{timestamp}.{hex(sha256("{timestamp}:{secret}"))}"
//! ```
//!
//! 콜백에서는 서명을 다시 계산해 비교하고, 발급 후 세션 타임아웃이 지났으면 거부합니다.

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::config::OAuthConfig;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct OAuthStateSigner {
    secret: String,
    max_age_secs: i64,
}

impl OAuthStateSigner {
    pub fn new(secret: impl Into<String>, session_timeout_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            max_age_secs: session_timeout_minutes * 60,
        }
    }

    pub fn from_env() -> Self {
        Self::new(OAuthConfig::state_secret(), OAuthConfig::session_timeout_minutes())
    }

    fn signature(&self, timestamp: i64) -> String {
        let digest = Sha256::digest(format!("{}:{}", timestamp, self.secret).as_bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    pub fn issue(&self) -> String {
        self.issue_at(Utc::now().timestamp())
    }

    fn issue_at(&self, timestamp: i64) -> String {
        format!("{}.{}", timestamp, self.signature(timestamp))
    }

    /// 콜백으로 돌아온 state를 검증합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 형식이 틀렸거나 서명 불일치, 만료된 경우
    pub fn verify(&self, state: &str) -> AppResult<()> {
        self.verify_at(state, Utc::now().timestamp())
    }

    fn verify_at(&self, state: &str, now: i64) -> AppResult<()> {
        let invalid = || AppError::AuthenticationError("유효하지 않은 OAuth state".to_string());

        let (timestamp, signature) = state.split_once('.').ok_or_else(invalid)?;
        let timestamp: i64 = timestamp.parse().map_err(|_| invalid())?;

        let expected = self.signature(timestamp);
        let matches = expected.len() == signature.len()
            && expected
                .bytes()
                .zip(signature.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0;
        if !matches {
            return Err(invalid());
        }

        if timestamp > now || now - timestamp > self.max_age_secs {
            return Err(AppError::AuthenticationError("만료된 OAuth state".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_state_verifies() {
        let signer = OAuthStateSigner::new("secret", 10);
        let state = signer.issue();
        assert!(signer.verify(&state).is_ok());
    }

    #[test]
    fn test_tampered_state_is_rejected() {
        let signer = OAuthStateSigner::new("secret", 10);
        let state = signer.issue_at(1_700_000_000);
        let tampered = state.replacen("1700000000", "1700000001", 1);

        assert!(signer.verify_at(&tampered, 1_700_000_010).is_err());
        assert!(signer.verify_at("garbage", 1_700_000_010).is_err());
        assert!(OAuthStateSigner::new("other", 10).verify_at(&state, 1_700_000_010).is_err());
    }

    #[test]
    fn test_expired_state_is_rejected() {
        let signer = OAuthStateSigner::new("secret", 10);
        let state = signer.issue_at(1_700_000_000);

        assert!(signer.verify_at(&state, 1_700_000_000 + 600).is_ok());
        assert!(signer.verify_at(&state, 1_700_000_000 + 601).is_err());
    }
}
