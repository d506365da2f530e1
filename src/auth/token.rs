use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Short-lived bearer token for the resource endpoints.
///
/// `Debug` never prints the token value.
///
/// # Example
/// ```
/// use applemaps::auth::AccessToken;
///
/// let token = AccessToken::new("eyJhbGciOi...", 1_700_000_000);
/// assert_eq!(token.expires_at, 1_700_000_000);
/// assert!(!format!("{token:?}").contains("eyJ"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub value: String,
    /// Expiry as unix seconds.
    pub expires_at: i64,
}

impl AccessToken {
    pub fn new(value: impl Into<String>, expires_at: i64) -> Self {
        Self {
            value: value.into(),
            expires_at,
        }
    }

    /// Seconds of validity left at `now` (negative once expired).
    /// Saturates at the `i64` bounds.
    pub fn remaining_secs(&self, now: i64) -> i64 {
        self.expires_at.saturating_sub(now)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &if self.value.is_empty() { "" } else { "<redacted>" })
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Body of a successful `GET /v1/token`.
#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub expires_in_seconds: i64,
}

impl AccessTokenResponse {
    /// Pin the relative lifetime to an absolute expiry.
    pub fn into_token_at(self, now: i64) -> AccessToken {
        AccessToken {
            value: self.access_token,
            expires_at: now.saturating_add(self.expires_in_seconds),
        }
    }

    pub fn into_token(self) -> AccessToken {
        let now = Utc::now().timestamp();
        self.into_token_at(now)
    }
}

impl fmt::Debug for AccessTokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessTokenResponse")
            .field("access_token", &"<redacted>")
            .field("expires_in_seconds", &self.expires_in_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_expiry_is_made_absolute() {
        let resp: AccessTokenResponse =
            serde_json::from_str(r#"{"accessToken":"abc","expiresInSeconds":1800}"#).unwrap();
        let token = resp.into_token_at(1_000);
        assert_eq!(token, AccessToken::new("abc", 2_800));
        assert_eq!(token.remaining_secs(2_000), 800);
    }

    #[test]
    fn huge_lifetime_saturates() {
        let resp: AccessTokenResponse = serde_json::from_str(
            r#"{"accessToken":"abc","expiresInSeconds":9223372036854775807}"#,
        )
        .unwrap();
        let token = resp.into_token_at(1_700_000_000);
        assert_eq!(token.expires_at, i64::MAX);
        assert!(token.remaining_secs(1_700_000_000) > 0);
    }

    #[test]
    fn extreme_expiries_do_not_overflow() {
        assert_eq!(AccessToken::new("a", i64::MIN).remaining_secs(1_700_000_000), i64::MIN);
        assert_eq!(AccessToken::new("a", i64::MAX).remaining_secs(-1), i64::MAX);
        let negative = AccessTokenResponse {
            access_token: "a".into(),
            expires_in_seconds: i64::MIN,
        };
        assert_eq!(negative.into_token_at(-10).expires_at, i64::MIN);
    }

    #[test]
    fn debug_redacts_value() {
        let token = AccessToken::new("secret-token", 5);
        let printed = format!("{token:?}");
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("expires_at: 5"));
    }
}
