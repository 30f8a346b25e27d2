//! Access token payloads.
//!
//! The backend issues RS256-signed JWTs. The client never verifies the
//! signature; it only reads the claims to learn who is signed in and when the
//! token runs out. Every protected endpoint verifies the token server-side.

use crate::errors::{CoreError, Result};
use crate::role::Role;
use crate::user::CurrentUser;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Response of `POST /auth/refresh`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResult {
    /// The new bearer token.
    pub access_token: String,
    /// Expiry as sent by the server.
    #[serde(default)]
    pub expires_in: i64,
    /// Token type, `bearer`.
    #[serde(default)]
    pub token_type: String,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Numeric user id.
    #[serde(default)]
    pub uid: Option<i64>,
    /// Login name.
    pub user_id: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Role of the account.
    pub role: Role,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Subject.
    #[serde(default)]
    pub sub: Option<String>,
    /// Issuer.
    #[serde(default)]
    pub iss: Option<String>,
    /// Issued-at, seconds since the epoch.
    #[serde(default)]
    pub iat: Option<i64>,
    /// Expiry, seconds since the epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl AccessClaims {
    /// Decode the claims of a compact JWT without verifying it.
    pub fn decode(token: &str) -> Result<Self> {
        let segments: Vec<&str> = token.trim().split('.').collect();
        if segments.len() != 3 {
            return Err(CoreError::malformed(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        }
        let payload = segments[1].trim_end_matches('=');
        if payload.is_empty() {
            return Err(CoreError::malformed("empty payload segment"));
        }
        let bytes = URL_SAFE_NO_PAD.decode(payload)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Expiry as a timestamp, if the token carries one.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    /// Whether the token is expired at `now`, treating anything within
    /// `leeway` of the expiry as already expired.
    ///
    /// A token without `exp` never expires on the client side.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        match self.expires_at() {
            Some(exp) => exp <= now + leeway,
            None => false,
        }
    }

    /// The user these claims describe.
    #[must_use]
    pub fn to_user(&self) -> CurrentUser {
        CurrentUser {
            id: self.uid,
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token_with(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.c2lnbmF0dXJl")
    }

    #[test]
    fn test_decode_backend_claims() {
        let token = token_with(serde_json::json!({
            "uid": 12,
            "user_id": "authority_1",
            "email": "auth@college.edu",
            "role": "authority",
            "name": "Dean",
            "iss": "digital-eval",
            "aud": ["digital-eval-ui"],
            "sub": "authority_1",
            "iat": 1_700_000_000,
            "exp": 1_700_000_900
        }));

        let claims = AccessClaims::decode(&token).unwrap();
        assert_eq!(claims.uid, Some(12));
        assert_eq!(claims.role, Role::Authority);
        assert_eq!(claims.exp, Some(1_700_000_900));

        let user = claims.to_user();
        assert_eq!(user.user_id, "authority_1");
        assert_eq!(user.name.as_deref(), Some("Dean"));
    }

    #[test]
    fn test_decode_tolerates_padding() {
        let token = token_with(serde_json::json!({"user_id": "a", "role": "admin"}));
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        parts[1].push_str("==");
        let claims = AccessClaims::decode(&parts.join(".")).unwrap();
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let err = AccessClaims::decode("not-a-jwt").unwrap_err();
        assert!(matches!(err, CoreError::MalformedToken(_)));

        let err = AccessClaims::decode("a..c").unwrap_err();
        assert!(matches!(err, CoreError::MalformedToken(_)));
    }

    #[test]
    fn test_decode_rejects_bad_payload() {
        let err = AccessClaims::decode("aGVhZGVy.%%%.sig").unwrap_err();
        assert!(matches!(err, CoreError::Encoding(_)));

        let body = URL_SAFE_NO_PAD.encode(b"[1,2,3]");
        let err = AccessClaims::decode(&format!("h.{body}.s")).unwrap_err();
        assert!(matches!(err, CoreError::Claims(_)));
    }

    #[test]
    fn test_expiry() {
        let claims = AccessClaims::decode(&token_with(serde_json::json!({
            "user_id": "s", "role": "student", "exp": 1_000
        })))
        .unwrap();

        let before = Utc.timestamp_opt(900, 0).unwrap();
        let after = Utc.timestamp_opt(1_001, 0).unwrap();
        assert!(!claims.is_expired_at(before, Duration::zero()));
        assert!(claims.is_expired_at(before, Duration::seconds(200)));
        assert!(claims.is_expired_at(after, Duration::zero()));
    }

    #[test]
    fn test_no_exp_never_expires() {
        let claims = AccessClaims::decode(&token_with(serde_json::json!({
            "user_id": "s", "role": "student"
        })))
        .unwrap();
        assert_eq!(claims.expires_at(), None);
        assert!(!claims.is_expired_at(Utc::now(), Duration::seconds(30)));
    }

    #[test]
    fn test_refresh_result_wire_format() {
        let body = r#"{"access_token":"x.y.z","token_type":"bearer","expires_in":1700000900}"#;
        let result: RefreshResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.access_token, "x.y.z");
        assert_eq!(result.expires_in, 1_700_000_900);
        assert_eq!(result.token_type, "bearer");
    }
}
