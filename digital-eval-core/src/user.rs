//! User records and login payloads.

use crate::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User record as returned by `/auth/login` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Numeric database id.
    pub id: i64,
    /// Login name, e.g. `examiner_1` or a student USN.
    pub user_id: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Role of the account.
    pub role: Role,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The signed-in user, as far as the access token tells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Numeric database id (`uid` claim).
    pub id: Option<i64>,
    /// Login name.
    pub user_id: String,
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Role of the account.
    pub role: Role,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id),
            user_id: user.user_id.clone(),
            name: Some(user.name.clone()).filter(|n| !n.is_empty()),
            email: Some(user.email.clone()).filter(|e| !e.is_empty()),
            role: user.role,
        }
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login name or email.
    pub login: String,
    /// Plaintext password.
    pub password: String,
}

impl LoginRequest {
    /// Create a login request.
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent calls.
    pub access_token: String,
    /// Token type, `bearer`.
    #[serde(default)]
    pub token_type: String,
    /// The account that signed in.
    pub user: User,
}
