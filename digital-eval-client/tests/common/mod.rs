//! Shared fixtures for the client integration tests.

#![allow(dead_code)]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use digital_eval_client::{
    ClientConfig, MemoryTokenStore, SessionClient, SessionEnded, SessionListener,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;

/// Collects session-ended notifications.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<SessionEnded>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<SessionEnded> {
        self.events.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }
}

impl SessionListener for Recorder {
    fn on_session_ended(&self, event: &SessionEnded) {
        self.events.lock().push(event.clone());
    }
}

/// Config pointing at the mock server's `/api/v1/`.
pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(&format!("{}/api/v1/", server.uri()))
        .unwrap()
        .timeout(Duration::from_secs(5))
}

/// Client with an optional seeded token and a recording listener.
pub fn client_for(server: &MockServer, token: Option<&str>) -> (SessionClient, Recorder) {
    let store = match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    };
    let recorder = Recorder::default();
    let client = SessionClient::builder(config_for(server))
        .token_store(Arc::new(store))
        .listener(recorder.clone())
        .build()
        .unwrap();
    (client, recorder)
}

/// An unsigned compact JWT carrying `claims`.
pub fn jwt(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

/// Token for `user_id` that expires `expires_in_secs` from now.
pub fn token_for(user_id: &str, role: &str, expires_in_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    jwt(json!({
        "uid": 7,
        "user_id": user_id,
        "email": format!("{user_id}@college.edu"),
        "role": role,
        "name": "Test User",
        "iss": "digital-eval",
        "iat": now,
        "exp": now + expires_in_secs,
    }))
}

/// Body of a successful refresh.
pub fn refresh_body(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "expires_in": chrono::Utc::now().timestamp() + 900,
        "token_type": "bearer",
    })
}

/// A user record as the backend sends it.
pub fn user_body(user_id: &str, role: &str) -> Value {
    json!({
        "id": 7,
        "user_id": user_id,
        "email": format!("{user_id}@college.edu"),
        "role": role,
        "name": "Test User",
        "created_at": "2025-01-10T09:00:00Z",
        "updated_at": "2025-01-10T09:00:00Z",
    })
}
