//! The authenticated session client.
//!
//! Every call goes through [`SessionClient::request`], which runs a small
//! state machine per call:
//!
//! ```text
//! SENT -> (ok) DONE
//!      -> (non-401 error) FAILED
//!      -> (401, refresh endpoint itself) AUTH_EXPIRED
//!      -> (401, already retried) AUTH_EXPIRED
//!      -> (401, first time) REFRESHING
//! REFRESHING -> (refresh ok) SENT again with the new token
//!            -> (refresh fails) AUTH_EXPIRED
//! ```
//!
//! The `retried` flag is local to the call. Refreshes are single-flight per
//! session: concurrent callers that hit 401 await the same refresh.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, RefreshError};
use crate::listener::{NoopListener, SessionEndReason, SessionEnded, SessionListener};
use crate::request::{RequestBody, RequestSpec};
use crate::session::{RefreshOutcome, Session};
use crate::singleflight::FlightRole;
use crate::store::TokenStore;
use bytes::Bytes;
use digital_eval_core::RefreshResult;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, info, warn};
use url::Url;

/// HTTP client that attaches the session's bearer token and renews it once
/// per call on 401.
///
/// Cheap to clone; clones share the session and connection pool.
#[derive(Clone)]
pub struct SessionClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: Client,
    config: ClientConfig,
    session: Arc<Session>,
    listener: Arc<dyn SessionListener>,
}

impl fmt::Debug for SessionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClient")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("session", &self.inner.session)
            .finish()
    }
}

impl SessionClient {
    /// Create a client with an empty in-memory session and no listener.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        SessionClientBuilder::new(config).build()
    }

    /// Start building a client.
    pub fn builder(config: ClientConfig) -> SessionClientBuilder {
        SessionClientBuilder::new(config)
    }

    /// Client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// The session this client reads and updates.
    pub fn session(&self) -> &Arc<Session> {
        &self.inner.session
    }

    /// Underlying HTTP client.
    pub fn http(&self) -> &Client {
        &self.inner.http
    }

    /// Send a request, refreshing the access token once on 401.
    ///
    /// Returns the response of the last send if it succeeded. Non-401 error
    /// responses come back as [`ClientError::Transport`] and connection
    /// failures as [`ClientError::Network`], untouched.
    pub async fn request(&self, spec: &RequestSpec) -> ClientResult<Response> {
        let url = self.inner.config.endpoint(&spec.path)?;
        let is_refresh_call = self.inner.config.is_refresh_url(&url);
        let mut retried = false;

        loop {
            let snapshot = self.inner.session.snapshot();
            let response = self.send(spec, &url, snapshot.token.as_deref()).await?;

            if response.status() != StatusCode::UNAUTHORIZED || !spec.refreshable {
                return check_response(response).await;
            }

            if is_refresh_call {
                warn!(url = %url, "Refresh endpoint returned 401");
                self.end_session(SessionEndReason::RefreshUnauthorized, &spec.path);
                return Err(ClientError::AuthExpired);
            }

            if retried {
                warn!(url = %url, "Still unauthorized after token refresh");
                self.end_session(SessionEndReason::UnauthorizedAfterRetry, &spec.path);
                return Err(ClientError::AuthExpired);
            }

            retried = true;
            debug!(url = %url, "Access token rejected, refreshing");
            self.renew(snapshot.generation, &spec.path).await?;
        }
    }

    /// Send a request and decode its JSON body.
    pub async fn request_json<T: DeserializeOwned>(&self, spec: &RequestSpec) -> ClientResult<T> {
        let bytes = self.request_bytes(spec).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request and return its raw body.
    pub async fn request_bytes(&self, spec: &RequestSpec) -> ClientResult<Bytes> {
        let response = self.request(spec).await?;
        Ok(response.bytes().await?)
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request_json(&RequestSpec::get(path)).await
    }

    /// POST `body` as JSON to `path` and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request_json(&RequestSpec::post(path).json(body)?).await
    }

    /// Refresh the access token now.
    ///
    /// Joins a refresh that is already in flight. On failure the session is
    /// cleared, the listener notified, and [`ClientError::AuthExpired`]
    /// returned.
    pub async fn refresh(&self) -> ClientResult<RefreshResult> {
        self.run_refresh(RefreshTrigger::Explicit)
            .await
            .map_err(|_| ClientError::AuthExpired)
    }

    /// Make sure the token that produced a 401 is no longer current.
    async fn renew(&self, seen_generation: u64, path: &str) -> ClientResult<()> {
        let current = self.inner.session.snapshot();
        if current.generation != seen_generation {
            // someone else already replaced or dropped the token
            return match current.token {
                Some(_) => {
                    debug!(path, "Token replaced by a concurrent refresh, retrying");
                    Ok(())
                }
                None => Err(ClientError::AuthExpired),
            };
        }

        self.run_refresh(RefreshTrigger::Request(path.to_string()))
            .await
            .map(|_| ())
            .map_err(|_| ClientError::AuthExpired)
    }

    /// Lead or join the session's refresh. Only the leader's trigger decides
    /// how a failure is reported.
    pub(crate) async fn run_refresh(&self, trigger: RefreshTrigger) -> RefreshOutcome {
        let http = self.inner.http.clone();
        let url = self.inner.config.refresh_url();
        let session = Arc::downgrade(&self.inner.session);
        let listener = self.inner.listener.clone();

        let (outcome, role) = self
            .inner
            .session
            .refresh_flight()
            .run(move || shared_refresh(http, url, session, listener, trigger))
            .await;

        if role == FlightRole::Follower {
            debug!(ok = outcome.is_ok(), "Joined in-flight token refresh");
        }
        outcome
    }

    fn end_session(&self, reason: SessionEndReason, path: &str) {
        self.inner.session.clear();
        self.inner
            .listener
            .on_session_ended(&SessionEnded::new(reason).with_request(path));
    }

    async fn send(
        &self,
        spec: &RequestSpec,
        url: &Url,
        token: Option<&str>,
    ) -> ClientResult<Response> {
        let mut headers = spec.headers.clone();
        headers.remove(AUTHORIZATION);

        let mut builder = self
            .inner
            .http
            .request(spec.method.clone(), url.clone())
            .headers(headers);
        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder = match &spec.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Form(pairs) => builder.form(pairs),
            RequestBody::Multipart { fields, files } => {
                builder.multipart(RequestSpec::multipart_form(fields, files)?)
            }
        };

        debug!(
            method = %spec.method,
            url = %url,
            authenticated = token.is_some(),
            "Making HTTP request"
        );

        Ok(builder.send().await?)
    }
}

/// What started a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RefreshTrigger {
    /// A request to this path got 401.
    Request(String),
    /// [`SessionClient::refresh`] was called.
    Explicit,
    /// [`SessionClient::restore`] found no usable token. A refused refresh
    /// here just means nobody is signed in.
    Restore,
}

/// The shared refresh operation. Updates or clears the session and notifies
/// the listener itself, so this happens once no matter how many callers wait.
async fn shared_refresh(
    http: Client,
    url: Result<Url, url::ParseError>,
    session: Weak<Session>,
    listener: Arc<dyn SessionListener>,
    trigger: RefreshTrigger,
) -> RefreshOutcome {
    let outcome = match url {
        Ok(url) => match send_refresh(&http, url).await {
            Ok(response) => read_refresh(response).await,
            Err(err) => Err(RefreshError::Network(err.to_string())),
        },
        Err(err) => Err(RefreshError::Network(format!("invalid refresh URL: {err}"))),
    };

    let Some(session) = session.upgrade() else {
        return outcome;
    };

    match &outcome {
        Ok(result) => {
            session.set_access_token(result.access_token.clone());
            info!(token_type = %result.token_type, "Access token refreshed");
        }
        Err(err) => {
            session.clear();
            let event = SessionEnded::new(SessionEndReason::RefreshFailed(err.clone()));
            match trigger {
                RefreshTrigger::Restore => {
                    debug!(error = %err, "No session to restore");
                }
                RefreshTrigger::Explicit => {
                    warn!(error = %err, "Token refresh failed, ending session");
                    listener.on_session_ended(&event);
                }
                RefreshTrigger::Request(path) => {
                    warn!(error = %err, path = %path, "Token refresh failed, ending session");
                    listener.on_session_ended(&event.with_request(path));
                }
            }
        }
    }

    outcome
}

/// POST to the refresh endpoint with no body. The refresh credential travels
/// in the cookie jar.
async fn send_refresh(http: &Client, url: Url) -> Result<Response, reqwest::Error> {
    debug!(url = %url, "Requesting token refresh");
    http.post(url).send().await
}

/// Interpret a refresh response.
async fn read_refresh(response: Response) -> RefreshOutcome {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RefreshError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| RefreshError::Network(e.to_string()))?;
    let result: RefreshResult =
        serde_json::from_slice(&bytes).map_err(|e| RefreshError::Decode(e.to_string()))?;
    if result.access_token.is_empty() {
        return Err(RefreshError::Decode("empty access_token".to_string()));
    }
    Ok(result)
}

/// Pass successful responses through; turn error statuses into
/// [`ClientError::Transport`].
async fn check_response(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::transport(status.as_u16(), body))
}

/// Builder for [`SessionClient`].
pub struct SessionClientBuilder {
    config: ClientConfig,
    http: Option<Client>,
    session: Option<Arc<Session>>,
    listener: Option<Arc<dyn SessionListener>>,
}

impl fmt::Debug for SessionClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClientBuilder")
            .field("config", &self.config)
            .field("custom_http", &self.http.is_some())
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl SessionClientBuilder {
    /// Create a builder.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: None,
            session: None,
            listener: None,
        }
    }

    /// Use a custom reqwest client.
    ///
    /// It must keep cookies (`cookie_store(true)`) for refreshes to carry the
    /// refresh credential.
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Share an existing session.
    #[must_use]
    pub fn session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    /// Keep the token in `store`.
    #[must_use]
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.session = Some(Arc::new(Session::new(store)));
        self
    }

    /// Notify `listener` when the session ends.
    #[must_use]
    pub fn listener(mut self, listener: impl SessionListener + 'static) -> Self {
        self.listener = Some(Arc::new(listener));
        self
    }

    /// Build the client.
    pub fn build(self) -> ClientResult<SessionClient> {
        let http = match self.http {
            Some(client) => client,
            None => {
                let mut builder = Client::builder()
                    .cookie_store(true)
                    .user_agent(self.config.user_agent.clone());
                if let Some(timeout) = self.config.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(timeout) = self.config.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))?
            }
        };

        Ok(SessionClient {
            inner: Arc::new(Inner {
                http,
                config: self.config,
                session: self.session.unwrap_or_default(),
                listener: self.listener.unwrap_or_else(|| Arc::new(NoopListener)),
            }),
        })
    }
}
