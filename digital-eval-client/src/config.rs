//! Client configuration.

use crate::error::{ClientError, ClientResult};
use std::time::Duration;
use url::Url;

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "DIGITAL_EVAL_BASE_URL";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "DIGITAL_EVAL_TIMEOUT_SECS";

/// Configuration for a [`SessionClient`](crate::SessionClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is resolved against. Always ends in `/`.
    pub base_url: Url,
    /// Path of the token refresh endpoint.
    pub refresh_path: String,
    /// Path of the login endpoint.
    pub login_path: String,
    /// Path of the logout endpoint.
    pub logout_path: String,
    /// Path of the current-user endpoint.
    pub me_path: String,
    /// Total request timeout.
    pub timeout: Option<Duration>,
    /// Connect timeout.
    pub connect_timeout: Option<Duration>,
    /// User-Agent header.
    pub user_agent: String,
    /// Stored tokens this close to expiry are refreshed on restore.
    pub expiry_leeway: Duration,
}

impl ClientConfig {
    /// Default base URL of the backend API.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8443/api/v1/";

    /// Create a config for the given base URL.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self::with_base(base_url))
    }

    /// Create from `DIGITAL_EVAL_BASE_URL` and `DIGITAL_EVAL_TIMEOUT_SECS`.
    ///
    /// Missing variables fall back to the defaults.
    pub fn from_env() -> ClientResult<Self> {
        let base = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| Self::DEFAULT_BASE_URL.into());
        let mut config = Self::new(&base)?;

        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("{TIMEOUT_ENV} must be a number of seconds, got {raw:?}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    fn with_base(base_url: Url) -> Self {
        Self {
            base_url: with_trailing_slash(base_url),
            refresh_path: "auth/refresh".to_string(),
            login_path: "auth/login".to_string(),
            logout_path: "auth/logout".to_string(),
            me_path: "auth/me".to_string(),
            timeout: Some(Duration::from_secs(30)),
            connect_timeout: Some(Duration::from_secs(10)),
            user_agent: concat!("digital-eval-client/", env!("CARGO_PKG_VERSION")).to_string(),
            expiry_leeway: Duration::from_secs(30),
        }
    }

    /// Set the base URL.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = with_trailing_slash(url);
        self
    }

    /// Set the refresh endpoint path.
    #[must_use]
    pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    /// Set the login endpoint path.
    #[must_use]
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Set the logout endpoint path.
    #[must_use]
    pub fn logout_path(mut self, path: impl Into<String>) -> Self {
        self.logout_path = path.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the request timeout.
    #[must_use]
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header.
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the expiry leeway used when restoring a stored token.
    #[must_use]
    pub fn expiry_leeway(mut self, leeway: Duration) -> Self {
        self.expiry_leeway = leeway;
        self
    }

    /// Resolve a request path against the base URL.
    ///
    /// Leading slashes are ignored so `"/auth/me"` and `"auth/me"` both land
    /// under the base path.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path.trim_start_matches('/'))
    }

    /// URL of the refresh endpoint.
    pub fn refresh_url(&self) -> Result<Url, url::ParseError> {
        self.endpoint(&self.refresh_path)
    }

    /// Whether `url` addresses the refresh endpoint.
    pub fn is_refresh_url(&self, url: &Url) -> bool {
        match self.refresh_url() {
            Ok(refresh) => {
                refresh.origin() == url.origin()
                    && refresh.path().trim_end_matches('/') == url.path().trim_end_matches('/')
            }
            Err(_) => false,
        }
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl Default for ClientConfig {
    fn default() -> Self {
        let base = Url::parse(Self::DEFAULT_BASE_URL).expect("default base URL is valid");
        Self::with_base(base)
    }
}
