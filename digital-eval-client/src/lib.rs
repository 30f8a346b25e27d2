//! # digital-eval-client
//!
//! Authenticated HTTP session client for the digital-eval API.
//!
//! Requests carry the current access token as a bearer header. When the
//! server answers 401 the client refreshes the token once, using the
//! refresh cookie set at login, and re-sends the request. If that does not
//! work the session is cleared and the host is told through a
//! [`SessionListener`].
//!
//! ## Core Concepts
//!
//! - **[`SessionClient`]**: sends requests and runs the refresh-and-retry path
//! - **[`Session`]**: the access token, a change counter and the refresh slot
//! - **[`TokenStore`]**: where the token lives ([`MemoryTokenStore`] by default)
//! - **[`SessionListener`]**: host hook called when the session ends
//! - **[`RequestSpec`]**: a re-sendable description of one call
//!
//! Concurrent requests that hit 401 together share a single refresh.
//!
//! ## Example
//!
//! ```rust,no_run
//! use digital_eval_client::{ClientConfig, SessionClient, SessionEnded};
//!
//! # async fn demo() -> digital_eval_client::ClientResult<()> {
//! let client = SessionClient::builder(ClientConfig::from_env()?)
//!     .listener(|event: &SessionEnded| eprintln!("signed out: {}", event.reason))
//!     .build()?;
//!
//! client.login("authority_1", "secret").await?;
//! let pending = client.authority().pending_requests().await?;
//! println!("{} pending requests", pending.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod listener;
pub mod request;
pub mod session;
pub mod singleflight;
pub mod store;

// Re-exports
pub use client::{SessionClient, SessionClientBuilder};
pub use config::{ClientConfig, BASE_URL_ENV, TIMEOUT_ENV};
pub use endpoints::{AdminApi, AuthorityApi, EvaluatorApi, ExaminerApi, StudentApi};
pub use error::{ClientError, ClientResult, RefreshError};
pub use listener::{NoopListener, SessionEndReason, SessionEnded, SessionListener};
pub use request::{FilePart, RequestBody, RequestSpec};
pub use session::{Session, TokenSnapshot};
pub use singleflight::{FlightRole, SingleFlight};
pub use store::{MemoryTokenStore, TokenStore};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        ClientConfig, ClientError, ClientResult, RequestSpec, SessionClient, SessionEnded,
        SessionListener, TokenStore,
    };
}
