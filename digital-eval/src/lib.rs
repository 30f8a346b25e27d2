//! # digital-eval
//!
//! Client for the digital-eval API: sign in, call the role endpoints, and
//! let expired access tokens renew themselves.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use digital_eval::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SessionClient::new(ClientConfig::from_env()?)?;
//!     client.login("student_1", "secret").await?;
//!
//!     let user = client.current_user()?.expect("signed in");
//!     match authorize(Some(&user), &[Role::Student]) {
//!         Access::Granted => {
//!             let results = client.student().results(&user.user_id, "5", "2025-26").await?;
//!             println!("SGPA {}", results.sgpa);
//!         }
//!         other => println!("redirect to {:?}", other.redirect()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Crates
//!
//! - [`core`]: roles, users, token claims and endpoint payloads, no I/O
//! - [`client`]: the session client and its collaborators

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub use digital_eval_client as client;
pub use digital_eval_core as core;

pub use digital_eval_client::{
    ClientConfig, ClientError, ClientResult, MemoryTokenStore, RequestSpec, Session,
    SessionClient, SessionClientBuilder, SessionEndReason, SessionEnded, SessionListener,
    TokenStore,
};
pub use digital_eval_core::{authorize, Access, AccessClaims, CurrentUser, Role, User};

/// Prelude for common imports.
pub mod prelude {
    pub use digital_eval_client::prelude::*;
    pub use digital_eval_core::{authorize, Access, CurrentUser, Role};
}
