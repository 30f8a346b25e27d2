//! # digital-eval-core
//!
//! Core types for the digital-eval session client.
//!
//! This crate has no I/O. It provides:
//!
//! - **Roles**: the five portal roles and the route-guard access check
//! - **Users**: user records and login payloads
//! - **Tokens**: the refresh response and access token claims
//! - **API types**: request and response bodies of the role endpoints
//!
//! ## Example
//!
//! ```rust
//! use digital_eval_core::{authorize, Access, CurrentUser, Role};
//!
//! let user = CurrentUser {
//!     id: Some(1),
//!     user_id: "evaluator_1".into(),
//!     name: None,
//!     email: None,
//!     role: Role::Evaluator,
//! };
//!
//! assert_eq!(authorize(Some(&user), &[Role::Evaluator]), Access::Granted);
//! assert_eq!(authorize(None, &[Role::Evaluator]), Access::Unauthenticated);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod errors;
pub mod role;
pub mod token;
pub mod user;

// Re-exports for convenience
pub use errors::{CoreError, Result};
pub use role::{authorize, Access, Role};
pub use token::{AccessClaims, RefreshResult};
pub use user::{CurrentUser, LoginRequest, LoginResponse, User};
