//! Typed wrappers for the role endpoints.
//!
//! Each wrapper borrows the [`SessionClient`], so every call goes through the
//! same refresh-and-retry path as a raw [`SessionClient::request`].
//!
//! ```rust,no_run
//! # async fn demo(client: digital_eval_client::SessionClient) -> digital_eval_client::ClientResult<()> {
//! let pending = client.authority().pending_requests().await?;
//! for row in pending {
//!     client.authority().approve(row.id, 5).await?;
//! }
//! # Ok(())
//! # }
//! ```

mod admin;
mod authority;
mod evaluator;
mod examiner;
mod student;

pub use admin::AdminApi;
pub use authority::AuthorityApi;
pub use evaluator::EvaluatorApi;
pub use examiner::ExaminerApi;
pub use student::StudentApi;

use crate::client::SessionClient;
use std::borrow::Cow;

impl SessionClient {
    /// Examiner endpoints.
    pub fn examiner(&self) -> ExaminerApi<'_> {
        ExaminerApi::new(self)
    }

    /// Evaluator endpoints.
    pub fn evaluator(&self) -> EvaluatorApi<'_> {
        EvaluatorApi::new(self)
    }

    /// Authority endpoints.
    pub fn authority(&self) -> AuthorityApi<'_> {
        AuthorityApi::new(self)
    }

    /// Student endpoints.
    pub fn student(&self) -> StudentApi<'_> {
        StudentApi::new(self)
    }

    /// Admin endpoints.
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }
}

/// Percent-encode one path segment.
fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
