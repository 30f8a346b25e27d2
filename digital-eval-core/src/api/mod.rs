//! Wire types for the role-specific endpoints.
//!
//! Field names follow the backend exactly, including the PascalCase rows the
//! database layer serializes without tags.

#![allow(missing_docs)] // DTO fields are self-documenting

pub mod admin;
pub mod authority;
pub mod evaluator;
pub mod examiner;
pub mod student;

pub use admin::{ServiceAction, ServiceActionResponse, ServiceLogs};
pub use authority::{
    ApprovePayload, ApproveResponse, RejectResponse, ReleasePayload, ReleaseResponse, RequestRow,
};
pub use evaluator::{
    AssignedScript, EvaluatedScriptUpload, EvaluationRequest, EvaluationRequestCreate,
    EvaluationSubmit, RequestCreated, ScriptMetadata, SubmitResponse,
};
pub use examiner::ScriptUploadResponse;
pub use student::{EvaluationRow, NullableInt, StudentResultResponse};
