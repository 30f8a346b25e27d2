//! Authority approval and release types.

use serde::{Deserialize, Serialize};

/// An evaluation request awaiting or past a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRow {
    pub id: i64,
    pub evaluator_id: String,
    pub course_id: String,
    pub semester: String,
    pub academic_year: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovePayload {
    /// Number of scripts to assign to the evaluator.
    pub assign_num: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproveResponse {
    pub assigned: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectResponse {
    pub status: String,
}

/// Body of `POST /authority/results/release`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleasePayload {
    pub semester: String,
    pub academic_year: String,
    pub released_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseResponse {
    pub block_hash: String,
}
