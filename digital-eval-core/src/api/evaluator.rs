//! Evaluator request, assignment and submission types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /evaluator/requests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequestCreate {
    pub evaluator_id: String,
    pub course_id: String,
    pub semester: String,
    pub academic_year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCreated {
    pub request_id: i64,
}

/// A request as seen in the evaluator's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub id: i64,
    pub course_id: String,
    pub semester: String,
    pub academic_year: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: String,
    pub created_at: String,
}

/// A script assigned to an evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedScript {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "ScriptID")]
    pub script_id: String,
    #[serde(rename = "Evaluator")]
    pub evaluator: String,
    #[serde(rename = "CourseID")]
    pub course_id: String,
    #[serde(rename = "Semester")]
    pub semester: String,
    #[serde(rename = "AcademicYear")]
    pub academic_year: String,
    #[serde(rename = "CourseCredits", default)]
    pub course_credits: i32,
    #[serde(rename = "AssignedAt")]
    pub assigned_at: String,
    #[serde(rename = "Status")]
    pub status: String,
}

/// Free-form script metadata keyed by field name.
pub type ScriptMetadata = HashMap<String, String>;

/// Body of `POST /evaluator/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSubmit {
    pub script_id: String,
    pub evaluator_id: String,
    pub total_questions: u32,
    pub marks_per_question: u32,
    pub total_marks: u32,
    pub questions_answered: u32,
    pub marks_allotted_per_question: Vec<u32>,
    pub marks_scored: Vec<u32>,
    pub course_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub semester: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub academic_year: String,
    pub course_credits: u32,
    #[serde(default)]
    pub additional_metadata: serde_json::Map<String, serde_json::Value>,
}

impl EvaluationSubmit {
    /// Sum of the marks scored across questions.
    pub fn scored_total(&self) -> u32 {
        self.marks_scored.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub block_hash: String,
}

/// Result of uploading an evaluated script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedScriptUpload {
    pub cid: String,
    pub pdf_path: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assigned_script_pascal_case() {
        let body = r#"{
            "ID": 4, "ScriptID": "scr-9", "Evaluator": "evaluator_1",
            "CourseID": "21AI54", "Semester": "5", "AcademicYear": "2024-25",
            "CourseCredits": 4, "AssignedAt": "2025-01-10T10:00:00Z", "Status": "assigned"
        }"#;
        let script: AssignedScript = serde_json::from_str(body).unwrap();
        assert_eq!(script.script_id, "scr-9");
        assert_eq!(script.course_credits, 4);
    }

    #[test]
    fn test_request_create_omits_missing_description() {
        let req = EvaluationRequestCreate {
            evaluator_id: "evaluator_1".into(),
            course_id: "21AI54".into(),
            semester: "5".into(),
            academic_year: "2024-25".into(),
            description: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_scored_total() {
        let submit = EvaluationSubmit {
            script_id: "scr-9".into(),
            evaluator_id: "evaluator_1".into(),
            total_questions: 3,
            marks_per_question: 10,
            total_marks: 30,
            questions_answered: 3,
            marks_allotted_per_question: vec![10, 10, 10],
            marks_scored: vec![7, 8, 9],
            course_id: "21AI54".into(),
            semester: String::new(),
            academic_year: String::new(),
            course_credits: 4,
            additional_metadata: Default::default(),
        };
        assert_eq!(submit.scored_total(), 24);
        let json = serde_json::to_value(&submit).unwrap();
        assert!(json.get("semester").is_none());
    }
}
