//! Student result types.

use serde::{Deserialize, Serialize};

/// Nullable integer as the backend's database layer serializes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NullableInt {
    #[serde(rename = "Int32")]
    pub int32: i32,
    #[serde(rename = "Valid")]
    pub valid: bool,
}

impl NullableInt {
    /// The value, if present.
    pub fn value(&self) -> Option<i32> {
        self.valid.then_some(self.int32)
    }
}

/// One evaluated course in a student's result sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRow {
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
    #[serde(rename = "TotalMarks")]
    pub total_marks: f64,
    #[serde(rename = "Result")]
    pub result: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: String,
    /// Per-question marks, passed through as sent.
    #[serde(rename = "Marks", default)]
    pub marks: serde_json::Value,
    #[serde(rename = "CourseCredits", default)]
    pub course_credits: Option<NullableInt>,
}

/// Response of `GET /student/results`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentResultResponse {
    pub usn: String,
    pub semester: String,
    pub academic_year: String,
    #[serde(default)]
    pub rows: Vec<EvaluationRow>,
    pub sgpa: f64,
}
