//! Examiner upload types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of uploading an answer script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptUploadResponse {
    pub script_id: String,
    pub block_hash: String,
    pub pdf_cid: String,
    pub pdf_path: String,
    /// Metadata extracted from the script cover page (`USN`, `CourseID`, ...).
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ScriptUploadResponse {
    /// Student USN read from the cover page.
    pub fn usn(&self) -> Option<&str> {
        self.metadata.get("USN").map(String::as_str)
    }

    /// Course id read from the cover page.
    pub fn course_id(&self) -> Option<&str> {
        self.metadata.get("CourseID").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_accessors() {
        let body = r#"{
            "script_id": "scr-1",
            "block_hash": "00ab",
            "pdf_cid": "bafy",
            "pdf_path": "/data/uploads/scr-1.pdf",
            "metadata": {"USN": "4BD23AI104", "CourseID": "21AI54"}
        }"#;
        let resp: ScriptUploadResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.usn(), Some("4BD23AI104"));
        assert_eq!(resp.course_id(), Some("21AI54"));
    }
}
