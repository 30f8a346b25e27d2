use super::segment;
use crate::client::SessionClient;
use crate::error::ClientResult;
use crate::request::{FilePart, RequestSpec};
use bytes::Bytes;
use digital_eval_core::api::{
    AssignedScript, EvaluatedScriptUpload, EvaluationRequest, EvaluationRequestCreate,
    EvaluationSubmit, RequestCreated, ScriptMetadata, SubmitResponse,
};

/// Evaluator endpoints.
#[derive(Debug, Clone, Copy)]
pub struct EvaluatorApi<'a> {
    client: &'a SessionClient,
}

impl<'a> EvaluatorApi<'a> {
    pub(crate) fn new(client: &'a SessionClient) -> Self {
        Self { client }
    }

    /// Ask the authority for scripts of a course.
    pub async fn create_request(&self, request: &EvaluationRequestCreate) -> ClientResult<RequestCreated> {
        self.client.post_json("evaluator/requests", request).await
    }

    /// Requests made by an evaluator, newest first.
    pub async fn request_history(&self, evaluator_id: &str) -> ClientResult<Vec<EvaluationRequest>> {
        let spec = RequestSpec::get("evaluator/requests/history").query("evaluator_id", evaluator_id);
        self.client.request_json(&spec).await
    }

    /// Scripts assigned to an evaluator and not yet evaluated.
    pub async fn assigned_scripts(&self, evaluator_id: &str) -> ClientResult<Vec<AssignedScript>> {
        let spec = RequestSpec::get("evaluator/assigned").query("evaluator_id", evaluator_id);
        self.client.request_json(&spec).await
    }

    /// Metadata recorded for a script at upload.
    pub async fn script_metadata(&self, script_id: &str) -> ClientResult<ScriptMetadata> {
        let path = format!("evaluator/script/{}", segment(script_id));
        self.client.get_json(&path).await
    }

    /// Submit marks for a script.
    pub async fn submit(&self, evaluation: &EvaluationSubmit) -> ClientResult<SubmitResponse> {
        self.client.post_json("evaluator/submit", evaluation).await
    }

    /// Upload an annotated script PDF.
    pub async fn upload_evaluated_script(
        &self,
        file_name: impl Into<String>,
        pdf: impl Into<Bytes>,
    ) -> ClientResult<EvaluatedScriptUpload> {
        let spec = RequestSpec::post("evaluator/upload").file(FilePart::pdf("file", file_name, pdf));
        self.client.request_json(&spec).await
    }
}
