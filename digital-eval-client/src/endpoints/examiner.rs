use crate::client::SessionClient;
use crate::error::ClientResult;
use crate::request::{FilePart, RequestSpec};
use bytes::Bytes;
use digital_eval_core::api::ScriptUploadResponse;
use tracing::info;

/// Examiner endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ExaminerApi<'a> {
    client: &'a SessionClient,
}

impl<'a> ExaminerApi<'a> {
    pub(crate) fn new(client: &'a SessionClient) -> Self {
        Self { client }
    }

    /// Upload a scanned answer script PDF.
    ///
    /// The backend reads the USN and course from the QR code on the first
    /// page and records the script on the ledger.
    pub async fn upload_script(
        &self,
        file_name: impl Into<String>,
        pdf: impl Into<Bytes>,
    ) -> ClientResult<ScriptUploadResponse> {
        let spec = RequestSpec::post("examiner/upload").file(FilePart::pdf("file", file_name, pdf));
        let response: ScriptUploadResponse = self.client.request_json(&spec).await?;
        info!(script_id = %response.script_id, "Answer script uploaded");
        Ok(response)
    }
}
