use crate::client::SessionClient;
use crate::error::ClientResult;
use crate::request::RequestSpec;
use digital_eval_core::api::{
    ApprovePayload, ApproveResponse, RejectResponse, ReleasePayload, ReleaseResponse, RequestRow,
};
use tracing::info;

/// Authority endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthorityApi<'a> {
    client: &'a SessionClient,
}

impl<'a> AuthorityApi<'a> {
    pub(crate) fn new(client: &'a SessionClient) -> Self {
        Self { client }
    }

    /// Evaluation requests awaiting a decision.
    pub async fn pending_requests(&self) -> ClientResult<Vec<RequestRow>> {
        self.client.get_json("authority/requests/pending").await
    }

    /// Requests that were approved or rejected.
    pub async fn request_history(&self) -> ClientResult<Vec<RequestRow>> {
        self.client.get_json("authority/requests/history").await
    }

    /// Approve a request and assign up to `assign_num` scripts.
    ///
    /// Returns how many scripts were actually assigned.
    pub async fn approve(&self, request_id: i64, assign_num: u32) -> ClientResult<u32> {
        let path = format!("authority/requests/{request_id}/approve");
        let response: ApproveResponse = self
            .client
            .post_json(&path, &ApprovePayload { assign_num })
            .await?;
        info!(request_id, assigned = response.assigned, "Request approved");
        Ok(response.assigned)
    }

    /// Reject a request.
    pub async fn reject(&self, request_id: i64) -> ClientResult<RejectResponse> {
        let spec = RequestSpec::post(format!("authority/requests/{request_id}/reject"));
        self.client.request_json(&spec).await
    }

    /// Publish the results of a semester.
    pub async fn release_results(&self, payload: &ReleasePayload) -> ClientResult<ReleaseResponse> {
        let response: ReleaseResponse = self
            .client
            .post_json("authority/results/release", payload)
            .await?;
        info!(
            semester = %payload.semester,
            academic_year = %payload.academic_year,
            block_hash = %response.block_hash,
            "Results released"
        );
        Ok(response)
    }
}
