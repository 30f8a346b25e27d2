use super::segment;
use crate::client::SessionClient;
use crate::error::ClientResult;
use crate::request::RequestSpec;
use digital_eval_core::api::{ServiceAction, ServiceActionResponse, ServiceLogs};
use tracing::info;

/// Admin endpoints for the backend's managed services.
#[derive(Debug, Clone, Copy)]
pub struct AdminApi<'a> {
    client: &'a SessionClient,
}

impl<'a> AdminApi<'a> {
    pub(crate) fn new(client: &'a SessionClient) -> Self {
        Self { client }
    }

    /// Run a lifecycle action on a service.
    pub async fn service_action(&self, name: &str, action: ServiceAction) -> ClientResult<ServiceActionResponse> {
        let spec = RequestSpec::post(format!("admin/services/{}/{}", segment(name), action.as_str()));
        let response: ServiceActionResponse = self.client.request_json(&spec).await?;
        info!(service = name, action = %action, status = %response.status, "Service action done");
        Ok(response)
    }

    /// Recent log lines of a service.
    pub async fn service_logs(&self, name: &str) -> ClientResult<Vec<String>> {
        let path = format!("admin/services/{}/logs", segment(name));
        let logs: ServiceLogs = self.client.get_json(&path).await?;
        Ok(logs.logs)
    }
}
