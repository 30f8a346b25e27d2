use crate::client::SessionClient;
use crate::error::{ClientError, ClientResult};
use crate::request::RequestSpec;
use bytes::Bytes;
use digital_eval_core::api::StudentResultResponse;
use reqwest::header::CONTENT_TYPE;

/// Student endpoints.
#[derive(Debug, Clone, Copy)]
pub struct StudentApi<'a> {
    client: &'a SessionClient,
}

impl<'a> StudentApi<'a> {
    pub(crate) fn new(client: &'a SessionClient) -> Self {
        Self { client }
    }

    /// Released results of one semester, with the SGPA.
    pub async fn results(
        &self,
        usn: &str,
        semester: &str,
        academic_year: &str,
    ) -> ClientResult<StudentResultResponse> {
        self.client
            .request_json(&result_query("student/results", usn, semester, academic_year))
            .await
    }

    /// Download the result sheet as a PDF.
    ///
    /// The backend reports some failures as a JSON body with a success
    /// status; those come back as [`ClientError::UnexpectedResponse`].
    pub async fn download_pdf(&self, usn: &str, semester: &str, academic_year: &str) -> ClientResult<Bytes> {
        let spec = result_query("student/download", usn, semester, academic_year);
        let response = self.client.request(&spec).await?;

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        if is_json {
            let body = response.text().await?;
            return Err(ClientError::UnexpectedResponse(format!(
                "expected a PDF, got JSON: {body}"
            )));
        }

        Ok(response.bytes().await?)
    }
}

fn result_query(path: &str, usn: &str, semester: &str, academic_year: &str) -> RequestSpec {
    RequestSpec::get(path)
        .query("usn", usn)
        .query("semester", semester)
        .query("academic_year", academic_year)
}
