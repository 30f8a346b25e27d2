//! Outbound request descriptions.
//!
//! A [`RequestSpec`] is plain data: method, path, query, headers and a body
//! kept in a form that can be turned into a fresh `reqwest` request as many
//! times as needed. The client builds one request for the first send and
//! another for the retry after a refresh.

use crate::error::{ClientError, ClientResult};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;

/// One file field of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    /// File name sent with the part.
    pub file_name: String,
    /// MIME type of the content.
    pub mime: String,
    /// File content.
    pub data: Bytes,
}

impl FilePart {
    /// Create a part with content type `application/pdf`.
    pub fn pdf(
        field: impl Into<String>,
        file_name: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            mime: "application/pdf".to_string(),
            data: data.into(),
        }
    }

    /// Set the MIME type.
    #[must_use]
    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }
}

/// Request body in a re-buildable form.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON body.
    Json(serde_json::Value),
    /// `application/x-www-form-urlencoded` body.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` body.
    Multipart {
        /// Plain text fields.
        fields: Vec<(String, String)>,
        /// File fields.
        files: Vec<FilePart>,
    },
}

/// Description of one API call.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the client's base URL.
    pub path: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Extra headers. `Authorization` is managed by the client.
    pub headers: HeaderMap,
    /// Body.
    pub body: RequestBody,
    /// Whether a 401 may trigger a refresh and retry.
    pub refreshable: bool,
}

impl RequestSpec {
    /// Create a request.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            refreshable: true,
        }
    }

    /// GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Add a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ClientResult<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Set a JSON body from a value.
    #[must_use]
    pub fn json_value(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Set a form body.
    #[must_use]
    pub fn form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(pairs);
        self
    }

    /// Add a file to a multipart body, switching the body to multipart.
    #[must_use]
    pub fn file(mut self, part: FilePart) -> Self {
        match &mut self.body {
            RequestBody::Multipart { files, .. } => files.push(part),
            _ => {
                self.body = RequestBody::Multipart {
                    fields: Vec::new(),
                    files: vec![part],
                }
            }
        }
        self
    }

    /// Never refresh on 401; report it as a transport error instead.
    #[must_use]
    pub fn without_refresh(mut self) -> Self {
        self.refreshable = false;
        self
    }

    /// Build a multipart form for this body. Called once per send because a
    /// form is consumed by the request.
    pub(crate) fn multipart_form(
        fields: &[(String, String)],
        files: &[FilePart],
    ) -> ClientResult<Form> {
        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name.clone(), value.clone());
        }
        for file in files {
            let part = Part::bytes(file.data.to_vec())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime)
                .map_err(|e| ClientError::Config(format!("invalid MIME type {:?}: {e}", file.mime)))?;
            form = form.part(file.field.clone(), part);
        }
        Ok(form)
    }
}
