//! HTTP transport seam.
//!
//! The report client only ever POSTs JSON, so that is all the trait asks for.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ReportError, ReportResult};

/// Raw answer from the server, status and body text.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait HttpTransport {
    /// POST `body` as JSON. `bearer` becomes the Authorization header.
    async fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> ReportResult<HttpResponse>;
}

/// Production transport. Uses the browser fetch API on wasm32.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, bearer: Option<&str>, body: &Value) -> ReportResult<HttpResponse> {
        let mut request = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ReportError::Transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ReportError::Transport(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}
