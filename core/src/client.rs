use std::time::Duration;

use anyhow::Context;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::RagflowConfig;
use crate::error::{Result, ServiceError};

const DEFAULT_UPSTREAM_MESSAGE: &str = "RAGFlow request failed";

/// HTTP transport for the RAGFlow backend.
///
/// One request per call, bounded by the configured timeout. No retries.
#[derive(Clone)]
pub struct RagflowClient {
    client: Client,
    config: RagflowConfig,
}

impl std::fmt::Debug for RagflowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagflowClient")
            .field("config", &self.config)
            .finish()
    }
}

impl RagflowClient {
    pub fn new(config: RagflowConfig) -> Result<Self> {
        let mut builder = Client::builder();
        // Zero disables the timeout.
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &RagflowConfig {
        &self.config
    }

    /// POST an arbitrary JSON body to the query endpoint and return the reply untouched.
    pub async fn run_query(&self, payload: &Value) -> Result<Value> {
        let url = self.endpoint(&self.config.query_path, "RAGFLOW_QUERY_PATH", 500)?;
        debug!(%url, "POST RAGFlow query");
        let request = self.authorize(self.client.post(url)).json(payload);
        self.send(request).await
    }

    /// GET the datasets endpoint. Unconfigured datasets path is a 501.
    pub async fn list_datasets(&self) -> Result<Value> {
        let url = self.endpoint(&self.config.datasets_path, "RAGFLOW_DATASETS_PATH", 501)?;
        debug!(%url, "GET RAGFlow datasets");
        let request = self.authorize(self.client.get(url));
        self.send(request).await
    }

    fn endpoint(&self, path: &str, path_var: &str, missing_status: u16) -> Result<Url> {
        if self.config.base_url.is_empty() {
            return Err(ServiceError::not_configured(500, "RAGFLOW_BASE_URL is not configured."));
        }
        if path.is_empty() {
            return Err(ServiceError::not_configured(
                missing_status,
                format!("{path_var} is not configured."),
            ));
        }

        Url::parse(&self.config.base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| ServiceError::not_configured(500, format!("Invalid RAGFlow URL: {e}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(CONTENT_TYPE, "application/json");
        if self.config.api_key.is_empty() {
            request
        } else {
            request.bearer_auth(&self.config.api_key)
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        if status.is_success() {
            return Ok(parse_body(body));
        }

        let message = extract_error_message(&body)
            .or_else(|| status.canonical_reason().map(String::from))
            .unwrap_or_else(|| DEFAULT_UPSTREAM_MESSAGE.to_string());
        warn!(status = status.as_u16(), %message, "RAGFlow returned an error");

        Err(ServiceError::Upstream {
            status: status.as_u16(),
            message,
        })
    }
}

fn map_transport_error(err: reqwest::Error) -> ServiceError {
    if err.is_builder() {
        return ServiceError::Unexpected(anyhow::Error::new(err).context("Invalid RAGFlow request"));
    }
    warn!(error = %err, timeout = err.is_timeout(), "no response from RAGFlow");
    ServiceError::Unreachable
}

// Non-JSON success bodies are passed on as a JSON string.
fn parse_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(String::from)
}
