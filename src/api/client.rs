//! Raw HTTP client for the dashboard backend.
//!
//! No view awareness — just makes API calls via reqwest. HTTP status codes
//! are not treated as failures: the backend reports application errors in
//! the body (often alongside a 4xx/5xx), so the body alone decides.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{
    GenerationRequest, GenerationResponse, GenerationResult, RunResult, Workflow,
};

/// Errors from backend calls. Every variant is a transport or parse
/// failure; application errors travel inside `RunResult`/`GenerationResult`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// HTTP client for the workflow backend.
#[derive(Debug, Clone)]
pub struct HttpDashboardClient {
    http: Client,
    base_url: String,
}

impl HttpDashboardClient {
    /// Create a client for a backend root such as `http://127.0.0.1:5000`.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = Url::parse(trimmed)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http: Client::new(),
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path (which must start with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET /api/workflows`.
    pub async fn workflows(&self) -> Result<Vec<Workflow>, ApiError> {
        let url = self.url("/api/workflows");
        debug!(%url, "GET");
        let response = self.http.get(&url).send().await?;
        decode(response, "workflow list").await
    }

    /// `POST /api/run_workflow/{id}` with no body.
    pub async fn run(&self, workflow_id: &str) -> Result<RunResult, ApiError> {
        let url = self.url(&format!(
            "/api/run_workflow/{}",
            urlencoding::encode(workflow_id)
        ));
        debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .send()
            .await?;
        decode(response, "run result").await
    }

    /// `POST /api/generate_ai_content`.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult, ApiError> {
        let url = self.url("/api/generate_ai_content");
        debug!(%url, model = %request.model, "POST");
        let response = self.http.post(&url).json(request).send().await?;
        let raw: GenerationResponse = decode(response, "generation result").await?;
        GenerationResult::from_response(raw).map_err(ApiError::InvalidResponse)
    }
}

/// Decode a JSON body regardless of HTTP status.
async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| {
        ApiError::InvalidResponse(format!("failed to parse {what} (HTTP {status}): {e}"))
    })
}
