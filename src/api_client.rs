use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::log;

use crate::models_api::matches::ApiMatch;
use crate::models_api::player::ApiPlayer;
use crate::models_api::points::{CalculationRequest, CalculationRsp, PointsRecord};
use crate::models_api::scrape::ScrapeRsp;
use crate::models_api::status::HealthRsp;
use crate::models_api::teams::ApiTeam;

/// The four ways a call can go wrong: transport, a non-JSON body, a JSON
/// error envelope on a non-2xx status, or an unparsable 2xx body.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Expected application/json, got {content_type}")]
    NotJson { content_type: String },
    #[error("{message}")]
    Server { status: StatusCode, message: String },
    #[error("Could not parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Typed client for the points API.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> ApiClient {
        ApiClient {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Generic request helper. Issues `method` against `path`, sends
    /// `body` as JSON and decodes the JSON response, turning a non-2xx
    /// status into `ClientError::Server` with the server's message.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.client.request(method, &url).header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let rsp = builder.send().await?;
        let status = rsp.status();
        let text = rsp.text().await?;

        if !status.is_success() {
            let message = extract_message(&text)
                .unwrap_or_else(|| format!("Request failed: {status}"));
            log::error!("[CLIENT] {url} {status}: {message}");
            return Err(ClientError::Server { status, message });
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Kicks off a scrape pass. The scrape endpoint has a habit of
    /// answering with an HTML error page when the deployment is broken,
    /// so the content type is checked before the body is touched.
    pub async fn trigger_scrape(&self) -> Result<ScrapeRsp, ClientError> {
        let url = format!("{}/api/scrape/matches", self.base_url);
        let rsp = self.client.get(&url).send().await?;

        let content_type = rsp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|e| e.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.contains("application/json") {
            return Err(ClientError::NotJson { content_type });
        }

        let status = rsp.status();
        let text = rsp.text().await?;
        if !status.is_success() {
            let message = extract_message(&text)
                .unwrap_or_else(|| format!("Server error: {status}"));
            return Err(ClientError::Server { status, message });
        }
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn fetch_teams(&self) -> Result<Vec<ApiTeam>, ClientError> {
        self.request(Method::GET, "/api/teams", None).await
    }

    pub async fn fetch_matches(&self) -> Result<Vec<ApiMatch>, ClientError> {
        self.request(Method::GET, "/api/matches", None).await
    }

    pub async fn fetch_players(&self) -> Result<Vec<ApiPlayer>, ClientError> {
        self.request(Method::GET, "/api/players", None).await
    }

    pub async fn fetch_history(&self) -> Result<Vec<PointsRecord>, ClientError> {
        self.request(Method::GET, "/api/points/history", None).await
    }

    pub async fn calculate(&self, req: &CalculationRequest) -> Result<CalculationRsp, ClientError> {
        let body = serde_json::to_value(req)?;
        self.request(Method::POST, "/api/calculate", Some(body)).await
    }

    pub async fn fetch_health(&self) -> Result<HealthRsp, ClientError> {
        self.request(Method::GET, "/api/health", None).await
    }
}

/// Error envelopes carry either `{error}` or `{status, message}`.
fn extract_message(text: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    value
        .get("error")
        .or_else(|| value.get("message"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
}
