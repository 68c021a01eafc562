//! Text extraction via the remote recognition service

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::capture::crop::EncodedImage;
use crate::config::Config;
use crate::error::{Error, Result};

/// Anything that turns a cropped bitmap into text
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Recognize the text in `image`
    async fn extract_text(&self, image: &EncodedImage) -> Result<String>;
}

/// Progress of the current extraction, for the presentation layer
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OcrStatus {
    #[default]
    Idle,
    Running,
    Done(String),
    Error(String),
}

#[derive(Debug, Serialize)]
struct ExtractRequest<'a> {
    image: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    status: String,
}

/// HTTP client for the extraction and table formatting endpoints
#[derive(Clone, Debug)]
pub struct ApiClient {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(client_build_error)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.endpoint, config.request_timeout())
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Check if the service answers its health check
    pub async fn is_available(&self) -> bool {
        let response = match self.client.get(self.url("/health")).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                log::warn!("Health check returned {}", response.status());
                return false;
            }
            Err(e) => {
                log::warn!("Health check failed: {e}");
                return false;
            }
        };
        matches!(
            response.json::<HealthResponse>().await,
            Ok(health) if health.status == "healthy"
        )
    }
}

/// Building the client fails locally (TLS backend, resolver), never remotely
fn client_build_error(err: impl std::fmt::Display) -> Error {
    Error::Io(std::io::Error::other(format!("failed to build HTTP client: {err}")))
}

#[async_trait]
impl TextExtractor for ApiClient {
    async fn extract_text(&self, image: &EncodedImage) -> Result<String> {
        let url = self.url("/api/extract-text");
        log::info!(
            "Sending {}x{} crop ({} bytes) to {url}",
            image.width,
            image.height,
            image.png.len()
        );

        let data_uri = image.to_data_uri();
        let response = self
            .client
            .post(&url)
            .json(&ExtractRequest { image: &data_uri })
            .send()
            .await
            .map_err(|e| Error::ExtractionFailure(format!("request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ExtractionFailure(format!("HTTP error! status: {status}")));
        }

        let body: ExtractResponse = response
            .json()
            .await
            .map_err(|e| Error::ExtractionFailure(format!("failed to parse response: {e}")))?;

        if !body.success {
            return Err(Error::ExtractionFailure(
                body.error
                    .unwrap_or_else(|| "Failed to extract text".to_string()),
            ));
        }

        let text = body.text.unwrap_or_default();
        log::info!("Extracted {} characters", text.len());
        Ok(text)
    }
}
