//! Runtime configuration for the extraction session

use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::RectDimension;

/// Environment variable overriding the service endpoint
pub const ENDPOINT_ENV: &str = "CROPTEXT_ENDPOINT";

const DEFAULT_VIEWPORT: RectDimension = RectDimension {
    width: NonZeroU32::new(800).unwrap(),
    height: NonZeroU32::new(600).unwrap(),
};

/// Bounds the image is fitted into for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT.width(),
            height: DEFAULT_VIEWPORT.height(),
        }
    }
}

impl Viewport {
    /// Viewport as non-zero dimensions, `None` if degenerate
    pub fn dimensions(self) -> Option<RectDimension> {
        RectDimension::new(self.width, self.height)
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the extraction/formatting service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Display area the uploaded image is fitted into
    #[serde(default)]
    pub viewport: Viewport,
    /// Client-side timeout for a single service request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            viewport: Viewport::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Defaults with the endpoint taken from the environment when set
    pub fn load() -> Self {
        let mut config = Self::default();
        match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => {
                log::info!("Using extraction endpoint from {ENDPOINT_ENV}: {endpoint}");
                config.endpoint = endpoint.trim().to_string();
            }
            Ok(_) => log::warn!("{ENDPOINT_ENV} is set but empty, using default endpoint"),
            Err(_) => {}
        }
        config
    }

    /// Read a JSON configuration file
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config.validated())
    }

    /// Like [`Config::from_json_file`], falling back to [`Config::load`]
    pub fn from_json_file_or_default(path: &Path) -> Self {
        match Self::from_json_file(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {err:#}");
                Self::load()
            }
        }
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Viewport dimensions, falling back to the default on zero sizes
    pub fn viewport_dimensions(&self) -> RectDimension {
        self.viewport.dimensions().unwrap_or(DEFAULT_VIEWPORT)
    }

    fn validated(mut self) -> Self {
        if self.viewport.dimensions().is_none() {
            log::warn!(
                "Ignoring degenerate viewport {}x{}",
                self.viewport.width,
                self.viewport.height
            );
            self.viewport = Viewport::default();
        }
        if self.request_timeout_secs == 0 {
            log::warn!("Ignoring zero request timeout");
            self.request_timeout_secs = default_request_timeout_secs();
        }
        self
    }
}
