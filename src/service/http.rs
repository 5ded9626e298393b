//! Browserless.io rendering client.
//!
//! The target page builds its form with client-side script, so a plain GET
//! returns an empty shell. The Browserless `/content` endpoint loads the URL
//! in a headless browser, waits for script execution and network idle, and
//! returns the rendered HTML as the response body.

use std::time::Duration;

use rquest::Client;
use serde_json::json;
use tracing::debug;

use crate::error::{Result, ScrapeError};

pub const DEFAULT_ENDPOINT: &str = "https://chrome.browserless.io/content";
pub const DEFAULT_TARGET_BASE: &str = "https://apps.dnr.wi.gov";

const DEFAULT_WAIT_FOR_MS: u64 = 5_000;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Explicit configuration for the rendering client.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Browserless API token; `None` when no credential is configured.
    pub token: Option<String>,
    /// Rendering endpoint URL.
    pub endpoint: String,
    /// Base URL of the DNR site, used for the detail-page template and for
    /// resolving relative document links.
    pub target_base: String,
    /// How long the headless browser waits for client-side script, in ms.
    pub wait_for_ms: u64,
    /// Upper bound on the whole rendering request.
    pub timeout: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            token: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            target_base: DEFAULT_TARGET_BASE.to_string(),
            wait_for_ms: DEFAULT_WAIT_FOR_MS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RenderConfig {
    /// Read the credential from `BROWSERLESS_API_KEY`. An unset or empty
    /// variable leaves the token as `None` rather than an empty sentinel.
    pub fn from_env() -> Self {
        let token = std::env::var("BROWSERLESS_API_KEY")
            .ok()
            .filter(|t| !t.is_empty());
        Self {
            token,
            ..Default::default()
        }
    }

    /// Configured token, or the typed missing-credential error.
    pub fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(ScrapeError::MissingToken)
    }

    /// Detail-page URL for a DSN. The identifier is interpolated as-is.
    pub fn detail_url(&self, dsn: &str) -> String {
        format!("{}/rrbotw/botw-activity-detail?dsn={}", self.target_base, dsn)
    }
}

/// HTTP client for the rendering endpoint.
pub struct RenderClient {
    client: Client,
    endpoint: String,
    token: String,
    wait_for_ms: u64,
}

impl RenderClient {
    /// Build a client from the config. Fails with `MissingToken` when no
    /// credential is set.
    pub fn new(config: &RenderConfig) -> Result<Self> {
        let token = config.token()?.to_string();
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ScrapeError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token,
            wait_for_ms: config.wait_for_ms,
        })
    }

    /// Render a page and return its HTML.
    ///
    /// Authentication is the token as a query parameter, which is the scheme
    /// the Browserless `/content` endpoint accepts.
    pub async fn render(&self, target_url: &str) -> Result<String> {
        let api_url = format!("{}?token={}", self.endpoint, self.token);
        let payload = json!({
            "url": target_url,
            "waitFor": self.wait_for_ms,
            "gotoOptions": {
                "waitUntil": "networkidle2"
            }
        });

        debug!("rendering {} via {}", target_url, self.endpoint);
        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(ScrapeError::from_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(ScrapeError::from_transport)?;

        if status != rquest::StatusCode::OK {
            return Err(ScrapeError::Status {
                code: status.as_u16(),
                body,
            });
        }

        debug!("received {} bytes of rendered HTML", body.len());
        Ok(body)
    }
}
