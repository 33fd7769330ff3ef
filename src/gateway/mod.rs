//! Persistence gateway: where exported buffers are stored after download.
//!
//! The orchestrator talks to a [`PersistenceGateway`]; [`HttpGateway`] is the
//! production adapter that posts the base64 payload to the backend with an
//! explicitly supplied [`Credential`].

mod credential;
#[cfg(feature = "http")]
mod http;

pub use credential::Credential;
#[cfg(feature = "http")]
pub use http::HttpGateway;

use crate::common::Result;
use crate::export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Path appended to the backend base URL for document saves.
pub const SAVE_ENDPOINT: &str = "save_generated_document";

/// Body of a save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRequest {
    /// Standard, padded base64 of the exported bytes
    pub content: String,
    pub format: ExportFormat,
    pub filename: String,
    #[serde(rename = "isBase64")]
    pub is_base64: bool,
}

impl SaveRequest {
    pub fn new(content: String, format: ExportFormat, filename: impl Into<String>) -> Self {
        Self {
            content,
            format,
            filename: filename.into(),
            is_base64: true,
        }
    }
}

/// Whatever the backend returned for a successful save.
///
/// The payload is opaque to the pipeline; callers that know the backend's
/// schema can inspect it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersistedRef(pub serde_json::Value);

impl PersistedRef {
    /// Look up a top-level field of the response.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }
}

/// Stores exported documents.
///
/// Implementations must map an authentication rejection to
/// [`crate::Error::AuthExpired`] and any other non-success answer to
/// [`crate::Error::PersistenceFailed`]. Retrying is left to the caller.
#[async_trait::async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn save_document(&self, request: SaveRequest) -> Result<PersistedRef>;
}

/// Connection settings for the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    /// Backend base URL, e.g. `https://api.example.com`
    pub base_url: String,
    /// Endpoint path under `base_url`
    pub endpoint: String,
    /// Whole-request timeout in seconds; zero disables it
    pub timeout_secs: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            endpoint: SAVE_ENDPOINT.to_string(),
            timeout_secs: 30,
        }
    }
}

impl GatewaySettings {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Full URL of the save endpoint.
    pub fn save_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
