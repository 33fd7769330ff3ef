//! Export configuration.
//!
//! One [`ExportConfig`] drives both serializers: the PDF is laid out on
//! `geometry` with `typography`, and the DOCX takes its page setup and style
//! sizes from the same values, so the two formats agree on page size,
//! margins and heading weights.
//!
//! # Examples
//!
//! ```rust
//! use longan::config::ExportConfig;
//!
//! let config = ExportConfig::from_yaml_str("geometry:\n  margin_left: 25.0\n")?;
//! assert_eq!(config.geometry.margin_left, 25.0);
//! // unspecified keys keep their defaults
//! assert_eq!(config.geometry.page_width, 210.0);
//! # Ok::<(), longan::Error>(())
//! ```
use crate::common::{Error, Result};
use crate::gateway::GatewaySettings;
use crate::layout::{PageGeometry, Typography};
use crate::pdf::PdfOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Page size, margins and line metrics, in millimetres
    pub geometry: PageGeometry,
    /// Font sizes, in points
    pub typography: Typography,
    pub pdf: PdfOptions,
    pub gateway: GatewaySettings,
}

impl ExportConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    #[inline]
    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }

    #[inline]
    pub fn with_pdf(mut self, pdf: PdfOptions) -> Self {
        self.pdf = pdf;
        self
    }

    #[inline]
    pub fn with_gateway(mut self, gateway: GatewaySettings) -> Self {
        self.gateway = gateway;
        self
    }

    /// Parse a YAML document; missing keys take their defaults.
    ///
    /// The layout values are validated so a bad file fails here rather than
    /// at the first export.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse configuration: {}", e)))?;
        config.geometry.validate()?;
        config.typography.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_yaml_str(&yaml)?;
        tracing::debug!(path = %path.display(), "loaded export configuration");
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))
    }
}
