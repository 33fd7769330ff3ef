use super::download::DownloadSink;
use super::format::{ExportFormat, export_filename};
use super::state::{ExportState, StateTrail};
use crate::common::{Error, Result};
use crate::config::ExportConfig;
use crate::gateway::{PersistedRef, PersistenceGateway, SaveRequest};
use crate::model::Document;
use crate::{docx, pdf};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;

/// Bytes produced by one serializer run, with the name to save them under.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub bytes: Bytes,
    pub filename: String,
    pub format: ExportFormat,
}

/// Outcome of [`Exporter::download_and_persist`].
///
/// The local download has always happened when a report is returned;
/// `error` is set when persistence failed afterwards.
#[derive(Debug)]
pub struct ExportReport {
    pub state: ExportState,
    pub history: StateTrail,
    pub filename: String,
    pub bytes_len: usize,
    pub download_path: PathBuf,
    pub persisted: Option<PersistedRef>,
    pub error: Option<Error>,
}

impl ExportReport {
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.state == ExportState::Persisted
    }
}

/// Serialize `document` in `format`.
///
/// Pure: never touches the filesystem or the network.
pub fn export_as(
    document: &Document,
    format: ExportFormat,
    config: &ExportConfig,
) -> Result<ExportedFile> {
    for problem in document.validate() {
        tracing::warn!(%problem, %format, "exporting with fallback");
    }
    let bytes = match format {
        ExportFormat::Pdf => pdf::serialize(document, config)?,
        ExportFormat::Docx => docx::serialize(document, config)?,
    };
    Ok(ExportedFile {
        bytes,
        filename: export_filename(document.export_title(), format),
        format,
    })
}

/// Standard, padded base64.
#[inline]
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Base64-encode on the blocking pool so large exports do not stall the executor.
pub async fn encode_base64_blocking(bytes: Bytes) -> Result<String> {
    tokio::task::spawn_blocking(move || encode_base64(&bytes))
        .await
        .map_err(|e| Error::Serialization(format!("base64 encoder task failed: {}", e)))
}

/// Runs exports against one configuration, download target and gateway.
///
/// Holds no mutable state; concurrent invocations are independent.
#[derive(Clone)]
pub struct Exporter {
    config: ExportConfig,
    downloads: Arc<dyn DownloadSink>,
    gateway: Arc<dyn PersistenceGateway>,
}

impl Exporter {
    pub fn new(
        config: ExportConfig,
        downloads: Arc<dyn DownloadSink>,
        gateway: Arc<dyn PersistenceGateway>,
    ) -> Self {
        Self {
            config,
            downloads,
            gateway,
        }
    }

    #[inline]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Serialize `document` in `format` with this exporter's configuration.
    pub fn export_as(&self, document: &Document, format: ExportFormat) -> Result<ExportedFile> {
        export_as(document, format, &self.config)
    }

    /// Hand the bytes to the local download sink.
    pub fn trigger_local_download(&self, bytes: &[u8], filename: &str) -> Result<PathBuf> {
        let path = self.downloads.save(bytes, filename)?;
        tracing::info!(filename, bytes = bytes.len(), path = %path.display(), "downloaded export");
        Ok(path)
    }

    /// Run the download sink on the blocking pool; its write and fsync must not stall the executor.
    async fn download_blocking(&self, bytes: Bytes, filename: &str) -> Result<PathBuf> {
        let downloads = Arc::clone(&self.downloads);
        let name = filename.to_string();
        let len = bytes.len();
        let path = tokio::task::spawn_blocking(move || downloads.save(&bytes, &name))
            .await
            .map_err(|e| Error::Download(format!("download task failed: {}", e)))??;
        tracing::info!(filename, bytes = len, path = %path.display(), "downloaded export");
        Ok(path)
    }

    /// Base64-encode the bytes and store them through the gateway.
    pub async fn persist(
        &self,
        bytes: Bytes,
        format: ExportFormat,
        filename: &str,
    ) -> Result<PersistedRef> {
        let len = bytes.len();
        let content = encode_base64_blocking(bytes).await?;
        let request = SaveRequest::new(content, format, filename);
        match self.gateway.save_document(request).await {
            Ok(persisted) => {
                tracing::info!(filename, %format, bytes = len, "persisted export");
                Ok(persisted)
            },
            Err(err) => {
                tracing::warn!(filename, %format, error = %err, "persisting export failed");
                Err(err)
            },
        }
    }

    /// Export, download locally, then persist, strictly in that order.
    ///
    /// A serializer or download failure is returned as `Err` and nothing is
    /// persisted. A persistence failure does not undo the download; it is
    /// reported in the returned [`ExportReport`].
    pub async fn download_and_persist(
        &self,
        document: &Document,
        format: ExportFormat,
    ) -> Result<ExportReport> {
        let mut history = StateTrail::default();

        history.advance(ExportState::Exporting);
        let file = match self.export_as(document, format) {
            Ok(file) => file,
            Err(err) => {
                history.advance(ExportState::Idle);
                return Err(err);
            },
        };

        let download_path = self
            .download_blocking(file.bytes.clone(), &file.filename)
            .await?;
        history.advance(ExportState::Downloaded);

        history.advance(ExportState::Persisting);
        let bytes_len = file.bytes.len();
        let (persisted, error) = match self.persist(file.bytes, format, &file.filename).await {
            Ok(persisted) => {
                history.advance(ExportState::Persisted);
                (Some(persisted), None)
            },
            Err(err) => {
                history.advance(ExportState::PersistFailed);
                (None, Some(err))
            },
        };

        Ok(ExportReport {
            state: history.current(),
            history,
            filename: file.filename,
            bytes_len,
            download_path,
            persisted,
            error,
        })
    }
}
