//! Export orchestration: format dispatch, local download and persistence.
//!
//! [`export_as`] is the pure part (document in, bytes out). [`Exporter`] adds
//! the side effects in a fixed order: the file is saved locally first, then
//! its base64 encoding is sent to the [`crate::gateway::PersistenceGateway`].
//! A failed persistence never undoes the download.

mod download;
mod format;
mod orchestrator;
mod state;

pub use download::{DirectoryDownloads, DownloadSink};
pub use format::{ExportFormat, export_filename};
pub use orchestrator::{
    ExportReport, ExportedFile, Exporter, encode_base64, encode_base64_blocking, export_as,
};
pub use state::{ExportState, StateTrail};

#[cfg(test)]
mod tests;
