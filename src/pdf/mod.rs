//! Paginated export: PDF 1.4 writer.
//!
//! The document is laid out with [`crate::layout::paginate`], each page's
//! placed lines become a [`PageStream`], and the streams are written into a
//! self-contained PDF with the base-14 Helvetica faces for ASCII text and the
//! STSong-Light CJK font for everything else.
//!
//! The output carries no timestamps or file identifiers, so the same document
//! and configuration always produce the same bytes.
//!
//! # Examples
//!
//! ```rust
//! use longan::config::ExportConfig;
//! use longan::model::Document;
//!
//! let bytes = longan::pdf::serialize(&Document::new("Report"), &ExportConfig::default())?;
//! assert!(bytes.starts_with(b"%PDF-1.4"));
//! # Ok::<(), longan::Error>(())
//! ```

pub mod stream;
pub mod text;
pub mod writer;

pub use stream::{DrawOp, PageStream, page_streams};

use crate::common::Result;
use crate::config::ExportConfig;
use crate::layout::paginate;
use crate::model::Document;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Options specific to PDF output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfOptions {
    /// Flate-compress page content streams
    pub compress: bool,
    /// Value of the `/Producer` entry in the document information dictionary
    pub producer: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            compress: true,
            producer: concat!("longan ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PdfOptions {
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }
}

/// Render `document` as a PDF file.
pub fn serialize(document: &Document, config: &ExportConfig) -> Result<Bytes> {
    let layout = paginate(document, &config.geometry, &config.typography)?;
    let pages = page_streams(&layout);
    let bytes = writer::write_pdf(
        &pages,
        document.export_title().unwrap_or_default(),
        &config.geometry,
        &config.typography,
        &config.pdf,
    )?;
    Ok(Bytes::from(bytes))
}
