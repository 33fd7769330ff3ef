//! Longan - Deterministic export of editable document trees
//!
//! This library turns a recursive document (title, overview, nested
//! sections) into two byte-reproducible formats, a paginated PDF and a
//! WordprocessingML `.docx` package, and hands the result to a local
//! download target and a persistence backend.
//!
//! # Features
//!
//! - **Document model**: owned section tree with an editable overlay that is
//!   only merged into the canonical document on save
//! - **Layout engine**: one pre-order traversal shared by both formats, greedy
//!   wrapping with real font metrics, fixed-geometry pagination
//! - **PDF writer**: Helvetica for ASCII, STSong-Light for CJK text, no
//!   timestamps or IDs
//! - **DOCX writer**: `Title`/`HeadingN` paragraph styles sized from the same
//!   typography as the PDF
//! - **Export orchestration**: export, download, then base64 persistence
//!   through a pluggable gateway (HTTP adapter behind the `http` feature)
//!
//! # Example - Exporting a document
//!
//! ```rust
//! use longan::config::ExportConfig;
//! use longan::export::{ExportFormat, export_as};
//! use longan::model::{Document, Section};
//!
//! # fn main() -> longan::Result<()> {
//! let doc = Document::new("培训手册")
//!     .with_overview("简介")
//!     .with_section(Section::new("第一章").with_content("A".repeat(2000)));
//!
//! let file = export_as(&doc, ExportFormat::Pdf, &ExportConfig::default())?;
//! assert_eq!(file.filename, "培训手册.pdf");
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Editing before export
//!
//! ```rust
//! use longan::model::{Document, DocumentHandle, EditPath, Section};
//!
//! let mut handle = DocumentHandle::new(
//!     Document::new("Guide").with_section(Section::new("Intro").with_content("draft")),
//! );
//! handle.begin_edit();
//! handle.edit(EditPath::Section(0), "final");
//! // the canonical document is untouched until save
//! assert_eq!(handle.canonical().sections[0].content.as_deref(), Some("draft"));
//! handle.save();
//! assert_eq!(handle.canonical().sections[0].content.as_deref(), Some("final"));
//! ```

/// Common types and utilities shared across the pipeline
pub mod common;

/// Export configuration (geometry, typography, format and gateway options)
pub mod config;

/// WordprocessingML (.docx) writer
pub mod docx;

/// Export orchestration: format dispatch, download and persistence
pub mod export;

/// Persistence gateway trait and HTTP adapter
pub mod gateway;

/// Traversal, text metrics, wrapping and pagination
pub mod layout;

/// Document tree and editable overlay
pub mod model;

/// PDF writer
pub mod pdf;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use config::ExportConfig;
pub use export::{ExportFormat, ExportReport, ExportedFile, Exporter};
pub use gateway::{Credential, PersistedRef, PersistenceGateway, SaveRequest};
pub use model::{Document, DocumentHandle, Section};
