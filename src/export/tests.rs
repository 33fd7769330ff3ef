//! End-to-end tests for the export pipeline
//!
//! These drive a document through editing, serialization, the local download
//! and the persistence gateway, checking what each stage hands the next.

use super::*;
use crate::common::{Error, Result};
use crate::config::ExportConfig;
use crate::gateway::{PersistedRef, PersistenceGateway, SaveRequest};
use crate::model::{Document, DocumentHandle, EditPath, Section};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::io::Read;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Gateway that records each request along with whether the download
/// directory already held the file when persistence started.
struct WitnessGateway {
    dir: PathBuf,
    seen: Mutex<Vec<(SaveRequest, bool)>>,
    status: Option<u16>,
}

impl WitnessGateway {
    fn new(dir: PathBuf, status: Option<u16>) -> Arc<Self> {
        Arc::new(Self {
            dir,
            seen: Mutex::new(Vec::new()),
            status,
        })
    }
}

#[async_trait::async_trait]
impl PersistenceGateway for WitnessGateway {
    async fn save_document(&self, request: SaveRequest) -> Result<PersistedRef> {
        let downloaded = self.dir.join(&request.filename).is_file();
        self.seen.lock().unwrap().push((request, downloaded));
        match self.status {
            None => Ok(PersistedRef(serde_json::json!({"id": 7}))),
            Some(status) => Err(Error::PersistenceFailed {
                status,
                detail: "storage unavailable".to_string(),
            }),
        }
    }
}

fn training_manual() -> Document {
    Document::new("培训手册")
        .with_overview("简介")
        .with_section(Section::new("第一章").with_content("A".repeat(2000)))
}

fn exporter(dir: &std::path::Path, gateway: Arc<WitnessGateway>) -> Exporter {
    Exporter::new(
        ExportConfig::default(),
        Arc::new(DirectoryDownloads::new(dir)),
        gateway,
    )
}

fn document_xml(docx: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(docx)).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

#[tokio::test]
async fn test_download_precedes_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = WitnessGateway::new(dir.path().to_path_buf(), None);
    let report = exporter(dir.path(), gateway.clone())
        .download_and_persist(&training_manual(), ExportFormat::Pdf)
        .await
        .unwrap();

    assert_eq!(report.state, ExportState::Persisted);
    assert_eq!(report.filename, "培训手册.pdf");

    let seen = gateway.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (request, downloaded) = &seen[0];
    assert!(*downloaded);
    assert!(request.is_base64);
    assert_eq!(request.format, ExportFormat::Pdf);

    // the gateway receives exactly the bytes that were downloaded
    let on_disk = std::fs::read(&report.download_path).unwrap();
    assert_eq!(STANDARD.decode(&request.content).unwrap(), on_disk);
    assert_eq!(on_disk.len(), report.bytes_len);
    assert!(on_disk.starts_with(b"%PDF-1.4\n"));
}

#[tokio::test]
async fn test_docx_scenario_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = WitnessGateway::new(dir.path().to_path_buf(), None);
    let report = exporter(dir.path(), gateway.clone())
        .download_and_persist(&training_manual(), ExportFormat::Docx)
        .await
        .unwrap();

    assert!(report.is_persisted());
    assert_eq!(report.filename, "培训手册.docx");

    let xml = document_xml(&std::fs::read(&report.download_path).unwrap());
    assert_eq!(xml.matches("<w:p>").count() + xml.matches("<w:p ").count(), 4);
    assert!(xml.contains(r#"<w:pStyle w:val="Title"/>"#));
    assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
    assert!(xml.contains("第一章"));
}

#[tokio::test]
async fn test_failed_persistence_leaves_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let gateway = WitnessGateway::new(dir.path().to_path_buf(), Some(503));
    let report = exporter(dir.path(), gateway.clone())
        .download_and_persist(&training_manual(), ExportFormat::Pdf)
        .await
        .unwrap();

    assert_eq!(report.state, ExportState::PersistFailed);
    assert!(matches!(
        report.error,
        Some(Error::PersistenceFailed { status: 503, .. })
    ));
    assert!(report.download_path.is_file());
    assert_eq!(
        report.history.states(),
        &[
            ExportState::Idle,
            ExportState::Exporting,
            ExportState::Downloaded,
            ExportState::Persisting,
            ExportState::PersistFailed,
        ]
    );
}

#[test]
fn test_exports_follow_the_edit_view() {
    let mut handle = DocumentHandle::new(training_manual());
    handle.begin_edit();
    assert!(handle.edit(EditPath::Section(0), "修订后的内容"));

    let config = ExportConfig::default();
    let live = export_as(handle.view(), ExportFormat::Docx, &config).unwrap();
    let committed = export_as(handle.canonical(), ExportFormat::Docx, &config).unwrap();
    assert!(document_xml(&live.bytes).contains("修订后的内容"));
    assert!(!document_xml(&committed.bytes).contains("修订后的内容"));

    handle.cancel_edit();
    let after_cancel = export_as(handle.view(), ExportFormat::Docx, &config).unwrap();
    assert_eq!(after_cancel.bytes, committed.bytes);
}

#[test]
fn test_untitled_documents_get_fallback_names() {
    let config = ExportConfig::default();
    let doc = Document::new("  ").with_section(Section::new("Body").with_content("text"));
    assert_eq!(
        export_as(&doc, ExportFormat::Pdf, &config).unwrap().filename,
        "document.pdf"
    );
    assert_eq!(
        export_as(&doc, ExportFormat::Docx, &config).unwrap().filename,
        "document.docx"
    );
}

#[test]
fn test_yaml_config_drives_both_formats() {
    let config = ExportConfig::from_yaml_str(
        "geometry:\n  page_width: 215.9\n  page_height: 279.4\npdf:\n  compress: false\n",
    )
    .unwrap();
    let doc = training_manual();

    let pdf = export_as(&doc, ExportFormat::Pdf, &config).unwrap();
    let text = String::from_utf8_lossy(&pdf.bytes);
    assert!(text.contains("/MediaBox [0 0 612.00 792.00]"));
    assert!(text.contains("BT\n"));

    let docx = export_as(&doc, ExportFormat::Docx, &config).unwrap();
    assert!(document_xml(&docx.bytes).contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
}
