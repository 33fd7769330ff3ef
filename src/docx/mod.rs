//! Structured export: WordprocessingML (`.docx`) writer.
//!
//! The document's block stream is turned into styled paragraphs
//! ([`writer::DocxDocument`]), the heading and body sizes come from the same
//! [`crate::layout::Typography`] the PDF uses, and the parts are zipped into
//! an OPC package by [`package::PackageWriter`].
//!
//! Pagination is left to the word processor; only page size and margins are
//! carried over from the layout geometry.
//!
//! # Examples
//!
//! ```rust
//! use longan::config::ExportConfig;
//! use longan::model::{Document, Section};
//!
//! let doc = Document::new("Handbook").with_section(Section::new("Intro").with_content("Hi"));
//! let bytes = longan::docx::serialize(&doc, &ExportConfig::default())?;
//! assert!(bytes.starts_with(b"PK"));
//! # Ok::<(), longan::Error>(())
//! ```

pub mod constants;
pub mod package;
pub mod writer;

pub use writer::{DocxDocument, Paragraph, Run, StyleSheet};

use crate::common::Result;
use crate::config::ExportConfig;
use crate::model::Document;
use bytes::Bytes;
use constants::part;
use package::PackageWriter;

/// Render `document` as a `.docx` package.
pub fn serialize(document: &Document, config: &ExportConfig) -> Result<Bytes> {
    config.geometry.validate()?;
    config.typography.validate()?;

    let body = DocxDocument::from_document(document, &config.geometry, &config.typography)?;
    let document_xml = body.to_xml()?;
    let styles_xml = StyleSheet::from_typography(&config.typography).to_xml(&config.typography)?;

    let mut pkg = PackageWriter::new();
    pkg.write(part::CONTENT_TYPES, package::content_types_xml().as_bytes())?;
    pkg.write(part::PACKAGE_RELS, package::package_rels_xml().as_bytes())?;
    pkg.write(part::DOCUMENT, document_xml.as_bytes())?;
    pkg.write(part::STYLES, styles_xml.as_bytes())?;
    pkg.write(part::DOCUMENT_RELS, package::document_rels_xml().as_bytes())?;
    pkg.write(
        part::CORE_PROPERTIES,
        package::core_properties_xml(document.export_title()).as_bytes(),
    )?;
    pkg.write(
        part::APP_PROPERTIES,
        package::app_properties_xml(&config.pdf.producer).as_bytes(),
    )?;
    let bytes = pkg.finish()?;

    tracing::debug!(
        paragraphs = body.paragraphs().len(),
        document_xml = document_xml.len(),
        total_bytes = bytes.len(),
        "wrote docx"
    );
    Ok(Bytes::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;
    use proptest::prelude::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use std::io::{Cursor, Read};

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut out = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut out).unwrap();
        out
    }

    /// (style, text) of every body paragraph, in order.
    fn paragraphs(bytes: &[u8]) -> Vec<(Option<String>, String)> {
        let xml = read_part(bytes, part::DOCUMENT);
        let mut reader = Reader::from_str(&xml);
        let mut out = Vec::new();
        let mut current: Option<(Option<String>, String)> = None;
        let mut in_text = false;
        loop {
            match reader.read_event().unwrap() {
                Event::Start(e) if e.name().as_ref() == b"w:p" => {
                    current = Some((None, String::new()));
                },
                Event::Empty(e) if e.name().as_ref() == b"w:p" => {
                    out.push((None, String::new()));
                },
                Event::Empty(e) if e.name().as_ref() == b"w:pStyle" => {
                    let val = e
                        .attributes()
                        .flatten()
                        .find(|a| a.key.as_ref() == b"w:val")
                        .map(|a| String::from_utf8(a.value.to_vec()).unwrap());
                    if let Some(p) = current.as_mut() {
                        p.0 = val;
                    }
                },
                Event::Empty(e) if e.name().as_ref() == b"w:br" => {
                    if let Some(p) = current.as_mut() {
                        p.1.push('\n');
                    }
                },
                Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
                Event::End(e) if e.name().as_ref() == b"w:t" => in_text = false,
                Event::Text(t) if in_text => {
                    if let Some(p) = current.as_mut() {
                        p.1.push_str(&t.decode().unwrap());
                    }
                },
                Event::GeneralRef(r) if in_text => {
                    let entity = match r.decode().unwrap().as_ref() {
                        "amp" => '&',
                        "lt" => '<',
                        "gt" => '>',
                        "quot" => '"',
                        "apos" => '\'',
                        other => panic!("unexpected entity {other}"),
                    };
                    if let Some(p) = current.as_mut() {
                        p.1.push(entity);
                    }
                },
                Event::End(e) if e.name().as_ref() == b"w:p" => {
                    out.extend(current.take());
                },
                Event::Eof => break,
                _ => {},
            }
        }
        out
    }

    #[test]
    fn test_scenario_has_four_blocks() {
        let doc = Document::new("培训手册")
            .with_overview("简介")
            .with_section(Section::new("第一章").with_content("A".repeat(2000)));
        let bytes = serialize(&doc, &ExportConfig::default()).unwrap();
        let paras = paragraphs(&bytes);
        assert_eq!(paras.len(), 4);
        assert_eq!(paras[0], (Some("Title".to_string()), "培训手册".to_string()));
        assert_eq!(paras[1], (None, "简介".to_string()));
        assert_eq!(paras[2], (Some("Heading1".to_string()), "第一章".to_string()));
        assert_eq!(paras[3].0, None);
        assert_eq!(paras[3].1, "A".repeat(2000));
    }

    #[test]
    fn test_title_only_has_one_title_block() {
        let bytes = serialize(&Document::new("Solo"), &ExportConfig::default()).unwrap();
        assert_eq!(paragraphs(&bytes), vec![(Some("Title".to_string()), "Solo".to_string())]);
        assert!(read_part(&bytes, part::CORE_PROPERTIES).contains("<dc:title>Solo</dc:title>"));
    }

    #[test]
    fn test_part_order_is_fixed() {
        let bytes = serialize(&Document::new("x"), &ExportConfig::default()).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                part::CONTENT_TYPES,
                part::PACKAGE_RELS,
                part::DOCUMENT,
                part::STYLES,
                part::DOCUMENT_RELS,
                part::CORE_PROPERTIES,
                part::APP_PROPERTIES,
            ]
        );
    }

    #[test]
    fn test_deep_sections_saturate_heading_weight() {
        let mut section = Section::new("d10");
        for depth in (1..10).rev() {
            section = Section::new(format!("d{depth}")).with_subsection(section);
        }
        let doc = Document::new("T").with_section(section);
        let bytes = serialize(&doc, &ExportConfig::default()).unwrap();
        let xml = read_part(&bytes, part::DOCUMENT);
        assert_eq!(xml.matches(r#"<w:pStyle w:val="Heading6"/>"#).count(), 5);
        // depth 2 through 10 share the depth-2 size (14pt)
        assert_eq!(xml.matches(r#"<w:sz w:val="28"/>"#).count(), 9);
        assert_eq!(xml.matches(r#"<w:sz w:val="32"/>"#).count(), 1);
    }

    #[test]
    fn test_markup_in_text_is_escaped() {
        let doc = Document::new("<Q&A>").with_overview("a < b & \"c\"\u{1}");
        let bytes = serialize(&doc, &ExportConfig::default()).unwrap();
        let paras = paragraphs(&bytes);
        assert_eq!(paras[0].1, "<Q&A>");
        assert_eq!(paras[1].1, "a < b & \"c\"");
    }

    #[test]
    fn test_page_setup_follows_geometry() {
        let mut config = ExportConfig::default();
        config.geometry = crate::layout::PageGeometry::letter();
        let bytes = serialize(&Document::new("x"), &config).unwrap();
        assert!(read_part(&bytes, part::DOCUMENT).contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]
        #[test]
        fn prop_output_is_deterministic(
            title in "\\PC{0,16}",
            bodies in proptest::collection::vec("\\PC{0,200}", 0..4),
        ) {
            let mut doc = Document::new(title);
            for (i, body) in bodies.into_iter().enumerate() {
                doc = doc.with_section(Section::new(format!("{i}")).with_content(body));
            }
            let config = ExportConfig::default();
            prop_assert_eq!(serialize(&doc, &config).unwrap(), serialize(&doc, &config).unwrap());
        }
    }
}
