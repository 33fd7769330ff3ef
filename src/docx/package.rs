//! OPC package assembly for generated `.docx` files.
//!
//! Parts are written in a fixed order with a fixed modification time and a
//! fixed Deflate level, so the archive bytes depend only on the part contents.

use super::constants::{content_type as ct, namespace, part, relationship_type as rt};
use crate::common::Result;
use crate::common::xml::{escape_xml_attr, escape_xml_text};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Deflate level for every entry.
const DEFLATE_LEVEL: i64 = 6;

/// In-memory writer for the parts of one package.
pub struct PackageWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PackageWriter {
    pub fn new() -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated)
            .compression_level(Some(DEFLATE_LEVEL))
            .last_modified_time(zip::DateTime::default());
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            options,
        }
    }

    /// Write one part to the package.
    pub fn write(&mut self, name: &str, blob: &[u8]) -> Result<()> {
        self.archive.start_file(name, self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PackageWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// The `[Content_Types].xml` part.
pub fn content_types_xml() -> String {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES));
    xml.push_str(&format!(
        r#"<Default Extension="rels" ContentType="{}"/>"#,
        ct::OPC_RELATIONSHIPS
    ));
    xml.push_str(&format!(r#"<Default Extension="xml" ContentType="{}"/>"#, ct::XML));
    for (part_name, content_type) in [
        (part::APP_PROPERTIES, ct::OFC_EXTENDED_PROPERTIES),
        (part::CORE_PROPERTIES, ct::OPC_CORE_PROPERTIES),
        (part::DOCUMENT, ct::WML_DOCUMENT_MAIN),
        (part::STYLES, ct::WML_STYLES),
    ] {
        xml.push_str(&format!(
            r#"<Override PartName="/{}" ContentType="{}"/>"#,
            part_name, content_type
        ));
    }
    xml.push_str("</Types>");
    xml
}

/// A relationships part with targets numbered `rId1..`.
pub fn relationships_xml(relationships: &[(&str, &str)]) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS));
    for (index, (rel_type, target)) in relationships.iter().enumerate() {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="{}"/>"#,
            index + 1,
            rel_type,
            escape_xml_attr(target)
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Package-level relationships (`_rels/.rels`).
pub fn package_rels_xml() -> String {
    relationships_xml(&[
        (rt::OFFICE_DOCUMENT, part::DOCUMENT),
        (rt::CORE_PROPERTIES, part::CORE_PROPERTIES),
        (rt::EXTENDED_PROPERTIES, part::APP_PROPERTIES),
    ])
}

/// Main document relationships (`word/_rels/document.xml.rels`).
pub fn document_rels_xml() -> String {
    relationships_xml(&[(rt::STYLES, "styles.xml")])
}

/// Core properties carrying only the title; no dates, so output stays reproducible.
pub fn core_properties_xml(title: Option<&str>) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(
        r#"<cp:coreProperties xmlns:cp="{}" xmlns:dc="{}">"#,
        namespace::OPC_CORE_PROPERTIES,
        namespace::DC_ELEMENTS
    ));
    if let Some(title) = title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml_text(title)));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

/// Extended (application) properties.
pub fn app_properties_xml(application: &str) -> String {
    format!(
        r#"{}<Properties xmlns="{}"><Application>{}</Application></Properties>"#,
        XML_DECLARATION,
        namespace::OFC_EXTENDED_PROPERTIES,
        escape_xml_text(application)
    )
}
