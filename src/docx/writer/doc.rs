/// Document body writer for DOCX.
use super::paragraph::Paragraph;
use super::run::Run;
use super::section::SectionProperties;
use super::style::heading_style_id;
use crate::common::unit::{mm_to_twips, pt_to_half_points};
use crate::common::{Error, Result};
use crate::docx::constants::namespace;
use crate::layout::{Block, BlockSink, PageGeometry, Typography, walk};
use crate::model::Document;
use std::fmt::Write as FmtWrite;

/// The `word/document.xml` part: body paragraphs plus page setup.
#[derive(Debug, Clone, PartialEq)]
pub struct DocxDocument {
    paragraphs: Vec<Paragraph>,
    section: SectionProperties,
}

impl DocxDocument {
    /// Create an empty body with the given page setup.
    pub fn new(section: SectionProperties) -> Self {
        Self {
            paragraphs: Vec::new(),
            section,
        }
    }

    /// Build the body from the document's block stream.
    ///
    /// Each block becomes exactly one paragraph: the title with the `Title`
    /// style, headings with `HeadingN`, and text with the default style.
    pub fn from_document(
        document: &Document,
        geometry: &PageGeometry,
        typography: &Typography,
    ) -> Result<Self> {
        let mut builder = BodyBuilder {
            body: Self::new(SectionProperties::from_geometry(geometry)),
            geometry,
            typography,
        };
        walk(document, &mut builder)?;
        Ok(builder.body)
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    #[inline]
    pub fn section(&self) -> &SectionProperties {
        &self.section
    }

    /// Serialize the document part.
    ///
    /// A body with no paragraphs still gets one empty paragraph, which Word
    /// requires before the section properties.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024 + self.paragraphs.len() * 128);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<w:document xmlns:w="{}" xmlns:r="{}">"#,
            namespace::WML_MAIN,
            namespace::OFC_RELATIONSHIPS
        )?;
        xml.push_str("<w:body>");
        if self.paragraphs.is_empty() {
            Paragraph::new().to_xml(&mut xml)?;
        }
        for paragraph in &self.paragraphs {
            paragraph.to_xml(&mut xml)?;
        }
        // The sectPr must be the last element in the body
        self.section.to_xml(&mut xml)?;
        xml.push_str("</w:body></w:document>");
        Ok(xml)
    }
}

struct BodyBuilder<'a> {
    body: DocxDocument,
    geometry: &'a PageGeometry,
    typography: &'a Typography,
}

impl BlockSink for BodyBuilder<'_> {
    type Error = Error;

    fn block(&mut self, block: Block<'_>) -> Result<()> {
        let indent = mm_to_twips(self.geometry.indent(block.depth()));
        let size = pt_to_half_points(self.typography.size_for(block.style()));
        let paragraph = match block {
            Block::Title(text) => Paragraph::new()
                .with_style("Title")
                .with_run(Run::new(text).bold(true).font_size(size)),
            Block::Heading { text, depth } => Paragraph::new()
                .with_style(heading_style_id(depth))
                .with_indent_left(indent)
                .with_run(Run::new(text).bold(true).font_size(size)),
            Block::Paragraph { text, .. } => Paragraph::new()
                .with_indent_left(indent)
                .with_run(Run::new(text.trim_matches(['\r', '\n']))),
        };
        self.body.add_paragraph(paragraph);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn body(doc: &Document) -> DocxDocument {
        DocxDocument::from_document(doc, &PageGeometry::default(), &Typography::default()).unwrap()
    }

    #[test]
    fn test_scenario_blocks() {
        let doc = Document::new("培训手册")
            .with_overview("简介")
            .with_section(Section::new("第一章").with_content("A".repeat(2000)));
        let body = body(&doc);
        let styles: Vec<_> = body.paragraphs().iter().map(|p| p.style()).collect();
        assert_eq!(styles, vec![Some("Title"), None, Some("Heading1"), None]);
        assert_eq!(body.paragraphs()[3].runs()[0].text().len(), 2000);
    }

    #[test]
    fn test_nested_heading_indent_and_size() {
        let doc = Document::new("T").with_section(
            Section::new("a").with_subsection(
                Section::new("b").with_subsection(Section::new("c").with_content("text")),
            ),
        );
        let body = body(&doc);
        let heading_c = &body.paragraphs()[3];
        assert_eq!(heading_c.style(), Some("Heading3"));
        assert_eq!(heading_c.indent_left, Some(567));
        assert_eq!(heading_c.runs()[0].properties.font_size, Some(28));
        let text = &body.paragraphs()[4];
        assert_eq!(text.style(), None);
        assert_eq!(text.indent_left, Some(567));
    }

    #[test]
    fn test_empty_body_still_has_a_paragraph() {
        let xml = body(&Document::default()).to_xml().unwrap();
        assert!(xml.contains("<w:body><w:p/><w:sectPr>"));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_content_newlines_stay_in_one_paragraph() {
        let doc = Document::new("T").with_overview("line one\nline two\n");
        let xml = body(&doc).to_xml().unwrap();
        assert_eq!(xml.matches("<w:p>").count(), 2);
        assert!(xml.contains("line one</w:t><w:br/><w:t xml:space=\"preserve\">line two</w:t></w:r>"));
    }
}
