/// Text runs for generated paragraphs.
use crate::common::Result;
use crate::common::xml::escape_xml_text;
use std::fmt::Write as FmtWrite;

/// A run of text sharing one set of character properties.
///
/// Hard newlines in the text become `<w:br/>` line breaks and tabs become
/// `<w:tab/>`, all inside the same run.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub(crate) text: String,
    pub(crate) properties: RunProperties,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            properties: RunProperties::default(),
        }
    }

    /// Make the text bold.
    pub fn bold(mut self, bold: bool) -> Self {
        self.properties.bold = Some(bold);
        self
    }

    /// Set font size in half-points (e.g., 24 = 12pt).
    pub fn font_size(mut self, size: u32) -> Self {
        self.properties.font_size = Some(size);
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:r>");

        if self.properties.has_properties() {
            xml.push_str("<w:rPr>");
            if let Some(bold) = self.properties.bold {
                xml.push_str(if bold { "<w:b/><w:bCs/>" } else { "<w:b w:val=\"0\"/>" });
            }
            if let Some(size) = self.properties.font_size {
                write!(xml, "<w:sz w:val=\"{}\"/><w:szCs w:val=\"{}\"/>", size, size)?;
            }
            xml.push_str("</w:rPr>");
        }

        for (index, line) in self.text.split('\n').enumerate() {
            if index > 0 {
                xml.push_str("<w:br/>");
            }
            let line = line.strip_suffix('\r').unwrap_or(line);
            for (tab_index, piece) in line.split('\t').enumerate() {
                if tab_index > 0 {
                    xml.push_str("<w:tab/>");
                }
                if !piece.is_empty() {
                    write!(
                        xml,
                        "<w:t xml:space=\"preserve\">{}</w:t>",
                        escape_xml_text(piece)
                    )?;
                }
            }
        }

        xml.push_str("</w:r>");
        Ok(())
    }
}

/// Run properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct RunProperties {
    pub(crate) bold: Option<bool>,
    pub(crate) font_size: Option<u32>,
}

impl RunProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.bold.is_some() || self.font_size.is_some()
    }
}
