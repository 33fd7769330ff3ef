/// Paragraphs of the generated document body.
use super::run::Run;
use crate::common::Result;
use crate::common::xml::escape_xml_attr;
use std::fmt::Write as FmtWrite;

/// A body paragraph: an optional paragraph style and its runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub(crate) style: Option<String>,
    pub(crate) runs: Vec<Run>,
    /// Left indentation in twips
    pub(crate) indent_left: Option<u32>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the paragraph style by style id (e.g. `Heading1`).
    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style = Some(style_id.into());
        self
    }

    /// Set the left indentation in twips; zero clears it.
    pub fn with_indent_left(mut self, twips: u32) -> Self {
        self.indent_left = (twips > 0).then_some(twips);
        self
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    #[inline]
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    #[inline]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        if self.style.is_none() && self.indent_left.is_none() && self.runs.is_empty() {
            xml.push_str("<w:p/>");
            return Ok(());
        }

        xml.push_str("<w:p>");
        if self.style.is_some() || self.indent_left.is_some() {
            xml.push_str("<w:pPr>");
            if let Some(ref style) = self.style {
                write!(xml, "<w:pStyle w:val=\"{}\"/>", escape_xml_attr(style))?;
            }
            if let Some(left) = self.indent_left {
                write!(xml, "<w:ind w:left=\"{}\"/>", left)?;
            }
            xml.push_str("</w:pPr>");
        }
        for run in &self.runs {
            run.to_xml(xml)?;
        }
        xml.push_str("</w:p>");
        Ok(())
    }
}
