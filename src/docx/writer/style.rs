/// Paragraph styles (`word/styles.xml`) derived from the export typography.
use crate::common::Result;
use crate::common::unit::pt_to_half_points;
use crate::common::xml::escape_xml_attr;
use crate::layout::Typography;
use std::fmt::Write as FmtWrite;

/// Deepest heading style emitted; deeper sections reuse it.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Style id of the heading paragraph style for a section at `depth`.
pub fn heading_style_id(depth: usize) -> String {
    format!("Heading{}", depth.clamp(1, MAX_HEADING_LEVEL))
}

/// A paragraph style definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    /// Style identifier (e.g., "Heading1")
    style_id: String,
    /// UI-visible name (e.g., "heading 1")
    name: String,
    based_on: Option<String>,
    next: Option<String>,
    is_default: bool,
    /// UI priority for display ordering (lower = higher priority)
    priority: Option<i32>,
    /// Outline level (0-based) for headings
    outline_level: Option<u8>,
    keep_next: bool,
    /// Font size in half-points (e.g., 24 = 12pt)
    font_size: Option<u32>,
    bold: bool,
    /// Space before paragraph in twips
    space_before: Option<u32>,
    /// Space after paragraph in twips
    space_after: Option<u32>,
}

impl ParagraphStyle {
    pub fn new(style_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            style_id: style_id.into(),
            name: name.into(),
            based_on: None,
            next: None,
            is_default: false,
            priority: None,
            outline_level: None,
            keep_next: false,
            font_size: None,
            bold: false,
            space_before: None,
            space_after: None,
        }
    }

    #[inline]
    pub fn style_id(&self) -> &str {
        &self.style_id
    }

    #[inline]
    pub fn font_size(&self) -> Option<u32> {
        self.font_size
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<w:style w:type="paragraph" w:styleId="{}""#,
            escape_xml_attr(&self.style_id)
        )?;
        if self.is_default {
            xml.push_str(r#" w:default="1""#);
        }
        xml.push('>');

        write!(xml, r#"<w:name w:val="{}"/>"#, escape_xml_attr(&self.name))?;
        if let Some(ref based_on) = self.based_on {
            write!(xml, r#"<w:basedOn w:val="{}"/>"#, escape_xml_attr(based_on))?;
        }
        if let Some(ref next) = self.next {
            write!(xml, r#"<w:next w:val="{}"/>"#, escape_xml_attr(next))?;
        }
        if let Some(priority) = self.priority {
            write!(xml, r#"<w:uiPriority w:val="{}"/>"#, priority)?;
        }
        xml.push_str("<w:qFormat/>");

        let has_para_props = self.keep_next
            || self.space_before.is_some()
            || self.space_after.is_some()
            || self.outline_level.is_some();
        if has_para_props {
            xml.push_str("<w:pPr>");
            if self.keep_next {
                xml.push_str("<w:keepNext/>");
            }
            if self.space_before.is_some() || self.space_after.is_some() {
                xml.push_str("<w:spacing");
                if let Some(before) = self.space_before {
                    write!(xml, r#" w:before="{}""#, before)?;
                }
                if let Some(after) = self.space_after {
                    write!(xml, r#" w:after="{}""#, after)?;
                }
                xml.push_str("/>");
            }
            if let Some(level) = self.outline_level {
                write!(xml, r#"<w:outlineLvl w:val="{}"/>"#, level)?;
            }
            xml.push_str("</w:pPr>");
        }

        if self.bold || self.font_size.is_some() {
            xml.push_str("<w:rPr>");
            if self.bold {
                xml.push_str("<w:b/><w:bCs/>");
            }
            if let Some(size) = self.font_size {
                write!(xml, r#"<w:sz w:val="{}"/><w:szCs w:val="{}"/>"#, size, size)?;
            }
            xml.push_str("</w:rPr>");
        }

        xml.push_str("</w:style>");
        Ok(())
    }
}

/// The style part: `Normal`, `Title` and `Heading1`..`Heading6`.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    styles: Vec<ParagraphStyle>,
}

impl StyleSheet {
    pub fn from_typography(typography: &Typography) -> Self {
        let mut styles = Vec::with_capacity(MAX_HEADING_LEVEL + 2);

        let mut normal = ParagraphStyle::new("Normal", "Normal");
        normal.is_default = true;
        normal.priority = Some(0);
        normal.space_after = Some(160);
        normal.font_size = Some(pt_to_half_points(typography.body_size));
        styles.push(normal);

        let mut title = ParagraphStyle::new("Title", "Title");
        title.based_on = Some("Normal".to_string());
        title.next = Some("Normal".to_string());
        title.priority = Some(10);
        title.space_after = Some(240);
        title.bold = true;
        title.font_size = Some(pt_to_half_points(typography.title_size));
        styles.push(title);

        for level in 1..=MAX_HEADING_LEVEL {
            let mut heading = ParagraphStyle::new(heading_style_id(level), format!("heading {}", level));
            heading.based_on = Some("Normal".to_string());
            heading.next = Some("Normal".to_string());
            heading.priority = Some(9);
            heading.outline_level = Some((level - 1) as u8);
            heading.keep_next = true;
            heading.space_before = Some(240);
            heading.space_after = Some(80);
            heading.bold = true;
            heading.font_size = Some(pt_to_half_points(typography.heading_size(level)));
            styles.push(heading);
        }

        Self { styles }
    }

    pub fn get(&self, style_id: &str) -> Option<&ParagraphStyle> {
        self.styles.iter().find(|s| s.style_id == style_id)
    }

    /// Generate the complete `word/styles.xml` part.
    pub fn to_xml(&self, typography: &Typography) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(xml, r#"<w:styles xmlns:w="{}">"#, super::super::constants::namespace::WML_MAIN)?;
        write!(
            xml,
            r#"<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Helvetica" w:hAnsi="Helvetica" w:eastAsia="SimSun" w:cs="Arial"/><w:sz w:val="{0}"/><w:szCs w:val="{0}"/><w:lang w:val="en-US" w:eastAsia="zh-CN"/></w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults>"#,
            pt_to_half_points(typography.body_size)
        )?;
        for style in &self.styles {
            style.to_xml(&mut xml)?;
        }
        xml.push_str("</w:styles>");
        Ok(xml)
    }
}
