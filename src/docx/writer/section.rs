/// Page setup (`w:sectPr`) for the single document section.
use crate::common::Result;
use crate::common::unit::mm_to_twips;
use crate::layout::PageGeometry;
use std::fmt::Write as FmtWrite;

/// Section properties: page size and margins, all in twips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionProperties {
    /// Page width in twips (twentieth of a point, 1440 = 1 inch)
    pub page_width: u32,
    /// Page height in twips
    pub page_height: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    /// Header distance from top in twips
    pub header_distance: u32,
    /// Footer distance from bottom in twips
    pub footer_distance: u32,
}

impl Default for SectionProperties {
    fn default() -> Self {
        Self::from_geometry(&PageGeometry::default())
    }
}

impl SectionProperties {
    /// Page setup matching the geometry the PDF is laid out on.
    pub fn from_geometry(geometry: &PageGeometry) -> Self {
        Self {
            page_width: mm_to_twips(geometry.page_width),
            page_height: mm_to_twips(geometry.page_height),
            margin_top: mm_to_twips(geometry.margin_top),
            margin_bottom: mm_to_twips(geometry.margin_bottom),
            margin_left: mm_to_twips(geometry.margin_left),
            margin_right: mm_to_twips(geometry.margin_right),
            header_distance: 720, // 0.5 inch
            footer_distance: 720, // 0.5 inch
        }
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:sectPr>");
        write!(
            xml,
            r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
            self.page_width, self.page_height
        )?;
        write!(
            xml,
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="{}" w:footer="{}" w:gutter="0"/>"#,
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
            self.header_distance,
            self.footer_distance
        )?;
        xml.push_str("</w:sectPr>");
        Ok(())
    }
}
