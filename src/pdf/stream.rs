//! Per-page draw operations and their content-stream encoding.
use super::text::{FontFace, split_runs};
use crate::common::Result;
use crate::common::unit::mm_to_pt;
use crate::layout::metrics::text_width_for;
use crate::layout::{Layout, LineStyle, PageGeometry, Typography};
use std::fmt::Write;

/// Line width used for the stroke half of simulated bold.
const FAKE_BOLD_STROKE: f64 = 0.35;

/// One text draw on a page, in layout coordinates (millimetres from the top-left corner).
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOp {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub style: LineStyle,
}

/// The ordered draw operations of a single page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageStream {
    pub ops: Vec<DrawOp>,
}

/// Group placed lines into one stream per page, in page order.
///
/// Always returns exactly `layout.page_count()` streams.
pub fn page_streams(layout: &Layout) -> Vec<PageStream> {
    let mut pages = vec![PageStream::default(); layout.page_count()];
    for line in layout.lines() {
        pages[line.page].ops.push(DrawOp {
            text: line.text.clone(),
            x: line.x,
            y: line.y,
            style: line.style,
        });
    }
    pages
}

impl PageStream {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Encode the page as PDF content-stream operators.
    ///
    /// Each font run becomes its own text object. The baseline sits one font
    /// size below the top of the line box.
    pub fn encode(&self, geometry: &PageGeometry, typography: &Typography) -> Result<String> {
        let page_height = mm_to_pt(geometry.page_height);
        let mut out = String::new();

        for op in &self.ops {
            let size = typography.size_for(op.style);
            let baseline = page_height - mm_to_pt(op.y) - size;
            let mut x = mm_to_pt(op.x);
            let bold = op.style.is_bold();

            for run in split_runs(&op.text) {
                let face = run.face(bold);
                out.push_str("BT\n");
                writeln!(out, "/{} {:.2} Tf", face.resource(), size)?;
                if face == FontFace::Cjk && bold {
                    writeln!(out, "2 Tr {:.2} w", FAKE_BOLD_STROKE)?;
                }
                writeln!(out, "{:.2} {:.2} Td", x, baseline)?;
                writeln!(out, "{} Tj", run.operand())?;
                out.push_str("ET\n");
                x += f64::from(text_width_for(run.text, bold)) / 1000.0 * size;
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::paginate;
    use crate::model::{Document, Section};

    fn streams(doc: &Document) -> Vec<PageStream> {
        let layout = paginate(doc, &PageGeometry::default(), &Typography::default()).unwrap();
        page_streams(&layout)
    }

    #[test]
    fn test_one_stream_per_page() {
        let doc = Document::new("T").with_section(Section::new("S").with_content("A".repeat(2000)));
        let pages = streams(&doc);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].ops[0].style, LineStyle::Title);
        assert!(pages[1].ops.iter().all(|op| op.style == LineStyle::Body));
    }

    #[test]
    fn test_empty_document_has_one_blank_page() {
        let pages = streams(&Document::default());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
        let encoded = pages[0]
            .encode(&PageGeometry::default(), &Typography::default())
            .unwrap();
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_encode_title_uses_bold_face() {
        let pages = streams(&Document::new("Guide"));
        let encoded = pages[0]
            .encode(&PageGeometry::default(), &Typography::default())
            .unwrap();
        // x = 20mm; baseline = 841.89 - 56.69 - 20
        assert_eq!(
            encoded,
            "BT\n/F2 20.00 Tf\n56.69 765.20 Td\n(Guide) Tj\nET\n"
        );
    }

    #[test]
    fn test_mixed_script_line_switches_fonts() {
        let pages = streams(&Document::default().with_overview("Rust 编程"));
        let encoded = pages[0]
            .encode(&PageGeometry::default(), &Typography::default())
            .unwrap();
        assert!(encoded.contains("/F1 12.00 Tf"));
        assert!(encoded.contains("(Rust ) Tj"));
        assert!(encoded.contains("/F3 12.00 Tf"));
        assert!(encoded.contains("<7F167A0B> Tj"));
        assert!(!encoded.contains(" Tr "));
    }

    #[test]
    fn test_mixed_heading_advances_by_bold_widths() {
        let doc = Document::default().with_section(Section::new("Chapter 概述"));
        let encoded = streams(&doc)[0]
            .encode(&PageGeometry::default(), &Typography::default())
            .unwrap();
        // "Chapter " is 4056/1000 em in Helvetica-Bold: 56.69 + 4.056 * 16 = 121.59
        assert!(encoded.contains("/F2 16.00 Tf\n56.69 769.20 Td\n(Chapter ) Tj\n"));
        assert!(encoded.contains("2 Tr 0.35 w\n121.59 769.20 Td\n<69828FF0> Tj\n"));
    }

    #[test]
    fn test_cjk_heading_is_fake_bold() {
        let pages = streams(&Document::new("培训手册"));
        let encoded = pages[0]
            .encode(&PageGeometry::default(), &Typography::default())
            .unwrap();
        assert!(encoded.contains("/F3 20.00 Tf\n2 Tr 0.35 w\n"));
        assert!(encoded.contains("<57F98BAD624B518C> Tj"));
    }
}
