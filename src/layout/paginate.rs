/// Pagination of the block stream onto fixed-size pages.
use super::geometry::{LineStyle, PageGeometry, Typography};
use super::metrics::{capacity, normalize};
use super::traverse::{Block, BlockSink, walk};
use super::wrap::wrap_text;
use crate::common::{Error, Result};
use crate::model::Document;

/// A line of text assigned to a page position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Zero-based page index
    pub page: usize,
    /// Left edge, in millimetres from the left page edge
    pub x: f64,
    /// Top of the line box, in millimetres from the top page edge
    pub y: f64,
    pub text: String,
    pub style: LineStyle,
}

/// Result of paginating a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    lines: Vec<PlacedLine>,
    page_count: usize,
}

impl Layout {
    /// All placed lines, in reading order (and therefore in page order).
    #[inline]
    pub fn lines(&self) -> &[PlacedLine] {
        &self.lines
    }

    /// Number of pages; at least one, even for a document with nothing to draw.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Lines placed on page `index`.
    pub fn page(&self, index: usize) -> impl Iterator<Item = &PlacedLine> {
        self.lines.iter().filter(move |line| line.page == index)
    }
}

/// Lay `document` out on pages described by `geometry`.
///
/// This is a pure function: the same inputs always produce the same layout.
///
/// # Examples
///
/// ```rust
/// use longan::layout::{PageGeometry, Typography, paginate};
/// use longan::model::{Document, Section};
///
/// let doc = Document::new("Manual").with_section(Section::new("Intro").with_content("Hello"));
/// let layout = paginate(&doc, &PageGeometry::default(), &Typography::default())?;
/// assert_eq!(layout.page_count(), 1);
/// assert_eq!(layout.lines().len(), 3);
/// # Ok::<(), longan::Error>(())
/// ```
pub fn paginate(
    document: &Document,
    geometry: &PageGeometry,
    typography: &Typography,
) -> Result<Layout> {
    geometry.validate()?;
    typography.validate()?;

    let mut paginator = Paginator::new(geometry, typography);
    walk(document, &mut paginator)?;
    let layout = paginator.finish();
    tracing::debug!(
        pages = layout.page_count,
        lines = layout.lines.len(),
        "paginated document"
    );
    Ok(layout)
}

struct Paginator<'g> {
    geometry: &'g PageGeometry,
    typography: &'g Typography,
    page: usize,
    y: f64,
    started: bool,
    lines: Vec<PlacedLine>,
}

impl<'g> Paginator<'g> {
    fn new(geometry: &'g PageGeometry, typography: &'g Typography) -> Self {
        Self {
            geometry,
            typography,
            page: 0,
            y: geometry.margin_top,
            started: false,
            lines: Vec::new(),
        }
    }

    #[inline]
    fn overflows(&self) -> bool {
        self.y + self.geometry.line_height > self.geometry.bottom_limit()
    }

    fn new_page(&mut self) {
        self.page += 1;
        self.y = self.geometry.margin_top;
    }

    fn place(&mut self, text: String, style: LineStyle, x: f64) {
        if self.started && self.overflows() {
            self.new_page();
        }
        self.lines.push(PlacedLine {
            page: self.page,
            x,
            y: self.y,
            text,
            style,
        });
        self.y += self.geometry.line_height;
        self.started = true;
    }

    fn block_spacing(&mut self) {
        if self.overflows() {
            self.new_page();
        } else {
            self.y += self.geometry.line_height;
        }
    }

    fn finish(self) -> Layout {
        // Spacing after the final block may have advanced to a page that
        // never received a line.
        let page_count = self.lines.last().map_or(1, |line| line.page + 1);
        Layout {
            lines: self.lines,
            page_count,
        }
    }
}

impl BlockSink for Paginator<'_> {
    type Error = Error;

    fn block(&mut self, block: Block<'_>) -> Result<()> {
        let style = block.style();
        let indent = self.geometry.indent(block.depth());
        let x = self.geometry.margin_left + indent;

        match block {
            Block::Title(text) | Block::Heading { text, .. } => {
                let line = normalize(text).replace('\n', " ");
                self.place(line, style, x);
            },
            Block::Paragraph { text, .. } => {
                let width = self.geometry.content_width() - indent;
                let units = capacity(width, self.typography.size_mm_for(style));
                let wrapped = wrap_text(text, units);
                if wrapped.is_empty() {
                    return Ok(());
                }
                for line in wrapped {
                    self.place(line, style, x);
                }
            },
        }

        self.block_spacing();
        Ok(())
    }
}
