/// Page geometry and typography shared by both output formats.
use crate::common::unit::pt_to_mm;
use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed page geometry, in millimetres.
///
/// # Examples
///
/// ```rust
/// use longan::layout::PageGeometry;
///
/// let geometry = PageGeometry::a4().with_margins(15.0).with_line_height(6.0);
/// assert_eq!(geometry.content_width(), 180.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Vertical advance of every placed line
    pub line_height: f64,
    /// Horizontal indent added per nesting level below the top-level sections
    pub indent_step: f64,
    /// Smallest share of the content width that indentation may leave for text
    pub min_wrap_fraction: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        // A4 portrait with 20mm margins
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_top: 20.0,
            margin_bottom: 20.0,
            margin_left: 20.0,
            margin_right: 20.0,
            line_height: 7.0,
            indent_step: 5.0,
            min_wrap_fraction: 0.25,
        }
    }
}

impl PageGeometry {
    /// A4 (210mm x 297mm).
    pub fn a4() -> Self {
        Self::default()
    }

    /// US Letter (8.5" x 11").
    pub fn letter() -> Self {
        Self {
            page_width: 215.9,
            page_height: 279.4,
            ..Default::default()
        }
    }

    /// Set all four margins.
    pub fn with_margins(mut self, margin: f64) -> Self {
        self.margin_top = margin;
        self.margin_bottom = margin;
        self.margin_left = margin;
        self.margin_right = margin;
        self
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Width between the left and right margins.
    #[inline]
    pub fn content_width(&self) -> f64 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Lowest y a line may end at.
    #[inline]
    pub fn bottom_limit(&self) -> f64 {
        self.page_height - self.margin_bottom
    }

    /// Number of lines that fit on one page.
    pub fn lines_per_page(&self) -> usize {
        ((self.bottom_limit() - self.margin_top) / self.line_height).floor() as usize
    }

    /// Left offset for a block at `depth`.
    ///
    /// The title, the overview and top-level sections sit on the margin; each
    /// deeper level moves right by `indent_step`, clamped so that at least
    /// `min_wrap_fraction` of the content width remains.
    pub fn indent(&self, depth: usize) -> f64 {
        let wanted = depth.saturating_sub(1) as f64 * self.indent_step;
        let limit = self.content_width() * (1.0 - self.min_wrap_fraction.clamp(0.0, 1.0));
        wanted.min(limit.max(0.0))
    }

    /// Check that at least one line fits on a page and all values are usable.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.page_width,
            self.page_height,
            self.margin_top,
            self.margin_bottom,
            self.margin_left,
            self.margin_right,
            self.line_height,
            self.indent_step,
            self.min_wrap_fraction,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::InvalidGeometry(
                "all dimensions must be finite and non-negative".to_string(),
            ));
        }
        if self.line_height <= 0.0 {
            return Err(Error::InvalidGeometry("line height must be positive".to_string()));
        }
        if self.content_width() <= 0.0 {
            return Err(Error::InvalidGeometry(format!(
                "margins leave no horizontal space on a {}mm wide page",
                self.page_width
            )));
        }
        if self.margin_top + self.line_height > self.bottom_limit() {
            return Err(Error::InvalidGeometry(format!(
                "a {}mm line does not fit between the margins of a {}mm tall page",
                self.line_height, self.page_height
            )));
        }
        Ok(())
    }
}

/// Font sizes, in points, for each line style.
///
/// Headings take their size from `heading_sizes` by depth; depths past the
/// end of the list reuse the last entry, so deep nesting never shrinks a
/// heading below the deepest configured weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Typography {
    pub title_size: f64,
    pub heading_sizes: Vec<f64>,
    pub body_size: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            title_size: 20.0,
            heading_sizes: vec![16.0, 14.0],
            body_size: 12.0,
        }
    }
}

impl Typography {
    /// Heading size for a section at `depth` (1 = top-level section).
    pub fn heading_size(&self, depth: usize) -> f64 {
        let last = self.heading_sizes.len();
        if last == 0 {
            return self.body_size;
        }
        self.heading_sizes[depth.clamp(1, last) - 1]
    }

    /// Font size for a line style.
    pub fn size_for(&self, style: LineStyle) -> f64 {
        match style {
            LineStyle::Title => self.title_size,
            LineStyle::Heading(depth) => self.heading_size(depth),
            LineStyle::Body => self.body_size,
        }
    }

    /// Font size in millimetres, the unit layout measures in.
    #[inline]
    pub fn size_mm_for(&self, style: LineStyle) -> f64 {
        pt_to_mm(self.size_for(style))
    }

    pub fn validate(&self) -> Result<()> {
        let sizes = std::iter::once(self.title_size)
            .chain(self.heading_sizes.iter().copied())
            .chain(std::iter::once(self.body_size));
        for size in sizes {
            if !size.is_finite() || size <= 0.0 {
                return Err(Error::InvalidGeometry(format!(
                    "font size {} is not a positive number",
                    size
                )));
            }
        }
        Ok(())
    }
}

/// Visual role of a line or block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// The document title
    Title,
    /// A section heading at the given depth (1 = top-level)
    Heading(usize),
    /// Paragraph text
    Body,
}

impl LineStyle {
    /// Title and headings are drawn bold.
    #[inline]
    pub fn is_bold(self) -> bool {
        !matches!(self, LineStyle::Body)
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineStyle::Title => f.write_str("title"),
            LineStyle::Heading(depth) => write!(f, "heading-{}", depth),
            LineStyle::Body => f.write_str("body"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid_a4() {
        let g = PageGeometry::default();
        g.validate().unwrap();
        assert_eq!(g.content_width(), 170.0);
        assert_eq!(g.lines_per_page(), 36);
    }

    #[test]
    fn test_indent_grows_then_clamps() {
        let g = PageGeometry::default();
        assert_eq!(g.indent(0), 0.0);
        assert_eq!(g.indent(1), 0.0);
        assert_eq!(g.indent(2), 5.0);
        assert_eq!(g.indent(3), 10.0);
        // 170mm * 0.75 = 127.5mm is the most indentation ever applied.
        assert_eq!(g.indent(1000), 127.5);
    }

    #[test]
    fn test_rejects_pages_without_room() {
        let g = PageGeometry::default().with_page_size(210.0, 45.0).with_line_height(7.0);
        assert!(matches!(g.validate(), Err(Error::InvalidGeometry(_))));
        let g = PageGeometry::default().with_margins(120.0);
        assert!(g.validate().is_err());
        let g = PageGeometry::default().with_line_height(f64::NAN);
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_heading_sizes_saturate() {
        let t = Typography::default();
        assert_eq!(t.heading_size(1), 16.0);
        assert_eq!(t.heading_size(2), 14.0);
        assert_eq!(t.heading_size(5), 14.0);
        assert_eq!(t.heading_size(10), 14.0);
        assert!(t.size_for(LineStyle::Title) > t.heading_size(1));
    }

    #[test]
    fn test_style_tags() {
        assert_eq!(LineStyle::Title.to_string(), "title");
        assert_eq!(LineStyle::Heading(3).to_string(), "heading-3");
        assert_eq!(LineStyle::Body.to_string(), "body");
        assert!(!LineStyle::Body.is_bold());
    }
}
