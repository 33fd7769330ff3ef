/// Pre-order document traversal shared by every output format.
use super::geometry::LineStyle;
use crate::model::{Document, Section};

/// A logical unit of document content, in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block<'a> {
    /// The document title
    Title(&'a str),
    /// A section heading; `depth` is 1 for top-level sections
    Heading { text: &'a str, depth: usize },
    /// Paragraph text; `depth` is 0 for the overview, otherwise the depth of
    /// the owning section
    Paragraph { text: &'a str, depth: usize },
}

impl<'a> Block<'a> {
    #[inline]
    pub fn text(&self) -> &'a str {
        match *self {
            Block::Title(text) => text,
            Block::Heading { text, .. } | Block::Paragraph { text, .. } => text,
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        match *self {
            Block::Title(_) => 0,
            Block::Heading { depth, .. } | Block::Paragraph { depth, .. } => depth,
        }
    }

    #[inline]
    pub fn style(&self) -> LineStyle {
        match *self {
            Block::Title(_) => LineStyle::Title,
            Block::Heading { depth, .. } => LineStyle::Heading(depth),
            Block::Paragraph { .. } => LineStyle::Body,
        }
    }
}

/// Receiver of the block stream produced by [`walk`].
pub trait BlockSink {
    type Error;

    fn block(&mut self, block: Block<'_>) -> Result<(), Self::Error>;
}

/// Emit every block of `document` to `sink` in reading order.
///
/// Order: title (skipped when blank), overview (when it has text), then each
/// section as its heading, its content (when it has text) and its
/// subsections, before moving on to the next sibling. The walk keeps an
/// explicit stack, so arbitrarily deep trees do not grow the call stack.
pub fn walk<S>(document: &Document, sink: &mut S) -> Result<(), S::Error>
where
    S: BlockSink + ?Sized,
{
    if let Some(title) = document.export_title() {
        sink.block(Block::Title(title))?;
    }
    if let Some(overview) = document.overview_text() {
        sink.block(Block::Paragraph {
            text: overview,
            depth: 0,
        })?;
    }

    let mut stack: Vec<(&Section, usize)> =
        document.sections.iter().rev().map(|s| (s, 1)).collect();
    while let Some((section, depth)) = stack.pop() {
        sink.block(Block::Heading {
            text: &section.title,
            depth,
        })?;
        if let Some(content) = section.content_text() {
            sink.block(Block::Paragraph {
                text: content,
                depth,
            })?;
        }
        stack.extend(section.subsections.iter().rev().map(|s| (s, depth + 1)));
    }
    Ok(())
}
