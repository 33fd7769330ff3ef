//! Layout engine: document traversal, text metrics, wrapping and pagination.
//!
//! Both serializers consume the same [`traverse::walk`] block stream. The PDF
//! path feeds it through [`paginate`] to obtain placed lines on fixed-size
//! pages; the DOCX path consumes the blocks directly and lets the word
//! processor reflow them.

pub mod geometry;
pub mod metrics;
pub mod paginate;
pub mod traverse;
pub mod wrap;

pub use geometry::{LineStyle, PageGeometry, Typography};
pub use paginate::{Layout, PlacedLine, paginate};
pub use traverse::{Block, BlockSink, walk};
