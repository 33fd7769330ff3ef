/// Writers for the WordprocessingML parts of a generated document.
pub mod doc;
pub mod paragraph;
pub mod run;
pub mod section;
pub mod style;

pub use doc::DocxDocument;
pub use paragraph::Paragraph;
pub use run::Run;
pub use section::SectionProperties;
pub use style::{MAX_HEADING_LEVEL, ParagraphStyle, StyleSheet, heading_style_id};
