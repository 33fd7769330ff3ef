//! XML helpers shared by the WordprocessingML writer.

mod escape;

pub use escape::{escape_xml_attr, escape_xml_text, is_xml_char};
