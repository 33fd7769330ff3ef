use crate::common::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output formats the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub const fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            },
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    /// Parse `pdf` or `docx`, ignoring case and a leading dot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.');
        if name.eq_ignore_ascii_case("pdf") {
            Ok(ExportFormat::Pdf)
        } else if name.eq_ignore_ascii_case("docx") {
            Ok(ExportFormat::Docx)
        } else {
            Err(Error::UnsupportedFormat(s.to_string()))
        }
    }
}

/// Characters that may not appear in a download filename.
#[inline]
fn is_forbidden(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

/// Filename for an export of a document titled `title`.
///
/// A blank title falls back to `document`; characters that are illegal in
/// file names are replaced by `_`.
pub fn export_filename(title: Option<&str>, format: ExportFormat) -> String {
    let stem = title.map(str::trim).filter(|t| !t.is_empty()).unwrap_or("document");
    let stem: String = stem
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    format!("{}.{}", stem, format.extension())
}
