/// Canonical document tree.
use crate::common::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// The root content value: title, optional lead paragraph and ordered sections.
///
/// The tree is strictly owned; sections never refer back to their parents.
///
/// # Examples
///
/// ```
/// use longan::model::{Document, Section};
///
/// let doc = Document::new("Handbook")
///     .with_overview("What this handbook covers")
///     .with_section(Section::new("Chapter 1").with_content("First steps"));
/// assert_eq!(doc.section_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document title; required for a meaningful export filename
    #[serde(default)]
    pub title: String,
    /// Optional lead paragraph rendered before the sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    /// Top-level sections in display order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sections: Vec<Section>,
}

/// A titled content node with optional nested subsections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text
    #[serde(default)]
    pub title: String,
    /// Free text, rendered as one paragraph; may contain newlines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Nested sections in display order
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subsections: Vec<Section>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Section>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Section>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Returns the text when it contains anything besides whitespace.
#[inline]
pub(crate) fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

impl Document {
    /// Create a document with the given title and no content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            overview: None,
            sections: Vec::new(),
        }
    }

    /// Parse a document from the JSON shape produced by the generation step:
    /// `{ "title": ..., "overview": ..., "sections": [{ "title", "content", "subsections" }] }`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the document back to its JSON wire shape.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Set the lead paragraph.
    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    /// Append a top-level section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// The title trimmed of surrounding whitespace, or `None` when it is blank.
    pub fn export_title(&self) -> Option<&str> {
        let title = self.title.trim();
        (!title.is_empty()).then_some(title)
    }

    /// The overview when it has visible text.
    pub fn overview_text(&self) -> Option<&str> {
        non_blank(self.overview.as_deref())
    }

    /// Check the document for problems that degrade an export.
    ///
    /// None of the returned problems stop an export; they are reported so
    /// callers can warn the user.
    pub fn validate(&self) -> Vec<Error> {
        let mut problems = Vec::new();
        if self.export_title().is_none() {
            problems.push(Error::InvalidDocument(
                "document has no title; exports fall back to \"document\"".to_string(),
            ));
        }
        problems
    }

    /// Total number of sections at every depth.
    pub fn section_count(&self) -> usize {
        self.sections.iter().map(Section::subtree_len).sum()
    }

    /// Deepest section nesting level (top-level sections are depth 1).
    pub fn depth(&self) -> usize {
        self.sections
            .iter()
            .map(Section::subtree_depth)
            .max()
            .unwrap_or(0)
    }

    /// Look up a section by its index path from the root.
    pub fn section_at(&self, path: &[usize]) -> Option<&Section> {
        let (first, rest) = path.split_first()?;
        let mut section = self.sections.get(*first)?;
        for index in rest {
            section = section.subsections.get(*index)?;
        }
        Some(section)
    }

    pub(crate) fn section_at_mut(&mut self, path: &[usize]) -> Option<&mut Section> {
        let (first, rest) = path.split_first()?;
        let mut section = self.sections.get_mut(*first)?;
        for index in rest {
            section = section.subsections.get_mut(*index)?;
        }
        Some(section)
    }
}

impl Section {
    /// Create a section with a heading and no content.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: None,
            subsections: Vec::new(),
        }
    }

    /// Set the paragraph text.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Append a nested section.
    pub fn with_subsection(mut self, section: Section) -> Self {
        self.subsections.push(section);
        self
    }

    /// The content when it has visible text.
    pub fn content_text(&self) -> Option<&str> {
        non_blank(self.content.as_deref())
    }

    fn subtree_len(&self) -> usize {
        1 + self
            .subsections
            .iter()
            .map(Section::subtree_len)
            .sum::<usize>()
    }

    fn subtree_depth(&self) -> usize {
        1 + self
            .subsections
            .iter()
            .map(Section::subtree_depth)
            .max()
            .unwrap_or(0)
    }
}
