/// Positional addressing of editable text inside a document.
use smallvec::SmallVec;

/// Index path from the document root down to a section.
///
/// `[2]` is the third top-level section, `[2, 0]` its first subsection.
pub type IndexPath = SmallVec<[usize; 4]>;

/// Location of an editable piece of text.
///
/// Sections have no stored identity; they are addressed by their position in
/// the tree at the time the edit is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditPath {
    /// The document title
    Title,
    /// The lead paragraph rendered before the sections
    Overview,
    /// Content of the top-level section at the given index
    Section(usize),
    /// Content of subsection `j` of top-level section `i`
    Subsection(usize, usize),
    /// Content of a section at an arbitrary depth
    Nested(IndexPath),
}

impl EditPath {
    /// Build a [`EditPath::Nested`] path from a sequence of indices.
    pub fn nested(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::Nested(indices.into_iter().collect())
    }

    /// Section index path addressed by this edit, if it targets section content.
    pub fn section_indices(&self) -> Option<IndexPath> {
        match self {
            Self::Title | Self::Overview => None,
            Self::Section(i) => Some(SmallVec::from_slice(&[*i])),
            Self::Subsection(i, j) => Some(SmallVec::from_slice(&[*i, *j])),
            Self::Nested(indices) => Some(indices.clone()),
        }
    }
}
