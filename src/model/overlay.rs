/// Working copy of a document with a record of the edits made to it.
use super::document::Document;
use super::path::EditPath;

/// A single text replacement applied to an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub path: EditPath,
    pub text: String,
}

/// An editable deep copy of a [`Document`].
///
/// Edits mutate only the working copy; the document the overlay was created
/// from is never touched. [`EditableOverlay::commit`] hands back the edited
/// value so the owner can replace its canonical document in one step.
///
/// # Examples
///
/// ```
/// use longan::model::{Document, EditPath, EditableOverlay, Section};
///
/// let canonical = Document::new("Guide").with_section(Section::new("One"));
/// let overlay = EditableOverlay::new(&canonical)
///     .with_edit(EditPath::Section(0), "New text");
///
/// assert!(canonical.sections[0].content.is_none());
/// let committed = overlay.commit();
/// assert_eq!(committed.sections[0].content.as_deref(), Some("New text"));
/// ```
#[derive(Debug, Clone)]
pub struct EditableOverlay {
    working: Document,
    edits: Vec<Edit>,
}

impl EditableOverlay {
    /// Start editing a deep copy of `canonical`.
    pub fn new(canonical: &Document) -> Self {
        Self {
            working: canonical.clone(),
            edits: Vec::new(),
        }
    }

    /// The live, edited value.
    #[inline]
    pub fn document(&self) -> &Document {
        &self.working
    }

    /// Edits applied so far, oldest first.
    #[inline]
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Whether any edit has been applied.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Replace the text at `path`.
    ///
    /// Returns `false` and leaves the overlay untouched when `path` does not
    /// address an existing section.
    pub fn apply_edit(&mut self, path: EditPath, text: impl Into<String>) -> bool {
        let text = text.into();
        let applied = match &path {
            EditPath::Title => {
                self.working.title = text.clone();
                true
            },
            EditPath::Overview => {
                self.working.overview = Some(text.clone());
                true
            },
            EditPath::Section(_) | EditPath::Subsection(..) | EditPath::Nested(_) => {
                let target = path
                    .section_indices()
                    .and_then(|indices| self.working.section_at_mut(&indices));
                match target {
                    Some(section) => {
                        section.content = Some(text.clone());
                        true
                    },
                    None => false,
                }
            },
        };

        if applied {
            self.edits.push(Edit { path, text });
        } else {
            tracing::debug!(?path, "ignoring edit to a missing section");
        }
        applied
    }

    /// Owned form of [`apply_edit`](Self::apply_edit).
    pub fn with_edit(mut self, path: EditPath, text: impl Into<String>) -> Self {
        self.apply_edit(path, text);
        self
    }

    /// Drop all edits and start over from a fresh copy of `canonical`.
    pub fn reset(&mut self, canonical: &Document) {
        self.working = canonical.clone();
        self.edits.clear();
    }

    /// Finish editing and return the edited document.
    pub fn commit(self) -> Document {
        self.working
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::Section;
    use proptest::prelude::*;

    fn sample() -> Document {
        Document::new("Guide")
            .with_overview("Intro")
            .with_section(
                Section::new("One")
                    .with_content("alpha")
                    .with_subsection(Section::new("One.A").with_content("beta")),
            )
            .with_section(Section::new("Two"))
    }

    #[test]
    fn test_commit_without_edits_equals_original() {
        let doc = sample();
        let overlay = EditableOverlay::new(&doc);
        assert!(!overlay.is_dirty());
        assert_eq!(overlay.commit(), doc);
    }

    #[test]
    fn test_edit_each_path_kind() {
        let doc = sample();
        let mut overlay = EditableOverlay::new(&doc);
        assert!(overlay.apply_edit(EditPath::Title, "Manual"));
        assert!(overlay.apply_edit(EditPath::Overview, "Summary"));
        assert!(overlay.apply_edit(EditPath::Section(1), "gamma"));
        assert!(overlay.apply_edit(EditPath::Subsection(0, 0), "delta"));
        assert_eq!(overlay.edits().len(), 4);

        let edited = overlay.commit();
        assert_eq!(edited.title, "Manual");
        assert_eq!(edited.overview.as_deref(), Some("Summary"));
        assert_eq!(edited.sections[1].content.as_deref(), Some("gamma"));
        assert_eq!(edited.sections[0].subsections[0].content.as_deref(), Some("delta"));
        // Untouched content survives.
        assert_eq!(edited.sections[0].content.as_deref(), Some("alpha"));
        assert_eq!(edited.sections[0].title, "One");
    }

    #[test]
    fn test_missing_path_is_noop() {
        let doc = sample();
        let mut overlay = EditableOverlay::new(&doc);
        assert!(!overlay.apply_edit(EditPath::Section(7), "x"));
        assert!(!overlay.apply_edit(EditPath::Subsection(1, 0), "x"));
        assert!(!overlay.apply_edit(EditPath::nested([0, 0, 0]), "x"));
        assert!(!overlay.apply_edit(EditPath::nested([]), "x"));
        assert!(!overlay.is_dirty());
        assert_eq!(overlay.document(), &doc);
    }

    #[test]
    fn test_reset_discards_edits() {
        let doc = sample();
        let mut overlay = EditableOverlay::new(&doc).with_edit(EditPath::Title, "changed");
        overlay.reset(&doc);
        assert!(!overlay.is_dirty());
        assert_eq!(overlay.document(), &doc);
    }

    proptest! {
        #[test]
        fn prop_edits_never_touch_canonical(
            edits in proptest::collection::vec((0usize..4, 0usize..3, ".{0,12}"), 0..16)
        ) {
            let canonical = sample();
            let snapshot = canonical.clone();
            let mut overlay = EditableOverlay::new(&canonical);
            for (kind, index, text) in edits {
                let path = match kind {
                    0 => EditPath::Title,
                    1 => EditPath::Overview,
                    2 => EditPath::Section(index),
                    _ => EditPath::Subsection(index, 0),
                };
                overlay.apply_edit(path, text);
            }
            prop_assert_eq!(&canonical, &snapshot);
        }
    }
}
