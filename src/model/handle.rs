/// Canonical document plus an optional in-progress edit.
use super::document::Document;
use super::overlay::EditableOverlay;
use super::path::EditPath;

/// Owner of a canonical [`Document`] and its edit session.
///
/// Mirrors the view/edit cycle of the surrounding application: entering edit
/// mode clones the canonical document, cancelling throws the clone away and
/// saving replaces the canonical document with the edited one.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    canonical: Document,
    overlay: Option<EditableOverlay>,
}

impl DocumentHandle {
    pub fn new(document: Document) -> Self {
        Self {
            canonical: document,
            overlay: None,
        }
    }

    /// The committed document.
    #[inline]
    pub fn canonical(&self) -> &Document {
        &self.canonical
    }

    /// The value exports should read: the live overlay while editing,
    /// otherwise the canonical document.
    pub fn view(&self) -> &Document {
        self.overlay
            .as_ref()
            .map(EditableOverlay::document)
            .unwrap_or(&self.canonical)
    }

    #[inline]
    pub fn is_editing(&self) -> bool {
        self.overlay.is_some()
    }

    /// Whether the current edit session holds unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.overlay.as_ref().is_some_and(EditableOverlay::is_dirty)
    }

    /// Enter edit mode. Returns `false` if an edit session is already open.
    pub fn begin_edit(&mut self) -> bool {
        if self.overlay.is_some() {
            return false;
        }
        self.overlay = Some(EditableOverlay::new(&self.canonical));
        true
    }

    /// Apply an edit to the open session.
    ///
    /// Returns `false` when not editing or when `path` does not exist.
    pub fn edit(&mut self, path: EditPath, text: impl Into<String>) -> bool {
        match self.overlay.as_mut() {
            Some(overlay) => overlay.apply_edit(path, text),
            None => false,
        }
    }

    /// Leave edit mode, discarding every change made since [`begin_edit`](Self::begin_edit).
    pub fn cancel_edit(&mut self) {
        if let Some(overlay) = self.overlay.take() {
            tracing::debug!(edits = overlay.edits().len(), "discarding edit session");
        }
    }

    /// Commit the open session into the canonical document.
    ///
    /// Returns `false` when there was nothing to save.
    pub fn save(&mut self) -> bool {
        match self.overlay.take() {
            Some(overlay) => {
                tracing::debug!(edits = overlay.edits().len(), "committing edit session");
                self.canonical = overlay.commit();
                true
            },
            None => false,
        }
    }

    /// Consume the handle, returning the canonical document.
    pub fn into_document(self) -> Document {
        self.canonical
    }
}

impl From<Document> for DocumentHandle {
    fn from(document: Document) -> Self {
        Self::new(document)
    }
}
