//! Document model and editable overlay.
//!
//! The [`Document`] tree is the canonical value handed over by the generation
//! step. Editing happens on an [`EditableOverlay`], a deep working copy plus
//! the list of edits applied to it, which is committed back to the canonical
//! value only on an explicit save. [`DocumentHandle`] ties the two together
//! for callers that drive an edit/cancel/save cycle.

pub mod document;
pub mod handle;
pub mod overlay;
pub mod path;

pub use document::{Document, Section};
pub use handle::DocumentHandle;
pub use overlay::{Edit, EditableOverlay};
pub use path::{EditPath, IndexPath};
