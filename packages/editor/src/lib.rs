//! # Protypo Editor
//!
//! Editing core of the visual page constructor.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ tree: Protypo JSON → ProtypoNode, ids       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession                         │
//! │  - select / add / move / copy / remove      │
//! │  - mutations with undo/redo                 │
//! │  - drag and drop positioning                │
//! │  - visual tree for the tree widget          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler: page → template source on save    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use protypo_editor::{DropPosition, EditSession};
//!
//! let mut session = EditSession::from_json(r#"[{"tag":"div","id":"root"}]"#)?;
//! let button = session.add_sample("button", Some("Send"), Some("root"), DropPosition::Inside)?;
//! session.select_tag(&button)?;
//!
//! let tree = session.visual_tree();
//! let source = session.generate_source();
//! ```

pub mod drop_position;
mod errors;
mod mutations;
pub mod properties;
mod session;
pub mod templates;
mod undo_stack;
pub mod visual_tree;

pub use drop_position::{
    resolve_drop_position, resolve_drop_position_with, BoundingBox, DragSession, DropPosition, HoverThrottle,
    Point,
};
pub use errors::EditorError;
pub use mutations::{accepts_children, Mutation, MutationError, MutationResult};
pub use properties::{initial_value, update_class_list, ClassProperty};
pub use session::{EditSession, EditorOptions};
pub use templates::{instantiate_template, StarterTemplate, TemplateError};
pub use undo_stack::{MutationBatch, UndoStack};
pub use visual_tree::{from_visual_tree, to_visual_tree, truncate_subtitle, VisualTreeNode};
