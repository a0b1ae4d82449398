//! Error types for the editor

use protypo_tree::TreeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Template error: {0}")]
    Template(#[from] crate::templates::TemplateError),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("No handler for tag '{0}'")]
    UnknownTag(String),
}
