use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

/// Failure while rendering a single node. Generation isolates these per
/// subtree; they never abort the rest of the tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Malformed attribute '{attribute}' on '{tag}' (node {node_id}): {reason}")]
    MalformedAttribute {
        tag: String,
        node_id: String,
        attribute: String,
        reason: String,
    },

    #[error("Maximum nesting depth ({max_depth}) exceeded at '{tag}' (node {node_id})")]
    MaxDepthExceeded {
        tag: String,
        node_id: String,
        max_depth: usize,
    },
}
