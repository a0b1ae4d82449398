//! # Page Mutations
//!
//! Structural edits on a Protypo page, addressed by tag id.
//!
//! Every mutation validates against the current page before touching it and
//! can produce its own inverse, which is what the undo stack records.
//!
//! ## Mutation Semantics
//!
//! ### InsertTag
//! - Inserted subtree must already carry ids, none of them in use
//! - Index is clamped to the end of the destination list
//!
//! ### MoveTag
//! - Index is interpreted after the tag has been detached
//! - Fails if the destination is the tag itself or one of its descendants
//!
//! ### RemoveTag
//! - Removes the tag and all descendants
//!
//! A `parent_id` of `None` addresses the top-level sequence.

use protypo_compiler::resolve;
use protypo_tree::{
    children_at_mut, collect_ids, contains_id, find_by_id, find_path, node_at_mut, ProtypoNode,
    TagMatch,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a subtree under `parent_id` at `index`
    InsertTag {
        parent_id: Option<String>,
        index: usize,
        tag: ProtypoNode,
    },

    /// Relocate a tag (with its subtree)
    MoveTag {
        tag_id: String,
        parent_id: Option<String>,
        index: usize,
    },

    RemoveTag {
        tag_id: String,
    },

    /// Set an attribute; `None` removes it
    SetAttribute {
        tag_id: String,
        name: String,
        value: Option<Value>,
    },

    /// Replace the payload of a text node
    UpdateText {
        tag_id: String,
        text: String,
    },

    /// Swap the whole page, used when the tree widget hands back a reordered tree
    ReplacePage {
        nodes: Vec<ProtypoNode>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Tag '{0}' cannot have children")]
    CannotHaveChildren(String),

    #[error("Tag '{0}' has no id")]
    MissingId(String),

    #[error("Id already in use: {0}")]
    DuplicateId(String),

    #[error("Tag {0} is not a text node")]
    NotText(String),
}

pub type MutationResult<T = ()> = Result<T, MutationError>;

/// True if a tag of this name accepts children. Text and unknown tags never do.
pub fn accepts_children(tag: &str) -> bool {
    resolve(tag).is_some_and(|handler| handler.can_have_children())
}

impl Mutation {
    /// Apply mutation to the page with validation
    pub fn apply(&self, page: &mut Vec<ProtypoNode>) -> MutationResult {
        self.validate(page)?;
        self.apply_unchecked(page)
    }

    /// Replay a recorded mutation from undo history. Structural checks still
    /// run, but a tag may return under a parent that does not accept children:
    /// it was already there before the edit.
    pub fn restore(&self, page: &mut Vec<ProtypoNode>) -> MutationResult {
        self.check(page, false)?;
        self.apply_unchecked(page)
    }

    fn apply_unchecked(&self, page: &mut Vec<ProtypoNode>) -> MutationResult {
        match self {
            Mutation::InsertTag { parent_id, index, tag } => {
                Self::insert(page, parent_id.as_deref(), *index, tag.clone())
            }

            Mutation::MoveTag { tag_id, parent_id, index } => {
                let node = Self::detach(page, tag_id)?;
                Self::insert(page, parent_id.as_deref(), *index, node)
            }

            Mutation::RemoveTag { tag_id } => Self::detach(page, tag_id).map(|_| ()),

            Mutation::SetAttribute { tag_id, name, value } => {
                Self::node_mut(page, tag_id)?.set_attr(name, value.clone());
                Ok(())
            }

            Mutation::UpdateText { tag_id, text } => {
                Self::node_mut(page, tag_id)?.text = Some(text.clone());
                Ok(())
            }

            Mutation::ReplacePage { nodes } => {
                *page = nodes.clone();
                Ok(())
            }
        }
    }

    /// Check structural constraints without modifying the page
    pub fn validate(&self, page: &[ProtypoNode]) -> MutationResult {
        self.check(page, true)
    }

    fn check(&self, page: &[ProtypoNode], children_policy: bool) -> MutationResult {
        match self {
            Mutation::InsertTag { parent_id, tag, .. } => {
                if !tag.has_id() {
                    return Err(MutationError::MissingId(tag.tag.clone()));
                }
                for id in collect_ids(std::slice::from_ref(tag)) {
                    if find_by_id(page, &id).is_some() {
                        return Err(MutationError::DuplicateId(id));
                    }
                }
                Self::validate_parent(page, parent_id.as_deref(), children_policy)
            }

            Mutation::MoveTag { tag_id, parent_id, .. } => {
                let found = Self::find(page, tag_id)?;
                if let Some(parent_id) = parent_id {
                    if contains_id(found.node, parent_id) {
                        return Err(MutationError::CycleDetected);
                    }
                }
                Self::validate_parent(page, parent_id.as_deref(), children_policy)
            }

            Mutation::RemoveTag { tag_id } | Mutation::SetAttribute { tag_id, .. } => {
                Self::find(page, tag_id).map(|_| ())
            }

            Mutation::UpdateText { tag_id, .. } => {
                let found = Self::find(page, tag_id)?;
                if !found.node.is_text() {
                    return Err(MutationError::NotText(tag_id.clone()));
                }
                Ok(())
            }

            Mutation::ReplacePage { .. } => Ok(()),
        }
    }

    /// Build the mutation that undoes `self`. Must be called before applying.
    pub fn to_inverse(&self, page: &[ProtypoNode]) -> MutationResult<Mutation> {
        match self {
            Mutation::InsertTag { tag, .. } => {
                let tag_id = tag
                    .id()
                    .ok_or_else(|| MutationError::MissingId(tag.tag.clone()))?;
                Ok(Mutation::RemoveTag {
                    tag_id: tag_id.to_string(),
                })
            }

            Mutation::MoveTag { tag_id, .. } => {
                let found = Self::find(page, tag_id)?;
                Ok(Mutation::MoveTag {
                    tag_id: tag_id.clone(),
                    parent_id: Self::parent_id_of(&found)?,
                    index: found.position,
                })
            }

            Mutation::RemoveTag { tag_id } => {
                let found = Self::find(page, tag_id)?;
                Ok(Mutation::InsertTag {
                    parent_id: Self::parent_id_of(&found)?,
                    index: found.position,
                    tag: found.node.clone(),
                })
            }

            Mutation::SetAttribute { tag_id, name, .. } => {
                let found = Self::find(page, tag_id)?;
                Ok(Mutation::SetAttribute {
                    tag_id: tag_id.clone(),
                    name: name.clone(),
                    value: found.node.attr(name).cloned(),
                })
            }

            Mutation::UpdateText { tag_id, .. } => {
                let found = Self::find(page, tag_id)?;
                Ok(Mutation::UpdateText {
                    tag_id: tag_id.clone(),
                    text: found.node.text_content().to_string(),
                })
            }

            Mutation::ReplacePage { .. } => Ok(Mutation::ReplacePage {
                nodes: page.to_vec(),
            }),
        }
    }

    fn find<'a>(page: &'a [ProtypoNode], tag_id: &str) -> MutationResult<TagMatch<'a>> {
        find_by_id(page, tag_id).ok_or_else(|| MutationError::TagNotFound(tag_id.to_string()))
    }

    fn parent_id_of(found: &TagMatch<'_>) -> MutationResult<Option<String>> {
        match found.parent {
            None => Ok(None),
            Some(parent) => parent
                .id()
                .map(|id| Some(id.to_string()))
                .ok_or_else(|| MutationError::MissingId(parent.tag.clone())),
        }
    }

    fn validate_parent(
        page: &[ProtypoNode],
        parent_id: Option<&str>,
        children_policy: bool,
    ) -> MutationResult {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };
        let parent = find_by_id(page, parent_id)
            .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?
            .node;
        if children_policy && !accepts_children(&parent.tag) {
            return Err(MutationError::CannotHaveChildren(parent.tag.clone()));
        }
        Ok(())
    }

    fn node_mut<'a>(page: &'a mut [ProtypoNode], tag_id: &str) -> MutationResult<&'a mut ProtypoNode> {
        let path = find_path(page, tag_id).ok_or_else(|| MutationError::TagNotFound(tag_id.to_string()))?;
        node_at_mut(page, &path).ok_or_else(|| MutationError::TagNotFound(tag_id.to_string()))
    }

    fn insert(
        page: &mut Vec<ProtypoNode>,
        parent_id: Option<&str>,
        index: usize,
        node: ProtypoNode,
    ) -> MutationResult {
        let path = match parent_id {
            Some(parent_id) => find_path(page, parent_id)
                .ok_or_else(|| MutationError::ParentNotFound(parent_id.to_string()))?,
            None => Vec::new(),
        };
        let children = children_at_mut(page, &path)
            .ok_or_else(|| MutationError::ParentNotFound(parent_id.unwrap_or_default().to_string()))?;
        let index = index.min(children.len());
        children.insert(index, node);
        Ok(())
    }

    /// Remove a tag from wherever it lives. A parent left without children
    /// drops its list entirely so undo restores the original shape.
    fn detach(page: &mut Vec<ProtypoNode>, tag_id: &str) -> MutationResult<ProtypoNode> {
        let path = find_path(page, tag_id).ok_or_else(|| MutationError::TagNotFound(tag_id.to_string()))?;
        let Some((&index, parent_path)) = path.split_last() else {
            return Err(MutationError::TagNotFound(tag_id.to_string()));
        };

        if parent_path.is_empty() {
            return Ok(page.remove(index));
        }

        let parent = node_at_mut(page, parent_path)
            .ok_or_else(|| MutationError::TagNotFound(tag_id.to_string()))?;
        let children = parent.children_mut();
        let node = children.remove(index);
        if children.is_empty() {
            parent.children = None;
        }
        Ok(node)
    }
}
