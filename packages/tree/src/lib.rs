//! # Protypo Tree
//!
//! Data model for Protypo page trees: an array of tagged nodes with
//! attributes, optional text payload, and children.
//!
//! ```text
//! [
//!   { "tag": "div", "attr": { "class": "panel" }, "children": [
//!       { "tag": "text", "text": "Money transfer" }
//!   ] }
//! ]
//! ```
//!
//! This crate owns the pieces every other layer needs:
//! - [`ProtypoNode`] and JSON loading ([`parse`], [`to_json`])
//! - id allocation ([`assign_ids`], [`generate_id`])
//! - id lookup ([`find_by_id`], [`find_path`])
//! - tree visitors

pub mod ast;
pub mod error;
pub mod id_generator;
pub mod locator;
pub mod visitor;

pub use ast::{Attributes, ProtypoNode, TEXT_TAG};
pub use error::{TreeError, TreeResult};
pub use id_generator::{
    assign_ids, assign_ids_with, collect_ids, generate_id, is_generated_id, replace_ids_with, IdSource,
    RandomIds, SequentialIds,
};
pub use locator::{
    children_at_mut, contains_id, find_by_id, find_path, node_at, node_at_mut, TagMatch, TreePath,
};
pub use visitor::{Visitor, VisitorMut};

use serde_json::Value;

/// Parse a Protypo tree from JSON.
///
/// Accepts either an array of nodes or a single node object. `null`
/// entries are skipped. Ids are left as found; call [`assign_ids`] to fill
/// in missing ones.
pub fn parse(source: &str) -> TreeResult<Vec<ProtypoNode>> {
    from_value(serde_json::from_str(source)?)
}

pub fn from_value(value: Value) -> TreeResult<Vec<ProtypoNode>> {
    match value {
        Value::Array(items) => {
            let mut nodes = Vec::with_capacity(items.len());
            for item in items {
                if item.is_null() {
                    continue;
                }
                nodes.push(serde_json::from_value(item)?);
            }
            Ok(nodes)
        }
        Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        other => Err(TreeError::UnexpectedShape {
            found: value_kind(&other),
        }),
    }
}

/// Serialize a tree to pretty JSON
pub fn to_json(nodes: &[ProtypoNode]) -> TreeResult<String> {
    Ok(serde_json::to_string_pretty(nodes)?)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
