//! Conversion between a Protypo page and the tree widget's node shape.
//!
//! A tag whose first child is text shows that text (truncated) next to its
//! name instead of as a separate row. The collapsed child is kept on the
//! visual node so [`from_visual_tree`] can put it back.

use protypo_tree::ProtypoNode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const SUBTITLE_LENGTH: usize = 24;
const OMISSION: &str = "...";

static SUBTITLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(",? +").expect("subtitle separator is a valid pattern"));

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisualTreeNode {
    /// Tag name, plus `": subtitle"` when there is one
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub children: Vec<VisualTreeNode>,
    pub expanded: bool,
    pub id: String,
    pub selected: bool,
    /// The source node without its children
    pub tag: ProtypoNode,
    /// Leading text child folded into the subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed_text: Option<ProtypoNode>,
}

/// Adapt a page for the tree widget, flagging the node whose id is `selected`
pub fn to_visual_tree(nodes: &[ProtypoNode], selected: Option<&str>) -> Vec<VisualTreeNode> {
    nodes.iter().map(|node| to_visual_node(node, selected)).collect()
}

fn to_visual_node(node: &ProtypoNode, selected: Option<&str>) -> VisualTreeNode {
    let mut subtitle = node.text.clone();
    let mut collapsed_text = None;
    let mut children = node.children();

    if let Some((first, rest)) = children.split_first() {
        if first.is_text() {
            subtitle = Some(truncate_subtitle(first.text_content()));
            collapsed_text = Some(first.clone());
            children = rest;
        }
    }

    let title = match subtitle.as_deref() {
        Some(subtitle) if !subtitle.is_empty() => format!("{}: {}", node.tag, subtitle),
        _ => node.tag.clone(),
    };

    let mut snapshot = node.clone();
    snapshot.children = None;

    VisualTreeNode {
        title,
        subtitle,
        children: to_visual_tree(children, selected),
        expanded: true,
        id: node.id().unwrap_or_default().to_string(),
        selected: selected.is_some_and(|id| node.id() == Some(id)),
        tag: snapshot,
        collapsed_text,
    }
}

/// Rebuild the page from (possibly reordered) visual nodes
pub fn from_visual_tree(visual: &[VisualTreeNode]) -> Vec<ProtypoNode> {
    visual.iter().map(from_visual_node).collect()
}

fn from_visual_node(visual: &VisualTreeNode) -> ProtypoNode {
    let mut node = visual.tag.clone();
    let mut children: Vec<ProtypoNode> = visual.collapsed_text.iter().cloned().collect();
    children.extend(from_visual_tree(&visual.children));

    node.children = (!children.is_empty()).then_some(children);
    node
}

/// Shorten `text` to [`SUBTITLE_LENGTH`] characters including the trailing
/// `...`, preferring to cut at a `,? +` boundary.
pub fn truncate_subtitle(text: &str) -> String {
    if text.chars().count() <= SUBTITLE_LENGTH {
        return text.to_string();
    }

    let end = SUBTITLE_LENGTH - OMISSION.len();
    let split = text
        .char_indices()
        .nth(end)
        .map_or(text.len(), |(offset, _)| offset);
    let (head, rest) = text.split_at(split);

    let cut = match SUBTITLE_SEPARATOR.find(rest) {
        Some(found) if found.start() == 0 => head.len(),
        _ => SUBTITLE_SEPARATOR
            .find_iter(head)
            .last()
            .map_or(head.len(), |found| found.start()),
    };

    format!("{}{}", &head[..cut], OMISSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> ProtypoNode {
        ProtypoNode::text_node(value)
    }

    /// Three levels, no container starts with a text child
    fn nested_page() -> Vec<ProtypoNode> {
        vec![
            ProtypoNode::new("div").with_id("a").with_children(vec![
                ProtypoNode::new("form").with_id("b").with_children(vec![
                    ProtypoNode::new("input").with_id("c"),
                    ProtypoNode::new("button").with_id("d"),
                    text("tail").with_id("e"),
                ]),
                ProtypoNode::new("span").with_id("f"),
            ]),
            ProtypoNode::new("p").with_id("g"),
            text("loose").with_id("h"),
        ]
    }

    fn page_shape(nodes: &[ProtypoNode], depth: usize, out: &mut Vec<(String, usize)>) {
        for node in nodes {
            out.push((node.id().unwrap_or_default().to_string(), depth));
            page_shape(node.children(), depth + 1, out);
        }
    }

    fn visual_shape(nodes: &[VisualTreeNode], depth: usize, out: &mut Vec<(String, usize)>) {
        for node in nodes {
            out.push((node.id.clone(), depth));
            visual_shape(&node.children, depth + 1, out);
        }
    }

    fn selected_ids(nodes: &[VisualTreeNode], out: &mut Vec<String>) {
        for node in nodes {
            if node.selected {
                out.push(node.id.clone());
            }
            selected_ids(&node.children, out);
        }
    }

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(truncate_subtitle("Money transfer"), "Money transfer");
        assert_eq!(truncate_subtitle("exactly twenty-four char"), "exactly twenty-four char");
    }

    #[test]
    fn test_truncate_at_last_separator() {
        assert_eq!(
            truncate_subtitle("Hello World, this is a long caption"),
            "Hello World, this is..."
        );
    }

    #[test]
    fn test_truncate_keeps_head_when_rest_starts_at_separator() {
        // 21 chars then " tail"
        assert_eq!(truncate_subtitle("abcdefghij klmnopqrst tail"), "abcdefghij klmnopqrst...");
    }

    #[test]
    fn test_truncate_without_separator() {
        assert_eq!(
            truncate_subtitle("abcdefghijklmnopqrstuvwxyz"),
            "abcdefghijklmnopqrstu..."
        );
    }

    #[test]
    fn test_leading_text_becomes_subtitle() {
        let nodes = vec![ProtypoNode::new("div")
            .with_id("d")
            .with_child(text("Hello World, this is a long caption").with_id("t"))
            .with_child(ProtypoNode::new("span").with_id("s"))];

        let tree = to_visual_tree(&nodes, None);
        assert_eq!(tree[0].title, "div: Hello World, this is...");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].id, "s");
        assert!(tree[0].tag.children.is_none());
    }

    #[test]
    fn test_text_node_uses_own_text() {
        let nodes = vec![text("Plain").with_id("t")];
        let tree = to_visual_tree(&nodes, None);
        assert_eq!(tree[0].title, "text: Plain");
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_empty_subtitle_is_not_shown() {
        let nodes = vec![ProtypoNode::new("p").with_id("p").with_child(text("").with_id("t"))];
        let tree = to_visual_tree(&nodes, None);
        assert_eq!(tree[0].title, "p");
    }

    #[test]
    fn test_round_trip_restores_collapsed_text() {
        let nodes = vec![ProtypoNode::new("form").with_id("f").with_children(vec![
            text("Caption").with_id("t"),
            ProtypoNode::new("input").with_id("i").with_attr("name", "x"),
        ])];

        let tree = to_visual_tree(&nodes, Some("i"));
        assert!(tree[0].children[0].selected);
        assert_eq!(from_visual_tree(&tree), nodes);
    }

    #[test]
    fn test_without_leading_text_every_node_maps_once() {
        let nodes = nested_page();
        let tree = to_visual_tree(&nodes, None);

        let mut expected = Vec::new();
        page_shape(&nodes, 0, &mut expected);
        let mut actual = Vec::new();
        visual_shape(&tree, 0, &mut actual);

        assert_eq!(actual.len(), 8);
        assert_eq!(actual, expected);
        assert!(actual.iter().any(|(_, depth)| *depth == 2));
        assert_eq!(from_visual_tree(&tree), nodes);
    }

    #[test]
    fn test_only_the_selected_node_is_flagged() {
        let nodes = nested_page();

        for target in ["a", "d", "e", "h"] {
            let mut selected = Vec::new();
            selected_ids(&to_visual_tree(&nodes, Some(target)), &mut selected);
            assert_eq!(selected, [target]);
        }

        let mut selected = Vec::new();
        selected_ids(&to_visual_tree(&nodes, None), &mut selected);
        assert!(selected.is_empty());
    }
}
