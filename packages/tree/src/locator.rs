//! Locating nodes by id inside a Protypo tree.
//!
//! Lookups return values only; there is no shared scratch state, so every
//! call starts fresh.

use crate::ast::ProtypoNode;

/// Index path from the top-level sequence down to a node
pub type TreePath = Vec<usize>;

/// Result of a successful id lookup
#[derive(Debug, Clone, Copy)]
pub struct TagMatch<'a> {
    pub node: &'a ProtypoNode,
    /// Immediate structural parent, `None` for top-level nodes
    pub parent: Option<&'a ProtypoNode>,
    /// Index within the parent's children (or the top-level sequence)
    pub position: usize,
}

/// Depth-first, pre-order search for the first node carrying `id`
pub fn find_by_id<'a>(nodes: &'a [ProtypoNode], id: &str) -> Option<TagMatch<'a>> {
    find_in(nodes, id, None)
}

fn find_in<'a>(
    nodes: &'a [ProtypoNode],
    id: &str,
    parent: Option<&'a ProtypoNode>,
) -> Option<TagMatch<'a>> {
    for (position, node) in nodes.iter().enumerate() {
        if node.id() == Some(id) {
            return Some(TagMatch {
                node,
                parent,
                position,
            });
        }
        if let Some(found) = find_in(node.children(), id, Some(node)) {
            return Some(found);
        }
    }
    None
}

/// Same search order as [`find_by_id`], returning the index path
pub fn find_path(nodes: &[ProtypoNode], id: &str) -> Option<TreePath> {
    for (position, node) in nodes.iter().enumerate() {
        if node.id() == Some(id) {
            return Some(vec![position]);
        }
        if let Some(mut path) = find_path(node.children(), id) {
            path.insert(0, position);
            return Some(path);
        }
    }
    None
}

pub fn node_at<'a>(nodes: &'a [ProtypoNode], path: &[usize]) -> Option<&'a ProtypoNode> {
    let (first, rest) = path.split_first()?;
    let node = nodes.get(*first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        node_at(node.children(), rest)
    }
}

pub fn node_at_mut<'a>(nodes: &'a mut [ProtypoNode], path: &[usize]) -> Option<&'a mut ProtypoNode> {
    let (first, rest) = path.split_first()?;
    let node = nodes.get_mut(*first)?;
    if rest.is_empty() {
        Some(node)
    } else {
        node_at_mut(node.children.as_deref_mut()?, rest)
    }
}

/// Children list of the node at `parent`, or the top-level list for an empty path.
/// A node without a children list gets an empty one.
pub fn children_at_mut<'a>(
    nodes: &'a mut Vec<ProtypoNode>,
    parent: &[usize],
) -> Option<&'a mut Vec<ProtypoNode>> {
    if parent.is_empty() {
        return Some(nodes);
    }
    node_at_mut(nodes, parent).map(ProtypoNode::children_mut)
}

/// True if `id` belongs to `node` or any of its descendants
pub fn contains_id(node: &ProtypoNode, id: &str) -> bool {
    node.id() == Some(id) || node.children().iter().any(|child| contains_id(child, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Vec<ProtypoNode> {
        vec![
            ProtypoNode::new("div").with_id("a").with_children(vec![
                ProtypoNode::new("span").with_id("b"),
                ProtypoNode::new("form").with_id("c").with_children(vec![
                    ProtypoNode::new("input").with_id("d"),
                    ProtypoNode::new("button").with_id("e"),
                ]),
            ]),
            ProtypoNode::new("p").with_id("f"),
        ]
    }

    #[test]
    fn test_find_top_level() {
        let nodes = tree();
        let found = find_by_id(&nodes, "f").unwrap();
        assert_eq!(found.node.tag, "p");
        assert!(found.parent.is_none());
        assert_eq!(found.position, 1);
    }

    #[test]
    fn test_find_nested_reports_immediate_parent() {
        let nodes = tree();
        let found = find_by_id(&nodes, "e").unwrap();
        assert_eq!(found.node.tag, "button");
        assert_eq!(found.parent.and_then(|p| p.id()), Some("c"));
        assert_eq!(found.position, 1);
    }

    #[test]
    fn test_find_after_failed_subtree() {
        let nodes = tree();
        // The search descends into "a" and fails before reaching "f"
        let found = find_by_id(&nodes, "f").unwrap();
        assert!(found.parent.is_none());
    }

    #[test]
    fn test_find_missing() {
        let nodes = tree();
        assert!(find_by_id(&nodes, "zzz").is_none());
        assert!(find_by_id(&nodes, "").is_none());
        assert!(find_path(&nodes, "zzz").is_none());
    }

    #[test]
    fn test_repeated_lookups_are_independent() {
        let nodes = tree();
        assert!(find_by_id(&nodes, "d").is_some());
        assert!(find_by_id(&nodes, "missing").is_none());
        assert_eq!(find_by_id(&nodes, "b").unwrap().position, 0);
    }

    #[test]
    fn test_find_path_and_node_at() {
        let mut nodes = tree();
        let path = find_path(&nodes, "d").unwrap();
        assert_eq!(path, vec![0, 1, 0]);
        assert_eq!(node_at(&nodes, &path).unwrap().tag, "input");

        node_at_mut(&mut nodes, &path).unwrap().tag = "textarea".to_string();
        assert_eq!(find_by_id(&nodes, "d").unwrap().node.tag, "textarea");
    }

    #[test]
    fn test_children_at_mut_creates_list() {
        let mut nodes = tree();
        let children = children_at_mut(&mut nodes, &[1]).unwrap();
        assert!(children.is_empty());
        children.push(ProtypoNode::new("strong").with_id("g"));

        assert_eq!(find_path(&nodes, "g").unwrap(), vec![1, 0]);
        assert_eq!(children_at_mut(&mut nodes, &[]).unwrap().len(), 2);
    }

    #[test]
    fn test_contains_id() {
        let nodes = tree();
        assert!(contains_id(&nodes[0], "e"));
        assert!(contains_id(&nodes[0], "a"));
        assert!(!contains_id(&nodes[0], "f"));
    }
}
