use crate::ast::ProtypoNode;

/// Visitor pattern for traversing Protypo trees immutably
///
/// Default implementations walk the entire tree in pre-order.
/// Override specific visit_* methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_node(&mut self, node: &ProtypoNode) {
        walk_node(self, node);
    }
}

/// Mutable visitor pattern for transforming Protypo trees in place
pub trait VisitorMut: Sized {
    fn visit_node_mut(&mut self, node: &mut ProtypoNode) {
        walk_node_mut(self, node);
    }
}

pub fn walk_nodes<V: Visitor>(visitor: &mut V, nodes: &[ProtypoNode]) {
    for node in nodes {
        visitor.visit_node(node);
    }
}

pub fn walk_node<V: Visitor>(visitor: &mut V, node: &ProtypoNode) {
    for child in node.children() {
        visitor.visit_node(child);
    }
}

pub fn walk_nodes_mut<V: VisitorMut>(visitor: &mut V, nodes: &mut [ProtypoNode]) {
    for node in nodes {
        visitor.visit_node_mut(node);
    }
}

pub fn walk_node_mut<V: VisitorMut>(visitor: &mut V, node: &mut ProtypoNode) {
    if let Some(children) = &mut node.children {
        for child in children {
            visitor.visit_node_mut(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TagCounter {
        tags: Vec<String>,
    }

    impl Visitor for TagCounter {
        fn visit_node(&mut self, node: &ProtypoNode) {
            self.tags.push(node.tag.clone());
            walk_node(self, node);
        }
    }

    struct Uppercase;

    impl VisitorMut for Uppercase {
        fn visit_node_mut(&mut self, node: &mut ProtypoNode) {
            node.tag = node.tag.to_uppercase();
            walk_node_mut(self, node);
        }
    }

    fn sample() -> Vec<ProtypoNode> {
        vec![
            ProtypoNode::new("div")
                .with_child(ProtypoNode::new("span").with_child(ProtypoNode::text_node("a")))
                .with_child(ProtypoNode::new("em")),
            ProtypoNode::new("p"),
        ]
    }

    #[test]
    fn test_walk_is_pre_order() {
        let mut counter = TagCounter { tags: vec![] };
        walk_nodes(&mut counter, &sample());
        assert_eq!(counter.tags, vec!["div", "span", "text", "em", "p"]);
    }

    #[test]
    fn test_walk_mut_reaches_every_node() {
        let mut nodes = sample();
        walk_nodes_mut(&mut Uppercase, &mut nodes);

        let mut counter = TagCounter { tags: vec![] };
        walk_nodes(&mut counter, &nodes);
        assert_eq!(counter.tags, vec!["DIV", "SPAN", "TEXT", "EM", "P"]);
    }
}
