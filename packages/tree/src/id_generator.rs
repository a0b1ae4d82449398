use crate::ast::ProtypoNode;
use crate::visitor::{walk_node, walk_node_mut, walk_nodes, walk_nodes_mut, Visitor, VisitorMut};
use rand::Rng;

pub const ID_PREFIX: &str = "tag_";

const ID_MIN: u32 = 10_000_000;
const ID_MAX: u32 = 99_999_999;

/// Source of fresh node ids
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// Uniformly random ids. Collisions are possible and not checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        let number = rand::thread_rng().gen_range(ID_MIN..=ID_MAX);
        format!("{}{}", ID_PREFIX, number)
    }
}

/// Sequential ids in the same `tag_` + 8 digit format
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    count: u32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Number of ids handed out so far
    pub fn count(&self) -> u32 {
        self.count
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let number = ID_MIN + self.count % (ID_MAX - ID_MIN + 1);
        self.count += 1;
        format!("{}{}", ID_PREFIX, number)
    }
}

/// Generate a random node id
pub fn generate_id() -> String {
    RandomIds.next_id()
}

/// True if `id` has the `tag_` + 8 digit shape
pub fn is_generated_id(id: &str) -> bool {
    id.strip_prefix(ID_PREFIX)
        .and_then(|digits| digits.parse::<u32>().ok().map(|n| (digits, n)))
        .is_some_and(|(digits, n)| digits.len() == 8 && (ID_MIN..=ID_MAX).contains(&n))
}

/// Assign random ids to every node lacking one (or to every node when `force`)
pub fn assign_ids(nodes: &mut [ProtypoNode], force: bool) {
    assign_ids_with(nodes, force, &mut RandomIds);
}

pub fn assign_ids_with<S: IdSource + ?Sized>(nodes: &mut [ProtypoNode], force: bool, source: &mut S) {
    let mut assigner = IdAssigner { force, source };
    walk_nodes_mut(&mut assigner, nodes);
}

/// Give a fresh id to every node whose current id is `taken`. Returns how many
/// ids were replaced.
pub fn replace_ids_with<S, F>(nodes: &mut [ProtypoNode], taken: F, source: &mut S) -> usize
where
    S: IdSource + ?Sized,
    F: Fn(&str) -> bool,
{
    let mut replacer = IdReplacer {
        taken,
        source,
        replaced: 0,
    };
    walk_nodes_mut(&mut replacer, nodes);
    replacer.replaced
}

/// Every id in the tree, in pre-order
pub fn collect_ids(nodes: &[ProtypoNode]) -> Vec<String> {
    let mut collector = IdCollector { ids: Vec::new() };
    walk_nodes(&mut collector, nodes);
    collector.ids
}

struct IdAssigner<'a, S: ?Sized> {
    force: bool,
    source: &'a mut S,
}

impl<S: IdSource + ?Sized> VisitorMut for IdAssigner<'_, S> {
    fn visit_node_mut(&mut self, node: &mut ProtypoNode) {
        if self.force || !node.has_id() {
            node.id = Some(self.source.next_id());
        }
        walk_node_mut(self, node);
    }
}

struct IdReplacer<'a, S: ?Sized, F> {
    taken: F,
    source: &'a mut S,
    replaced: usize,
}

impl<S: IdSource + ?Sized, F: Fn(&str) -> bool> VisitorMut for IdReplacer<'_, S, F> {
    fn visit_node_mut(&mut self, node: &mut ProtypoNode) {
        if node.id().is_some_and(|id| (self.taken)(id)) {
            node.id = Some(self.source.next_id());
            self.replaced += 1;
        }
        walk_node_mut(self, node);
    }
}

struct IdCollector {
    ids: Vec<String>,
}

impl Visitor for IdCollector {
    fn visit_node(&mut self, node: &ProtypoNode) {
        if let Some(id) = node.id() {
            self.ids.push(id.to_string());
        }
        walk_node(self, node);
    }
}
