use std::fmt;

/// Stable identity of a tree node.
///
/// Identity equality (not structural equality) is used everywhere: two nodes
/// with identical names are still distinct entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id generator, injected at node construction time.
///
/// An id is minted exactly once per node and never regenerated.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// A node in the tree.
///
/// Each node exclusively owns its children; the selection layer refers to nodes
/// only by `NodeId`. The three flags (`opened`, `selected`, `marked`) are the
/// observable state the rendering layer reads back after each intent.
#[derive(Debug, Clone)]
pub struct TreeNode {
    id: NodeId,
    pub name: String,
    /// Display metadata, opaque to the selection logic.
    pub icon: Option<String>,
    pub children: Vec<TreeNode>,
    /// Expand/collapse state.
    pub opened: bool,
    /// True iff this node currently holds a selection entry.
    pub selected: bool,
    /// True iff this node is a proper ancestor of some selected node.
    pub marked: bool,
}

impl TreeNode {
    /// Create a new node with a freshly minted id.
    pub fn new(name: impl Into<String>, ids: &mut IdGenerator) -> Self {
        Self {
            id: ids.next_id(),
            name: name.into(),
            icon: None,
            children: Vec::new(),
            opened: false,
            selected: false,
            marked: false,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// True iff this node has at least one child.
    ///
    /// An empty `children` vec makes the node a leaf for selection purposes;
    /// any "loaded but empty" vs "not yet loaded" distinction is a presentation
    /// concern that does not exist here.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Lazy depth-first pre-order iterator over the subtree, excluding `self`.
    ///
    /// Recomputed on each call, so it stays correct when children mutate
    /// between calls.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Iterator returned by [`TreeNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// The tree: owns the root node and the id generator that minted it.
///
/// All lookups resolve a `NodeId` against the owned hierarchy by recursive
/// walk; the tree never hands out owning references.
#[derive(Debug)]
pub struct Tree {
    root: TreeNode,
    #[allow(dead_code)]
    ids: IdGenerator,
}

impl Tree {
    pub fn new(root: TreeNode, ids: IdGenerator) -> Self {
        Self { root, ids }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn root_id(&self) -> NodeId {
        self.root.id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Find a node by id.
    pub fn get(&self, id: NodeId) -> Option<&TreeNode> {
        Self::find_node(&self.root, id)
    }

    /// Find a mutable reference to a node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut TreeNode> {
        Self::find_node_mut(&mut self.root, id)
    }

    fn find_node(node: &TreeNode, target: NodeId) -> Option<&TreeNode> {
        if node.id == target {
            return Some(node);
        }
        node.children
            .iter()
            .find_map(|child| Self::find_node(child, target))
    }

    fn find_node_mut(node: &mut TreeNode, target: NodeId) -> Option<&mut TreeNode> {
        if node.id == target {
            return Some(node);
        }
        for child in node.children.iter_mut() {
            if let Some(found) = Self::find_node_mut(child, target) {
                return Some(found);
            }
        }
        None
    }

    /// Ids of a node's immediate children, in order.
    pub fn children_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id)
            .map(|node| node.children.iter().map(|c| c.id).collect())
            .unwrap_or_default()
    }

    /// Ids of a node's descendants, depth-first pre-order, excluding the node.
    pub fn descendant_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id)
            .map(|node| node.descendants().map(|d| d.id).collect())
            .unwrap_or_default()
    }

    /// Ancestor chain of a node, nearest-parent-first, excluding the node.
    ///
    /// This is the chain the rendering layer passes to
    /// `SelectionController::select`.
    pub fn ancestor_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        Self::collect_chain(&self.root, id, &mut chain);
        chain
    }

    fn collect_chain(node: &TreeNode, target: NodeId, chain: &mut Vec<NodeId>) -> bool {
        if node.id == target {
            return true;
        }
        for child in &node.children {
            if Self::collect_chain(child, target, chain) {
                chain.push(node.id);
                return true;
            }
        }
        false
    }

    /// Visit every node mutably, pre-order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut TreeNode)) {
        Self::visit_mut(&mut self.root, &mut f);
    }

    fn visit_mut(node: &mut TreeNode, f: &mut impl FnMut(&mut TreeNode)) {
        f(node);
        for child in node.children.iter_mut() {
            Self::visit_mut(child, f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root -> [alpha -> [inner], beta], all ids distinct.
    fn setup_tree() -> Tree {
        let mut ids = IdGenerator::new();
        let mut root = TreeNode::new("root", &mut ids);
        let mut alpha = TreeNode::new("alpha", &mut ids);
        alpha.children.push(TreeNode::new("inner", &mut ids));
        root.children.push(alpha);
        root.children.push(TreeNode::new("beta", &mut ids));
        Tree::new(root, ids)
    }

    #[test]
    fn ids_are_unique_and_stable() {
        let tree = setup_tree();
        let mut seen: Vec<NodeId> = vec![tree.root_id()];
        seen.extend(tree.descendant_ids(tree.root_id()));
        let mut deduped = seen.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(seen.len(), deduped.len());
    }

    #[test]
    fn has_children_distinguishes_leaves() {
        let tree = setup_tree();
        assert!(tree.root().has_children());
        let beta = tree
            .root()
            .children
            .iter()
            .find(|c| c.name == "beta")
            .unwrap();
        assert!(!beta.has_children());
    }

    #[test]
    fn descendants_is_preorder() {
        let tree = setup_tree();
        let names: Vec<&str> = tree
            .root()
            .descendants()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["alpha", "inner", "beta"]);
    }

    #[test]
    fn descendants_excludes_self_and_restarts() {
        let tree = setup_tree();
        assert!(tree.root().descendants().all(|n| n.id() != tree.root_id()));
        // Two calls produce the same sequence.
        let a: Vec<NodeId> = tree.root().descendants().map(|n| n.id()).collect();
        let b: Vec<NodeId> = tree.root().descendants().map(|n| n.id()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn get_finds_nested_node() {
        let tree = setup_tree();
        let inner_id = tree
            .root()
            .descendants()
            .find(|n| n.name == "inner")
            .unwrap()
            .id();
        assert_eq!(tree.get(inner_id).unwrap().name, "inner");
    }

    #[test]
    fn get_unknown_id_is_none() {
        let tree = setup_tree();
        let mut other_ids = IdGenerator::new();
        for _ in 0..100 {
            other_ids.next_id();
        }
        let foreign = other_ids.next_id();
        assert!(tree.get(foreign).is_none());
        assert!(!tree.contains(foreign));
    }

    #[test]
    fn ancestor_ids_is_nearest_first() {
        let tree = setup_tree();
        let alpha_id = tree
            .root()
            .children
            .iter()
            .find(|c| c.name == "alpha")
            .unwrap()
            .id();
        let inner_id = tree
            .root()
            .descendants()
            .find(|n| n.name == "inner")
            .unwrap()
            .id();
        assert_eq!(tree.ancestor_ids(inner_id), vec![alpha_id, tree.root_id()]);
        assert_eq!(tree.ancestor_ids(tree.root_id()), Vec::<NodeId>::new());
    }

    #[test]
    fn children_ids_in_order() {
        let tree = setup_tree();
        let names: Vec<String> = tree
            .children_ids(tree.root_id())
            .iter()
            .map(|id| tree.get(*id).unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn for_each_mut_visits_every_node() {
        let mut tree = setup_tree();
        let mut count = 0;
        tree.for_each_mut(|node| {
            node.opened = true;
            count += 1;
        });
        assert_eq!(count, 4);
        assert!(tree.root().descendants().all(|n| n.opened));
    }
}
