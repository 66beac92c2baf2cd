use std::collections::HashSet;

use crate::tree::node::{NodeId, Tree};

/// Selection cardinality mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectMode {
    /// At most one selection entry at a time.
    #[default]
    Single,
    /// Any number of mutually non-overlapping entries.
    Multi,
}

impl SelectMode {
    /// Parse from a config/CLI string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "multi" => SelectMode::Multi,
            _ => SelectMode::Single,
        }
    }

    /// Display label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            SelectMode::Single => "single",
            SelectMode::Multi => "multi",
        }
    }
}

/// Which nodes may be explicitly selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectableType {
    #[default]
    All,
    /// Only nodes with children.
    Branch,
    /// Only nodes without children.
    Leaf,
}

impl SelectableType {
    /// Parse from a config/CLI string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "branch" => SelectableType::Branch,
            "leaf" => SelectableType::Leaf,
            _ => SelectableType::All,
        }
    }

    /// Display label for the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            SelectableType::All => "all",
            SelectableType::Branch => "branch",
            SelectableType::Leaf => "leaf",
        }
    }
}

/// One selected node plus its ancestor chain (nearest-parent-first), captured
/// at selection time.
#[derive(Debug, Clone)]
pub struct SelectionEntry {
    pub key: NodeId,
    pub ancestors: Vec<NodeId>,
}

/// Owns the selection model and the ancestor-marking algorithm.
///
/// The controller holds only `NodeId`s, never nodes. Every mutating operation
/// takes the tree, pushes the resulting `selected`/`marked`/`opened` flags out
/// to the affected nodes, and returns the deduplicated list of node ids whose
/// flags changed so the rendering layer knows what to redraw.
///
/// Invariants maintained across all operations:
/// - at most one entry per node identity, at most one total in `Single` mode;
/// - the selected set is an antichain (no selected node is an ancestor of
///   another selected node);
/// - a node is `marked` iff it is a proper ancestor of some selected node.
pub struct SelectionController {
    mode: SelectMode,
    selectable: SelectableType,
    /// Insertion-ordered; at most one entry per key.
    model: Vec<SelectionEntry>,
}

impl SelectionController {
    pub fn new(mode: SelectMode, selectable: SelectableType) -> Self {
        Self {
            mode,
            selectable,
            model: Vec::new(),
        }
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn selectable(&self) -> SelectableType {
        self.selectable
    }

    pub fn len(&self) -> usize {
        self.model.len()
    }

    pub fn is_empty(&self) -> bool {
        self.model.is_empty()
    }

    /// Selected node ids in insertion order.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.model.iter().map(|e| e.key).collect()
    }

    /// True iff the node holds a selection entry.
    ///
    /// Derived from the model, not from the node flag, so it stays correct in
    /// the middle of a mutation.
    pub fn is_selected(&self, id: NodeId) -> bool {
        self.model.iter().any(|e| e.key == id)
    }

    /// True iff the node lies on some entry's ancestor chain.
    pub fn is_marked(&self, id: NodeId) -> bool {
        self.model.iter().any(|e| e.ancestors.contains(&id))
    }

    /// Number of currently marked nodes.
    pub fn marked_count(&self) -> usize {
        self.mark_union().len()
    }

    /// Flip a node's expand/collapse state.
    ///
    /// No-op on leaves and on ids not present in the tree; the presentation
    /// layer decides whether to show a toggle affordance at all.
    pub fn toggle(&self, tree: &mut Tree, id: NodeId) -> Vec<NodeId> {
        match tree.get_mut(id) {
            Some(node) if node.has_children() => {
                node.opened = !node.opened;
                vec![id]
            }
            _ => Vec::new(),
        }
    }

    /// Process a select intent on `id` with its ancestor chain
    /// (nearest-parent-first, excluding `id`).
    ///
    /// Invalid targets and type-restricted targets are silent no-ops. The
    /// chain is assumed consistent with the tree; passing a stale chain is a
    /// caller contract violation.
    pub fn select(&mut self, tree: &mut Tree, id: NodeId, ancestors: &[NodeId]) -> Vec<NodeId> {
        let mut dirty = Vec::new();

        // Guards run before any mutation.
        let Some(node) = tree.get(id) else {
            return dirty;
        };
        let allowed = match self.selectable {
            SelectableType::All => true,
            SelectableType::Branch => node.has_children(),
            SelectableType::Leaf => !node.has_children(),
        };
        if !allowed {
            return dirty;
        }

        // Single mode: evict the previous entry before looking at the
        // target's own state. This also means sibling promotion below can
        // never fire in single mode.
        if self.mode == SelectMode::Single {
            if let Some(other) = self.model.iter().find(|e| e.key != id).map(|e| e.key) {
                self.remove_entry(tree, other, &mut dirty);
            }
        }

        if self.is_selected(id) {
            // Pure toggle-off.
            self.remove_entry(tree, id, &mut dirty);
        } else {
            if self.is_marked(id) {
                // A descendant is selected: deselect the whole selected set
                // below this node before re-anchoring the selection here.
                for descendant in tree.descendant_ids(id) {
                    if self.is_selected(descendant) {
                        self.remove_entry(tree, descendant, &mut dirty);
                    }
                }
            }

            // Entries on one path never overlap, so at most one ancestor in
            // the chain can be selected.
            let selected_ancestor = ancestors.iter().position(|a| self.is_selected(*a));
            if let Some(level) = selected_ancestor {
                let anchor = ancestors[level];
                self.remove_entry(tree, anchor, &mut dirty);
                self.promote_siblings(tree, anchor, level, id, ancestors, &mut dirty);
            }
            self.add_entry(tree, id, ancestors.to_vec(), &mut dirty);
        }

        self.refresh_marks(tree, &mut dirty);
        dedup_in_order(dirty)
    }

    /// Explicit reset: drop every entry and clear all flags.
    pub fn clear(&mut self, tree: &mut Tree) -> Vec<NodeId> {
        let mut dirty = Vec::new();
        for key in self.selected_ids() {
            self.remove_entry(tree, key, &mut dirty);
        }
        self.refresh_marks(tree, &mut dirty);
        dedup_in_order(dirty)
    }

    /// Drill-down pass: `current` (the just-deselected ancestor, at position
    /// `level` in `target`'s chain) loses its entry, and every child branch
    /// not on the path to `target` gets its own entry instead. The child that
    /// is on the path is recursed into; `target` itself gets no auto-entry —
    /// it is added explicitly by the caller.
    fn promote_siblings(
        &mut self,
        tree: &mut Tree,
        current: NodeId,
        level: usize,
        target: NodeId,
        ancestors: &[NodeId],
        dirty: &mut Vec<NodeId>,
    ) {
        for child in tree.children_ids(current) {
            if child == target {
                continue;
            }
            if level > 0 && child == ancestors[level - 1] {
                self.promote_siblings(tree, child, level - 1, target, ancestors, dirty);
            } else {
                // The promoted child's chain is the suffix of the target's
                // chain starting at its parent.
                self.add_entry(tree, child, ancestors[level..].to_vec(), dirty);
            }
        }
    }

    fn add_entry(
        &mut self,
        tree: &mut Tree,
        key: NodeId,
        ancestors: Vec<NodeId>,
        dirty: &mut Vec<NodeId>,
    ) {
        if self.is_selected(key) {
            return;
        }
        if let Some(node) = tree.get_mut(key) {
            node.selected = true;
            self.model.push(SelectionEntry { key, ancestors });
            dirty.push(key);
        }
    }

    fn remove_entry(&mut self, tree: &mut Tree, key: NodeId, dirty: &mut Vec<NodeId>) {
        if let Some(index) = self.model.iter().position(|e| e.key == key) {
            self.model.remove(index);
            if let Some(node) = tree.get_mut(key) {
                node.selected = false;
            }
            dirty.push(key);
        }
    }

    fn mark_union(&self) -> HashSet<NodeId> {
        self.model
            .iter()
            .flat_map(|e| e.ancestors.iter().copied())
            .collect()
    }

    /// Full recompute of the `marked` flag: the union of every entry's
    /// ancestor chain carries the mark, everything else loses it. Diffing per
    /// node keeps unchanged nodes out of the dirty list.
    fn refresh_marks(&self, tree: &mut Tree, dirty: &mut Vec<NodeId>) {
        let union = self.mark_union();
        tree.for_each_mut(|node| {
            let want = union.contains(&node.id());
            if node.marked != want {
                node.marked = want;
                dirty.push(node.id());
            }
        });
    }
}

/// Deduplicate preserving first occurrence.
fn dedup_in_order(ids: Vec<NodeId>) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
