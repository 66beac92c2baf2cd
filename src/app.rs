use std::time::Instant;

use crate::tree::{NodeId, SelectionController, Tree, TreeNode};

/// A flattened representation of a tree node for rendering.
///
/// Snapshot of the observable per-node state the selection core exposes,
/// plus layout hints for the widget.
#[derive(Debug, Clone)]
pub struct FlatItem {
    pub id: NodeId,
    pub name: String,
    pub icon: Option<String>,
    pub depth: usize,
    pub has_children: bool,
    pub opened: bool,
    pub selected: bool,
    pub marked: bool,
    pub is_last_sibling: bool,
}

/// Main application state: the tree, the selection controller, and the
/// derived view state (flat row list, cursor, scroll).
pub struct App {
    pub tree: Tree,
    pub selection: SelectionController,
    pub flat_items: Vec<FlatItem>,
    /// Row the keyboard cursor is on (focus, not selection).
    pub cursor_index: usize,
    pub scroll_offset: usize,
    /// Rows the tree panel showed on the last render; clicks outside this
    /// window are not on a visible node.
    pub visible_height: usize,
    pub should_quit: bool,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(tree: Tree, selection: SelectionController) -> Self {
        let mut app = Self {
            tree,
            selection,
            flat_items: Vec::new(),
            cursor_index: 0,
            scroll_offset: 0,
            visible_height: 0,
            should_quit: false,
            status_message: None,
        };
        app.flatten();
        app
    }

    /// Rebuild the flat row list from the tree, honoring `opened` flags.
    ///
    /// The cursor stays on the same node when it survives the rebuild,
    /// otherwise it is clamped.
    pub fn flatten(&mut self) {
        let cursor_id = self.flat_items.get(self.cursor_index).map(|item| item.id);

        self.flat_items.clear();
        Self::flatten_node(self.tree.root(), 0, true, &mut self.flat_items);

        if let Some(id) = cursor_id {
            if let Some(index) = self.flat_items.iter().position(|item| item.id == id) {
                self.cursor_index = index;
            }
        }
        if !self.flat_items.is_empty() && self.cursor_index >= self.flat_items.len() {
            self.cursor_index = self.flat_items.len() - 1;
        }
    }

    fn flatten_node(node: &TreeNode, depth: usize, is_last: bool, items: &mut Vec<FlatItem>) {
        items.push(FlatItem {
            id: node.id(),
            name: node.name.clone(),
            icon: node.icon.clone(),
            depth,
            has_children: node.has_children(),
            opened: node.opened,
            selected: node.selected,
            marked: node.marked,
            is_last_sibling: is_last,
        });

        if node.opened {
            let count = node.children.len();
            for (i, child) in node.children.iter().enumerate() {
                Self::flatten_node(child, depth + 1, i == count - 1, items);
            }
        }
    }

    /// Id of the node under the cursor.
    pub fn cursor_id(&self) -> Option<NodeId> {
        self.flat_items.get(self.cursor_index).map(|item| item.id)
    }

    /// Process a select intent on the node under the cursor.
    ///
    /// The ancestor chain is computed from the tree and handed to the
    /// controller; the controller never walks the view.
    pub fn select_under_cursor(&mut self) {
        let Some(id) = self.cursor_id() else {
            return;
        };
        self.select_node(id);
    }

    /// Process a select intent on a specific node.
    pub fn select_node(&mut self, id: NodeId) {
        let chain = self.tree.ancestor_ids(id);
        let dirty = self.selection.select(&mut self.tree, id, &chain);
        if !dirty.is_empty() {
            self.flatten();
        }
    }

    /// Flip expand/collapse on the node under the cursor (no-op on leaves).
    pub fn toggle_under_cursor(&mut self) {
        let Some(id) = self.cursor_id() else {
            return;
        };
        self.toggle_node(id);
    }

    /// Flip expand/collapse on a specific node.
    pub fn toggle_node(&mut self, id: NodeId) {
        let dirty = self.selection.toggle(&mut self.tree, id);
        if !dirty.is_empty() {
            self.flatten();
        }
    }

    /// Expand the node under the cursor if it is a closed branch.
    pub fn expand_under_cursor(&mut self) {
        if let Some(item) = self.flat_items.get(self.cursor_index) {
            if item.has_children && !item.opened {
                self.toggle_under_cursor();
            }
        }
    }

    /// Collapse the node under the cursor, or jump to its parent when it is
    /// a leaf or already collapsed.
    pub fn collapse_under_cursor(&mut self) {
        let Some(item) = self.flat_items.get(self.cursor_index) else {
            return;
        };
        if item.has_children && item.opened {
            self.toggle_under_cursor();
            return;
        }
        let parent = self.tree.ancestor_ids(item.id).first().copied();
        if let Some(parent_id) = parent {
            if let Some(index) = self.flat_items.iter().position(|i| i.id == parent_id) {
                self.cursor_index = index;
            }
        }
    }

    /// Drop every selection entry and clear all flags.
    pub fn clear_selection(&mut self) {
        let dirty = self.selection.clear(&mut self.tree);
        if !dirty.is_empty() {
            self.set_status_message(format!("Cleared {} node(s)", dirty.len()));
            self.flatten();
        }
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Move the cursor down by one row.
    pub fn cursor_down(&mut self) {
        let len = self.flat_items.len();
        if len > 0 && self.cursor_index < len - 1 {
            self.cursor_index += 1;
        }
    }

    /// Move the cursor up by one row.
    pub fn cursor_up(&mut self) {
        if self.cursor_index > 0 {
            self.cursor_index -= 1;
        }
    }

    /// Jump to the first row.
    pub fn cursor_first(&mut self) {
        self.cursor_index = 0;
    }

    /// Jump to the last row.
    pub fn cursor_last(&mut self) {
        let len = self.flat_items.len();
        if len > 0 {
            self.cursor_index = len - 1;
        }
    }

    /// Update the scroll offset to ensure the cursor row is visible.
    pub fn update_scroll(&mut self, visible_height: usize) {
        self.visible_height = visible_height;
        if visible_height == 0 {
            return;
        }
        if self.cursor_index < self.scroll_offset {
            self.scroll_offset = self.cursor_index;
        } else if self.cursor_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.cursor_index - visible_height + 1;
        }
    }

    /// Set a status message with current timestamp.
    pub fn set_status_message(&mut self, msg: String) {
        self.status_message = Some((msg, Instant::now()));
    }

    /// Clear the status message if it has been displayed for more than 3 seconds.
    pub fn clear_expired_status(&mut self) {
        if let Some((_, ref created)) = self.status_message {
            if created.elapsed().as_secs() > 3 {
                self.status_message = None;
            }
        }
    }

    /// Selection summary for the status bar.
    pub fn selection_summary(&self) -> String {
        format!(
            "{} selected · {} marked",
            self.selection.len(),
            self.selection.marked_count()
        )
    }
}
