//! Tree data loading: JSON node data into an id-keyed [`Tree`].

use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::tree::node::{IdGenerator, Tree, TreeNode};

/// Raw node data as it appears in the data file.
///
/// Mirrors the observable data shape of a tree item: display name, optional
/// icon, initial expand state, children.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NodeData {
    pub name: String,
    pub icon: Option<String>,
    pub opened: bool,
    pub children: Vec<NodeData>,
}

impl Default for NodeData {
    fn default() -> Self {
        Self {
            name: String::new(),
            icon: None,
            opened: false,
            children: Vec::new(),
        }
    }
}

/// Build a [`Tree`] from parsed node data, minting ids along the way.
pub fn build_tree(data: NodeData) -> Tree {
    let mut ids = IdGenerator::new();
    let root = build_node(data, &mut ids);
    Tree::new(root, ids)
}

fn build_node(data: NodeData, ids: &mut IdGenerator) -> TreeNode {
    let mut node = TreeNode::new(data.name, ids);
    node.icon = data.icon;
    node.opened = data.opened;
    node.children = data
        .children
        .into_iter()
        .map(|child| build_node(child, ids))
        .collect();
    node
}

/// Parse a tree from a JSON string.
pub fn from_json(json: &str) -> Result<Tree> {
    let data: NodeData = serde_json::from_str(json)?;
    if data.name.is_empty() {
        return Err(AppError::Data("root node has no name".into()));
    }
    Ok(build_tree(data))
}

/// Load a tree from a JSON file.
pub fn from_file(path: &Path) -> Result<Tree> {
    let content = std::fs::read_to_string(path)?;
    from_json(&content)
}

/// Built-in demo tree, used when no data file is given. Constructed directly,
/// so it cannot fail.
pub fn sample() -> Tree {
    fn n(name: &str, icon: Option<&str>, opened: bool, children: Vec<NodeData>) -> NodeData {
        NodeData {
            name: name.to_string(),
            icon: icon.map(str::to_string),
            opened,
            children,
        }
    }

    build_tree(n(
        "projects",
        None,
        true,
        vec![
            n(
                "website",
                Some("folder"),
                true,
                vec![
                    n("index.html", Some("file"), false, Vec::new()),
                    n("styles.css", Some("file"), false, Vec::new()),
                    n(
                        "assets",
                        Some("folder"),
                        false,
                        vec![
                            n("logo.svg", Some("image"), false, Vec::new()),
                            n("banner.png", Some("image"), false, Vec::new()),
                        ],
                    ),
                ],
            ),
            n(
                "api",
                Some("folder"),
                false,
                vec![
                    n("server.rs", Some("file"), false, Vec::new()),
                    n("routes.rs", Some("file"), false, Vec::new()),
                ],
            ),
            n("notes.md", Some("file"), false, Vec::new()),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_minimal_node() {
        let tree = from_json(r#"{ "name": "root" }"#).unwrap();
        assert_eq!(tree.root().name, "root");
        assert!(!tree.root().has_children());
        assert!(!tree.root().opened);
        assert!(tree.root().icon.is_none());
    }

    #[test]
    fn parses_nested_children_in_order() {
        let tree = from_json(
            r#"{
                "name": "root",
                "children": [
                    { "name": "first", "children": [{ "name": "deep" }] },
                    { "name": "second" }
                ]
            }"#,
        )
        .unwrap();
        let names: Vec<&str> = tree
            .root()
            .descendants()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["first", "deep", "second"]);
    }

    #[test]
    fn preserves_icon_and_opened() {
        let tree =
            from_json(r#"{ "name": "root", "icon": "folder", "opened": true }"#).unwrap();
        assert_eq!(tree.root().icon.as_deref(), Some("folder"));
        assert!(tree.root().opened);
    }

    #[test]
    fn loaded_nodes_start_unselected_and_unmarked() {
        let tree = from_json(r#"{ "name": "root", "children": [{ "name": "kid" }] }"#).unwrap();
        assert!(!tree.root().selected && !tree.root().marked);
        assert!(tree.root().descendants().all(|n| !n.selected && !n.marked));
    }

    #[test]
    fn every_loaded_node_gets_a_distinct_id() {
        let tree = sample();
        let mut ids: Vec<_> = tree.descendant_ids(tree.root_id());
        ids.push(tree.root_id());
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn malformed_json_is_a_data_error() {
        let err = from_json("{ not json").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn nameless_root_is_rejected() {
        let err = from_json("{}").unwrap_err();
        assert!(matches!(err, AppError::Data(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name": "disk", "children": [{{ "name": "kid" }}] }}"#).unwrap();
        let tree = from_file(file.path()).unwrap();
        assert_eq!(tree.root().name, "disk");
        assert!(tree.root().has_children());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = from_file(Path::new("/nonexistent/tree.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn sample_tree_is_nonempty() {
        let tree = sample();
        assert!(tree.root().has_children());
        assert!(tree.root().opened);
    }
}
