//! The selection core: identity-keyed tree nodes and the controller that
//! maintains the selected/marked invariants in response to select and toggle
//! intents from the rendering layer.

pub mod loader;
pub mod node;
pub mod selection;

pub use node::{IdGenerator, NodeId, Tree, TreeNode};
pub use selection::{SelectMode, SelectableType, SelectionController};
