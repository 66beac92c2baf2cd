//! Rendering widgets for the tree panel and status bar.

pub mod status_bar;
pub mod tree;
