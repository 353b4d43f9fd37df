//! Custom stateful widgets.

mod tree;

pub use tree::GroupTree;
