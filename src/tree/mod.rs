//! Arena-backed filesystem tree
//!
//! The reconstructed filesystem lives in a flat arena of directory nodes.
//! Parent/child links are `NodeIndex` handles into the arena rather than
//! owning pointers, so the whole tree is freed as a unit and upward
//! navigation (`cd ..`) needs no reference counting.

mod fs_tree;
mod node;

pub use fs_tree::FsTree;
pub use node::{DirNode, NodeIndex};
