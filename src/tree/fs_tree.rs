//! FsTree - arena of directory nodes with O(n) bottom-up size aggregation

use compact_str::CompactString;
use tracing::debug;

use super::node::{DirNode, NodeIndex};

/// The complete directory tree reconstructed from a transcript.
///
/// All nodes live in a single `Vec<DirNode>`; the root is always index 0.
/// Children are created strictly after their parent, so the arena order is
/// a valid topological order and a single reverse pass visits every child
/// before its parent.
#[derive(Debug, Clone)]
pub struct FsTree {
    nodes: Vec<DirNode>,
}

impl FsTree {
    /// Create a tree containing only the root directory `/`.
    pub fn new() -> Self {
        Self {
            nodes: vec![DirNode::new(CompactString::new("/"), None)],
        }
    }

    /// Handle of the root directory.
    #[inline]
    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    /// Get the node at the given handle.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &DirNode {
        &self.nodes[index.idx()]
    }

    /// Handle of a node's parent, `None` for the root.
    #[inline]
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.nodes[index.idx()].parent
    }

    /// Look up a child directory of `parent` by name, creating and attaching
    /// it if absent.
    ///
    /// This is the single find-or-create path shared by `cd NAME` and
    /// `dir NAME` listing entries, so the two can never disagree and
    /// produce duplicate children.
    pub fn find_or_create_dir(&mut self, parent: NodeIndex, name: &str) -> NodeIndex {
        if let Some(&existing) = self.nodes[parent.idx()].subdirs.get(name) {
            return existing;
        }

        let name = CompactString::new(name);
        let child = NodeIndex::new(self.nodes.len());
        self.nodes.push(DirNode::new(name.clone(), Some(parent)));
        self.nodes[parent.idx()].subdirs.insert(name, child);
        debug!(dir = %self.nodes[child.idx()].name, "directory created");
        child
    }

    /// Record a file of the given size under `dir`.
    ///
    /// Re-listing an existing file is a no-op; the first recorded size wins.
    pub fn add_file(&mut self, dir: NodeIndex, name: &str, size: u64) {
        let node = &mut self.nodes[dir.idx()];
        if node.files.contains_key(name) {
            return;
        }
        node.files.insert(CompactString::new(name), size);
        debug!(file = name, size, "file recorded");
    }

    /// Compute every directory's total size in a single bottom-up pass.
    ///
    /// Children always sit after their parent in the arena, so iterating in
    /// reverse guarantees each directory is finished before its parent reads
    /// it. O(n) with no recursion. Sizes are reset first, so calling this
    /// again recomputes the same values instead of accumulating.
    pub fn aggregate_sizes(&mut self) {
        for node in self.nodes.iter_mut() {
            node.size = 0;
        }

        for i in (0..self.nodes.len()).rev() {
            let total = self.nodes[i].file_total() + self.nodes[i].size;
            self.nodes[i].size = total;
            if let Some(parent) = self.nodes[i].parent {
                self.nodes[parent.idx()].size += total;
            }
        }
    }

    /// Iterate over every directory in the tree, root first.
    pub fn dirs(&self) -> impl Iterator<Item = (NodeIndex, &DirNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex::new(i), node))
    }

    /// Reconstruct the full path of a directory by walking up to the root.
    pub fn full_path(&self, index: NodeIndex) -> String {
        let mut segments = Vec::new();
        let mut current = Some(index);
        while let Some(idx) = current {
            segments.push(self.nodes[idx.idx()].name.as_str());
            current = self.nodes[idx.idx()].parent;
        }
        segments.reverse();

        // The root's own name is the separator, so "/" + join would double it.
        if segments.len() == 1 {
            "/".to_string()
        } else {
            segments[1..].iter().fold(String::new(), |mut path, seg| {
                path.push('/');
                path.push_str(seg);
                path
            })
        }
    }

    /// Number of directories in the tree (the root counts).
    #[inline]
    pub fn dir_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of files recorded across all directories.
    pub fn file_count(&self) -> usize {
        self.nodes.iter().map(|n| n.files.len()).sum()
    }
}

impl Default for FsTree {
    fn default() -> Self {
        Self::new()
    }
}
