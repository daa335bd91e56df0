//! Directory nodes stored in the tree arena

use std::collections::BTreeMap;

use compact_str::CompactString;

/// Lightweight handle into the arena `Vec<DirNode>`.
///
/// Uses `u32` to keep links small; a transcript would need four billion
/// `cd`/`dir` introductions to overflow it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a `NodeIndex` from a `usize`, panicking on overflow.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for arena indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A single directory in the reconstructed tree.
///
/// Files never form nodes of their own: a file is just a `name -> size`
/// entry in its containing directory, fixed at creation. Subdirectories
/// are keyed by name so `cd` and `ls` lookups share one O(log n) path.
#[derive(Debug, Clone)]
pub struct DirNode {
    /// Directory name only, not the full path (`/` for the root).
    pub name: CompactString,

    /// Handle of the parent directory. `None` for the root.
    pub parent: Option<NodeIndex>,

    /// Child directories, keyed by name.
    pub subdirs: BTreeMap<CompactString, NodeIndex>,

    /// Files listed directly in this directory, keyed by name.
    pub files: BTreeMap<CompactString, u64>,

    /// Total size: direct files plus all descendant directories.
    /// Zero until the aggregation pass runs.
    pub size: u64,
}

impl DirNode {
    pub fn new(name: CompactString, parent: Option<NodeIndex>) -> Self {
        Self {
            name,
            parent,
            subdirs: BTreeMap::new(),
            files: BTreeMap::new(),
            size: 0,
        }
    }

    /// Sum of the sizes of files listed directly in this directory.
    pub fn file_total(&self) -> u64 {
        self.files.values().sum()
    }
}
