/// A single node in the arena-allocated aggregation tree.
///
/// Nodes live in a flat `Vec<TreeNode>` and reference each other by index
/// rather than by owned pointer, which sidesteps recursive ownership and
/// makes the whole tree trivially serializable.
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::Serialize;

/// Lightweight index into the arena `Vec<TreeNode>`.
///
/// `u32` keeps nodes small; four billion entries is far beyond any library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Create a `NodeIndex` from a `usize` arena position.
    #[inline]
    pub fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the index as a `usize` for Vec indexing.
    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Whether a node aggregates children or represents one record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Folder,
    File,
}

/// A folder or file entry in the aggregation tree.
///
/// Derived wholesale from a record collection by [`crate::model::FileTree`];
/// immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode {
    /// Stable identifier: folders use the accumulated segment chain rooted
    /// at the `/` sentinel, files use their record's own path.
    pub id: CompactString,

    /// Segment label (file name for leaves).
    pub name: CompactString,

    pub kind: NodeKind,

    /// Files: copied from the record. Folders: sum of all descendant file
    /// sizes, which equals the sum of immediate children's sizes.
    pub size: u64,

    /// Share of the parent's size, 0–100. Zero when the parent's total is
    /// zero; the root is pinned at 100.
    pub percent_of_parent: f32,

    /// Arena index of the parent; `None` only for the root.
    pub parent: Option<NodeIndex>,

    /// Child indices, sorted descending by size (stable on ties).
    pub children: Vec<NodeIndex>,

    /// Files: the record's timestamp. Folders: most recently modified
    /// descendant. Display-only.
    pub modified: Option<DateTime<Utc>>,

    /// Number of descendant files, for "N files" display.
    pub file_count: u64,
}

impl TreeNode {
    /// Create an empty folder node.
    pub fn folder(id: CompactString, name: CompactString, parent: Option<NodeIndex>) -> Self {
        Self {
            id,
            name,
            kind: NodeKind::Folder,
            size: 0,
            percent_of_parent: 0.0,
            parent,
            children: Vec::new(),
            modified: None,
            file_count: 0,
        }
    }

    /// Create a leaf node for one record.
    pub fn file(
        id: CompactString,
        name: CompactString,
        size: u64,
        modified: Option<DateTime<Utc>>,
        parent: NodeIndex,
    ) -> Self {
        Self {
            id,
            name,
            kind: NodeKind::File,
            size,
            percent_of_parent: 0.0,
            parent: Some(parent),
            children: Vec::new(),
            modified,
            file_count: 0,
        }
    }

    /// `true` for folder nodes.
    #[inline]
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}
