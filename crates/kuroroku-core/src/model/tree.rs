/// Arena-backed aggregation tree with O(n) bottom-up size roll-up.
///
/// All nodes live in a single `Vec<TreeNode>`; relationships use
/// [`NodeIndex`] rather than heap pointers. Because folders are always
/// allocated before anything inside them, a single reverse pass over the
/// arena visits every child before its parent — aggregation needs no
/// recursion and no explicit stack.
use super::node::{NodeIndex, NodeKind, TreeNode};
use super::record::FileRecord;
use compact_str::{format_compact, CompactString};
use serde::Serialize;
use tracing::debug;

/// Sentinel id/path of the synthetic root folder.
pub const ROOT_ID: &str = "/";

/// The complete aggregation tree built from one record collection.
///
/// Rebuilt wholesale whenever the input collection changes; immutable
/// afterward.
#[derive(Debug, Clone, Serialize)]
pub struct FileTree {
    /// Arena: every node in a flat, cache-friendly vector.
    pub nodes: Vec<TreeNode>,

    /// Index of the synthetic root folder (always 0).
    pub root: NodeIndex,

    /// Total size across all records, equal to the root's size.
    pub total_size: u64,
}

impl FileTree {
    /// Build the tree from a flat record collection.
    ///
    /// Total function: empty collections, malformed paths, and zero sizes
    /// all degrade gracefully — there is no error condition.
    ///
    /// Paths are split on both `/` and `\`; empty segments (leading
    /// separators, doubled separators) are skipped. Every segment except
    /// the last creates or reuses a folder; the last becomes a leaf, even
    /// for records whose kind is `Directory` — no child records nest under
    /// them by path, so there is nothing to expand.
    pub fn build(records: &[FileRecord]) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(records.len() * 2 + 1),
            root: NodeIndex::new(0),
            total_size: 0,
        };
        tree.nodes.push(TreeNode::folder(
            CompactString::const_new(ROOT_ID),
            CompactString::const_new(ROOT_ID),
            None,
        ));

        for record in records {
            tree.insert(record);
        }

        tree.aggregate();
        tree.sort_children();
        tree.assign_percentages();

        debug!(
            records = records.len(),
            nodes = tree.nodes.len(),
            total_size = tree.total_size,
            "built aggregation tree"
        );
        tree
    }

    /// Insert one record, creating intermediate folders as needed.
    fn insert(&mut self, record: &FileRecord) {
        let segments: Vec<&str> = record
            .path
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty())
            .collect();

        // All but the last segment are folders; a bare filename (or an
        // entirely empty path) attaches directly under the root.
        let folder_count = segments.len().saturating_sub(1);
        let mut cursor = self.root;
        for segment in &segments[..folder_count] {
            cursor = self.find_or_create_folder(cursor, segment);
        }

        // Duplicate normalized paths are both appended — uniqueness is the
        // scanner's contract, not enforced here.
        let leaf = TreeNode::file(
            CompactString::from(record.path.as_str()),
            record.name.clone(),
            record.size,
            record.modified,
            cursor,
        );
        let idx = self.push(leaf);
        self.nodes[cursor.idx()].children.push(idx);
    }

    /// Find a folder child by name, or create it.
    ///
    /// Matching is restricted to folder nodes — a file that happens to share
    /// a folder segment's name never matches.
    fn find_or_create_folder(&mut self, parent: NodeIndex, name: &str) -> NodeIndex {
        for &child in &self.nodes[parent.idx()].children {
            let node = &self.nodes[child.idx()];
            if node.kind == NodeKind::Folder && node.name == name {
                return child;
            }
        }

        let id = if self.nodes[parent.idx()].id == ROOT_ID {
            format_compact!("/{name}")
        } else {
            format_compact!("{}/{}", self.nodes[parent.idx()].id, name)
        };
        let idx = self.push(TreeNode::folder(id, name.into(), Some(parent)));
        self.nodes[parent.idx()].children.push(idx);
        idx
    }

    fn push(&mut self, node: TreeNode) -> NodeIndex {
        let idx = NodeIndex::new(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    /// Bottom-up pass: folder sizes, file counts, and folder timestamps.
    ///
    /// Iterating the arena in reverse visits children before parents, since
    /// nodes are always allocated after the folder chain above them.
    fn aggregate(&mut self) {
        for i in (1..self.nodes.len()).rev() {
            let node = &self.nodes[i];
            let (size, files, modified, parent) = (
                node.size,
                match node.kind {
                    NodeKind::File => 1,
                    NodeKind::Folder => node.file_count,
                },
                node.modified,
                node.parent,
            );
            let Some(parent) = parent else { continue };

            let parent = &mut self.nodes[parent.idx()];
            parent.size += size;
            parent.file_count += files;
            // Folder timestamp: most recently modified descendant.
            parent.modified = match (parent.modified, modified) {
                (Some(a), Some(b)) => Some(a.max(b)),
                (a, b) => a.or(b),
            };
        }

        self.total_size = self.nodes[self.root.idx()].size;
        debug_assert!(
            self.folder_sums_consistent(),
            "folder size must equal the sum of its children"
        );
    }

    /// Invariant check: every folder's size equals the sum of its children.
    fn folder_sums_consistent(&self) -> bool {
        self.nodes.iter().all(|node| {
            node.kind == NodeKind::File
                || node
                    .children
                    .iter()
                    .map(|c| self.nodes[c.idx()].size)
                    .sum::<u64>()
                    == node.size
        })
    }

    /// Stable per-folder child sort, descending by size.
    ///
    /// Ties keep first-seen order, so sibling ordering is deterministic
    /// given input order.
    fn sort_children(&mut self) {
        for i in 0..self.nodes.len() {
            let mut children = std::mem::take(&mut self.nodes[i].children);
            children.sort_by(|a, b| self.nodes[b.idx()].size.cmp(&self.nodes[a.idx()].size));
            self.nodes[i].children = children;
        }
    }

    /// Top-down pass: `percent_of_parent` for every node.
    ///
    /// Parents precede children in the arena, so a forward scan suffices.
    /// A zero-size parent yields zero-percent children rather than NaN;
    /// the root is pinned at 100 by definition.
    fn assign_percentages(&mut self) {
        self.nodes[self.root.idx()].percent_of_parent = 100.0;
        for i in 1..self.nodes.len() {
            let parent_size = self.nodes[i]
                .parent
                .map(|p| self.nodes[p.idx()].size)
                .unwrap_or(0);
            self.nodes[i].percent_of_parent = if parent_size > 0 {
                (self.nodes[i].size as f64 / parent_size as f64 * 100.0) as f32
            } else {
                0.0
            };
        }
    }

    /// Get the node at the given index.
    #[inline]
    pub fn node(&self, index: NodeIndex) -> &TreeNode {
        &self.nodes[index.idx()]
    }

    /// Direct children of a node, already sorted descending by size.
    #[inline]
    pub fn children(&self, parent: NodeIndex) -> &[NodeIndex] {
        &self.nodes[parent.idx()].children
    }

    /// Reconstruct a display path by walking up to the root, `/`-joined.
    pub fn full_path(&self, index: NodeIndex) -> String {
        let mut segments = Vec::new();
        let mut current = Some(index);
        while let Some(idx) = current {
            let node = &self.nodes[idx.idx()];
            if node.parent.is_some() {
                segments.push(node.name.as_str());
            }
            current = node.parent;
        }
        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    /// Total number of nodes, including the synthetic root.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when no records were inserted (only the root exists).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }
}
