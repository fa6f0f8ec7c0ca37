/// Data model for the Kuro-Roku library views.
///
/// Re-exports the scanned-file record types and the arena-allocated
/// aggregation tree.
pub mod node;
pub mod record;
pub mod size;
pub mod tree;

pub use node::{NodeIndex, NodeKind, TreeNode};
pub use record::{FileKind, FileRecord};
pub use tree::FileTree;
