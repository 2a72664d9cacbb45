use std::collections::HashMap;

use glam::Mat4;

use crate::types::metadata::MetadataValue;

/// Index of a node within its [`Scene`]'s node arena.
///
/// Parent/child links are ids rather than owning pointers, so the tree can
/// carry parent back-references without reference cycles.
///
/// [`Scene`]: crate::types::Scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Arena index of this node.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One node of the decoded scene hierarchy.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    /// Transformation relative to the parent node.
    pub transformation: Mat4,
    /// Non-owning back-reference; `None` for the root node.
    pub parent: Option<NodeId>,
    /// Child node ids, in foreign order.
    pub children: Vec<NodeId>,
    /// Each entry is an index into the scene's mesh list.
    pub mesh_indices: Vec<u32>,
    /// Importer-dependent metadata; empty when the source format carries
    /// none.
    pub metadata: HashMap<String, MetadataValue>,
}

impl Node {
    /// Whether this node is the hierarchy root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
