//! Recursive reconstruction of the node hierarchy into a flat arena.

use crate::decode::metadata::decode_metadata;
use crate::decode::primitives::{decode_mat4, decode_string, decode_u32s};
use crate::error::{ImportError, Result};
use crate::ffi::raw::RawNode;
use crate::types::node::{Node, NodeId};

/// Decode the whole hierarchy rooted at `root`. Returns the arena and the
/// root's id (always the first arena slot).
///
/// # Safety
/// `root`, when non-null, must reference the root node of a live foreign
/// scene.
pub(crate) unsafe fn decode_node_tree(root: *const RawNode) -> Result<(Vec<Node>, NodeId)> {
    if root.is_null() {
        return Err(ImportError::MalformedScene(
            "scene has a null root node".into(),
        ));
    }
    let mut arena = Vec::new();
    let root_id = unsafe { decode_node(&*root, None, &mut arena) }?;
    Ok((arena, root_id))
}

/// Decode one node and recurse into its children in foreign order, passing
/// the freshly built node as parent. A null child array or zero child
/// count yields an empty children list.
///
/// # Safety
/// `raw` must reference a node inside a live foreign scene.
unsafe fn decode_node(
    raw: &RawNode,
    parent: Option<NodeId>,
    arena: &mut Vec<Node>,
) -> Result<NodeId> {
    let id = NodeId(arena.len() as u32);
    arena.push(Node {
        name: decode_string(&raw.name),
        transformation: decode_mat4(&raw.transformation),
        parent,
        children: Vec::new(),
        mesh_indices: unsafe { decode_u32s(raw.mesh_indices, raw.num_meshes) },
        metadata: unsafe { decode_metadata(raw.metadata) }?,
    });

    if !raw.children.is_null() && raw.num_children > 0 {
        let child_ptrs =
            unsafe { std::slice::from_raw_parts(raw.children, raw.num_children as usize) };
        let mut children = Vec::with_capacity(child_ptrs.len());
        for (i, &child) in child_ptrs.iter().enumerate() {
            if child.is_null() {
                return Err(ImportError::MalformedScene(format!(
                    "child {i} of node {:?} is null",
                    arena[id.index()].name
                )));
            }
            children.push(unsafe { decode_node(&*child, Some(id), arena) }?);
        }
        arena[id.index()].children = children;
    }

    Ok(id)
}
