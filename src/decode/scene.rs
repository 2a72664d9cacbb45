//! One-pass assembly of the owned scene aggregate.

use std::sync::Arc;

use tracing::debug;

use crate::decode::{material, mesh, node, texture};
use crate::error::Result;
use crate::ffi::library::SceneGuard;
use crate::ffi::raw::RawScene;
use crate::flags::SceneFlags;
use crate::types::scene::Scene;

/// Decode everything reachable from the foreign scene into one owned
/// [`Scene`]. The node tree, meshes, materials and textures walk disjoint
/// sub-arrays of the handle; after this returns, nothing in the result
/// borrows foreign memory except the materials' weak query handles.
///
/// # Safety
/// `raw` must reference the live foreign scene owned by `guard`.
pub(crate) unsafe fn decode_scene(raw: &RawScene, guard: &Arc<SceneGuard>) -> Result<Scene> {
    let (nodes, root) = unsafe { node::decode_node_tree(raw.root_node) }?;
    let meshes = unsafe { mesh::decode_meshes(raw.meshes, raw.num_meshes) }?;
    let materials = unsafe { material::decode_materials(raw.materials, raw.num_materials, guard) }?;
    let textures = unsafe { texture::decode_textures(raw.textures, raw.num_textures) }?;

    debug!(
        nodes = nodes.len(),
        meshes = meshes.len(),
        materials = materials.len(),
        textures = textures.len(),
        "Decoded scene graph"
    );

    Ok(Scene::new(
        SceneFlags::from_bits_retain(raw.flags),
        nodes,
        root,
        meshes,
        materials,
        textures,
    ))
}
