use crate::flags::SceneFlags;
use crate::types::material::Material;
use crate::types::mesh::Mesh;
use crate::types::node::{Node, NodeId};
use crate::types::texture::EmbeddedTexture;

/// A fully decoded scene, owned independently of the foreign allocation.
///
/// The node hierarchy lives in a flat arena indexed by [`NodeId`]; parent
/// links are ids, so the tree carries back-references without cycles.
/// Everything except the materials' live texture queries stays valid after
/// the scene's release operation has run.
#[derive(Debug)]
pub struct Scene {
    /// State flags the importer set on the scene.
    pub flags: SceneFlags,
    pub meshes: Vec<Mesh>,
    pub materials: Vec<Material>,
    /// Embedded textures, referenced from materials via `*0`-style paths.
    pub textures: Vec<EmbeddedTexture>,
    nodes: Vec<Node>,
    root: NodeId,
}

impl Scene {
    pub(crate) fn new(
        flags: SceneFlags,
        nodes: Vec<Node>,
        root: NodeId,
        meshes: Vec<Mesh>,
        materials: Vec<Material>,
        textures: Vec<EmbeddedTexture>,
    ) -> Self {
        debug_assert!(root.index() < nodes.len());
        Self {
            flags,
            meshes,
            materials,
            textures,
            nodes,
            root,
        }
    }

    /// Id of the hierarchy root.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The hierarchy root node.
    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root.index()]
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// All nodes in arena order (root first, then depth-first).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The children of `id` in foreign order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self.nodes[id.index()]
            .children
            .iter()
            .map(|child| &self.nodes[child.index()])
    }

    /// The parent of `id`; `None` for the root.
    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self.nodes[id.index()]
            .parent
            .map(|parent| &self.nodes[parent.index()])
    }
}
