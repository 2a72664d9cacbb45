use glam::{Mat4, Vec3, Vec4};

use crate::flags::PrimitiveType;

pub use crate::ffi::raw::{MAX_COLOR_SETS, MAX_TEX_COORDS};

/// One decoded mesh: vertex streams, fixed 8-slot channel arrays, faces,
/// bones and morph targets, fully owned.
///
/// Optional per-vertex streams (`normals`, `tangents`, `bitangents`, each
/// channel slot) are either empty or exactly `vertices.len()` long. The
/// channel arrays keep their fixed capacity because the slot index itself
/// is meaningful -- "texture-coordinate channel 3" stays at position 3 even
/// when earlier slots are empty.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Bitwise combination of the primitive kinds present.
    pub primitive_types: PrimitiveType,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec3>,
    pub bitangents: Vec<Vec3>,
    /// Vertex-color sets; each slot is empty or `vertices.len()` long.
    pub color_sets: [Vec<Vec4>; MAX_COLOR_SETS],
    /// Texture-coordinate channels; each slot is empty or `vertices.len()`
    /// long.
    pub tex_coords: [Vec<Vec3>; MAX_TEX_COORDS],
    /// Meaningful component count (1-3) per present `tex_coords` slot;
    /// zero for absent slots.
    pub tex_coord_components: [u32; MAX_TEX_COORDS],
    pub faces: Vec<Face>,
    pub bones: Vec<Bone>,
    /// Morph targets (blend-shape replacement streams).
    pub anim_meshes: Vec<AnimMesh>,
    pub aabb: Aabb,
    pub morph_method: MorphMethod,
    /// Index into the scene's material list.
    pub material_index: u32,
    pub name: String,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_tangents(&self) -> bool {
        !self.tangents.is_empty()
    }

    /// Whether color set `slot` is present.
    pub fn has_color_set(&self, slot: usize) -> bool {
        slot < MAX_COLOR_SETS && !self.color_sets[slot].is_empty()
    }

    /// Whether texture-coordinate channel `slot` is present.
    pub fn has_tex_coords(&self, slot: usize) -> bool {
        slot < MAX_TEX_COORDS && !self.tex_coords[slot].is_empty()
    }
}

/// One face: an index list into the owning mesh's vertex streams. The
/// index count encodes the primitive kind (1 point, 2 line, 3 triangle,
/// 4+ polygon).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Face {
    pub indices: Vec<u32>,
}

/// One bone influencing vertices of its owning mesh.
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    /// The influence weights of this bone.
    pub weights: Vec<VertexWeight>,
    /// Transforms from mesh space to bone space in bind pose (the inverse
    /// bind matrix).
    pub offset_matrix: Mat4,
}

/// One bone influence: vertex index plus strength in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexWeight {
    pub vertex_index: u32,
    pub weight: f32,
}

/// A morph target: replacement vertex streams blended over the host mesh.
///
/// A present stream must match the host mesh's vertex count; an absent
/// stream means the host's data is used instead.
#[derive(Debug, Clone, Default)]
pub struct AnimMesh {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec3>,
    pub bitangents: Vec<Vec3>,
    pub color_sets: [Vec<Vec4>; MAX_COLOR_SETS],
    pub tex_coords: [Vec<Vec3>; MAX_TEX_COORDS],
    /// Blend factor applied when morphing toward this target.
    pub weight: f32,
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// How morph targets are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MorphMethod {
    /// The source format did not specify a method.
    #[default]
    Unknown,
    /// Interpolation between targets.
    VertexBlend,
    /// Normalized morphing (weights sum to 1).
    MorphNormalized,
    /// Relative (additive) morphing.
    MorphRelative,
}

impl MorphMethod {
    /// Map the foreign tag, falling back to `Unknown` for values outside
    /// the documented range.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => MorphMethod::VertexBlend,
            2 => MorphMethod::MorphNormalized,
            3 => MorphMethod::MorphRelative,
            _ => MorphMethod::Unknown,
        }
    }
}
