//! Mesh decoding: per-vertex attribute streams, the fixed 8-slot channel
//! arrays, faces, bones, morph targets and the bounding box.

use tracing::debug;

use crate::decode::primitives::{
    decode_aabb, decode_colors, decode_mat4, decode_string, decode_u32s, decode_vec3s,
};
use crate::error::{ImportError, Result};
use crate::ffi::raw::{
    MAX_COLOR_SETS, MAX_TEX_COORDS, RawAnimMesh, RawBone, RawColor4, RawFace, RawMesh,
    RawVector3, RawVertexWeight,
};
use crate::flags::PrimitiveType;
use crate::types::mesh::{AnimMesh, Bone, Face, Mesh, MorphMethod, VertexWeight};

/// Decode the scene's mesh array. A null array yields an empty list.
///
/// # Safety
/// A non-null `meshes` must point to `count` mesh pointers inside a live
/// foreign scene.
pub(crate) unsafe fn decode_meshes(meshes: *const *mut RawMesh, count: u32) -> Result<Vec<Mesh>> {
    if meshes.is_null() || count == 0 {
        return Ok(Vec::new());
    }
    let ptrs = unsafe { std::slice::from_raw_parts(meshes, count as usize) };
    ptrs.iter()
        .enumerate()
        .map(|(i, &ptr)| {
            if ptr.is_null() {
                return Err(ImportError::MalformedScene(format!(
                    "mesh array entry {i} is null"
                )));
            }
            unsafe { decode_mesh(&*ptr) }
        })
        .collect()
}

/// Decode one mesh. Every optional attribute stream is total over null
/// pointers; a present stream copies exactly `num_vertices` entries.
///
/// # Safety
/// `raw` must reference a mesh inside a live foreign scene.
pub(crate) unsafe fn decode_mesh(raw: &RawMesh) -> Result<Mesh> {
    let vert_count = raw.num_vertices;

    let vertices = unsafe { decode_vec3s(raw.vertices, vert_count) };
    let normals = unsafe { decode_vec3s(raw.normals, vert_count) };
    let tangents = unsafe { decode_vec3s(raw.tangents, vert_count) };
    let bitangents = unsafe { decode_vec3s(raw.bitangents, vert_count) };

    let color_sets = unsafe { decode_color_sets(&raw.colors, vert_count) };
    let tex_coords = unsafe { decode_tex_coords(&raw.texture_coords, vert_count) };

    // Component counts are meaningful only for present slots, and always
    // come from this mesh's own table.
    let mut tex_coord_components = [0u32; MAX_TEX_COORDS];
    for (slot, components) in tex_coord_components.iter_mut().enumerate() {
        if !raw.texture_coords[slot].is_null() {
            *components = raw.num_uv_components[slot];
        }
    }

    let faces = unsafe { decode_faces(raw.faces, raw.num_faces) }?;
    let bones = unsafe { decode_bones(raw.bones, raw.num_bones) }?;
    let anim_meshes = unsafe { decode_anim_meshes(raw.anim_meshes, raw.num_anim_meshes) }?;

    let mesh = Mesh {
        primitive_types: PrimitiveType::from_bits_retain(raw.primitive_types),
        vertices,
        normals,
        tangents,
        bitangents,
        color_sets,
        tex_coords,
        tex_coord_components,
        faces,
        bones,
        anim_meshes,
        aabb: decode_aabb(&raw.aabb),
        morph_method: MorphMethod::from_raw(raw.method),
        material_index: raw.material_index,
        name: decode_string(&raw.name),
    };

    debug!(
        name = %mesh.name,
        vertices = mesh.vertex_count(),
        faces = mesh.faces.len(),
        bones = mesh.bones.len(),
        "Decoded mesh"
    );
    Ok(mesh)
}

/// Decode all 8 vertex-color slots. Absent slots stay empty; slot
/// positions are preserved.
///
/// # Safety
/// Each non-null slot pointer must hold `vert_count` elements.
unsafe fn decode_color_sets(
    slots: &[*mut RawColor4; MAX_COLOR_SETS],
    vert_count: u32,
) -> [Vec<glam::Vec4>; MAX_COLOR_SETS] {
    std::array::from_fn(|slot| unsafe { decode_colors(slots[slot], vert_count) })
}

/// Decode all 8 texture-coordinate slots. Absent slots stay empty; slot
/// positions are preserved.
///
/// # Safety
/// Each non-null slot pointer must hold `vert_count` elements.
unsafe fn decode_tex_coords(
    slots: &[*mut RawVector3; MAX_TEX_COORDS],
    vert_count: u32,
) -> [Vec<glam::Vec3>; MAX_TEX_COORDS] {
    std::array::from_fn(|slot| unsafe { decode_vec3s(slots[slot], vert_count) })
}

/// Decode the face list. Each face carries its own index count, so points,
/// lines, triangles and polygons decode uniformly.
///
/// # Safety
/// A non-null `faces` must point to `count` faces inside a live foreign
/// scene.
pub(crate) unsafe fn decode_faces(faces: *const RawFace, count: u32) -> Result<Vec<Face>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if faces.is_null() {
        return Err(ImportError::MalformedScene(format!(
            "mesh claims {count} faces but has a null face array"
        )));
    }
    let raw = unsafe { std::slice::from_raw_parts(faces, count as usize) };
    raw.iter()
        .enumerate()
        .map(|(i, face)| {
            if face.indices.is_null() && face.num_indices > 0 {
                return Err(ImportError::MalformedScene(format!(
                    "face {i} claims {} indices but has a null index buffer",
                    face.num_indices
                )));
            }
            Ok(Face {
                indices: unsafe { decode_u32s(face.indices, face.num_indices) },
            })
        })
        .collect()
}

/// Decode the bone list. A null array yields an empty list.
///
/// # Safety
/// A non-null `bones` must point to `count` bone pointers inside a live
/// foreign scene.
pub(crate) unsafe fn decode_bones(bones: *const *mut RawBone, count: u32) -> Result<Vec<Bone>> {
    if bones.is_null() || count == 0 {
        return Ok(Vec::new());
    }
    let ptrs = unsafe { std::slice::from_raw_parts(bones, count as usize) };
    ptrs.iter()
        .enumerate()
        .map(|(i, &ptr)| {
            if ptr.is_null() {
                return Err(ImportError::MalformedScene(format!(
                    "bone array entry {i} is null"
                )));
            }
            let raw = unsafe { &*ptr };
            Ok(Bone {
                name: decode_string(&raw.name),
                weights: unsafe { decode_weights(raw.weights, raw.num_weights) }?,
                offset_matrix: decode_mat4(&raw.offset_matrix),
            })
        })
        .collect()
}

/// # Safety
/// A non-null `weights` must point to `count` elements.
unsafe fn decode_weights(
    weights: *const RawVertexWeight,
    count: u32,
) -> Result<Vec<VertexWeight>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if weights.is_null() {
        return Err(ImportError::MalformedScene(format!(
            "bone claims {count} weights but has a null weight array"
        )));
    }
    let raw = unsafe { std::slice::from_raw_parts(weights, count as usize) };
    Ok(raw
        .iter()
        .map(|w| VertexWeight {
            vertex_index: w.vertex_id,
            weight: w.weight,
        })
        .collect())
}

/// Decode the morph-target list. A null array yields an empty list.
///
/// # Safety
/// A non-null `anim_meshes` must point to `count` pointers inside a live
/// foreign scene.
pub(crate) unsafe fn decode_anim_meshes(
    anim_meshes: *const *mut RawAnimMesh,
    count: u32,
) -> Result<Vec<AnimMesh>> {
    if anim_meshes.is_null() || count == 0 {
        return Ok(Vec::new());
    }
    let ptrs = unsafe { std::slice::from_raw_parts(anim_meshes, count as usize) };
    ptrs.iter()
        .enumerate()
        .map(|(i, &ptr)| {
            if ptr.is_null() {
                return Err(ImportError::MalformedScene(format!(
                    "morph-target array entry {i} is null"
                )));
            }
            let raw = unsafe { &*ptr };
            let vert_count = raw.num_vertices;
            Ok(AnimMesh {
                name: decode_string(&raw.name),
                vertices: unsafe { decode_vec3s(raw.vertices, vert_count) },
                normals: unsafe { decode_vec3s(raw.normals, vert_count) },
                tangents: unsafe { decode_vec3s(raw.tangents, vert_count) },
                bitangents: unsafe { decode_vec3s(raw.bitangents, vert_count) },
                color_sets: unsafe { decode_color_sets(&raw.colors, vert_count) },
                tex_coords: unsafe { decode_tex_coords(&raw.texture_coords, vert_count) },
                weight: raw.weight,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn raw_vec3s(n: usize) -> Vec<RawVector3> {
        (0..n)
            .map(|i| RawVector3 {
                x: i as f32,
                y: i as f32 * 2.0,
                z: i as f32 * 3.0,
            })
            .collect()
    }

    #[test]
    fn all_optional_streams_null_yields_vertices_only() {
        for n in [0usize, 1, 5, 64] {
            let verts = raw_vec3s(n);
            let mut raw = RawMesh {
                num_vertices: n as u32,
                ..RawMesh::default()
            };
            if n > 0 {
                raw.vertices = verts.as_ptr() as *mut _;
            }

            let mesh = unsafe { decode_mesh(&raw) }.unwrap();
            assert_eq!(mesh.vertex_count(), n);
            assert!(mesh.normals.is_empty());
            assert!(mesh.tangents.is_empty());
            assert!(mesh.bitangents.is_empty());
            for slot in 0..MAX_COLOR_SETS {
                assert!(mesh.color_sets[slot].is_empty());
            }
            for slot in 0..MAX_TEX_COORDS {
                assert!(mesh.tex_coords[slot].is_empty());
                assert_eq!(mesh.tex_coord_components[slot], 0);
            }
        }
    }

    #[test]
    fn present_slots_decode_to_vertex_count_and_keep_position() {
        let n = 4usize;
        let verts = raw_vec3s(n);
        let uvs = raw_vec3s(n);
        let colors: Vec<RawColor4> = (0..n)
            .map(|i| RawColor4 {
                r: i as f32,
                g: 0.0,
                b: 0.0,
                a: 1.0,
            })
            .collect();

        let mut raw = RawMesh {
            num_vertices: n as u32,
            ..RawMesh::default()
        };
        raw.vertices = verts.as_ptr() as *mut _;
        // Slot 3 only: position must be preserved, not compacted.
        raw.texture_coords[3] = uvs.as_ptr() as *mut _;
        raw.num_uv_components[3] = 2;
        // A component count on an ABSENT slot must be ignored.
        raw.num_uv_components[1] = 3;
        raw.colors[5] = colors.as_ptr() as *mut _;

        let mesh = unsafe { decode_mesh(&raw) }.unwrap();
        assert_eq!(mesh.tex_coords[3].len(), n);
        assert_eq!(mesh.tex_coord_components[3], 2);
        assert_eq!(mesh.tex_coord_components[1], 0);
        assert!(mesh.tex_coords[0].is_empty());
        assert_eq!(mesh.color_sets[5].len(), n);
        assert!(mesh.color_sets[0].is_empty());
        assert!(mesh.has_tex_coords(3));
        assert!(mesh.has_color_set(5));
    }

    #[test]
    fn faces_decode_uniformly_across_primitive_kinds() {
        let mut point = [7u32];
        let mut line = [0u32, 1];
        let mut tri = [0u32, 1, 2];
        let mut poly = [0u32, 1, 2, 3, 4];
        let faces = vec![
            RawFace { num_indices: 1, indices: point.as_mut_ptr() },
            RawFace { num_indices: 2, indices: line.as_mut_ptr() },
            RawFace { num_indices: 3, indices: tri.as_mut_ptr() },
            RawFace { num_indices: 5, indices: poly.as_mut_ptr() },
        ];

        let decoded = unsafe { decode_faces(faces.as_ptr(), 4) }.unwrap();
        assert_eq!(decoded[0].indices, vec![7]);
        assert_eq!(decoded[1].indices, vec![0, 1]);
        assert_eq!(decoded[2].indices, vec![0, 1, 2]);
        assert_eq!(decoded[3].indices, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn face_with_null_index_buffer_is_malformed() {
        let faces = vec![RawFace {
            num_indices: 3,
            indices: std::ptr::null_mut(),
        }];
        let err = unsafe { decode_faces(faces.as_ptr(), 1) }.unwrap_err();
        assert!(matches!(err, ImportError::MalformedScene(_)));
    }

    #[test]
    fn null_face_array_with_count_is_malformed() {
        let err = unsafe { decode_faces(std::ptr::null(), 2) }.unwrap_err();
        assert!(matches!(err, ImportError::MalformedScene(_)));
    }

    #[test]
    fn bones_decode_weights_and_offset() {
        let mut weights = vec![
            RawVertexWeight { vertex_id: 0, weight: 0.75 },
            RawVertexWeight { vertex_id: 2, weight: 0.25 },
        ];
        let mut bone = RawBone {
            name: crate::ffi::raw::RawString::new("spine_01"),
            num_weights: 2,
            weights: weights.as_mut_ptr(),
            ..RawBone::default()
        };
        bone.offset_matrix.rows = [
            [1.0, 0.0, 0.0, 5.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ];
        let ptrs = [&mut bone as *mut RawBone];

        let bones = unsafe { decode_bones(ptrs.as_ptr(), 1) }.unwrap();
        assert_eq!(bones[0].name, "spine_01");
        assert_eq!(bones[0].weights.len(), 2);
        assert_eq!(bones[0].weights[0], VertexWeight { vertex_index: 0, weight: 0.75 });
        assert_eq!(
            bones[0].offset_matrix.transform_point3(Vec3::ZERO),
            Vec3::new(5.0, 0.0, 0.0)
        );
    }

    #[test]
    fn null_bone_array_is_empty() {
        let bones = unsafe { decode_bones(std::ptr::null(), 0) }.unwrap();
        assert!(bones.is_empty());
    }

    #[test]
    fn anim_mesh_streams_follow_host_shape_rules() {
        let n = 3usize;
        let replacement = raw_vec3s(n);
        let mut raw = RawAnimMesh {
            name: crate::ffi::raw::RawString::new("smile"),
            num_vertices: n as u32,
            weight: 0.5,
            ..RawAnimMesh::default()
        };
        raw.vertices = replacement.as_ptr() as *mut _;
        let ptrs = [&mut raw as *mut RawAnimMesh];

        let decoded = unsafe { decode_anim_meshes(ptrs.as_ptr(), 1) }.unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].name, "smile");
        assert_eq!(decoded[0].vertices.len(), n);
        assert!(decoded[0].normals.is_empty());
        assert_eq!(decoded[0].weight, 0.5);
    }

    #[test]
    fn mesh_scalars_carry_over() {
        let mut raw = RawMesh {
            primitive_types: PrimitiveType::TRIANGLE.bits() | PrimitiveType::POINT.bits(),
            material_index: 4,
            method: 2,
            name: crate::ffi::raw::RawString::new("turret"),
            ..RawMesh::default()
        };
        raw.aabb.min = RawVector3 { x: -1.0, y: -1.0, z: -1.0 };
        raw.aabb.max = RawVector3 { x: 1.0, y: 1.0, z: 1.0 };

        let mesh = unsafe { decode_mesh(&raw) }.unwrap();
        assert!(mesh.primitive_types.contains(PrimitiveType::TRIANGLE));
        assert!(mesh.primitive_types.contains(PrimitiveType::POINT));
        assert_eq!(mesh.material_index, 4);
        assert_eq!(mesh.morph_method, MorphMethod::MorphNormalized);
        assert_eq!(mesh.name, "turret");
        assert_eq!(mesh.aabb.min, Vec3::splat(-1.0));
        assert_eq!(mesh.aabb.max, Vec3::splat(1.0));
    }
}
