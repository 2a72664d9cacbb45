//! Public-surface integration tests.
//!
//! The native importer is not assumed to be installed, so these tests
//! exercise what the public API guarantees without it: configuration,
//! library-load failure, the enumeration surfaces, and the owned data
//! model. The full import -> decode -> release path runs against an
//! in-process stub backend in the crate's unit tests.

use scene_import::types::{MetadataValue, MorphMethod, PropertyTypeInfo, TextureType};
use scene_import::{ImportError, Importer, ImporterConfig, PostProcess, PrimitiveType, SceneFlags};

#[test]
fn loading_a_bogus_library_path_fails_with_library_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = ImporterConfig::with_library_path(tmp.path().join("no-such-importer.so"));
    let err = Importer::with_config(&config).unwrap_err();
    assert!(matches!(err, ImportError::Library(_)));
}

#[test]
fn loading_a_non_library_file_fails_with_library_error() {
    let tmp = tempfile::tempdir().unwrap();
    let bogus = tmp.path().join("not-a-library.so");
    std::fs::write(&bogus, b"definitely not ELF").unwrap();
    let err = Importer::with_config(&ImporterConfig::with_library_path(&bogus)).unwrap_err();
    assert!(matches!(err, ImportError::Library(_)));
}

#[test]
fn post_process_surface_is_complete() {
    // 32 named single-bit flags spanning the full word.
    let named = PostProcess::all();
    assert!(named.contains(PostProcess::CALC_TANGENT_SPACE));
    assert!(named.contains(PostProcess::GEN_BOUNDING_BOXES));
    assert_eq!(named.bits(), u32::MAX);

    // Presets are unions of named flags.
    assert!(PostProcess::TARGET_REALTIME_FAST.contains(PostProcess::TRIANGULATE));
    assert!(
        PostProcess::TARGET_REALTIME_MAX_QUALITY.contains(PostProcess::TARGET_REALTIME_QUALITY)
    );
}

#[test]
fn scene_and_primitive_flag_tables() {
    assert_eq!(SceneFlags::INCOMPLETE.bits(), 0x1);
    assert_eq!(SceneFlags::ALLOW_SHARED.bits(), 0x20);
    assert_eq!(PrimitiveType::POINT.bits(), 0x1);
    assert_eq!(PrimitiveType::POLYGON.bits(), 0x8);
}

#[test]
fn texture_type_ids_cover_the_pbr_block() {
    assert_eq!(TextureType::Diffuse.as_raw(), 1);
    assert_eq!(TextureType::Reflection.as_raw(), 11);
    assert_eq!(TextureType::BaseColor.as_raw(), 12);
    assert_eq!(TextureType::AmbientOcclusion.as_raw(), 17);
    assert_eq!(TextureType::Unknown.as_raw(), 18);
    assert_eq!(TextureType::from_raw(15), TextureType::Metalness);
    assert_eq!(TextureType::from_raw(77), TextureType::Unrecognized(77));
}

#[test]
fn property_and_morph_tag_tables() {
    assert_eq!(PropertyTypeInfo::from_raw(1), PropertyTypeInfo::Float);
    assert_eq!(PropertyTypeInfo::from_raw(5), PropertyTypeInfo::Buffer);
    assert_eq!(MorphMethod::from_raw(3), MorphMethod::MorphRelative);
    assert_eq!(MorphMethod::from_raw(0), MorphMethod::Unknown);
}

#[test]
fn metadata_values_are_plain_data() {
    let v = MetadataValue::String("blender 4.2".into());
    assert!(v.is_decoded());
    let v = MetadataValue::Undecoded { tag: 11 };
    assert!(!v.is_decoded());
}

#[test]
fn owned_mesh_model_invariants() {
    use scene_import::glam::Vec3;
    use scene_import::types::Mesh;

    let mesh = Mesh {
        vertices: vec![Vec3::ZERO; 4],
        normals: vec![Vec3::Z; 4],
        ..Mesh::default()
    };
    assert_eq!(mesh.vertex_count(), 4);
    assert!(mesh.has_normals());
    assert!(!mesh.has_color_set(0));
    assert_eq!(mesh.tex_coord_components, [0; 8]);
}
