use bitflags::bitflags;

bitflags! {
    /// Post-processing steps the native importer applies before returning
    /// the scene. Passed as a bitmask to [`Importer::import_file`].
    ///
    /// [`Importer::import_file`]: crate::Importer::import_file
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PostProcess: u32 {
        /// Calculate tangents and bitangents for meshes with normals and UVs
        const CALC_TANGENT_SPACE = 1 << 0;
        /// Merge identical vertices, producing indexed geometry
        const JOIN_IDENTICAL_VERTICES = 1 << 1;
        /// Convert the scene to left-handed coordinates
        const MAKE_LEFT_HANDED = 1 << 2;
        /// Triangulate all polygons with more than three corners
        const TRIANGULATE = 1 << 3;
        /// Strip components named by the remove-component property
        const REMOVE_COMPONENT = 1 << 4;
        /// Generate flat per-face normals where missing
        const GEN_NORMALS = 1 << 5;
        /// Generate smooth per-vertex normals where missing
        const GEN_SMOOTH_NORMALS = 1 << 6;
        /// Split meshes exceeding vertex/triangle limits
        const SPLIT_LARGE_MESHES = 1 << 7;
        /// Bake node transforms into vertices and collapse the hierarchy
        const PRE_TRANSFORM_VERTICES = 1 << 8;
        /// Limit the number of bone influences per vertex
        const LIMIT_BONE_WEIGHTS = 1 << 9;
        /// Validate the imported structure
        const VALIDATE_DATA_STRUCTURE = 1 << 10;
        /// Reorder triangles for vertex-cache locality
        const IMPROVE_CACHE_LOCALITY = 1 << 11;
        /// Remove materials not referenced by any mesh
        const REMOVE_REDUNDANT_MATERIALS = 1 << 12;
        /// Flip normals that face inward
        const FIX_INFACING_NORMALS = 1 << 13;
        /// Populate armature and node fields on bones
        const POPULATE_ARMATURE_DATA = 1 << 14;
        /// Split meshes so each contains one primitive type
        const SORT_BY_PTYPE = 1 << 15;
        /// Find and remove degenerate primitives
        const FIND_DEGENERATES = 1 << 16;
        /// Find and fix invalid data (NaN normals, out-of-range UVs)
        const FIND_INVALID_DATA = 1 << 17;
        /// Generate UV coordinates from mapping hints
        const GEN_UV_COORDS = 1 << 18;
        /// Apply per-texture UV transforms to the coordinate channels
        const TRANSFORM_UV_COORDS = 1 << 19;
        /// Detect duplicated meshes and replace them with instance references
        const FIND_INSTANCES = 1 << 20;
        /// Merge small meshes to reduce draw calls
        const OPTIMIZE_MESHES = 1 << 21;
        /// Collapse and reorder the node graph
        const OPTIMIZE_GRAPH = 1 << 22;
        /// Flip UV origin to top-left
        const FLIP_UVS = 1 << 23;
        /// Flip face winding order to clockwise
        const FLIP_WINDING_ORDER = 1 << 24;
        /// Split meshes exceeding a bone-count limit
        const SPLIT_BY_BONE_COUNT = 1 << 25;
        /// Remove bones with negligible influence
        const DEBONE = 1 << 26;
        /// Apply a global scale factor from the import properties
        const GLOBAL_SCALE = 1 << 27;
        /// Pull referenced external textures into the scene as embedded ones
        const EMBED_TEXTURES = 1 << 28;
        /// Force regeneration of normals even if present
        const FORCE_GEN_NORMALS = 1 << 29;
        /// Drop all normals
        const DROP_NORMALS = 1 << 30;
        /// Compute per-mesh axis-aligned bounding boxes
        const GEN_BOUNDING_BOXES = 1 << 31;

        /// Fast real-time preset: indexed triangles with tangent space.
        const TARGET_REALTIME_FAST = Self::CALC_TANGENT_SPACE.bits()
            | Self::GEN_NORMALS.bits()
            | Self::JOIN_IDENTICAL_VERTICES.bits()
            | Self::TRIANGULATE.bits()
            | Self::GEN_UV_COORDS.bits()
            | Self::SORT_BY_PTYPE.bits();
        /// Default real-time preset: adds smoothing, splitting and cleanup.
        const TARGET_REALTIME_QUALITY = Self::CALC_TANGENT_SPACE.bits()
            | Self::GEN_SMOOTH_NORMALS.bits()
            | Self::JOIN_IDENTICAL_VERTICES.bits()
            | Self::IMPROVE_CACHE_LOCALITY.bits()
            | Self::LIMIT_BONE_WEIGHTS.bits()
            | Self::REMOVE_REDUNDANT_MATERIALS.bits()
            | Self::SPLIT_LARGE_MESHES.bits()
            | Self::TRIANGULATE.bits()
            | Self::GEN_UV_COORDS.bits()
            | Self::SORT_BY_PTYPE.bits()
            | Self::FIND_DEGENERATES.bits()
            | Self::FIND_INVALID_DATA.bits();
        /// Maximum quality preset: quality plus instance detection and
        /// full validation.
        const TARGET_REALTIME_MAX_QUALITY = Self::TARGET_REALTIME_QUALITY.bits()
            | Self::FIND_INSTANCES.bits()
            | Self::VALIDATE_DATA_STRUCTURE.bits()
            | Self::OPTIMIZE_MESHES.bits();
    }
}

bitflags! {
    /// State flags the native importer sets on a returned scene.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SceneFlags: u32 {
        /// The scene is missing data (e.g. a material file failed to load)
        const INCOMPLETE = 1 << 0;
        /// Validation ran successfully
        const VALIDATED = 1 << 1;
        /// Validation ran and reported warnings
        const VALIDATION_WARNING = 1 << 2;
        /// Vertices are not joined; each face references unique vertices
        const NON_VERBOSE_FORMAT = 1 << 3;
        /// The scene is pure height-map terrain data
        const TERRAIN = 1 << 4;
        /// Scene data may be shared with the importer's internal caches
        const ALLOW_SHARED = 1 << 5;
    }
}

bitflags! {
    /// Primitive kinds present in a mesh.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PrimitiveType: u32 {
        /// Single-vertex points
        const POINT = 1 << 0;
        /// Two-vertex line segments
        const LINE = 1 << 1;
        /// Three-vertex triangles
        const TRIANGLE = 1 << 2;
        /// Faces with four or more vertices
        const POLYGON = 1 << 3;
    }
}
