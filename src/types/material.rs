use std::fmt;
use std::sync::Weak;

use crate::error::{ImportError, Result};
use crate::ffi::library::SceneGuard;
use crate::ffi::raw::{
    RawMaterial, RawString, STATUS_FAILURE, STATUS_OUT_OF_MEMORY, STATUS_SUCCESS,
};

/// Texture usage semantic: the role a texture (or texture-tagged property)
/// plays in a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureType {
    /// Not a texture property.
    None,
    Diffuse,
    Specular,
    Ambient,
    Emissive,
    /// Height map; green-scale bump maps land here in some formats.
    Height,
    Normals,
    Shininess,
    Opacity,
    Displacement,
    Lightmap,
    Reflection,
    // PBR extension block
    BaseColor,
    NormalCamera,
    EmissionColor,
    Metalness,
    DiffuseRoughness,
    AmbientOcclusion,
    /// A texture reference that fits no other semantic.
    Unknown,
    /// Id outside the documented range, preserved as given.
    Unrecognized(u32),
}

impl TextureType {
    /// Map the foreign usage id.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => TextureType::None,
            1 => TextureType::Diffuse,
            2 => TextureType::Specular,
            3 => TextureType::Ambient,
            4 => TextureType::Emissive,
            5 => TextureType::Height,
            6 => TextureType::Normals,
            7 => TextureType::Shininess,
            8 => TextureType::Opacity,
            9 => TextureType::Displacement,
            10 => TextureType::Lightmap,
            11 => TextureType::Reflection,
            12 => TextureType::BaseColor,
            13 => TextureType::NormalCamera,
            14 => TextureType::EmissionColor,
            15 => TextureType::Metalness,
            16 => TextureType::DiffuseRoughness,
            17 => TextureType::AmbientOcclusion,
            18 => TextureType::Unknown,
            other => TextureType::Unrecognized(other),
        }
    }

    /// The foreign usage id for this semantic.
    pub fn as_raw(self) -> u32 {
        match self {
            TextureType::None => 0,
            TextureType::Diffuse => 1,
            TextureType::Specular => 2,
            TextureType::Ambient => 3,
            TextureType::Emissive => 4,
            TextureType::Height => 5,
            TextureType::Normals => 6,
            TextureType::Shininess => 7,
            TextureType::Opacity => 8,
            TextureType::Displacement => 9,
            TextureType::Lightmap => 10,
            TextureType::Reflection => 11,
            TextureType::BaseColor => 12,
            TextureType::NormalCamera => 13,
            TextureType::EmissionColor => 14,
            TextureType::Metalness => 15,
            TextureType::DiffuseRoughness => 16,
            TextureType::AmbientOcclusion => 17,
            TextureType::Unknown => 18,
            TextureType::Unrecognized(raw) => raw,
        }
    }
}

/// Layout tag of a material property's raw byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyTypeInfo {
    /// Array of f32.
    Float,
    /// Array of f64.
    Double,
    /// One length-prefixed string.
    String,
    /// Array of i32.
    Integer,
    /// Opaque bytes.
    Buffer,
    /// Tag outside the documented range, preserved as given.
    Unrecognized(u32),
}

impl PropertyTypeInfo {
    /// Map the foreign layout tag.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            1 => PropertyTypeInfo::Float,
            2 => PropertyTypeInfo::Double,
            3 => PropertyTypeInfo::String,
            4 => PropertyTypeInfo::Integer,
            5 => PropertyTypeInfo::Buffer,
            other => PropertyTypeInfo::Unrecognized(other),
        }
    }
}

/// A material property's payload, interpreted from the raw bytes purely by
/// its layout tag.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
    String(String),
    Integers(Vec<i32>),
    Buffer(Vec<u8>),
}

/// One static material property: key, texture semantic, layout tag and the
/// raw value bytes.
#[derive(Debug, Clone)]
pub struct MaterialProperty {
    /// Property key, e.g. `$clr.diffuse`. Generally case insensitive.
    pub name: String,
    /// Texture usage semantic; [`TextureType::None`] for non-texture
    /// properties.
    pub semantic: TextureType,
    /// Texture slot index; zero for non-texture properties.
    pub index: u32,
    /// Layout of `data`.
    pub type_info: PropertyTypeInfo,
    /// The raw value bytes, exactly as stored by the importer.
    pub data: Vec<u8>,
}

impl MaterialProperty {
    /// Interpret the raw bytes according to the layout tag. An
    /// unrecognized tag falls back to the opaque buffer form; a buffer
    /// whose length is not a multiple of the element size drops the
    /// trailing remainder.
    pub fn value(&self) -> PropertyValue {
        match self.type_info {
            PropertyTypeInfo::Float => PropertyValue::Floats(
                self.data
                    .chunks_exact(4)
                    .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
            PropertyTypeInfo::Double => PropertyValue::Doubles(
                self.data
                    .chunks_exact(8)
                    .map(|c| f64::from_ne_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                    .collect(),
            ),
            PropertyTypeInfo::String => PropertyValue::String(decode_prefixed_string(&self.data)),
            PropertyTypeInfo::Integer => PropertyValue::Integers(
                self.data
                    .chunks_exact(4)
                    .map(|c| i32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
            PropertyTypeInfo::Buffer | PropertyTypeInfo::Unrecognized(_) => {
                PropertyValue::Buffer(self.data.clone())
            }
        }
    }
}

/// String properties are serialized as a 4-byte length prefix followed by
/// the bytes (and a trailing NUL the prefix does not count).
fn decode_prefixed_string(data: &[u8]) -> String {
    if data.len() < 4 {
        return String::new();
    }
    let len = u32::from_ne_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let body = &data[4..];
    String::from_utf8_lossy(&body[..len.min(body.len())]).into_owned()
}

/// Non-owning handle to the still-foreign-owned material object, used by
/// the live texture queries. The weak guard reference detects release.
pub(crate) struct MaterialHandle {
    raw: *const RawMaterial,
    guard: Weak<SceneGuard>,
}

impl MaterialHandle {
    pub(crate) fn new(raw: *const RawMaterial, guard: Weak<SceneGuard>) -> Self {
        Self { raw, guard }
    }

    /// Handle with no backing scene; every live query reports
    /// [`ImportError::SceneReleased`].
    #[cfg(test)]
    pub(crate) fn detached() -> Self {
        Self {
            raw: std::ptr::null(),
            guard: Weak::new(),
        }
    }
}

/// One decoded material: the eagerly-copied static property list plus live
/// texture queries against the foreign material object.
///
/// The live queries ([`texture_count`], [`texture`]) dereference foreign
/// memory and are therefore only valid before the owning scene's release
/// operation runs; afterwards they return [`ImportError::SceneReleased`]
/// instead of reading stale data.
///
/// [`texture_count`]: Material::texture_count
/// [`texture`]: Material::texture
pub struct Material {
    /// All static properties loaded for this material.
    pub properties: Vec<MaterialProperty>,
    /// Storage the native importer allocated for the property buffers.
    pub allocated_storage: u32,
    handle: MaterialHandle,
}

impl Material {
    pub(crate) fn new(
        properties: Vec<MaterialProperty>,
        allocated_storage: u32,
        handle: MaterialHandle,
    ) -> Self {
        Self {
            properties,
            allocated_storage,
            handle,
        }
    }

    /// Number of textures with usage `texture_type` on this material.
    ///
    /// Re-invokes the native importer; the count query itself cannot fail
    /// on the foreign side (no matches is zero), but the call is rejected
    /// once the scene's native allocation has been released.
    pub fn texture_count(&self, texture_type: TextureType) -> Result<u32> {
        let guard = self
            .handle
            .guard
            .upgrade()
            .ok_or(ImportError::SceneReleased)?;
        Ok(unsafe {
            guard
                .lib()
                .material_texture_count(self.handle.raw, texture_type.as_raw())
        })
    }

    /// Path of the `index`-th texture with usage `texture_type`.
    ///
    /// Re-invokes the native importer. Foreign status maps to the error
    /// taxonomy: failure wraps the native error text, out-of-memory and
    /// unknown codes map to their own variants. Rejected once the scene's
    /// native allocation has been released.
    pub fn texture(&self, texture_type: TextureType, index: u32) -> Result<String> {
        let guard = self
            .handle
            .guard
            .upgrade()
            .ok_or(ImportError::SceneReleased)?;

        let mut path = RawString::default();
        let status = unsafe {
            guard
                .lib()
                .material_texture(self.handle.raw, texture_type.as_raw(), index, &mut path)
        };
        match status {
            STATUS_SUCCESS => Ok(crate::decode::primitives::decode_string(&path)),
            STATUS_FAILURE => Err(ImportError::TextureFailure(guard.lib().last_error_text())),
            STATUS_OUT_OF_MEMORY => Err(ImportError::OutOfMemory),
            code => Err(ImportError::UnknownStatus(code)),
        }
    }
}

impl fmt::Debug for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Material")
            .field("properties", &self.properties)
            .field("allocated_storage", &self.allocated_storage)
            .finish_non_exhaustive()
    }
}
