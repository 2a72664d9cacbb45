//! Eager decode of material property lists. The live texture queries stay
//! on [`Material`] and go back through the foreign library on demand.

use std::sync::Arc;

use crate::decode::primitives::decode_string;
use crate::error::{ImportError, Result};
use crate::ffi::library::SceneGuard;
use crate::ffi::raw::{RawMaterial, RawMaterialProperty};
use crate::types::material::{
    Material, MaterialHandle, MaterialProperty, PropertyTypeInfo, TextureType,
};

/// Decode the scene's material array. Each decoded material keeps a
/// non-owning handle to its foreign counterpart (weak against `guard`) for
/// the live texture queries. A null array yields an empty list.
///
/// # Safety
/// A non-null `materials` must point to `count` material pointers inside
/// the live foreign scene owned by `guard`.
pub(crate) unsafe fn decode_materials(
    materials: *const *mut RawMaterial,
    count: u32,
    guard: &Arc<SceneGuard>,
) -> Result<Vec<Material>> {
    if materials.is_null() || count == 0 {
        return Ok(Vec::new());
    }
    let ptrs = unsafe { std::slice::from_raw_parts(materials, count as usize) };
    ptrs.iter()
        .enumerate()
        .map(|(i, &ptr)| {
            if ptr.is_null() {
                return Err(ImportError::MalformedScene(format!(
                    "material array entry {i} is null"
                )));
            }
            let raw = unsafe { &*ptr };
            let properties =
                unsafe { decode_properties(raw.properties, raw.num_properties) }?;
            Ok(Material::new(
                properties,
                raw.num_allocated,
                MaterialHandle::new(ptr, Arc::downgrade(guard)),
            ))
        })
        .collect()
}

/// Decode one material's static property list.
///
/// # Safety
/// A non-null `properties` must point to `count` property pointers inside
/// a live foreign scene.
pub(crate) unsafe fn decode_properties(
    properties: *const *mut RawMaterialProperty,
    count: u32,
) -> Result<Vec<MaterialProperty>> {
    if properties.is_null() || count == 0 {
        return Ok(Vec::new());
    }
    let ptrs = unsafe { std::slice::from_raw_parts(properties, count as usize) };
    ptrs.iter()
        .enumerate()
        .map(|(i, &ptr)| {
            if ptr.is_null() {
                return Err(ImportError::MalformedScene(format!(
                    "material property {i} is null"
                )));
            }
            let raw = unsafe { &*ptr };
            let data = if raw.data_length == 0 {
                Vec::new()
            } else if raw.data.is_null() {
                return Err(ImportError::MalformedScene(format!(
                    "material property {i} claims {} data bytes but has a null buffer",
                    raw.data_length
                )));
            } else {
                unsafe { std::slice::from_raw_parts(raw.data, raw.data_length as usize) }
                    .to_vec()
            };
            Ok(MaterialProperty {
                name: decode_string(&raw.key),
                semantic: TextureType::from_raw(raw.semantic),
                index: raw.index,
                type_info: PropertyTypeInfo::from_raw(raw.property_type),
                data,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::raw::RawString;
    use crate::types::material::PropertyValue;

    #[test]
    fn property_fields_carry_over() {
        let mut bytes = 0.8f32.to_ne_bytes().to_vec();
        bytes.extend_from_slice(&0.2f32.to_ne_bytes());
        let mut prop = RawMaterialProperty {
            key: RawString::new("$clr.diffuse"),
            semantic: 1, // diffuse usage
            index: 0,
            data_length: bytes.len() as u32,
            property_type: 1, // f32 array
            data: bytes.as_mut_ptr(),
        };
        let ptrs = [&mut prop as *mut RawMaterialProperty];

        let props = unsafe { decode_properties(ptrs.as_ptr(), 1) }.unwrap();
        assert_eq!(props[0].name, "$clr.diffuse");
        assert_eq!(props[0].semantic, TextureType::Diffuse);
        assert_eq!(props[0].type_info, PropertyTypeInfo::Float);
        assert_eq!(props[0].value(), PropertyValue::Floats(vec![0.8, 0.2]));
    }

    #[test]
    fn zero_length_property_never_reads_buffer() {
        let mut prop = RawMaterialProperty {
            key: RawString::new("$mat.flags"),
            property_type: 5,
            ..RawMaterialProperty::default()
        };
        let ptrs = [&mut prop as *mut RawMaterialProperty];
        let props = unsafe { decode_properties(ptrs.as_ptr(), 1) }.unwrap();
        assert!(props[0].data.is_empty());
    }

    #[test]
    fn nonzero_length_with_null_buffer_is_malformed() {
        let mut prop = RawMaterialProperty {
            data_length: 16,
            ..RawMaterialProperty::default()
        };
        let ptrs = [&mut prop as *mut RawMaterialProperty];
        let err = unsafe { decode_properties(ptrs.as_ptr(), 1) }.unwrap_err();
        assert!(matches!(err, ImportError::MalformedScene(_)));
    }

    #[test]
    fn null_property_array_is_empty() {
        let props = unsafe { decode_properties(std::ptr::null(), 0) }.unwrap();
        assert!(props.is_empty());
    }
}
