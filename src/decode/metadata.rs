//! Tagged-union decode of node metadata.

use std::collections::HashMap;

use glam::Vec3;
use tracing::warn;

use crate::decode::primitives::{decode_string, decode_vec3};
use crate::error::{ImportError, Result};
use crate::ffi::raw::{RawMetadata, RawMetadataEntry, RawString, RawVector3};
use crate::types::metadata::MetadataValue;

const TAG_BOOL: u32 = 0;
const TAG_INT32: u32 = 1;
const TAG_UINT64: u32 = 2;
const TAG_FLOAT32: u32 = 3;
const TAG_FLOAT64: u32 = 4;
const TAG_STRING: u32 = 5;
const TAG_VEC3: u32 = 6;

/// Decode a node's metadata block into an owned map. A null block means no
/// metadata and yields an empty map.
///
/// # Safety
/// A non-null `meta` must point into a live foreign scene; its key/value
/// arrays, when non-null, must hold `num_properties` entries.
pub(crate) unsafe fn decode_metadata(
    meta: *const RawMetadata,
) -> Result<HashMap<String, MetadataValue>> {
    if meta.is_null() {
        return Ok(HashMap::new());
    }
    let meta = unsafe { &*meta };
    let count = meta.num_properties as usize;
    if count == 0 {
        return Ok(HashMap::new());
    }
    if meta.keys.is_null() || meta.values.is_null() {
        return Err(ImportError::MalformedScene(format!(
            "metadata block claims {count} properties but has a null key or value array"
        )));
    }

    let keys = unsafe { std::slice::from_raw_parts(meta.keys, count) };
    let values = unsafe { std::slice::from_raw_parts(meta.values, count) };

    let mut out = HashMap::with_capacity(count);
    for (key, value) in keys.iter().zip(values) {
        out.insert(decode_string(key), unsafe { decode_entry(value) });
    }
    Ok(out)
}

/// Decode one tagged metadata entry.
///
/// A null payload pointer yields the tag's zero/default value; a tag
/// outside the known range is preserved as [`MetadataValue::Undecoded`].
///
/// # Safety
/// A non-null payload pointer must point to a value of the layout the tag
/// announces.
pub(crate) unsafe fn decode_entry(entry: &RawMetadataEntry) -> MetadataValue {
    let data = entry.data;
    match entry.entry_type {
        TAG_BOOL => {
            if data.is_null() {
                MetadataValue::Bool(false)
            } else {
                // The foreign bool is one byte; read it as an integer so
                // out-of-range bit patterns stay defined.
                MetadataValue::Bool(unsafe { *(data as *const u8) } != 0)
            }
        }
        TAG_INT32 => {
            if data.is_null() {
                MetadataValue::Int32(0)
            } else {
                MetadataValue::Int32(unsafe { *(data as *const i32) })
            }
        }
        TAG_UINT64 => {
            if data.is_null() {
                MetadataValue::UInt64(0)
            } else {
                MetadataValue::UInt64(unsafe { *(data as *const u64) })
            }
        }
        TAG_FLOAT32 => {
            if data.is_null() {
                MetadataValue::Float32(0.0)
            } else {
                MetadataValue::Float32(unsafe { *(data as *const f32) })
            }
        }
        TAG_FLOAT64 => {
            if data.is_null() {
                MetadataValue::Float64(0.0)
            } else {
                MetadataValue::Float64(unsafe { *(data as *const f64) })
            }
        }
        TAG_STRING => {
            if data.is_null() {
                MetadataValue::String(String::new())
            } else {
                MetadataValue::String(decode_string(unsafe { &*(data as *const RawString) }))
            }
        }
        TAG_VEC3 => {
            if data.is_null() {
                MetadataValue::Vec3(Vec3::ZERO)
            } else {
                MetadataValue::Vec3(decode_vec3(unsafe { &*(data as *const RawVector3) }))
            }
        }
        tag => {
            warn!(tag, "Unrecognized metadata tag; payload left undecoded");
            MetadataValue::Undecoded { tag }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tag: u32, data: *mut std::ffi::c_void) -> RawMetadataEntry {
        RawMetadataEntry {
            entry_type: tag,
            data,
        }
    }

    #[test]
    fn decodes_all_seven_tags() {
        let mut flag = 1u8;
        let mut int = -17i32;
        let mut big = u64::MAX;
        let mut f = 0.5f32;
        let mut d = 2.75f64;
        let mut s = RawString::new("generator");
        let mut v = RawVector3 { x: 1.0, y: 2.0, z: 3.0 };

        unsafe {
            assert_eq!(
                decode_entry(&entry(TAG_BOOL, (&mut flag as *mut u8).cast())),
                MetadataValue::Bool(true)
            );
            assert_eq!(
                decode_entry(&entry(TAG_INT32, (&mut int as *mut i32).cast())),
                MetadataValue::Int32(-17)
            );
            assert_eq!(
                decode_entry(&entry(TAG_UINT64, (&mut big as *mut u64).cast())),
                MetadataValue::UInt64(u64::MAX)
            );
            assert_eq!(
                decode_entry(&entry(TAG_FLOAT32, (&mut f as *mut f32).cast())),
                MetadataValue::Float32(0.5)
            );
            assert_eq!(
                decode_entry(&entry(TAG_FLOAT64, (&mut d as *mut f64).cast())),
                MetadataValue::Float64(2.75)
            );
            assert_eq!(
                decode_entry(&entry(TAG_STRING, (&mut s as *mut RawString).cast())),
                MetadataValue::String("generator".into())
            );
            assert_eq!(
                decode_entry(&entry(TAG_VEC3, (&mut v as *mut RawVector3).cast())),
                MetadataValue::Vec3(Vec3::new(1.0, 2.0, 3.0))
            );
        }
    }

    #[test]
    fn null_payload_yields_defaults() {
        unsafe {
            assert_eq!(
                decode_entry(&entry(TAG_BOOL, std::ptr::null_mut())),
                MetadataValue::Bool(false)
            );
            assert_eq!(
                decode_entry(&entry(TAG_UINT64, std::ptr::null_mut())),
                MetadataValue::UInt64(0)
            );
            assert_eq!(
                decode_entry(&entry(TAG_STRING, std::ptr::null_mut())),
                MetadataValue::String(String::new())
            );
            assert_eq!(
                decode_entry(&entry(TAG_VEC3, std::ptr::null_mut())),
                MetadataValue::Vec3(Vec3::ZERO)
            );
        }
    }

    #[test]
    fn unrecognized_tag_is_preserved() {
        let mut payload = 0xFFu8;
        let raw = entry(99, (&mut payload as *mut u8).cast());
        assert_eq!(unsafe { decode_entry(&raw) }, MetadataValue::Undecoded { tag: 99 });
    }

    #[test]
    fn null_metadata_block_is_empty_map() {
        let map = unsafe { decode_metadata(std::ptr::null()) }.unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn metadata_map_keys_and_values() {
        let mut keys = vec![RawString::new("UnitScaleFactor"), RawString::new("UpAxis")];
        let mut scale = 100.0f64;
        let mut values = vec![
            entry(TAG_FLOAT64, (&mut scale as *mut f64).cast()),
            entry(TAG_INT32, std::ptr::null_mut()),
        ];
        let meta = RawMetadata {
            num_properties: 2,
            keys: keys.as_mut_ptr(),
            values: values.as_mut_ptr(),
        };

        let map = unsafe { decode_metadata(&meta) }.unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["UnitScaleFactor"], MetadataValue::Float64(100.0));
        assert_eq!(map["UpAxis"], MetadataValue::Int32(0));
    }

    #[test]
    fn null_key_array_with_count_is_malformed() {
        let mut values = vec![entry(TAG_BOOL, std::ptr::null_mut())];
        let meta = RawMetadata {
            num_properties: 1,
            keys: std::ptr::null_mut(),
            values: values.as_mut_ptr(),
        };
        let err = unsafe { decode_metadata(&meta) }.unwrap_err();
        assert!(matches!(err, ImportError::MalformedScene(_)));
    }
}
