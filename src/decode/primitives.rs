//! Decoders for the foreign scalar and fixed-layout types: strings,
//! vector/color/index arrays, matrices and bounding boxes.

use glam::{Mat4, Vec3, Vec4};

use crate::ffi::raw::{RawAabb, RawColor4, RawMatrix4x4, RawString, RawVector3};
use crate::types::mesh::Aabb;

/// Decode the length-prefixed foreign string. A zero length decodes to the
/// empty string without reading the buffer; the length is explicit, no
/// null-terminator scan happens.
pub(crate) fn decode_string(s: &RawString) -> String {
    if s.length == 0 {
        return String::new();
    }
    let len = (s.length as usize).min(s.data.len());
    String::from_utf8_lossy(&s.data[..len]).into_owned()
}

/// Decode a fixed foreign char buffer, truncated at the first NUL
/// (`"png\0"` becomes `"png"`).
pub(crate) fn decode_fixed_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

/// Copy a foreign 3-vector array. A null pointer yields an empty sequence.
///
/// # Safety
/// A non-null `ptr` must point to `count` readable elements.
pub(crate) unsafe fn decode_vec3s(ptr: *const RawVector3, count: u32) -> Vec<Vec3> {
    if ptr.is_null() || count == 0 {
        return Vec::new();
    }
    let raw = unsafe { std::slice::from_raw_parts(ptr, count as usize) };
    raw.iter().map(|v| Vec3::new(v.x, v.y, v.z)).collect()
}

/// Copy a foreign 4-color array. A null pointer yields an empty sequence.
///
/// # Safety
/// A non-null `ptr` must point to `count` readable elements.
pub(crate) unsafe fn decode_colors(ptr: *const RawColor4, count: u32) -> Vec<Vec4> {
    if ptr.is_null() || count == 0 {
        return Vec::new();
    }
    let raw = unsafe { std::slice::from_raw_parts(ptr, count as usize) };
    raw.iter().map(|c| Vec4::new(c.r, c.g, c.b, c.a)).collect()
}

/// Copy a foreign index array. A null pointer yields an empty sequence.
///
/// # Safety
/// A non-null `ptr` must point to `count` readable elements.
pub(crate) unsafe fn decode_u32s(ptr: *const u32, count: u32) -> Vec<u32> {
    if ptr.is_null() || count == 0 {
        return Vec::new();
    }
    unsafe { std::slice::from_raw_parts(ptr, count as usize) }.to_vec()
}

/// Decode one foreign 3-vector.
pub(crate) fn decode_vec3(v: &RawVector3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Convert the foreign row-major 4x4 matrix into a column-major [`Mat4`].
pub(crate) fn decode_mat4(m: &RawMatrix4x4) -> Mat4 {
    let r = &m.rows;
    Mat4::from_cols(
        Vec4::new(r[0][0], r[1][0], r[2][0], r[3][0]),
        Vec4::new(r[0][1], r[1][1], r[2][1], r[3][1]),
        Vec4::new(r[0][2], r[1][2], r[2][2], r[3][2]),
        Vec4::new(r[0][3], r[1][3], r[2][3], r[3][3]),
    )
}

/// Copy the bounding box as a verbatim min/max pair.
pub(crate) fn decode_aabb(aabb: &RawAabb) -> Aabb {
    Aabb {
        min: decode_vec3(&aabb.min),
        max: decode_vec3(&aabb.max),
    }
}
