//! Embedded-texture decoding: texel reorder and hint/filename strings.

use tracing::debug;

use crate::decode::primitives::{decode_fixed_string, decode_string};
use crate::error::{ImportError, Result};
use crate::ffi::raw::{RawTexel, RawTexture};
use crate::types::texture::EmbeddedTexture;

/// Decode the scene's embedded-texture array. A null array yields an empty
/// list.
///
/// # Safety
/// A non-null `textures` must point to `count` texture pointers inside a
/// live foreign scene.
pub(crate) unsafe fn decode_textures(
    textures: *const *mut RawTexture,
    count: u32,
) -> Result<Vec<EmbeddedTexture>> {
    if textures.is_null() || count == 0 {
        return Ok(Vec::new());
    }
    let ptrs = unsafe { std::slice::from_raw_parts(textures, count as usize) };
    ptrs.iter()
        .enumerate()
        .map(|(i, &ptr)| {
            if ptr.is_null() {
                return Err(ImportError::MalformedScene(format!(
                    "texture array entry {i} is null"
                )));
            }
            unsafe { decode_texture(&*ptr) }
        })
        .collect()
}

/// Decode one embedded texture.
///
/// A zero height marks a compressed blob whose byte length sits in
/// `width`; the blob is stored as `width / 4` texel structs. Uncompressed
/// textures hold `width * height` texels.
///
/// # Safety
/// `raw` must reference a texture inside a live foreign scene.
pub(crate) unsafe fn decode_texture(raw: &RawTexture) -> Result<EmbeddedTexture> {
    let is_compressed = raw.height == 0;
    let texel_count = if is_compressed {
        raw.width as usize / 4
    } else {
        raw.width as usize * raw.height as usize
    };

    let texture = EmbeddedTexture {
        width: raw.width,
        height: raw.height,
        format_hint: decode_fixed_string(&raw.format_hint),
        filename: decode_string(&raw.filename),
        data: unsafe { decode_texels(raw.texels, texel_count) }?,
        is_compressed,
    };

    debug!(
        filename = %texture.filename,
        hint = %texture.format_hint,
        bytes = texture.data.len(),
        compressed = texture.is_compressed,
        "Decoded embedded texture"
    );
    Ok(texture)
}

/// Flatten `count` texels into bytes, preserving the stored component
/// order `(b, g, r, a)` at the byte-position level. Upstream documents the
/// result as an "ARGB8888" buffer; the ordering contract is the byte
/// layout written here, and for compressed blobs the four bytes are
/// arbitrary file bytes where any swap would corrupt the blob.
///
/// # Safety
/// A non-null `texels` must point to `count` readable elements.
unsafe fn decode_texels(texels: *const RawTexel, count: usize) -> Result<Vec<u8>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if texels.is_null() {
        return Err(ImportError::MalformedScene(format!(
            "texture claims {count} texels but has a null data pointer"
        )));
    }
    let raw = unsafe { std::slice::from_raw_parts(texels, count) };
    let mut data = Vec::with_capacity(count * 4);
    for texel in raw {
        data.extend_from_slice(&[texel.b, texel.g, texel.r, texel.a]);
    }
    Ok(data)
}
