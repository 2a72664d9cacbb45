/// One embedded texture, fully owned.
///
/// Two storage forms exist. Uncompressed: `width * height` texels, each
/// written to `data` as 4 bytes in the foreign component order
/// `(b, g, r, a)` -- documented upstream as an "ARGB8888" buffer and
/// preserved here byte-for-byte. Compressed (`height == 0`): `width` holds
/// the blob size in bytes and `data` is the raw file blob (e.g. a PNG)
/// for an external image decoder.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedTexture {
    /// Pixel width, or the blob byte length when compressed.
    pub width: u32,
    /// Pixel height; zero marks a compressed blob.
    pub height: u32,
    /// Loader hint, e.g. `"png"`. Empty when the loader has none.
    pub format_hint: String,
    pub filename: String,
    pub data: Vec<u8>,
    pub is_compressed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_texture_is_empty() {
        let tex = EmbeddedTexture::default();
        assert_eq!(tex.width, 0);
        assert!(tex.data.is_empty());
        assert!(!tex.is_compressed);
    }
}
