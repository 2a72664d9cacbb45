/// All error types for the scene-import layer.
#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    /// The native library could not be located or loaded.
    #[error("Library error: {0}")]
    Library(#[from] libloading::Error),
    /// The native importer returned no scene; carries its last-error text.
    #[error("Import error: {0}")]
    Import(String),
    /// The import path could not be passed to the native importer.
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    /// Foreign memory violated the importer's contract (non-zero count with
    /// a null data pointer on a mandatory buffer).
    #[error("Malformed scene: {0}")]
    MalformedScene(String),
    /// A texture query reported failure; carries the native error text.
    #[error("Texture query error: {0}")]
    TextureFailure(String),
    /// A texture query ran out of memory on the native side.
    #[error("Texture query error: out of memory")]
    OutOfMemory,
    /// A texture query returned a status code outside the documented set.
    #[error("Texture query error: unknown status code {0}")]
    UnknownStatus(i32),
    /// A foreign-backed query was attempted after the scene's native
    /// allocation was released.
    #[error("Scene error: native resources already released")]
    SceneReleased,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_strings() {
        let e = ImportError::Import("bad token in file".into());
        assert_eq!(e.to_string(), "Import error: bad token in file");

        let e = ImportError::MalformedScene("face with null indices".into());
        assert_eq!(e.to_string(), "Malformed scene: face with null indices");

        let e = ImportError::TextureFailure("no such texture".into());
        assert_eq!(e.to_string(), "Texture query error: no such texture");

        let e = ImportError::OutOfMemory;
        assert_eq!(e.to_string(), "Texture query error: out of memory");

        let e = ImportError::UnknownStatus(-7);
        assert_eq!(e.to_string(), "Texture query error: unknown status code -7");

        let e = ImportError::SceneReleased;
        assert_eq!(e.to_string(), "Scene error: native resources already released");
    }
}
