use std::path::PathBuf;

/// Importer configuration.
///
/// The only knob is where to find the native importer library. With the
/// default configuration the loader walks a per-platform candidate list;
/// setting `library_path` skips the search and loads exactly that file.
#[derive(Debug, Clone, Default)]
pub struct ImporterConfig {
    /// Explicit path to the native library. `None` = platform search.
    pub library_path: Option<PathBuf>,
}

impl ImporterConfig {
    /// Configuration that loads the native library from `path`.
    pub fn with_library_path(path: impl Into<PathBuf>) -> Self {
        Self {
            library_path: Some(path.into()),
        }
    }

    /// Candidate library names probed by the default search, most specific
    /// first.
    pub fn default_candidates() -> &'static [&'static str] {
        #[cfg(target_os = "windows")]
        {
            &["assimp.dll", "libassimp.dll"]
        }
        #[cfg(target_os = "macos")]
        {
            &["libassimp.5.dylib", "libassimp.dylib"]
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            &["libassimp.so.5", "libassimp.so"]
        }
    }
}
