//! The import gateway: invokes the foreign import entrypoint, runs the
//! one-pass decode, and owns the release contract.

use std::ffi::CString;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::ImporterConfig;
use crate::decode;
use crate::error::{ImportError, Result};
use crate::ffi::library::{ImporterLib, SceneGuard};
use crate::flags::PostProcess;
use crate::types::scene::Scene;

/// Entry point to the native importer.
///
/// Loading the native library happens once per `Importer`; every
/// [`import_file`] call then performs one synchronous foreign import plus
/// a full decode pass.
///
/// The foreign library keeps its last-error text in process-wide mutable
/// state. `import_file` reads that text immediately after a failed import
/// on the calling thread; running imports concurrently on several threads
/// is only safe if the caller serializes each failure/error-read window
/// against other threads' foreign calls.
///
/// [`import_file`]: Importer::import_file
#[derive(Debug)]
pub struct Importer {
    lib: Arc<ImporterLib>,
}

impl Importer {
    /// Load the native importer from the platform's default locations.
    pub fn new() -> Result<Self> {
        Self::with_config(&ImporterConfig::default())
    }

    /// Load the native importer per `config`.
    pub fn with_config(config: &ImporterConfig) -> Result<Self> {
        let lib = ImporterLib::load(config)?;
        info!("Native importer loaded");
        Ok(Self {
            lib: Arc::new(lib),
        })
    }

    #[cfg(test)]
    pub(crate) fn from_lib(lib: ImporterLib) -> Self {
        Self { lib: Arc::new(lib) }
    }

    /// Import a model file and decode it into an owned [`Scene`].
    ///
    /// `post_process` is forwarded to the foreign entrypoint as a bitmask
    /// of transformation requests. On success the returned [`SceneRelease`]
    /// token owns the foreign allocation: consume it with
    /// [`SceneRelease::release`] once the scene's live material queries are
    /// no longer needed. Every exit path frees the allocation exactly once,
    /// including decode failures and a dropped token.
    pub fn import_file(
        &self,
        path: impl AsRef<Path>,
        post_process: PostProcess,
    ) -> Result<(Scene, SceneRelease)> {
        let path = path.as_ref();
        let c_path = CString::new(path.to_string_lossy().as_bytes())
            .map_err(|_| ImportError::InvalidPath(path.display().to_string()))?;

        info!(path = %path.display(), flags = ?post_process, "Importing scene");
        let raw = unsafe { self.lib.import_file(&c_path, post_process.bits()) };
        if raw.is_null() {
            // The last-error text must be read before any other foreign
            // call on this thread overwrites it.
            return Err(ImportError::Import(self.lib.last_error_text()));
        }

        let guard = Arc::new(SceneGuard::new(raw, Arc::clone(&self.lib)));
        let scene = unsafe { decode::decode_scene(&*raw, &guard) }?;

        info!(
            meshes = scene.meshes.len(),
            materials = scene.materials.len(),
            textures = scene.textures.len(),
            "Scene imported"
        );
        Ok((scene, SceneRelease { _guard: guard }))
    }
}

/// Owner of one imported scene's foreign allocation.
///
/// The token holds the only strong reference to the allocation guard.
/// [`release`] consumes it, so releasing twice does not typecheck; merely
/// dropping the token releases as well. Once released, the scene's owned
/// data stays valid but the materials' live texture queries return
/// [`ImportError::SceneReleased`].
///
/// [`release`]: SceneRelease::release
/// [`ImportError::SceneReleased`]: crate::error::ImportError::SceneReleased
#[derive(Debug)]
pub struct SceneRelease {
    _guard: Arc<SceneGuard>,
}

impl SceneRelease {
    /// Free the foreign allocation now.
    pub fn release(self) {}
}
