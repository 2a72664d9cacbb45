//! Runtime binding of the native importer's entrypoints.
//!
//! The library is loaded once per [`ImporterLib`] with `libloading`; the
//! five entrypoints are resolved up front into plain fn pointers so later
//! calls carry no lookup cost. [`SceneGuard`] is the single owner of one
//! foreign scene allocation: its `Drop` is the only place the foreign
//! release entrypoint runs.

use std::ffi::{CStr, c_char};
use std::path::Path;
use std::sync::Arc;

use libloading::Library;
use tracing::debug;

use crate::config::ImporterConfig;
use crate::error::Result;
use crate::ffi::raw::{RawMaterial, RawScene, RawString};

type ImportFileFn = unsafe extern "C" fn(*const c_char, u32) -> *const RawScene;
type ReleaseImportFn = unsafe extern "C" fn(*const RawScene);
type GetErrorStringFn = unsafe extern "C" fn() -> *const c_char;
type GetMaterialTextureCountFn = unsafe extern "C" fn(*const RawMaterial, u32) -> u32;
type GetMaterialTextureFn = unsafe extern "C" fn(
    *const RawMaterial,
    u32,
    u32,
    *mut RawString,
    *mut u32,
    *mut u32,
    *mut f32,
    *mut u32,
    *mut u32,
    *mut u32,
) -> i32;

/// Resolved entrypoint table for one loaded copy of the native importer.
#[derive(Debug)]
pub struct ImporterLib {
    // Keeps the resolved fn pointers valid; never used after construction.
    _lib: Option<Library>,
    import_file: ImportFileFn,
    release_import: ReleaseImportFn,
    get_error_string: GetErrorStringFn,
    get_material_texture_count: GetMaterialTextureCountFn,
    get_material_texture: GetMaterialTextureFn,
}

impl ImporterLib {
    /// Load the native library per `config` and resolve all entrypoints.
    pub fn load(config: &ImporterConfig) -> Result<Self> {
        let lib = match &config.library_path {
            Some(path) => unsafe { Library::new(path)? },
            None => Self::load_default()?,
        };

        let resolved = unsafe {
            let import_file = *lib.get::<ImportFileFn>(b"aiImportFile\0")?;
            let release_import = *lib.get::<ReleaseImportFn>(b"aiReleaseImport\0")?;
            let get_error_string = *lib.get::<GetErrorStringFn>(b"aiGetErrorString\0")?;
            let get_material_texture_count =
                *lib.get::<GetMaterialTextureCountFn>(b"aiGetMaterialTextureCount\0")?;
            let get_material_texture =
                *lib.get::<GetMaterialTextureFn>(b"aiGetMaterialTexture\0")?;
            Self {
                _lib: Some(lib),
                import_file,
                release_import,
                get_error_string,
                get_material_texture_count,
                get_material_texture,
            }
        };

        debug!("Native importer entrypoints resolved");
        Ok(resolved)
    }

    /// Walk the platform candidate list, returning the first library that
    /// loads. The last candidate's load error is the one reported.
    fn load_default() -> Result<Library> {
        let candidates = ImporterConfig::default_candidates();
        for name in &candidates[..candidates.len() - 1] {
            if let Ok(lib) = unsafe { Library::new(Path::new(name)) } {
                debug!(library = name, "Loaded native importer");
                return Ok(lib);
            }
        }
        let last = candidates[candidates.len() - 1];
        let lib = unsafe { Library::new(Path::new(last))? };
        debug!(library = last, "Loaded native importer");
        Ok(lib)
    }

    /// Build an entrypoint table directly from fn pointers, bypassing any
    /// dynamic library. Test backends use this to stand in for the native
    /// engine.
    #[cfg(test)]
    pub(crate) fn from_fns(
        import_file: ImportFileFn,
        release_import: ReleaseImportFn,
        get_error_string: GetErrorStringFn,
        get_material_texture_count: GetMaterialTextureCountFn,
        get_material_texture: GetMaterialTextureFn,
    ) -> Self {
        Self {
            _lib: None,
            import_file,
            release_import,
            get_error_string,
            get_material_texture_count,
            get_material_texture,
        }
    }

    /// Invoke the foreign import entrypoint. Null means failure; read the
    /// last-error text immediately.
    ///
    /// # Safety
    /// `path` must be a valid NUL-terminated string for the duration of the
    /// call.
    pub(crate) unsafe fn import_file(&self, path: &CStr, flags: u32) -> *const RawScene {
        unsafe { (self.import_file)(path.as_ptr(), flags) }
    }

    /// Read the process-wide last-error text. Only meaningful immediately
    /// after a failing call on the same thread.
    pub(crate) fn last_error_text(&self) -> String {
        let ptr = unsafe { (self.get_error_string)() };
        if ptr.is_null() {
            return "unknown import error".to_string();
        }
        unsafe { CStr::from_ptr(ptr) }
            .to_string_lossy()
            .into_owned()
    }

    /// Free the foreign allocation rooted at `scene`.
    ///
    /// # Safety
    /// `scene` must be a live handle returned by [`Self::import_file`], and
    /// must never be dereferenced again after this call.
    pub(crate) unsafe fn release_import(&self, scene: *const RawScene) {
        unsafe { (self.release_import)(scene) }
    }

    /// Count textures of one usage type on a still-foreign-owned material.
    ///
    /// # Safety
    /// `material` must point into a live foreign scene allocation.
    pub(crate) unsafe fn material_texture_count(
        &self,
        material: *const RawMaterial,
        texture_type: u32,
    ) -> u32 {
        unsafe { (self.get_material_texture_count)(material, texture_type) }
    }

    /// Fetch the path of one texture slot on a still-foreign-owned
    /// material. Returns the foreign status code; `path` is written on
    /// success.
    ///
    /// # Safety
    /// `material` must point into a live foreign scene allocation.
    pub(crate) unsafe fn material_texture(
        &self,
        material: *const RawMaterial,
        texture_type: u32,
        index: u32,
        path: &mut RawString,
    ) -> i32 {
        unsafe {
            (self.get_material_texture)(
                material,
                texture_type,
                index,
                path,
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
            )
        }
    }
}

/// Single owner of one foreign scene allocation.
///
/// Holding a strong `Arc<SceneGuard>` keeps the foreign memory alive;
/// dropping the last strong reference releases it, exactly once. Decoded
/// materials keep `Weak` references so their live queries can detect that
/// release has already happened instead of reading stale foreign memory.
#[derive(Debug)]
pub struct SceneGuard {
    scene: *const RawScene,
    lib: Arc<ImporterLib>,
}

impl SceneGuard {
    /// Take ownership of a non-null foreign scene handle.
    pub(crate) fn new(scene: *const RawScene, lib: Arc<ImporterLib>) -> Self {
        debug_assert!(!scene.is_null());
        Self { scene, lib }
    }

    pub(crate) fn lib(&self) -> &ImporterLib {
        &self.lib
    }
}

impl Drop for SceneGuard {
    fn drop(&mut self) {
        unsafe { self.lib.release_import(self.scene) }
    }
}
