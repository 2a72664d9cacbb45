//! Safe marshalling layer over the native Open Asset Import library.
//!
//! One [`Importer::import_file`] call invokes the native importer, copies
//! everything reachable from the returned foreign scene into owned values,
//! and hands back the [`Scene`] together with a [`SceneRelease`] token that
//! owns the foreign allocation. Consume the token (or drop it) once the
//! materials' live texture queries are no longer needed; the foreign memory
//! is freed exactly once on every path.

pub mod config;
pub mod error;
pub mod ffi;
pub mod flags;
pub mod importer;
pub mod types;

mod decode;

// Math types (`Vec3`, `Mat4`, ...) appear throughout the public data model.
pub use glam;

pub use config::ImporterConfig;
pub use error::{ImportError, Result};
pub use flags::{PostProcess, PrimitiveType, SceneFlags};
pub use importer::{Importer, SceneRelease};
pub use types::{Scene, TextureType};
