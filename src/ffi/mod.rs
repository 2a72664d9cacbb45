//! Raw foreign-memory layer: `#[repr(C)]` mirrors of the native importer's
//! structs and the runtime-loaded entrypoint table.

pub mod library;
pub mod raw;

pub use library::{ImporterLib, SceneGuard};
