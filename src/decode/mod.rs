//! The marshalling layer: total, null-safe decoders that copy everything
//! reachable from the foreign scene graph into owned values.
//!
//! All of this runs in one synchronous pass during import. Null pointers on
//! optional attributes mean "absent" and never fail; a null pointer on a
//! buffer the foreign contract guarantees for a committed record surfaces
//! as [`ImportError::MalformedScene`] instead of undefined behavior.
//!
//! [`ImportError::MalformedScene`]: crate::error::ImportError::MalformedScene

pub(crate) mod material;
pub(crate) mod mesh;
pub(crate) mod metadata;
pub(crate) mod node;
pub(crate) mod primitives;
pub(crate) mod scene;
pub(crate) mod texture;

pub(crate) use scene::decode_scene;
