pub mod material;
pub mod mesh;
pub mod metadata;
pub mod node;
pub mod scene;
pub mod texture;

pub use material::{Material, MaterialProperty, PropertyTypeInfo, PropertyValue, TextureType};
pub use mesh::{Aabb, AnimMesh, Bone, Face, Mesh, MorphMethod, VertexWeight};
pub use metadata::MetadataValue;
pub use node::{Node, NodeId};
pub use scene::Scene;
pub use texture::EmbeddedTexture;
