//! # gltf-scene
//!
//! Loader for glTF 2.0 scenes into a fully typed, randomly indexable
//! in-memory scene graph.
//!
//! Buffers are resolved (inline `data:` URIs or through a [`ByteSource`]),
//! accessors are decoded into typed arrays, and mesh primitives are assembled
//! into per-vertex attribute vectors. Consumers never see raw bytes or JSON,
//! apart from `extensions` and `extras` payloads which are kept opaque.
//!
//! ## Modules
//!
//! - [`util`] - Errors, versions and math types
//! - [`core`] - Base64, JSON access helpers and byte sources
//! - [`buffer`] - Buffers and buffer views
//! - [`accessor`] - Typed decoding of accessor data
//! - [`geom`] - Geometry, primitives and meshes
//! - [`material`] - Materials, textures, images and samplers
//! - [`scene`] - Nodes, cameras, skins, animations and scenes
//! - [`parser`] - Document entry points and the [`Root`]
//!
//! ## Example
//!
//! ```ignore
//! let root = gltf_scene::parse("scene.gltf")?;
//! for mesh in &root.meshes {
//!     for primitive in &mesh.primitives {
//!         println!("{}: {} vertices", mesh.name, primitive.geometry.positions.len());
//!     }
//! }
//! ```

pub mod util;
pub mod core;
pub mod buffer;
pub mod accessor;
pub mod geom;
pub mod material;
pub mod scene;
pub mod parser;

/// Name given to elements the document leaves unnamed.
pub const UNNAMED: &str = "(Unnamed)";

// Re-export commonly used types
pub use util::{Error, Result, Version};
pub use crate::core::{ByteSource, EmptySource, FileSource};
pub use parser::{metadata, parse, parse_with_options, Metadata, Options, Parser, Root};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::accessor::{Accessor, AccessorData, AccessorType, ComponentType};
    pub use crate::buffer::{Buffer, BufferView};
    pub use crate::core::{ByteSource, EmptySource, FileSource};
    pub use crate::geom::{Geometry, Mesh, Primitive, PrimitiveMode};
    pub use crate::material::{Image, Material, Sampler, Texture};
    pub use crate::parser::{parse, Metadata, Options, Parser, Root};
    pub use crate::scene::{Animation, Camera, Node, Scene, Skin, Transform};
    pub use crate::util::{Error, Result, Version};
}
