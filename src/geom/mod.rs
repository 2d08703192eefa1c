//! Geometry assembly for glTF meshes.
//!
//! - [`Geometry`] - decoded per-vertex attributes and indices
//! - [`Primitive`] - geometry plus material, topology and morph targets
//! - [`Mesh`] - a named list of primitives

mod geometry;
mod mesh;

pub use geometry::{
    attribute_map, AttributeMap, Geometry, COLOR_PREFIX, JOINTS_PREFIX, NORMAL, POSITION, TANGENT,
    TEXCOORD_PREFIX, WEIGHTS_PREFIX,
};
pub use mesh::{parse_meshes, Mesh, Primitive, PrimitiveMode};
