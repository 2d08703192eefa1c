//! Scene graph assembly.
//!
//! - [`Node`] / [`Transform`] - hierarchy and local transforms
//! - [`Camera`] - perspective and orthographic projections
//! - [`Skin`] - joints and inverse bind matrices
//! - [`Animation`] - decoded keyframe samplers and their channels
//! - [`Scene`] - a set of root nodes

mod animation;
mod camera;
mod node;
mod skin;

pub use animation::{parse_animations, Animation, Channel, Interpolation, Path, Sampler as AnimationSampler, Target};
pub use camera::{parse_cameras, Camera, Projection};
pub use node::{link_hierarchy, parse_nodes, world_matrix, Node, NodeRefs, Transform};
pub use skin::{parse_skins, Skin};

use serde_json::Value;

use crate::core::{index_list, JsonExt};
use crate::util::{check_index, Result};
use crate::UNNAMED;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub name: String,
    /// Root node indices.
    pub nodes: Vec<usize>,
    pub extensions: Value,
    pub extras: Value,
}

impl Scene {
    pub fn from_json(json: &Value, node_count: usize) -> Result<Self> {
        let nodes = index_list(&json["nodes"], "scene nodes")?
            .into_iter()
            .map(|n| check_index("Node", n, node_count))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: json["name"].str_or(UNNAMED).to_owned(),
            nodes,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }
}

pub fn parse_scenes(json: &Value, node_count: usize) -> Result<Vec<Scene>> {
    json.items().map(|s| Scene::from_json(s, node_count)).collect()
}
