//! The parsed document and its summaries.

use serde_json::Value;

use crate::accessor::Accessor;
use crate::buffer::{Buffer, BufferView};
use crate::core::{string_list, JsonExt};
use crate::geom::Mesh;
use crate::material::{Image, Material, Sampler, Texture};
use crate::scene::{Animation, Camera, Node, Scene, Skin};
use crate::util::Version;

/// The `asset` block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Asset {
    pub copyright: String,
    pub generator: String,
    pub version: Version,
    pub min_version: Version,
    pub extensions: Value,
    pub extras: Value,
}

impl Asset {
    pub fn from_json(json: &Value) -> Self {
        Self {
            copyright: json["copyright"].str_or("").to_owned(),
            generator: json["generator"].str_or("").to_owned(),
            version: Version::parse(json["version"].str_or("")),
            min_version: Version::parse(json["minVersion"].str_or("")),
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        }
    }
}

/// Counts read straight from the JSON, without resolving any resources.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    pub images: usize,
    pub textures: usize,
    /// Primitives summed over all meshes.
    pub primitives: usize,
    pub animations: usize,
    pub extensions_used: Vec<String>,
    pub extensions_required: Vec<String>,
}

impl Metadata {
    pub fn from_json(json: &Value) -> Self {
        Self {
            images: json["images"].item_count(),
            textures: json["textures"].item_count(),
            primitives: json["meshes"]
                .items()
                .map(|m| m["primitives"].item_count())
                .sum(),
            animations: json["animations"].item_count(),
            extensions_used: string_list(&json["extensionsUsed"]),
            extensions_required: string_list(&json["extensionsRequired"]),
        }
    }
}

/// Everything parsed from a document and the resources it references.
///
/// A default `Root` has no asset version and is not valid; see
/// [`Root::is_valid`].
#[derive(Clone, Debug, Default)]
pub struct Root {
    pub buffers: Vec<Buffer>,
    pub buffer_views: Vec<BufferView>,
    pub accessors: Vec<Accessor>,
    pub animations: Vec<Animation>,
    pub cameras: Vec<Camera>,
    pub images: Vec<Image>,
    pub materials: Vec<Material>,
    pub meshes: Vec<Mesh>,
    pub nodes: Vec<Node>,
    pub samplers: Vec<Sampler>,
    pub skins: Vec<Skin>,
    pub textures: Vec<Texture>,
    pub scenes: Vec<Scene>,
    /// The `scene` to display by default.
    pub start_scene: Option<usize>,
    pub extensions_used: Vec<String>,
    pub extensions_required: Vec<String>,
    pub extensions: Value,
    pub extras: Value,
    pub asset: Asset,
}

impl Root {
    /// Returns true if the document declared an asset version.
    pub fn is_valid(&self) -> bool {
        self.asset.version.is_set()
    }

    /// The start scene, or the first scene when none is named.
    pub fn default_scene(&self) -> Option<&Scene> {
        match self.start_scene {
            Some(index) => self.scenes.get(index),
            None => self.scenes.first(),
        }
    }

    /// Nodes without a parent.
    pub fn root_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_root())
    }

    /// Total primitives over all meshes.
    pub fn num_primitives(&self) -> usize {
        self.meshes.iter().map(|m| m.primitives.len()).sum()
    }

    /// Summary counts of the parsed document.
    pub fn metadata(&self) -> Metadata {
        Metadata {
            images: self.images.len(),
            textures: self.textures.len(),
            primitives: self.num_primitives(),
            animations: self.animations.len(),
            extensions_used: self.extensions_used.clone(),
            extensions_required: self.extensions_required.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_root_is_invalid() {
        assert!(!Root::default().is_valid());
    }

    #[test]
    fn test_asset() {
        let asset = Asset::from_json(&json!({ "version": "2.0", "generator": "blender", "minVersion": "2.0" }));
        assert_eq!(asset.version, Version::new(2, 0, 0));
        assert_eq!(asset.min_version, Version::new(2, 0, 0));
        assert_eq!(asset.generator, "blender");
        assert!(asset.copyright.is_empty());
    }

    #[test]
    fn test_metadata() {
        let meta = Metadata::from_json(&json!({
            "images": [{}, {}],
            "meshes": [{ "primitives": [{}, {}] }, { "primitives": [{}] }],
            "extensionsUsed": ["KHR_materials_unlit"],
        }));
        assert_eq!(meta.images, 2);
        assert_eq!(meta.textures, 0);
        assert_eq!(meta.primitives, 3);
        assert_eq!(meta.extensions_used, vec!["KHR_materials_unlit".to_string()]);
        assert!(meta.extensions_required.is_empty());
    }

    #[test]
    fn test_default_scene() {
        let mut root = Root {
            scenes: vec![Scene::default(), Scene { name: "second".into(), ..Default::default() }],
            ..Default::default()
        };
        assert_eq!(root.default_scene().unwrap().name, "");
        root.start_scene = Some(1);
        assert_eq!(root.default_scene().unwrap().name, "second");
    }
}
