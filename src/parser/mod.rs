//! Document parsing entry points.
//!
//! [`Parser`] runs over an already-parsed JSON tree; [`parse`] reads a `.gltf`
//! file and resolves its resources relative to the file's directory.
//!
//! Collections are built in dependency order: buffers, buffer views,
//! accessors, then the resources that only reference those, then meshes,
//! animations and skins, nodes and finally scenes. Each stage receives the
//! finished layers below it, and the whole parse fails on the first error.

mod options;
mod root;

pub use options::Options;
pub use root::{Asset, Metadata, Root};

use std::path::Path;

use serde_json::Value;

use crate::accessor::parse_accessors;
use crate::buffer::{parse_views, resolve_buffers};
use crate::core::{optional_index, string_list, ByteSource, FileSource, JsonExt};
use crate::geom::parse_meshes;
use crate::material::{mark_linear_textures, parse_images, parse_materials, parse_samplers, parse_textures};
use crate::scene::{parse_animations, parse_cameras, parse_nodes, parse_scenes, parse_skins, NodeRefs};
use crate::util::{check_index, Result};

/// Parser over a JSON document.
#[derive(Clone, Copy, Debug)]
pub struct Parser<'a> {
    json: &'a Value,
    options: Options,
}

impl<'a> Parser<'a> {
    pub fn new(json: &'a Value) -> Self {
        Self {
            json,
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Cheap summary that touches no resources.
    pub fn metadata(&self) -> Metadata {
        Metadata::from_json(self.json)
    }

    /// Parse the whole document, resolving external URIs through `source`.
    #[tracing::instrument(skip_all)]
    pub fn parse(&self, source: &dyn ByteSource) -> Result<Root> {
        let json = self.json;
        let options = &self.options;

        let buffers = resolve_buffers(&json["buffers"], source, options)?;
        let buffer_views = parse_views(&json["bufferViews"], &buffers)?;
        let accessors = parse_accessors(&json["accessors"], &buffers, &buffer_views)?;
        tracing::debug!(
            buffers = buffers.len(),
            views = buffer_views.len(),
            accessors = accessors.len(),
            "decoded buffers"
        );

        let cameras = parse_cameras(&json["cameras"])?;
        let samplers = parse_samplers(&json["samplers"])?;
        let images = parse_images(&json["images"], source, &buffers, &buffer_views, options)?;
        let mut textures = parse_textures(&json["textures"], images.len(), samplers.len())?;
        let materials = parse_materials(&json["materials"], textures.len())?;
        mark_linear_textures(&materials, &mut textures);
        tracing::debug!(
            cameras = cameras.len(),
            images = images.len(),
            textures = textures.len(),
            materials = materials.len(),
            "parsed resources"
        );

        let meshes = parse_meshes(&json["meshes"], &accessors, materials.len())?;
        let node_count = json["nodes"].item_count();
        let animations = parse_animations(&json["animations"], &accessors, node_count)?;
        let skins = parse_skins(&json["skins"], &accessors, node_count)?;
        tracing::debug!(
            meshes = meshes.len(),
            animations = animations.len(),
            skins = skins.len(),
            "assembled meshes"
        );

        let nodes = parse_nodes(
            &json["nodes"],
            NodeRefs {
                meshes: &meshes,
                cameras: cameras.len(),
                skins: skins.len(),
            },
        )?;
        let scenes = parse_scenes(&json["scenes"], nodes.len())?;
        let start_scene = optional_index(json, "root", "scene")?
            .map(|s| check_index("Scene", s, scenes.len()))
            .transpose()?;
        tracing::debug!(nodes = nodes.len(), scenes = scenes.len(), "built scene graph");

        Ok(Root {
            buffers,
            buffer_views,
            accessors,
            animations,
            cameras,
            images,
            materials,
            meshes,
            nodes,
            samplers,
            skins,
            textures,
            scenes,
            start_scene,
            extensions_used: string_list(&json["extensionsUsed"]),
            extensions_required: string_list(&json["extensionsRequired"]),
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
            asset: Asset::from_json(&json["asset"]),
        })
    }
}

/// Read and parse a `.gltf` file with default options.
///
/// A path that is not a regular file, or a file that is not valid JSON,
/// yields a default (invalid) [`Root`] rather than an error.
pub fn parse<P: AsRef<Path>>(path: P) -> Result<Root> {
    parse_with_options(path, Options::default())
}

/// Read and parse a `.gltf` file.
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn parse_with_options<P: AsRef<Path>>(path: P, options: Options) -> Result<Root> {
    let path = path.as_ref();
    let Some(json) = read_json(path)? else {
        return Ok(Root::default());
    };
    Parser::new(&json)
        .with_options(options)
        .parse(&FileSource::for_document(path))
}

/// Read only the [`Metadata`] of a `.gltf` file.
pub fn metadata<P: AsRef<Path>>(path: P) -> Result<Metadata> {
    Ok(read_json(path.as_ref())?
        .map(|json| Metadata::from_json(&json))
        .unwrap_or_default())
}

fn read_json(path: &Path) -> Result<Option<Value>> {
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "not a file");
        return Ok(None);
    }
    let bytes = std::fs::read(path)?;
    match serde_json::from_slice(&bytes) {
        Ok(json) => Ok(Some(json)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid JSON");
            Ok(None)
        }
    }
}
