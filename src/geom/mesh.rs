//! Meshes and their primitives.

use serde_json::Value;

use super::geometry::{attribute_map, Geometry};
use crate::accessor::Accessor;
use crate::core::{f32_list, optional_index, JsonExt};
use crate::util::{check_index, Error, Result};
use crate::UNNAMED;

/// Topology of a primitive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PrimitiveMode {
    Points = 0,
    Lines = 1,
    LineLoop = 2,
    LineStrip = 3,
    #[default]
    Triangles = 4,
    TriangleStrip = 5,
    TriangleFan = 6,
}

impl PrimitiveMode {
    /// Map a `mode` code.
    pub fn from_code(code: u64) -> Result<Self> {
        Ok(match code {
            0 => Self::Points,
            1 => Self::Lines,
            2 => Self::LineLoop,
            3 => Self::LineStrip,
            4 => Self::Triangles,
            5 => Self::TriangleStrip,
            6 => Self::TriangleFan,
            _ => {
                return Err(Error::UnknownEnum {
                    kind: "primitive mode",
                    value: code.to_string(),
                })
            }
        })
    }
}

/// One draw call worth of geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Primitive {
    pub geometry: Geometry,
    /// Accessor index of `indices`, if any.
    pub indices: Option<usize>,
    pub material: Option<usize>,
    pub mode: PrimitiveMode,
    /// Morph targets. Never indexed.
    pub targets: Vec<Geometry>,
    pub extensions: Value,
    pub extras: Value,
}

impl Primitive {
    /// Assemble a primitive and its morph targets.
    pub fn from_json(json: &Value, accessors: &[Accessor], material_count: usize) -> Result<Self> {
        if !json["attributes"].is_object() {
            return Err(Error::missing("primitive", "attributes"));
        }
        let mut geometry = Geometry::assemble(attribute_map(&json["attributes"])?, accessors)?;

        let indices = optional_index(json, "primitive", "indices")?;
        if let Some(index) = indices {
            let accessor = &accessors[check_index("Accessor", index, accessors.len())?];
            geometry.indices = accessor.to_u32()?;
        }

        let material = optional_index(json, "primitive", "material")?
            .map(|index| check_index("Material", index, material_count))
            .transpose()?;

        let mode = match json["mode"].as_u64() {
            Some(code) => PrimitiveMode::from_code(code)?,
            None => PrimitiveMode::default(),
        };

        let targets = json["targets"]
            .items()
            .map(|target| Geometry::assemble(attribute_map(target)?, accessors))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            geometry,
            indices,
            material,
            mode,
            targets,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }

    /// Number of drawn elements: indices if present, vertices otherwise.
    pub fn num_elements(&self) -> usize {
        if self.indices.is_some() {
            self.geometry.indices.len()
        } else {
            self.geometry.num_vertices()
        }
    }

    /// Number of triangles, for triangle topologies.
    pub fn num_triangles(&self) -> usize {
        let n = self.num_elements();
        match self.mode {
            PrimitiveMode::Triangles => n / 3,
            PrimitiveMode::TriangleStrip | PrimitiveMode::TriangleFan => n.saturating_sub(2),
            _ => 0,
        }
    }
}

/// A named set of primitives sharing morph target weights.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub primitives: Vec<Primitive>,
    /// Default morph target weights.
    pub weights: Vec<f32>,
    pub extensions: Value,
    pub extras: Value,
}

impl Mesh {
    pub fn from_json(json: &Value, accessors: &[Accessor], material_count: usize) -> Result<Self> {
        let name = json["name"].str_or(UNNAMED).to_owned();
        if json["primitives"].item_count() == 0 {
            return Err(Error::invalid(format!("mesh '{name}' has no primitives")));
        }
        let primitives = json["primitives"]
            .items()
            .map(|p| Primitive::from_json(p, accessors, material_count))
            .collect::<Result<Vec<_>>>()?;

        let target_count = primitives[0].targets.len();
        if primitives.iter().any(|p| p.targets.len() != target_count) {
            return Err(Error::invalid(format!(
                "primitives of mesh '{name}' disagree on morph target count"
            )));
        }

        Ok(Self {
            name,
            primitives,
            weights: f32_list(&json["weights"], "mesh weights")?,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }

    /// Morph targets per primitive.
    pub fn num_targets(&self) -> usize {
        self.primitives.first().map_or(0, |p| p.targets.len())
    }

    /// Total vertex count across primitives.
    pub fn num_vertices(&self) -> usize {
        self.primitives.iter().map(|p| p.geometry.num_vertices()).sum()
    }
}

pub fn parse_meshes(json: &Value, accessors: &[Accessor], material_count: usize) -> Result<Vec<Mesh>> {
    json.items()
        .map(|m| Mesh::from_json(m, accessors, material_count))
        .collect()
}
