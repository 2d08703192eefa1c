//! Geometry assembly - per-vertex attribute arrays for a primitive.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::accessor::{Accessor, AccessorType, ComponentType};
use crate::core::JsonExt;
use crate::util::{check_index, point_bounds, Error, Result, UVec4, Vec2, Vec3, Vec4};

/// Attribute semantic name to accessor index.
pub type AttributeMap = BTreeMap<String, usize>;

pub const POSITION: &str = "POSITION";
pub const NORMAL: &str = "NORMAL";
pub const TANGENT: &str = "TANGENT";
pub const COLOR_PREFIX: &str = "COLOR_";
pub const TEXCOORD_PREFIX: &str = "TEXCOORD_";
pub const JOINTS_PREFIX: &str = "JOINTS_";
pub const WEIGHTS_PREFIX: &str = "WEIGHTS_";

/// All attributes of a mesh primitive or morph target, decoded.
///
/// `tex_coords[i]` comes from `TEXCOORD_i`, `colors[i]` from `COLOR_i`, and
/// so on. Colour and UV channels are only populated from float accessors;
/// other component types stay reachable through the accessor itself.
/// Positions, normals, tangents and every colour/UV channel are either empty
/// or exactly as long as `positions`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub attributes: AttributeMap,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec4>,
    pub tex_coords: Vec<Vec<Vec2>>,
    pub colors: Vec<Vec<Vec3>>,
    pub joints: Vec<Vec<UVec4>>,
    pub weights: Vec<Vec<Vec4>>,
    pub indices: Vec<u32>,
}

impl Geometry {
    /// Decode the attributes named in `attributes`.
    ///
    /// Without a `POSITION` attribute the geometry stays empty apart from the
    /// attribute map itself.
    pub fn assemble(attributes: AttributeMap, accessors: &[Accessor]) -> Result<Self> {
        let mut out = Self {
            attributes,
            ..Default::default()
        };
        let Some(&position) = out.attributes.get(POSITION) else {
            return Ok(out);
        };
        out.positions = lookup(accessors, position)?.to_vec3()?;
        let vertex_count = out.positions.len();

        if let Some(&normal) = out.attributes.get(NORMAL) {
            out.normals = lookup(accessors, normal)?.to_vec3()?;
            expect_len(NORMAL, out.normals.len(), vertex_count)?;
        }
        if let Some(&tangent) = out.attributes.get(TANGENT) {
            out.tangents = tangents(lookup(accessors, tangent)?)?;
            if !out.tangents.is_empty() {
                expect_len(TANGENT, out.tangents.len(), vertex_count)?;
            }
        }

        for accessor in indexed(&out.attributes, COLOR_PREFIX, accessors)? {
            if accessor.component_type != ComponentType::Float {
                continue;
            }
            let rgb = to_rgb(accessor)?;
            expect_len("COLOR_n", rgb.len(), vertex_count)?;
            out.colors.push(rgb);
        }
        for accessor in indexed(&out.attributes, TEXCOORD_PREFIX, accessors)? {
            if accessor.component_type != ComponentType::Float {
                continue;
            }
            let uv = accessor.to_vec2()?;
            expect_len("TEXCOORD_n", uv.len(), vertex_count)?;
            out.tex_coords.push(uv);
        }
        for accessor in indexed(&out.attributes, JOINTS_PREFIX, accessors)? {
            out.joints.push(to_joints(accessor)?);
        }
        for accessor in indexed(&out.attributes, WEIGHTS_PREFIX, accessors)? {
            out.weights.push(to_weights(accessor)?);
        }
        if out.joints.len() != out.weights.len() {
            return Err(Error::invalid(format!(
                "{} JOINTS_n channels but {} WEIGHTS_n channels",
                out.joints.len(),
                out.weights.len()
            )));
        }
        Ok(out)
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if there is no position data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Check if the geometry has skinning data.
    pub fn is_skinned(&self) -> bool {
        !self.joints.is_empty()
    }

    /// Axis-aligned bounds of the positions.
    pub fn compute_bounds(&self) -> Option<(Vec3, Vec3)> {
        point_bounds(&self.positions)
    }
}

/// Read an attribute object into an [`AttributeMap`].
pub fn attribute_map(json: &Value) -> Result<AttributeMap> {
    let Some(object) = json.as_object() else {
        return Ok(AttributeMap::new());
    };
    object
        .iter()
        .map(|(name, value)| {
            value
                .as_index()
                .map(|index| (name.clone(), index))
                .ok_or_else(|| Error::mismatch(format!("accessor index for attribute {name}"), value.to_string()))
        })
        .collect()
}

/// Accessors of `PREFIX0`, `PREFIX1`, ... up to the first missing suffix.
fn indexed<'a>(attributes: &AttributeMap, prefix: &str, accessors: &'a [Accessor]) -> Result<Vec<&'a Accessor>> {
    let mut out = Vec::new();
    for channel in 0.. {
        let Some(&index) = attributes.get(&format!("{prefix}{channel}")) else {
            break;
        };
        out.push(lookup(accessors, index)?);
    }
    Ok(out)
}

fn lookup(accessors: &[Accessor], index: usize) -> Result<&Accessor> {
    Ok(&accessors[check_index("Accessor", index, accessors.len())?])
}

fn expect_len(attribute: &str, len: usize, vertex_count: usize) -> Result<()> {
    if len == vertex_count {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "{attribute} has {len} elements but POSITION has {vertex_count}"
        )))
    }
}

/// Some sample files store VEC3 tangents; widen them with `w = 0`.
fn tangents(accessor: &Accessor) -> Result<Vec<Vec4>> {
    match accessor.ty {
        AccessorType::Vec4 => accessor.to_vec4(),
        AccessorType::Vec3 => Ok(accessor.to_vec3()?.into_iter().map(|v| v.extend(0.0)).collect()),
        _ => Ok(Vec::new()),
    }
}

/// Colours as RGB, dropping alpha from VEC4 sources.
fn to_rgb(accessor: &Accessor) -> Result<Vec<Vec3>> {
    if accessor.ty == AccessorType::Vec3 {
        return accessor.to_vec3();
    }
    Ok(accessor.to_vec4()?.into_iter().map(Vec4::truncate).collect())
}

fn to_joints(accessor: &Accessor) -> Result<Vec<UVec4>> {
    let flat = accessor.to_u32()?;
    if flat.len() % 4 != 0 {
        return Err(Error::invalid(format!(
            "JOINTS_n accessor of {} components is not 4-wide",
            flat.len()
        )));
    }
    Ok(flat.chunks_exact(4).map(UVec4::from_slice).collect())
}

/// Non-float weights give an empty channel; use the accessor directly.
fn to_weights(accessor: &Accessor) -> Result<Vec<Vec4>> {
    if accessor.component_type != ComponentType::Float {
        tracing::debug!(component_type = %accessor.component_type, "skipping non-float WEIGHTS_n channel");
        return Ok(Vec::new());
    }
    accessor.to_vec4()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::AccessorData;

    fn floats(ty: AccessorType, values: &[f32]) -> Accessor {
        Accessor {
            count: values.len() / ty.coefficient(),
            data: AccessorData::Float(values.to_vec()),
            component_type: ComponentType::Float,
            ty,
            ..Default::default()
        }
    }

    fn attrs(pairs: &[(&str, usize)]) -> AttributeMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn triangle() -> Accessor {
        floats(AccessorType::Vec3, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
    }

    #[test]
    fn test_no_position_is_empty() {
        let accessors = vec![floats(AccessorType::Vec3, &[0.0; 9])];
        let geometry = Geometry::assemble(attrs(&[(NORMAL, 0)]), &accessors).unwrap();
        assert!(geometry.is_empty());
        assert!(geometry.normals.is_empty());
        assert_eq!(geometry.attributes.len(), 1);
    }

    #[test]
    fn test_positions_and_normals() {
        let accessors = vec![triangle(), floats(AccessorType::Vec3, &[0.0f32, 0.0, 1.0].repeat(3))];
        let geometry = Geometry::assemble(attrs(&[(POSITION, 0), (NORMAL, 1)]), &accessors).unwrap();
        assert_eq!(geometry.positions[1], Vec3::X);
        assert_eq!(geometry.normals, vec![Vec3::Z; 3]);
        assert_eq!(geometry.compute_bounds(), Some((Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0))));
    }

    #[test]
    fn test_vec3_tangents_are_widened() {
        let accessors = vec![triangle(), floats(AccessorType::Vec3, &[1.0f32, 0.0, 0.0].repeat(3))];
        let geometry = Geometry::assemble(attrs(&[(POSITION, 0), (TANGENT, 1)]), &accessors).unwrap();
        assert_eq!(geometry.tangents, vec![Vec4::new(1.0, 0.0, 0.0, 0.0); 3]);
    }

    #[test]
    fn test_color_channels() {
        let accessors = vec![
            triangle(),
            floats(AccessorType::Vec4, &[1.0f32, 0.5, 0.25, 0.9].repeat(3)),
            floats(AccessorType::Vec3, &[0.1f32, 0.2, 0.3].repeat(3)),
        ];
        let geometry = Geometry::assemble(
            attrs(&[(POSITION, 0), ("COLOR_0", 1), ("COLOR_1", 2)]),
            &accessors,
        )
        .unwrap();
        assert_eq!(geometry.colors.len(), 2);
        assert_eq!(geometry.colors[0][0], Vec3::new(1.0, 0.5, 0.25));
        assert_eq!(geometry.colors[1][2], Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_channel_scan_stops_at_gap() {
        let accessors = vec![triangle(), floats(AccessorType::Vec2, &[0.0; 6])];
        let geometry = Geometry::assemble(
            attrs(&[(POSITION, 0), ("TEXCOORD_0", 1), ("TEXCOORD_2", 1)]),
            &accessors,
        )
        .unwrap();
        assert_eq!(geometry.tex_coords.len(), 1);
    }

    #[test]
    fn test_non_float_color_is_skipped() {
        let accessors = vec![
            triangle(),
            Accessor {
                data: AccessorData::UnsignedByte(vec![255; 12]),
                component_type: ComponentType::UnsignedByte,
                ty: AccessorType::Vec4,
                count: 3,
                ..Default::default()
            },
        ];
        let geometry = Geometry::assemble(attrs(&[(POSITION, 0), ("COLOR_0", 1)]), &accessors).unwrap();
        assert!(geometry.colors.is_empty());
    }

    #[test]
    fn test_channel_length_mismatch_fails() {
        let accessors = vec![triangle(), floats(AccessorType::Vec2, &[0.0; 4])];
        let result = Geometry::assemble(attrs(&[(POSITION, 0), ("TEXCOORD_0", 1)]), &accessors);
        assert!(matches!(result, Err(Error::InvalidStructure(_))));
    }

    #[test]
    fn test_joints_and_weights() {
        let accessors = vec![
            triangle(),
            Accessor {
                data: AccessorData::UnsignedByte((0..12).collect()),
                component_type: ComponentType::UnsignedByte,
                ty: AccessorType::Vec4,
                count: 3,
                ..Default::default()
            },
            floats(AccessorType::Vec4, &[0.25; 12]),
        ];
        let geometry = Geometry::assemble(
            attrs(&[(POSITION, 0), ("JOINTS_0", 1), ("WEIGHTS_0", 2)]),
            &accessors,
        )
        .unwrap();
        assert!(geometry.is_skinned());
        assert_eq!(geometry.joints[0][2], UVec4::new(8, 9, 10, 11));
        assert_eq!(geometry.weights[0][0], Vec4::splat(0.25));
    }

    #[test]
    fn test_non_float_weights_give_empty_channel() {
        let accessors = vec![
            triangle(),
            Accessor {
                data: AccessorData::UnsignedShort(vec![0; 12]),
                component_type: ComponentType::UnsignedShort,
                ty: AccessorType::Vec4,
                count: 3,
                ..Default::default()
            },
            Accessor {
                data: AccessorData::UnsignedByte(vec![64; 12]),
                component_type: ComponentType::UnsignedByte,
                ty: AccessorType::Vec4,
                count: 3,
                ..Default::default()
            },
        ];
        let geometry = Geometry::assemble(
            attrs(&[(POSITION, 0), ("JOINTS_0", 1), ("WEIGHTS_0", 2)]),
            &accessors,
        )
        .unwrap();
        assert_eq!(geometry.joints.len(), geometry.weights.len());
        assert!(geometry.weights[0].is_empty());
    }

    #[test]
    fn test_joints_without_weights_fails() {
        let accessors = vec![
            triangle(),
            Accessor {
                data: AccessorData::UnsignedByte(vec![0; 12]),
                component_type: ComponentType::UnsignedByte,
                ty: AccessorType::Vec4,
                count: 3,
                ..Default::default()
            },
        ];
        let result = Geometry::assemble(attrs(&[(POSITION, 0), ("JOINTS_0", 1)]), &accessors);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_accessor_fails() {
        let result = Geometry::assemble(attrs(&[(POSITION, 4)]), &[]);
        assert!(matches!(result, Err(Error::IndexOutOfBounds { index: 4, .. })));
    }

    #[test]
    fn test_attribute_map() {
        let map = attribute_map(&serde_json::json!({ "POSITION": 0, "NORMAL": 1 })).unwrap();
        assert_eq!(map.get(POSITION), Some(&0));
        assert_eq!(map.get(NORMAL), Some(&1));
        assert!(attribute_map(&serde_json::json!({ "POSITION": "x" })).is_err());
    }
}
