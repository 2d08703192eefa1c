//! Nodes, local transforms and the parent/child hierarchy.

use serde_json::Value;

use crate::core::{f32_list, float_array, index_list, optional_index, JsonExt};
use crate::geom::Mesh;
use crate::util::{check_index, Error, Mat4, Quat, Result, Vec3};
use crate::UNNAMED;

/// Local transform of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transform {
    /// Decomposed translation, rotation, scale. Applied scale first.
    Trs {
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    },
    /// Full matrix, column-major.
    Matrix(Mat4),
}

impl Default for Transform {
    fn default() -> Self {
        Self::Matrix(Mat4::IDENTITY)
    }
}

impl Transform {
    /// Read the transform of a node.
    ///
    /// Any of `translation`, `rotation`, `scale` selects the TRS form with
    /// the missing parts at identity; otherwise `matrix` is read, identity when
    /// absent.
    pub fn from_json(json: &Value) -> Result<Self> {
        let trs = ["translation", "rotation", "scale"]
            .iter()
            .any(|field| json[*field].is_present());
        if trs {
            return Ok(Self::Trs {
                translation: Vec3::from_array(float_array(&json["translation"], "node translation", [0.0; 3])?),
                // x, y, z, w
                rotation: Quat::from_array(float_array(&json["rotation"], "node rotation", [0.0, 0.0, 0.0, 1.0])?),
                scale: Vec3::from_array(float_array(&json["scale"], "node scale", [1.0; 3])?),
            });
        }
        let cols = float_array(&json["matrix"], "node matrix", Mat4::IDENTITY.to_cols_array())?;
        Ok(Self::Matrix(Mat4::from_cols_array(&cols)))
    }

    /// Compose into a single local matrix.
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Trs {
                translation,
                rotation,
                scale,
            } => Mat4::from_scale_rotation_translation(scale, rotation, translation),
            Self::Matrix(m) => m,
        }
    }

    /// Returns true for the TRS form.
    pub fn is_trs(&self) -> bool {
        matches!(self, Self::Trs { .. })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    pub name: String,
    /// Position in the root's node list.
    pub index: usize,
    pub transform: Transform,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub mesh: Option<usize>,
    pub camera: Option<usize>,
    pub skin: Option<usize>,
    /// Morph weights; falls back to the mesh's.
    pub weights: Vec<f32>,
    pub extensions: Value,
    pub extras: Value,
}

/// Counts of the collections a node may reference.
#[derive(Clone, Copy, Debug, Default)]
pub struct NodeRefs<'a> {
    pub meshes: &'a [Mesh],
    pub cameras: usize,
    pub skins: usize,
}

impl Node {
    /// Parse a node. Children are only validated by [`link_hierarchy`].
    pub fn from_json(json: &Value, index: usize, refs: NodeRefs<'_>) -> Result<Self> {
        let mesh = optional_index(json, "node", "mesh")?
            .map(|i| check_index("Mesh", i, refs.meshes.len()))
            .transpose()?;
        let camera = optional_index(json, "node", "camera")?
            .map(|i| check_index("Camera", i, refs.cameras))
            .transpose()?;
        let skin = optional_index(json, "node", "skin")?
            .map(|i| check_index("Skin", i, refs.skins))
            .transpose()?;

        let mut weights = f32_list(&json["weights"], "node weights")?;
        if weights.is_empty() {
            if let Some(mesh) = mesh.map(|i| &refs.meshes[i]) {
                weights = if mesh.weights.is_empty() {
                    vec![0.0; mesh.num_targets()]
                } else {
                    mesh.weights.clone()
                };
            }
        }

        Ok(Self {
            name: json["name"].str_or(UNNAMED).to_owned(),
            index,
            transform: Transform::from_json(json)?,
            parent: None,
            children: index_list(&json["children"], "node children")?,
            mesh,
            camera,
            skin,
            weights,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }

    /// Returns true if this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

pub fn parse_nodes(json: &Value, refs: NodeRefs<'_>) -> Result<Vec<Node>> {
    let mut nodes = json
        .items()
        .enumerate()
        .map(|(i, n)| Node::from_json(n, i, refs))
        .collect::<Result<Vec<_>>>()?;
    link_hierarchy(&mut nodes)?;
    Ok(nodes)
}

/// Validate child indices and fill in parents.
///
/// The children graph must be a forest: a node listed under two parents, or
/// a cycle, is an error.
pub fn link_hierarchy(nodes: &mut [Node]) -> Result<()> {
    let count = nodes.len();
    let mut parents: Vec<Option<usize>> = vec![None; count];
    for (parent, node) in nodes.iter().enumerate() {
        for &child in &node.children {
            check_index("Node", child, count)?;
            if parents[child].replace(parent).is_some() {
                return Err(Error::invalid(format!("node {child} has more than one parent")));
            }
        }
    }

    // With at most one parent each, a cycle is a chain that never ends.
    for start in 0..count {
        let mut current = start;
        let mut steps = 0;
        while let Some(parent) = parents[current] {
            steps += 1;
            if steps > count {
                return Err(Error::invalid(format!("node {start} is part of a cycle")));
            }
            current = parent;
        }
    }

    for (node, parent) in nodes.iter_mut().zip(parents) {
        node.parent = parent;
    }
    Ok(())
}

/// World matrix of `index`, composing up through its parents.
pub fn world_matrix(nodes: &[Node], index: usize) -> Result<Mat4> {
    let mut matrix = nodes[check_index("Node", index, nodes.len())?].transform.matrix();
    let mut current = nodes[index].parent;
    while let Some(parent) = current {
        let node = &nodes[check_index("Node", parent, nodes.len())?];
        matrix = node.transform.matrix() * matrix;
        current = node.parent;
    }
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nodes(json: Value) -> Result<Vec<Node>> {
        parse_nodes(&json, NodeRefs::default())
    }

    #[test]
    fn test_default_transform_is_identity_matrix() {
        let t = Transform::from_json(&json!({})).unwrap();
        assert_eq!(t, Transform::Matrix(Mat4::IDENTITY));
    }

    #[test]
    fn test_partial_trs() {
        let t = Transform::from_json(&json!({ "translation": [1.0, 2.0, 3.0] })).unwrap();
        match t {
            Transform::Trs {
                translation,
                rotation,
                scale,
            } => {
                assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
                assert_eq!(rotation, Quat::IDENTITY);
                assert_eq!(scale, Vec3::ONE);
            }
            Transform::Matrix(_) => panic!("expected TRS"),
        }
        assert_eq!(t.matrix(), Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_rotation_is_xyzw() {
        let t = Transform::from_json(&json!({ "rotation": [0.0, 0.0, 1.0, 0.0] })).unwrap();
        let m = t.matrix();
        let p = m.transform_point3(Vec3::X);
        assert!((p - Vec3::NEG_X).length() < 1e-6);
    }

    #[test]
    fn test_matrix_is_column_major() {
        let mut cols = Mat4::IDENTITY.to_cols_array();
        cols[12] = 5.0;
        cols[13] = 6.0;
        cols[14] = 7.0;
        let t = Transform::from_json(&json!({ "matrix": cols })).unwrap();
        assert_eq!(t.matrix().w_axis.truncate(), Vec3::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn test_short_matrix_fails() {
        assert!(Transform::from_json(&json!({ "matrix": [1.0, 0.0] })).is_err());
    }

    #[test]
    fn test_hierarchy_parents() {
        let nodes = nodes(json!([{ "children": [1, 2] }, {}, { "children": [3] }, {}])).unwrap();
        assert!(nodes[0].is_root());
        assert_eq!(nodes[1].parent, Some(0));
        assert_eq!(nodes[3].parent, Some(2));
        assert_eq!(nodes[2].index, 2);
    }

    #[test]
    fn test_child_out_of_range() {
        let result = nodes(json!([{ "children": [5] }]));
        assert!(matches!(result, Err(Error::IndexOutOfBounds { kind: "Node", index: 5, .. })));
    }

    #[test]
    fn test_two_parents() {
        assert!(nodes(json!([{ "children": [2] }, { "children": [2] }, {}])).is_err());
    }

    #[test]
    fn test_cycle() {
        assert!(nodes(json!([{ "children": [1] }, { "children": [0] }])).is_err());
        assert!(nodes(json!([{ "children": [0] }])).is_err());
    }

    #[test]
    fn test_world_matrix() {
        let nodes = nodes(json!([
            { "translation": [1.0, 0.0, 0.0], "children": [1] },
            { "translation": [0.0, 2.0, 0.0] }
        ]))
        .unwrap();
        let world = world_matrix(&nodes, 1).unwrap();
        assert_eq!(world.w_axis.truncate(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_weights_fallback() {
        use crate::geom::{Primitive, Mesh};
        let meshes = vec![
            Mesh {
                weights: vec![0.25, 0.75],
                ..Default::default()
            },
            Mesh {
                primitives: vec![Primitive {
                    targets: vec![Default::default(); 3],
                    ..Default::default()
                }],
                ..Default::default()
            },
        ];
        let refs = NodeRefs {
            meshes: &meshes,
            ..Default::default()
        };
        let a = Node::from_json(&json!({ "mesh": 0 }), 0, refs).unwrap();
        assert_eq!(a.weights, vec![0.25, 0.75]);
        let b = Node::from_json(&json!({ "mesh": 1 }), 1, refs).unwrap();
        assert_eq!(b.weights, vec![0.0; 3]);
        let c = Node::from_json(&json!({ "mesh": 0, "weights": [1.0] }), 2, refs).unwrap();
        assert_eq!(c.weights, vec![1.0]);
        assert!(Node::from_json(&json!({ "mesh": 2 }), 3, refs).is_err());
    }
}
