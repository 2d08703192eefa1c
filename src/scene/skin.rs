//! Skins: joint lists and inverse bind matrices.

use serde_json::Value;

use crate::accessor::Accessor;
use crate::core::{index_list, optional_index, JsonExt};
use crate::util::{check_index, Error, Mat4, Result};
use crate::UNNAMED;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Skin {
    pub name: String,
    /// Joint node indices.
    pub joints: Vec<usize>,
    /// One per joint; identity when the document gives none.
    pub inverse_bind_matrices: Vec<Mat4>,
    /// Accessor the matrices were read from.
    pub inverse_bind_accessor: Option<usize>,
    pub skeleton: Option<usize>,
    pub extensions: Value,
    pub extras: Value,
}

impl Skin {
    /// Parse a skin. Nodes are built later, so joints are checked against
    /// the declared node count.
    pub fn from_json(json: &Value, accessors: &[Accessor], node_count: usize) -> Result<Self> {
        let joints = index_list(&json["joints"], "skin joints")?
            .into_iter()
            .map(|j| check_index("Node", j, node_count))
            .collect::<Result<Vec<_>>>()?;
        if joints.is_empty() {
            return Err(Error::missing("skin", "joints"));
        }
        let skeleton = optional_index(json, "skin", "skeleton")?
            .map(|s| check_index("Node", s, node_count))
            .transpose()?;

        let inverse_bind_accessor = optional_index(json, "skin", "inverseBindMatrices")?;
        let inverse_bind_matrices = match inverse_bind_accessor {
            Some(index) => {
                let matrices = accessors[check_index("Accessor", index, accessors.len())?].to_mat4()?;
                if matrices.len() < joints.len() {
                    return Err(Error::invalid(format!(
                        "skin has {} joints but {} inverse bind matrices",
                        joints.len(),
                        matrices.len()
                    )));
                }
                matrices
            }
            None => vec![Mat4::IDENTITY; joints.len()],
        };

        Ok(Self {
            name: json["name"].str_or(UNNAMED).to_owned(),
            joints,
            inverse_bind_matrices,
            inverse_bind_accessor,
            skeleton,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }
}

pub fn parse_skins(json: &Value, accessors: &[Accessor], node_count: usize) -> Result<Vec<Skin>> {
    json.items()
        .map(|s| Skin::from_json(s, accessors, node_count))
        .collect()
}
