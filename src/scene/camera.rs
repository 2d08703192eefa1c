//! Camera projections.

use serde_json::Value;

use crate::core::{required_f32, JsonExt};
use crate::util::{Error, Mat4, Result};
use crate::UNNAMED;

/// Projection parameters. Distances are in scene units, angles in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view.
        yfov: f32,
        znear: f32,
        /// `None` for an infinite projection.
        zfar: Option<f32>,
        aspect_ratio: Option<f32>,
    },
    Orthographic {
        xmag: f32,
        ymag: f32,
        znear: f32,
        zfar: f32,
    },
}

impl Projection {
    /// Projection matrix; `aspect` is used when the camera leaves it unset.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        match *self {
            Self::Perspective {
                yfov,
                znear,
                zfar,
                aspect_ratio,
            } => {
                let aspect = aspect_ratio.unwrap_or(aspect);
                match zfar {
                    Some(zfar) => Mat4::perspective_rh(yfov, aspect, znear, zfar),
                    None => Mat4::perspective_infinite_rh(yfov, aspect, znear),
                }
            }
            Self::Orthographic {
                xmag,
                ymag,
                znear,
                zfar,
            } => Mat4::orthographic_rh(-xmag, xmag, -ymag, ymag, znear, zfar),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub name: String,
    pub projection: Projection,
    pub extensions: Value,
    pub extras: Value,
}

impl Camera {
    pub fn from_json(json: &Value) -> Result<Self> {
        let ty = json["type"].as_str().ok_or_else(|| Error::missing("camera", "type"))?;
        let projection = match ty {
            "perspective" => {
                let p = &json["perspective"];
                if !p.is_object() {
                    return Err(Error::missing("camera", "perspective"));
                }
                Projection::Perspective {
                    yfov: required_f32(p, "camera.perspective", "yfov")?,
                    znear: required_f32(p, "camera.perspective", "znear")?,
                    zfar: p["zfar"].as_f64().map(|v| v as f32),
                    aspect_ratio: p["aspectRatio"].as_f64().map(|v| v as f32),
                }
            }
            "orthographic" => {
                let o = &json["orthographic"];
                if !o.is_object() {
                    return Err(Error::missing("camera", "orthographic"));
                }
                Projection::Orthographic {
                    xmag: required_f32(o, "camera.orthographic", "xmag")?,
                    ymag: required_f32(o, "camera.orthographic", "ymag")?,
                    znear: required_f32(o, "camera.orthographic", "znear")?,
                    zfar: required_f32(o, "camera.orthographic", "zfar")?,
                }
            }
            other => {
                return Err(Error::UnknownEnum {
                    kind: "camera type",
                    value: other.to_owned(),
                })
            }
        };
        Ok(Self {
            name: json["name"].str_or(UNNAMED).to_owned(),
            projection,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }

    pub fn is_perspective(&self) -> bool {
        matches!(self.projection, Projection::Perspective { .. })
    }
}

pub fn parse_cameras(json: &Value) -> Result<Vec<Camera>> {
    json.items().map(Camera::from_json).collect()
}
