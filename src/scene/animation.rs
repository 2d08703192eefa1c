//! Keyframe animations.
//!
//! Sampler key times and output values are decoded up front. Outputs are kept
//! flat: a translation sampler over `n` keys holds `3 * n` floats (`9 * n` for
//! cubic spline, which stores in-tangent, value and out-tangent per key).

use serde_json::Value;

use crate::accessor::Accessor;
use crate::core::{optional_index, required_index, JsonExt};
use crate::util::{check_index, Error, Result};
use crate::UNNAMED;

/// Animated node property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Path {
    Translation,
    Rotation,
    Scale,
    Weights,
}

impl Path {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "translation" => Ok(Self::Translation),
            "rotation" => Ok(Self::Rotation),
            "scale" => Ok(Self::Scale),
            "weights" => Ok(Self::Weights),
            _ => Err(Error::UnknownEnum {
                kind: "animation path",
                value: s.to_owned(),
            }),
        }
    }

    /// Output floats per key for a linear or step sampler; `None` for
    /// weights, which depends on the target count.
    pub fn components(&self) -> Option<usize> {
        match self {
            Self::Translation | Self::Scale => Some(3),
            Self::Rotation => Some(4),
            Self::Weights => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

impl Interpolation {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "LINEAR" => Ok(Self::Linear),
            "STEP" => Ok(Self::Step),
            "CUBICSPLINE" => Ok(Self::CubicSpline),
            _ => Err(Error::UnknownEnum {
                kind: "interpolation",
                value: s.to_owned(),
            }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sampler {
    /// Accessor of the key times.
    pub input: usize,
    /// Accessor of the output values.
    pub output: usize,
    pub interpolation: Interpolation,
    pub times: Vec<f32>,
    pub values: Vec<f32>,
    pub extensions: Value,
    pub extras: Value,
}

impl Sampler {
    pub fn from_json(json: &Value, accessors: &[Accessor]) -> Result<Self> {
        let input = required_index(json, "animation sampler", "input")?;
        let output = required_index(json, "animation sampler", "output")?;
        let times = accessors[check_index("Accessor", input, accessors.len())?].to_f32()?;
        let values = accessors[check_index("Accessor", output, accessors.len())?].to_flat_f32()?;
        let interpolation = match json["interpolation"].as_str() {
            Some(s) => Interpolation::parse(s)?,
            None => Interpolation::Linear,
        };
        Ok(Self {
            input,
            output,
            interpolation,
            times,
            values,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }

    /// Last key time, 0 without keys.
    pub fn end_time(&self) -> f32 {
        self.times.iter().copied().fold(0.0, f32::max)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    /// Target node; absent when an extension supplies the target.
    pub node: Option<usize>,
    pub path: Path,
    pub extensions: Value,
    pub extras: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    /// Index into the owning animation's samplers.
    pub sampler: usize,
    pub target: Target,
    pub extensions: Value,
    pub extras: Value,
}

impl Channel {
    pub fn from_json(json: &Value, sampler_count: usize, node_count: usize) -> Result<Self> {
        let sampler = check_index(
            "AnimationSampler",
            required_index(json, "animation channel", "sampler")?,
            sampler_count,
        )?;
        let target = &json["target"];
        if !target.is_object() {
            return Err(Error::missing("animation channel", "target"));
        }
        let path = target["path"]
            .as_str()
            .ok_or_else(|| Error::missing("animation target", "path"))?;
        Ok(Self {
            sampler,
            target: Target {
                node: optional_index(target, "animation target", "node")?
                    .map(|n| check_index("Node", n, node_count))
                    .transpose()?,
                path: Path::parse(path)?,
                extensions: target["extensions"].opaque(),
                extras: target["extras"].opaque(),
            },
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animation {
    pub name: String,
    pub channels: Vec<Channel>,
    pub samplers: Vec<Sampler>,
    pub extensions: Value,
    pub extras: Value,
}

impl Animation {
    pub fn from_json(json: &Value, accessors: &[Accessor], node_count: usize) -> Result<Self> {
        let samplers = json["samplers"]
            .items()
            .map(|s| Sampler::from_json(s, accessors))
            .collect::<Result<Vec<_>>>()?;
        let channels = json["channels"]
            .items()
            .map(|c| Channel::from_json(c, samplers.len(), node_count))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            name: json["name"].str_or(UNNAMED).to_owned(),
            channels,
            samplers,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }

    /// Length of the animation in seconds.
    pub fn duration(&self) -> f32 {
        self.samplers.iter().map(Sampler::end_time).fold(0.0, f32::max)
    }
}

pub fn parse_animations(json: &Value, accessors: &[Accessor], node_count: usize) -> Result<Vec<Animation>> {
    json.items()
        .map(|a| Animation::from_json(a, accessors, node_count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{AccessorData, AccessorType, ComponentType};
    use serde_json::json;

    fn accessors() -> Vec<Accessor> {
        vec![
            Accessor {
                data: AccessorData::Float(vec![0.0, 0.5, 2.0]),
                component_type: ComponentType::Float,
                ty: AccessorType::Scalar,
                count: 3,
                ..Default::default()
            },
            Accessor {
                data: AccessorData::Float(vec![0.0; 9]),
                component_type: ComponentType::Float,
                ty: AccessorType::Vec3,
                count: 3,
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_animation() {
        let animation = Animation::from_json(
            &json!({
                "name": "move",
                "samplers": [{ "input": 0, "output": 1, "interpolation": "STEP" }],
                "channels": [{ "sampler": 0, "target": { "node": 1, "path": "translation" } }]
            }),
            &accessors(),
            2,
        )
        .unwrap();
        assert_eq!(animation.name, "move");
        assert_eq!(animation.samplers[0].times, vec![0.0, 0.5, 2.0]);
        assert_eq!(animation.samplers[0].values.len(), 9);
        assert_eq!(animation.samplers[0].interpolation, Interpolation::Step);
        assert_eq!(animation.channels[0].target.node, Some(1));
        assert_eq!(animation.channels[0].target.path, Path::Translation);
        assert_eq!(animation.duration(), 2.0);
        let keys = animation.samplers[0].times.len();
        assert_eq!(Path::Translation.components().map(|n| n * keys), Some(9));
    }

    #[test]
    fn test_default_interpolation() {
        let sampler = Sampler::from_json(&json!({ "input": 0, "output": 1 }), &accessors()).unwrap();
        assert_eq!(sampler.interpolation, Interpolation::Linear);
    }

    #[test]
    fn test_unknown_strings() {
        assert!(Sampler::from_json(&json!({ "input": 0, "output": 1, "interpolation": "BEZIER" }), &accessors()).is_err());
        assert!(matches!(
            Channel::from_json(&json!({ "sampler": 0, "target": { "path": "skew" } }), 1, 1),
            Err(Error::UnknownEnum { kind: "animation path", .. })
        ));
    }

    #[test]
    fn test_key_times_must_be_scalar() {
        assert!(Sampler::from_json(&json!({ "input": 1, "output": 1 }), &accessors()).is_err());
    }

    #[test]
    fn test_channel_references() {
        let channel = json!({ "sampler": 1, "target": { "node": 0, "path": "rotation" } });
        assert!(matches!(
            Channel::from_json(&channel, 1, 1),
            Err(Error::IndexOutOfBounds { kind: "AnimationSampler", .. })
        ));
        let channel = json!({ "sampler": 0, "target": { "node": 3, "path": "weights" } });
        assert!(Channel::from_json(&channel, 1, 1).is_err());
    }
}
