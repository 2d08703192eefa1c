//! Materials and the texture resources they reference.
//!
//! Materials follow the metallic-roughness model. Texture slots carry an index
//! into the root's texture list plus the UV channel to sample with.

mod texture;

pub use texture::{parse_images, parse_samplers, parse_textures, Filter, Image, Sampler, Texture, Wrap};

use serde_json::Value;

use crate::core::{float_array, optional_index, required_index, JsonExt};
use crate::util::{check_index, Error, Result, Vec3, Vec4};
use crate::UNNAMED;

/// How alpha is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Mask,
    Blend,
}

impl AlphaMode {
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "OPAQUE" => Ok(Self::Opaque),
            "MASK" => Ok(Self::Mask),
            "BLEND" => Ok(Self::Blend),
            _ => Err(Error::UnknownEnum {
                kind: "alpha mode",
                value: s.to_owned(),
            }),
        }
    }
}

/// Reference to a texture from a material slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextureInfo {
    pub index: usize,
    /// `TEXCOORD_n` channel.
    pub tex_coord: usize,
    pub extensions: Value,
    pub extras: Value,
}

impl TextureInfo {
    /// Read an optional texture slot.
    fn parse(json: &Value, texture_count: usize) -> Result<Option<Self>> {
        if !json.is_present() {
            return Ok(None);
        }
        let index = required_index(json, "textureInfo", "index")?;
        Ok(Some(Self {
            index: check_index("Texture", index, texture_count)?,
            tex_coord: optional_index(json, "textureInfo", "texCoord")?.unwrap_or(0),
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        }))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalTextureInfo {
    pub texture: TextureInfo,
    pub scale: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OcclusionTextureInfo {
    pub texture: TextureInfo,
    pub strength: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PbrMetallicRoughness {
    pub base_color_factor: Vec4,
    pub base_color_texture: Option<TextureInfo>,
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    /// Metalness in B, roughness in G.
    pub metallic_roughness_texture: Option<TextureInfo>,
    pub extensions: Value,
    pub extras: Value,
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        Self {
            base_color_factor: Vec4::ONE,
            base_color_texture: None,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            metallic_roughness_texture: None,
            extensions: Value::Null,
            extras: Value::Null,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub pbr: PbrMetallicRoughness,
    pub normal_texture: Option<NormalTextureInfo>,
    pub occlusion_texture: Option<OcclusionTextureInfo>,
    pub emissive_texture: Option<TextureInfo>,
    pub emissive_factor: Vec3,
    pub alpha_mode: AlphaMode,
    pub alpha_cutoff: f32,
    pub double_sided: bool,
    pub extensions: Value,
    pub extras: Value,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: UNNAMED.to_owned(),
            pbr: PbrMetallicRoughness::default(),
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            emissive_factor: Vec3::ZERO,
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: false,
            extensions: Value::Null,
            extras: Value::Null,
        }
    }
}

impl Material {
    pub fn from_json(json: &Value, texture_count: usize) -> Result<Self> {
        let pbr_json = &json["pbrMetallicRoughness"];
        let pbr = PbrMetallicRoughness {
            base_color_factor: Vec4::from_array(float_array(
                &pbr_json["baseColorFactor"],
                "baseColorFactor",
                [1.0; 4],
            )?),
            base_color_texture: TextureInfo::parse(&pbr_json["baseColorTexture"], texture_count)?,
            metallic_factor: pbr_json["metallicFactor"].f32_or(1.0),
            roughness_factor: pbr_json["roughnessFactor"].f32_or(1.0),
            metallic_roughness_texture: TextureInfo::parse(
                &pbr_json["metallicRoughnessTexture"],
                texture_count,
            )?,
            extensions: pbr_json["extensions"].opaque(),
            extras: pbr_json["extras"].opaque(),
        };

        let normal = &json["normalTexture"];
        let normal_texture = TextureInfo::parse(normal, texture_count)?.map(|texture| NormalTextureInfo {
            texture,
            scale: normal["scale"].f32_or(1.0),
        });
        let occlusion = &json["occlusionTexture"];
        let occlusion_texture =
            TextureInfo::parse(occlusion, texture_count)?.map(|texture| OcclusionTextureInfo {
                texture,
                strength: occlusion["strength"].f32_or(1.0),
            });

        let alpha_mode = match json["alphaMode"].as_str() {
            Some(mode) => AlphaMode::parse(mode)?,
            None => AlphaMode::Opaque,
        };

        Ok(Self {
            name: json["name"].str_or(UNNAMED).to_owned(),
            pbr,
            normal_texture,
            occlusion_texture,
            emissive_texture: TextureInfo::parse(&json["emissiveTexture"], texture_count)?,
            emissive_factor: Vec3::from_array(float_array(&json["emissiveFactor"], "emissiveFactor", [0.0; 3])?),
            alpha_mode,
            alpha_cutoff: json["alphaCutoff"].f32_or(0.5),
            double_sided: json["doubleSided"].bool_or(false),
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }

    /// Textures sampled as data rather than colour: metallic-roughness,
    /// occlusion and normal maps.
    pub fn linear_textures(&self) -> impl Iterator<Item = usize> + '_ {
        self.pbr
            .metallic_roughness_texture
            .iter()
            .map(|t| t.index)
            .chain(self.occlusion_texture.iter().map(|t| t.texture.index))
            .chain(self.normal_texture.iter().map(|t| t.texture.index))
    }
}

pub fn parse_materials(json: &Value, texture_count: usize) -> Result<Vec<Material>> {
    json.items()
        .map(|m| Material::from_json(m, texture_count))
        .collect()
}

/// Flag every texture used by a non-colour slot as linear.
///
/// Running this more than once changes nothing.
pub fn mark_linear_textures(materials: &[Material], textures: &mut [Texture]) {
    for index in materials.iter().flat_map(Material::linear_textures) {
        if let Some(texture) = textures.get_mut(index) {
            texture.linear = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_material_defaults() {
        let m = Material::from_json(&json!({}), 0).unwrap();
        assert_eq!(m.name, UNNAMED);
        assert_eq!(m.pbr.base_color_factor, Vec4::ONE);
        assert_eq!(m.pbr.metallic_factor, 1.0);
        assert_eq!(m.alpha_mode, AlphaMode::Opaque);
        assert_eq!(m.alpha_cutoff, 0.5);
        assert!(!m.double_sided);
        assert!(m.normal_texture.is_none());
    }

    #[test]
    fn test_material_full() {
        let m = Material::from_json(
            &json!({
                "name": "metal",
                "pbrMetallicRoughness": {
                    "baseColorFactor": [0.5, 0.5, 0.5, 1.0],
                    "baseColorTexture": { "index": 0 },
                    "metallicFactor": 0.0,
                    "metallicRoughnessTexture": { "index": 1, "texCoord": 1 }
                },
                "normalTexture": { "index": 2, "scale": 0.5 },
                "occlusionTexture": { "index": 1, "strength": 0.25 },
                "emissiveFactor": [1.0, 0.0, 0.0],
                "alphaMode": "MASK",
                "alphaCutoff": 0.3,
                "doubleSided": true
            }),
            3,
        )
        .unwrap();
        assert_eq!(m.pbr.base_color_factor, Vec4::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(m.pbr.metallic_factor, 0.0);
        assert_eq!(m.pbr.metallic_roughness_texture.as_ref().unwrap().tex_coord, 1);
        assert_eq!(m.normal_texture.as_ref().unwrap().scale, 0.5);
        assert_eq!(m.occlusion_texture.as_ref().unwrap().strength, 0.25);
        assert_eq!(m.emissive_factor, Vec3::X);
        assert_eq!(m.alpha_mode, AlphaMode::Mask);
        assert!(m.double_sided);
        assert_eq!(m.linear_textures().collect::<Vec<_>>(), vec![1, 1, 2]);
    }

    #[test]
    fn test_texture_index_checked() {
        let result = Material::from_json(&json!({ "emissiveTexture": { "index": 4 } }), 2);
        assert!(matches!(result, Err(Error::IndexOutOfBounds { kind: "Texture", .. })));
    }

    #[test]
    fn test_unknown_alpha_mode() {
        assert!(matches!(
            Material::from_json(&json!({ "alphaMode": "CUTOUT" }), 0),
            Err(Error::UnknownEnum { kind: "alpha mode", .. })
        ));
    }

    #[test]
    fn test_mark_linear_textures() {
        let materials = vec![Material::from_json(
            &json!({
                "pbrMetallicRoughness": { "baseColorTexture": { "index": 0 } },
                "normalTexture": { "index": 1 }
            }),
            2,
        )
        .unwrap()];
        let mut textures = vec![Texture::default(), Texture::default()];
        mark_linear_textures(&materials, &mut textures);
        assert!(!textures[0].linear);
        assert!(textures[1].linear);

        let before = textures.clone();
        mark_linear_textures(&materials, &mut textures);
        assert_eq!(textures, before);
    }
}
