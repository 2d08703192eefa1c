//! Images, samplers and textures.

use serde_json::Value;

use crate::buffer::{Buffer, BufferView};
use crate::core::{base64, optional_index, ByteSource, JsonExt};
use crate::parser::Options;
use crate::util::{check_index, Error, Result};
use crate::UNNAMED;

// ============================================================================
// Images
// ============================================================================

/// Raw encoded image bytes (PNG, JPEG, ...), never decoded here.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Image {
    pub name: String,
    /// URI as written, empty for buffer-view images.
    pub uri: String,
    pub mime_type: Option<String>,
    pub buffer_view: Option<usize>,
    pub bytes: Vec<u8>,
    pub extensions: Value,
    pub extras: Value,
}

impl Image {
    /// Resolve an image from a data URI, the byte source, or a buffer view.
    pub fn from_json(
        json: &Value,
        source: &dyn ByteSource,
        buffers: &[Buffer],
        views: &[BufferView],
        options: &Options,
    ) -> Result<Self> {
        let uri = json["uri"].str_or("");
        let buffer_view = optional_index(json, "image", "bufferView")?;

        let bytes = match (uri.is_empty(), buffer_view) {
            (false, _) => match base64::decode_data_uri(uri) {
                Some(decoded) => decoded?,
                None => {
                    let bytes = source.resolve(uri);
                    if bytes.is_empty() {
                        if options.strict_resources {
                            return Err(Error::UnresolvedResource(uri.to_owned()));
                        }
                        tracing::warn!(uri, "image resolved to no bytes");
                    }
                    bytes
                }
            },
            (true, Some(index)) => views[check_index("BufferView", index, views.len())?]
                .slice(buffers)?
                .to_vec(),
            (true, None) => return Err(Error::missing("image", "uri")),
        };

        Ok(Self {
            name: json["name"].str_or(UNNAMED).to_owned(),
            uri: uri.to_owned(),
            mime_type: json["mimeType"].as_str().map(str::to_owned),
            buffer_view,
            bytes,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }
}

pub fn parse_images(
    json: &Value,
    source: &dyn ByteSource,
    buffers: &[Buffer],
    views: &[BufferView],
    options: &Options,
) -> Result<Vec<Image>> {
    json.items()
        .map(|i| Image::from_json(i, source, buffers, views, options))
        .collect()
}

// ============================================================================
// Samplers
// ============================================================================

/// Texture filter, by GL enum value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Filter {
    Nearest = 9728,
    Linear = 9729,
    NearestMipmapNearest = 9984,
    LinearMipmapNearest = 9985,
    NearestMipmapLinear = 9986,
    LinearMipmapLinear = 9987,
}

impl Filter {
    pub fn from_gl(code: u64) -> Result<Self> {
        Ok(match code {
            9728 => Self::Nearest,
            9729 => Self::Linear,
            9984 => Self::NearestMipmapNearest,
            9985 => Self::LinearMipmapNearest,
            9986 => Self::NearestMipmapLinear,
            9987 => Self::LinearMipmapLinear,
            _ => {
                return Err(Error::UnknownEnum {
                    kind: "sampler filter",
                    value: code.to_string(),
                })
            }
        })
    }

    /// Returns true for the mipmapped minification filters.
    pub fn uses_mipmaps(&self) -> bool {
        (*self as u32) >= 9984
    }
}

/// Texture coordinate wrapping, by GL enum value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Wrap {
    ClampToEdge = 33071,
    MirroredRepeat = 33648,
    #[default]
    Repeat = 10497,
}

impl Wrap {
    pub fn from_gl(code: u64) -> Result<Self> {
        Ok(match code {
            33071 => Self::ClampToEdge,
            33648 => Self::MirroredRepeat,
            10497 => Self::Repeat,
            _ => {
                return Err(Error::UnknownEnum {
                    kind: "sampler wrap",
                    value: code.to_string(),
                })
            }
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sampler {
    pub name: String,
    pub mag_filter: Option<Filter>,
    pub min_filter: Option<Filter>,
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
    pub extensions: Value,
    pub extras: Value,
}

impl Sampler {
    pub fn from_json(json: &Value) -> Result<Self> {
        let filter = |field: &str| json[field].as_u64().map(Filter::from_gl).transpose();
        let wrap = |field: &str| {
            json[field]
                .as_u64()
                .map_or(Ok(Wrap::default()), Wrap::from_gl)
        };
        Ok(Self {
            name: json["name"].str_or(UNNAMED).to_owned(),
            mag_filter: filter("magFilter")?,
            min_filter: filter("minFilter")?,
            wrap_s: wrap("wrapS")?,
            wrap_t: wrap("wrapT")?,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }
}

pub fn parse_samplers(json: &Value) -> Result<Vec<Sampler>> {
    json.items().map(Sampler::from_json).collect()
}

// ============================================================================
// Textures
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Texture {
    pub name: String,
    pub sampler: Option<usize>,
    /// Image index.
    pub source: Option<usize>,
    /// Set when the texture holds non-colour data (normals, occlusion,
    /// metallic-roughness) and must not be treated as sRGB.
    pub linear: bool,
    pub extensions: Value,
    pub extras: Value,
}

impl Texture {
    pub fn from_json(json: &Value, image_count: usize, sampler_count: usize) -> Result<Self> {
        let sampler = optional_index(json, "texture", "sampler")?
            .map(|i| check_index("Sampler", i, sampler_count))
            .transpose()?;
        let source = optional_index(json, "texture", "source")?
            .map(|i| check_index("Image", i, image_count))
            .transpose()?;
        Ok(Self {
            name: json["name"].str_or(UNNAMED).to_owned(),
            sampler,
            source,
            linear: false,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }
}

pub fn parse_textures(json: &Value, image_count: usize, sampler_count: usize) -> Result<Vec<Texture>> {
    json.items()
        .map(|t| Texture::from_json(t, image_count, sampler_count))
        .collect()
}
