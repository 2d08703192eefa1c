//! Buffers and buffer views.
//!
//! Buffers own the raw bytes of the document's binary payloads. Buffer views
//! are validated byte ranges over a buffer, optionally strided.

use serde_json::Value;

use crate::core::{base64, optional_index, required_index, ByteSource, JsonExt};
use crate::parser::Options;
use crate::util::{check_index, Error, Result};

/// Owned, immutable block of bytes.
pub type ByteBuffer = Box<[u8]>;

/// Intended GPU binding of a buffer view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum BufferTarget {
    /// No hint given
    #[default]
    None = 0,
    /// Vertex attributes
    ArrayBuffer = 34962,
    /// Vertex indices
    ElementArrayBuffer = 34963,
}

impl BufferTarget {
    /// Convert from the GL enum value.
    pub fn from_gl(code: u64) -> Result<Self> {
        match code {
            34962 => Ok(Self::ArrayBuffer),
            34963 => Ok(Self::ElementArrayBuffer),
            _ => Err(Error::UnknownEnum {
                kind: "buffer view target",
                value: code.to_string(),
            }),
        }
    }
}

/// A resolved buffer.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    pub name: Option<String>,
    /// URI as written in the document.
    pub uri: String,
    /// Declared `byteLength`.
    pub byte_length: usize,
    pub bytes: ByteBuffer,
    pub extensions: Value,
    pub extras: Value,
}

impl Buffer {
    /// Resolve a buffer from JSON, decoding data URIs or asking `source`.
    pub fn from_json(json: &Value, source: &dyn ByteSource, options: &Options) -> Result<Self> {
        let uri = json["uri"].str_or("");
        if uri.is_empty() {
            return Err(Error::missing("buffer", "uri"));
        }
        let byte_length = json["byteLength"].as_index().unwrap_or(0);

        let bytes = match base64::decode_data_uri(uri) {
            Some(decoded) => decoded?,
            None => {
                let bytes = source.resolve(uri);
                if bytes.is_empty() && byte_length > 0 {
                    if options.strict_resources {
                        return Err(Error::UnresolvedResource(uri.to_owned()));
                    }
                    tracing::warn!(uri, byte_length, "buffer resolved to no bytes");
                }
                bytes
            }
        };

        Ok(Self {
            name: json["name"].as_str().map(str::to_owned),
            uri: uri.to_owned(),
            byte_length,
            bytes: bytes.into_boxed_slice(),
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        })
    }

    /// Number of resolved bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if no bytes were resolved.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns true if the bytes were embedded in the document.
    pub fn is_inline(&self) -> bool {
        base64::data_uri_start(&self.uri).is_some()
    }
}

/// A validated byte range over a buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BufferView {
    pub name: Option<String>,
    pub buffer: usize,
    pub offset: usize,
    pub length: usize,
    /// Distance between consecutive elements, when interleaved.
    pub stride: Option<usize>,
    pub target: BufferTarget,
    pub extensions: Value,
    pub extras: Value,
}

impl BufferView {
    /// Parse a buffer view and validate it against the resolved buffers.
    pub fn from_json(json: &Value, buffers: &[Buffer]) -> Result<Self> {
        let buffer = required_index(json, "bufferView", "buffer")?;
        let length = required_index(json, "bufferView", "byteLength")?;
        let offset = optional_index(json, "bufferView", "byteOffset")?.unwrap_or(0);
        let stride = optional_index(json, "bufferView", "byteStride")?;
        let target = match json["target"].as_u64() {
            Some(code) => BufferTarget::from_gl(code)?,
            None => BufferTarget::None,
        };

        let view = Self {
            name: json["name"].as_str().map(str::to_owned),
            buffer,
            offset,
            length,
            stride,
            target,
            extensions: json["extensions"].opaque(),
            extras: json["extras"].opaque(),
        };
        // Validate eagerly so a bad view fails where it is declared.
        view.slice(buffers)?;
        Ok(view)
    }

    /// The bytes covered by this view.
    ///
    /// A zero-length view is always the empty range, wherever it points. Any
    /// other view must lie inside its buffer's resolved bytes.
    pub fn slice<'a>(&self, buffers: &'a [Buffer]) -> Result<&'a [u8]> {
        let buffer = &buffers[check_index("Buffer", self.buffer, buffers.len())?];
        if self.length == 0 {
            return Ok(&[]);
        }
        let end = self
            .offset
            .checked_add(self.length)
            .ok_or_else(|| Error::invalid("buffer view range overflows"))?;
        buffer.bytes.get(self.offset..end).ok_or(Error::Truncated {
            context: "buffer view",
            needed: end,
            available: buffer.len(),
        })
    }
}

/// Resolve every declared buffer.
pub fn resolve_buffers(json: &Value, source: &dyn ByteSource, options: &Options) -> Result<Vec<Buffer>> {
    json.items()
        .map(|b| Buffer::from_json(b, source, options))
        .collect()
}

/// Parse every declared buffer view.
pub fn parse_views(json: &Value, buffers: &[Buffer]) -> Result<Vec<BufferView>> {
    json.items()
        .map(|v| BufferView::from_json(v, buffers))
        .collect()
}
