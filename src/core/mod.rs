//! Core layer - document access and resource resolution.
//!
//! This module provides:
//! - [`base64`] - Inline `data:` URI decoding
//! - [`JsonExt`] and friends - Minimal read interface over the JSON document
//! - [`ByteSource`] - Resolution of external buffer and image URIs

pub mod base64;
mod json;
mod source;

pub use json::{
    JsonExt, f32_list, float_array, index_list, optional_index, require_fields, required_f32,
    required_index, string_list,
};
pub use source::{ByteSource, EmptySource, FileSource};
