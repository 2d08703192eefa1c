//! Shared helpers for building glTF test documents.

#![allow(dead_code)]

use serde_json::{json, Value};

/// The single-triangle document: `u16` indices and `f32` positions packed
/// into one inline buffer.
pub const TRIANGLE_BASE64: &str = "AAABAAIAAAAAAAAAAAAAAAAAAAAAAIA/AAAAAAAAAAAAAAAAAACAPwAAAAA=";

pub fn triangle_document() -> Value {
    json!({
        "scene": 0,
        "scenes": [{ "nodes": [0] }],
        "nodes": [{ "mesh": 0 }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 1 }, "indices": 0 }] }],
        "buffers": [{
            "uri": format!("data:application/octet-stream;base64,{TRIANGLE_BASE64}"),
            "byteLength": 44
        }],
        "bufferViews": [
            { "buffer": 0, "byteOffset": 0, "byteLength": 6, "target": 34963 },
            { "buffer": 0, "byteOffset": 8, "byteLength": 36, "target": 34962 }
        ],
        "accessors": [
            { "bufferView": 0, "byteOffset": 0, "componentType": 5123, "count": 3, "type": "SCALAR", "max": [2], "min": [0] },
            { "bufferView": 1, "byteOffset": 0, "componentType": 5126, "count": 3, "type": "VEC3", "max": [1.0, 1.0, 0.0], "min": [0.0, 0.0, 0.0] }
        ],
        "asset": { "version": "2.0" }
    })
}

/// Little-endian bytes of `values`.
pub fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn u16_bytes(values: &[u16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// A source serving `bytes` for `uri` and nothing else.
pub fn single_source(uri: &'static str, bytes: Vec<u8>) -> impl Fn(&str) -> Vec<u8> {
    move |requested: &str| {
        if requested == uri {
            bytes.clone()
        } else {
            Vec::new()
        }
    }
}
