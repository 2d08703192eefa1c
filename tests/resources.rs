//! Integration tests for documents on disk and external resources.

mod common;

use std::fs;

use common::{f32_bytes, triangle_document, u16_bytes};
use gltf_scene::prelude::*;
use gltf_scene::util::Vec3;
use serde_json::json;
use tempfile::TempDir;

/// The triangle document with its buffer moved to `triangle.bin`.
fn write_external_triangle(dir: &TempDir) -> std::path::PathBuf {
    let mut bin = u16_bytes(&[0, 1, 2]);
    bin.extend([0, 0]);
    bin.extend(f32_bytes(&[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]));
    fs::write(dir.path().join("triangle.bin"), bin).unwrap();

    let mut json = triangle_document();
    json["buffers"][0]["uri"] = json!("triangle.bin");
    let path = dir.path().join("triangle.gltf");
    fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();
    path
}

#[test]
fn test_parse_file_with_external_buffer() {
    let dir = TempDir::new().unwrap();
    let path = write_external_triangle(&dir);

    let root = gltf_scene::parse(&path).expect("Failed to parse triangle.gltf");
    assert!(root.is_valid());
    let geometry = &root.meshes[0].primitives[0].geometry;
    assert_eq!(geometry.positions, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
    assert_eq!(geometry.indices, vec![0, 1, 2]);
    assert!(!root.buffers[0].is_inline());
    assert_eq!(root.buffers[0].len(), 44);
}

#[test]
fn test_parse_file_with_inline_buffer() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("inline.gltf");
    fs::write(&path, triangle_document().to_string()).unwrap();

    let root = gltf_scene::parse(&path).unwrap();
    assert!(root.buffers[0].is_inline());
    assert_eq!(root.meshes[0].primitives[0].geometry.indices, vec![0, 1, 2]);
}

#[test]
fn test_missing_buffer_is_lenient() {
    let dir = TempDir::new().unwrap();
    let mut json = triangle_document();
    json["buffers"] = json!([
        json["buffers"][0].clone(),
        { "uri": "unused.bin", "byteLength": 128 }
    ]);
    let path = dir.path().join("extra.gltf");
    fs::write(&path, json.to_string()).unwrap();

    let root = gltf_scene::parse(&path).unwrap();
    assert_eq!(root.buffers.len(), 2);
    assert!(root.buffers[1].is_empty());
    assert_eq!(root.buffers[1].byte_length, 128);
    assert_eq!(root.meshes[0].primitives[0].geometry.indices, vec![0, 1, 2]);
}

#[test]
fn test_missing_buffer_fails_at_view() {
    let dir = TempDir::new().unwrap();
    let path = write_external_triangle(&dir);
    fs::remove_file(dir.path().join("triangle.bin")).unwrap();

    let result = gltf_scene::parse(&path);
    assert!(matches!(result, Err(Error::Truncated { available: 0, .. })));
}

#[test]
fn test_missing_buffer_strict() {
    let dir = TempDir::new().unwrap();
    let path = write_external_triangle(&dir);
    fs::remove_file(dir.path().join("triangle.bin")).unwrap();

    let result = gltf_scene::parse_with_options(&path, Options::new().strict_resources(true));
    assert!(matches!(result, Err(Error::UnresolvedResource(uri)) if uri == "triangle.bin"));
}

#[test]
fn test_external_image() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("albedo.png"), [0x89, b'P', b'N', b'G']).unwrap();
    let json = json!({
        "asset": { "version": "2.0" },
        "images": [{ "uri": "albedo.png" }],
        "textures": [{ "source": 0 }]
    });
    let path = dir.path().join("textured.gltf");
    fs::write(&path, json.to_string()).unwrap();

    let root = gltf_scene::parse(&path).unwrap();
    assert_eq!(root.images[0].bytes, vec![0x89, b'P', b'N', b'G']);
    assert_eq!(root.textures[0].source, Some(0));
}

#[test]
fn test_parse_directory_gives_default_root() {
    let dir = TempDir::new().unwrap();
    let root = gltf_scene::parse(dir.path()).unwrap();
    assert!(!root.is_valid());
    assert!(root.nodes.is_empty());
}

#[test]
fn test_parse_missing_path_gives_default_root() {
    let root = gltf_scene::parse("does/not/exist.gltf").unwrap();
    assert!(!root.is_valid());
}

#[test]
fn test_parse_invalid_json_gives_default_root() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.gltf");
    fs::write(&path, "{ \"asset\": ").unwrap();
    let root = gltf_scene::parse(&path).unwrap();
    assert!(!root.is_valid());
}

#[test]
fn test_parse_non_utf8_gives_default_root() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("binary.gltf");
    fs::write(&path, [0xFF, 0xFE, b'{']).unwrap();
    let root = gltf_scene::parse(&path).unwrap();
    assert!(!root.is_valid());
    assert_eq!(gltf_scene::metadata(&path).unwrap(), Metadata::default());
}

#[test]
fn test_metadata_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_external_triangle(&dir);
    let meta = gltf_scene::metadata(&path).unwrap();
    assert_eq!(meta.primitives, 1);
    assert!(meta.extensions_used.is_empty());

    assert_eq!(gltf_scene::metadata(dir.path().join("nope.gltf")).unwrap(), Metadata::default());
}

#[test]
fn test_file_source_resolves_relative_to_document() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("bin")).unwrap();
    fs::write(dir.path().join("bin").join("data.bin"), [1u8, 2, 3]).unwrap();

    let source = FileSource::for_document(dir.path().join("scene.gltf"));
    assert_eq!(source.resolve("bin/data.bin"), vec![1, 2, 3]);
    assert!(source.resolve("bin/other.bin").is_empty());
}
