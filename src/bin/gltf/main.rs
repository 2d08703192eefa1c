//! glTF CLI - Tool for inspecting glTF 2.0 scenes.

use std::env;
use std::path::Path;

use gltf_scene::prelude::{Mesh, Node, Options, Root};
use gltf_scene::scene::Transform;
use tracing_subscriber::EnvFilter;

/// Default filter for each verbosity flag.
const FILTER_QUIET: &str = "off";
const FILTER_DEFAULT: &str = "warn";
const FILTER_DEBUG: &str = "gltf_scene=debug,warn";
const FILTER_TRACE: &str = "gltf_scene=trace,info";

fn init_logging(filter: &str) {
    // RUST_LOG wins over the flags
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse global flags
    let mut filter = FILTER_DEFAULT;
    let mut options = Options::new();
    let mut filtered_args: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => filter = FILTER_DEBUG,
            "-vv" | "--trace" => filter = FILTER_TRACE,
            "-q" | "--quiet" => filter = FILTER_QUIET,
            "--strict" => options = options.strict_resources(true),
            _ => filtered_args.push(arg),
        }
    }
    init_logging(filter);

    if filtered_args.is_empty() {
        print_help();
        return;
    }

    match filtered_args[0] {
        // Info command - document summary
        "info" | "i" => cmd_info(require_file(&filtered_args, "info"), options),

        // Tree command - node hierarchy per scene
        "tree" | "t" => cmd_tree(require_file(&filtered_args, "tree"), options),

        // Stats command - per-mesh and per-animation details
        "stats" | "s" => cmd_stats(require_file(&filtered_args, "stats"), options),

        "version" | "-V" | "--version" => print_version(),

        "help" | "h" | "-h" | "--help" => print_help(),

        // Default: if file exists, show info; otherwise error
        _ => {
            if Path::new(filtered_args[0]).exists() {
                cmd_info(filtered_args[0], options);
            } else {
                eprintln!("Unknown command: {}", filtered_args[0]);
                eprintln!();
                print_help();
                std::process::exit(1);
            }
        }
    }
}

fn require_file<'a>(args: &[&'a str], command: &str) -> &'a str {
    match args.get(1) {
        Some(&path) => path,
        None => {
            eprintln!("Error: missing file argument");
            eprintln!("Usage: gltf-cli {} <file.gltf>", command);
            std::process::exit(1);
        }
    }
}

fn print_help() {
    println!("gltf-cli - glTF 2.0 scene inspector");
    println!();
    println!("USAGE:");
    println!("    gltf-cli [OPTIONS] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    i, info   <file>              Show asset info and element counts");
    println!("    t, tree   <file>              Show node hierarchy of each scene");
    println!("    s, stats  <file>              Show meshes, materials, animations and skins");
    println!("    version                       Show version and build date");
    println!("    h, help                       Show this help");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Show debug output");
    println!("    -vv, --trace     Show trace output (every accessor)");
    println!("    -q, --quiet      Suppress all log output");
    println!("    --strict         Fail on buffers or images that cannot be read");
    println!();
    println!("EXAMPLES:");
    println!("    gltf-cli info scene.gltf              # Quick overview");
    println!("    gltf-cli tree character.gltf          # See hierarchy");
    println!("    gltf-cli -v stats large.gltf          # Verbose statistics");
    println!();
    println!("NOTES:");
    println!("    - Passing a .gltf file directly is equivalent to 'info'");
    println!("    - RUST_LOG overrides the verbosity flags");
}

fn print_version() {
    let date = option_env!("GLTF_BUILD_DATE").unwrap_or("unknown");
    let time = option_env!("GLTF_BUILD_TIME").unwrap_or("unknown");
    println!("gltf-cli {} (built {} {})", env!("CARGO_PKG_VERSION"), date, time);
}

fn load(path: &str, options: Options) -> Root {
    tracing::info!("Opening document: {}", path);
    match gltf_scene::parse_with_options(path, options) {
        Ok(root) if root.is_valid() => root,
        Ok(_) => {
            eprintln!("Failed to open {}: not a glTF document", path);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to open {}: {}", path, e);
            std::process::exit(1);
        }
    }
}

fn cmd_info(path: &str, options: Options) {
    let root = load(path, options);
    let asset = &root.asset;

    println!("Document: {}", path);
    println!("Version:  {}", asset.version);
    if !asset.generator.is_empty() {
        println!("Generator: {}", asset.generator);
    }
    if !asset.copyright.is_empty() {
        println!("Copyright: {}", asset.copyright);
    }
    println!();

    let vertices: usize = root.meshes.iter().map(Mesh::num_vertices).sum();
    println!("Elements:");
    println!("  Scenes:     {}", root.scenes.len());
    println!("  Nodes:      {}", root.nodes.len());
    println!("  Meshes:     {} ({} primitives, {} vertices)", root.meshes.len(), root.num_primitives(), vertices);
    println!("  Materials:  {}", root.materials.len());
    println!("  Textures:   {}", root.textures.len());
    println!("  Images:     {}", root.images.len());
    println!("  Cameras:    {}", root.cameras.len());
    println!("  Skins:      {}", root.skins.len());
    println!("  Animations: {}", root.animations.len());
    println!("  Accessors:  {}", root.accessors.len());
    println!("  Buffers:    {} ({} bytes)", root.buffers.len(), root.buffers.iter().map(|b| b.len()).sum::<usize>());

    if !root.extensions_used.is_empty() {
        println!();
        println!("Extensions used:     {}", root.extensions_used.join(", "));
    }
    if !root.extensions_required.is_empty() {
        println!("Extensions required: {}", root.extensions_required.join(", "));
    }
}

fn cmd_tree(path: &str, options: Options) {
    let root = load(path, options);
    println!("Document: {}", path);
    println!();

    if root.scenes.is_empty() {
        for node in root.root_nodes() {
            print_tree(&root, node, 1);
        }
        return;
    }
    for (i, scene) in root.scenes.iter().enumerate() {
        let marker = if root.start_scene == Some(i) { " *" } else { "" };
        println!("[{}] {}{}", i, scene.name, marker);
        for &index in &scene.nodes {
            print_tree(&root, &root.nodes[index], 1);
        }
    }
}

fn print_tree(root: &Root, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    let mut tags = Vec::new();
    if let Some(mesh) = node.mesh {
        tags.push(format!("mesh {}", root.meshes[mesh].name));
    }
    if let Some(camera) = node.camera {
        tags.push(format!("camera {}", root.cameras[camera].name));
    }
    if let Some(skin) = node.skin {
        tags.push(format!("skin {}", skin));
    }
    if tags.is_empty() {
        println!("{}{}", indent, node.name);
    } else {
        println!("{}{} [{}]", indent, node.name, tags.join(", "));
    }
    for &child in &node.children {
        print_tree(root, &root.nodes[child], depth + 1);
    }
}

fn cmd_stats(path: &str, options: Options) {
    let root = load(path, options);
    println!("Document: {}", path);
    println!("Version:  {}", root.asset.version);
    println!();

    println!("Meshes ({}):", root.meshes.len());
    for (i, mesh) in root.meshes.iter().enumerate() {
        println!("  [{}] {} - {} primitives, {} targets", i, mesh.name, mesh.primitives.len(), mesh.num_targets());
        for primitive in &mesh.primitives {
            let geometry = &primitive.geometry;
            let attributes: Vec<&str> = geometry.attributes.keys().map(String::as_str).collect();
            println!(
                "      {:?}: {} vertices, {} indices, {} triangles [{}]",
                primitive.mode,
                geometry.num_vertices(),
                geometry.indices.len(),
                primitive.num_triangles(),
                attributes.join(" ")
            );
            if let Some((min, max)) = geometry.compute_bounds() {
                println!("      bounds: {:?} .. {:?}", min.to_array(), max.to_array());
            }
        }
    }
    println!();

    println!("Materials ({}):", root.materials.len());
    for (i, material) in root.materials.iter().enumerate() {
        println!(
            "  [{}] {} - {:?}{}",
            i,
            material.name,
            material.alpha_mode,
            if material.double_sided { ", double sided" } else { "" }
        );
    }
    let linear = root.textures.iter().filter(|t| t.linear).count();
    println!("Textures: {} ({} linear)", root.textures.len(), linear);
    println!();

    println!("Animations ({}):", root.animations.len());
    for (i, animation) in root.animations.iter().enumerate() {
        println!(
            "  [{}] {} - {} channels, {} samplers, {:.3}s",
            i,
            animation.name,
            animation.channels.len(),
            animation.samplers.len(),
            animation.duration()
        );
    }

    println!("Skins ({}):", root.skins.len());
    for (i, skin) in root.skins.iter().enumerate() {
        println!("  [{}] {} - {} joints", i, skin.name, skin.joints.len());
    }
    println!();

    let matrices = root
        .nodes
        .iter()
        .filter(|n| matches!(n.transform, Transform::Matrix(_)))
        .count();
    println!("Nodes: {} ({} TRS, {} matrix)", root.nodes.len(), root.nodes.len() - matrices, matrices);
}
