//! OBJ inspection tool
//!
//! Loads an OBJ file and its material libraries from disk, runs the
//! ingestion pipeline and prints what a renderer would receive.
//!
//! Usage: obj_inspect <model.obj> [config.toml|config.ron]

use mesh_ingest::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
enum AppError {
    #[error("Usage: obj_inspect <model.obj> [config.toml|config.ron]")]
    Usage,
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

fn main() {
    mesh_ingest::foundation::logging::init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args().skip(1);
    let obj_path = PathBuf::from(args.next().ok_or(AppError::Usage)?);
    let config = match args.next() {
        Some(path) => IngestConfig::load_from_file(&path)?,
        None => IngestConfig::default(),
    };

    let obj_text = std::fs::read_to_string(&obj_path).map_err(|source| AppError::Read {
        path: obj_path.clone(),
        source,
    })?;

    let base_dir = obj_path.parent().map(Path::to_path_buf).unwrap_or_default();
    let mut loader = ModelLoader::new(config.assembly);
    if let Some(stem) = obj_path.file_stem() {
        loader = loader.with_companion_library(format!("{}.mtl", stem.to_string_lossy()));
    }

    log::info!("Loading {}", obj_path.display());
    let model = loader.load(&obj_text, |library| {
        let path = base_dir.join(library);
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path.display(), e);
                None
            }
        }
    })?;

    print_summary(&model);
    Ok(())
}

fn print_summary(model: &LoadedModel) {
    println!(
        "{} part(s), {} vertices, {} diagnostic(s)",
        model.parts.len(),
        model.vertex_count(),
        model.diagnostics.len()
    );

    for (index, part) in model.parts.iter().enumerate() {
        let attributes: Vec<String> = part
            .geometry
            .attributes()
            .map(|(name, attribute)| {
                if attribute.is_constant() {
                    format!("{}=const", name)
                } else {
                    format!("{}[{}]", name, attribute.components())
                }
            })
            .collect();

        println!(
            "  #{} object='{}' groups={:?} material='{}' vertices={} {}",
            index,
            part.object,
            part.groups,
            part.material_name,
            part.geometry.vertex_count(),
            attributes.join(" ")
        );
    }

    let textures = model.texture_files();
    if !textures.is_empty() {
        println!("Textures:");
        for texture in textures {
            println!("  {}", texture);
        }
    }
}
