//! End-to-end model loading: OBJ text + MTL libraries -> render parts
//!
//! The loader performs no I/O. Library text is requested through a resolver
//! closure, so the caller decides whether it comes from disk, the network or
//! memory.

use std::collections::HashMap;

use super::diagnostics::Diagnostic;
use super::materials::{collect_texture_files, Material, MtlParser};
use super::obj_parser::ObjParser;
use super::AssetError;
use crate::render::assembly::{assemble_parts, AssemblyConfig, RenderPart};

/// A fully assembled model
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedModel {
    /// Render parts, one per geometry segment
    pub parts: Vec<RenderPart>,
    /// Every material from every library that was loaded
    pub materials: HashMap<String, Material>,
    /// Library names that were requested from the resolver, in order
    pub material_libraries: Vec<String>,
    /// Diagnostics from the OBJ and all MTL files
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadedModel {
    /// Texture files referenced by the loaded materials, each listed once
    pub fn texture_files(&self) -> Vec<String> {
        collect_texture_files(self.materials.values())
    }

    /// Total vertex count over all parts
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|part| part.geometry.vertex_count()).sum()
    }
}

/// Loads OBJ models together with their material libraries
#[derive(Debug, Clone, Default)]
pub struct ModelLoader {
    config: AssemblyConfig,
    companion_library: Option<String>,
}

impl ModelLoader {
    /// Create a loader with the given assembly settings
    pub fn new(config: AssemblyConfig) -> Self {
        Self {
            config,
            companion_library: None,
        }
    }

    /// Library to request when the OBJ names none (typically `<model>.mtl`)
    pub fn with_companion_library(mut self, name: impl Into<String>) -> Self {
        self.companion_library = Some(name.into());
        self
    }

    /// Assembly settings in use
    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    /// Parse `obj_text`, fetch and parse its material libraries through
    /// `resolve`, and assemble render parts.
    ///
    /// Libraries are merged in order, so a later library wins when two
    /// define the same material. A library the resolver cannot supply is
    /// logged and skipped; a library that fails to parse is an error.
    pub fn load<F>(&self, obj_text: &str, mut resolve: F) -> Result<LoadedModel, AssetError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let scene = ObjParser::parse(obj_text);
        let mut diagnostics = scene.diagnostics;

        let mut libraries = scene.material_libraries;
        if libraries.is_empty() {
            libraries.extend(self.companion_library.iter().cloned());
        }

        let mut materials = HashMap::new();
        for library in &libraries {
            let Some(text) = resolve(library) else {
                log::warn!("Material library '{}' could not be loaded", library);
                continue;
            };

            let (parsed, library_diagnostics) = MtlParser::parse_with_diagnostics(&text)
                .map_err(|source| AssetError::MaterialLibrary {
                    library: library.clone(),
                    source,
                })?;
            log::debug!("Loaded {} material(s) from '{}'", parsed.len(), library);
            materials.extend(parsed);
            diagnostics.extend(library_diagnostics);
        }

        let parts = assemble_parts(scene.geometries, &materials, &self.config);
        log::info!(
            "Assembled {} part(s) using {} material(s)",
            parts.len(),
            materials.len()
        );

        Ok(LoadedModel {
            parts,
            materials,
            material_libraries: libraries,
            diagnostics,
        })
    }
}
