//! Asset ingestion: OBJ geometry, MTL materials and the loader tying them together

pub mod diagnostics;
pub mod obj_parser;
pub mod materials;
pub mod model_loader;

pub use diagnostics::{Diagnostic, Diagnostics, IndexKind};
pub use obj_parser::{GeometrySegment, ObjParser, ParsedScene};
pub use materials::{Material, MtlError, MtlParser, TextureRef};
pub use model_loader::{LoadedModel, ModelLoader};

#[cfg(test)]
mod test_model_loading;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// A material library was supplied but could not be parsed
    #[error("Material library '{library}' failed to parse: {source}")]
    MaterialLibrary {
        /// Library name as listed in the OBJ file
        library: String,
        /// Underlying parse failure
        #[source]
        source: MtlError,
    },
}
