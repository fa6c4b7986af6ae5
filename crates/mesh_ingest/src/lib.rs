//! # Mesh Ingest
//!
//! Turns Wavefront `.obj` geometry and `.mtl` material text into render-ready
//! vertex attribute sets and merged materials.
//!
//! ## Pipeline
//!
//! - [`assets::ObjParser`] parses OBJ text into geometry segments
//! - [`assets::MtlParser`] parses MTL text into named materials
//! - [`render::assemble_parts`] fills missing attributes, generates tangents
//!   and merges materials over the default
//! - [`assets::ModelLoader`] runs all three, fetching libraries via a closure
//!
//! The core does no I/O and keeps no global state.
//!
//! ## Quick Start
//!
//! ```rust
//! use mesh_ingest::prelude::*;
//!
//! let obj = "mtllib cube.mtl\nv -1 -1 0\nv 1 -1 0\nv 0 1 0\nusemtl Red\nf 1 2 3";
//! let loader = ModelLoader::new(AssemblyConfig::default());
//! let model = loader
//!     .load(obj, |name| (name == "cube.mtl").then(|| "newmtl Red\nKd 1 0 0".to_string()))
//!     .unwrap();
//!
//! assert_eq!(model.parts.len(), 1);
//! assert_eq!(model.parts[0].geometry.vertex_count(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod render;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        assets::{
            AssetError, Diagnostic, GeometrySegment, LoadedModel, Material, ModelLoader,
            MtlError, MtlParser, ObjParser, ParsedScene, TextureRef,
        },
        config::{Config, ConfigError, IngestConfig},
        render::{
            assemble_parts, AssemblyConfig, AttributeKind, AttributeSet, RenderPart,
            VertexAttribute,
        },
        render::primitives::generate_tangents,
    };
}
