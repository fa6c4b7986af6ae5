//! Render-side data: attribute sets, tangents and part assembly
//!
//! Nothing here talks to a graphics API; parts are plain data for whatever
//! renderer uploads them.

pub mod primitives;
pub mod assembly;

pub use assembly::{assemble_parts, AssemblyConfig, RenderPart};
pub use primitives::{AttributeKind, AttributeSet, VertexAttribute};
