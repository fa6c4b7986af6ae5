//! Vertex attribute primitives and tangent generation

pub mod attributes;
pub mod tangents;

pub use attributes::{AttributeKind, AttributeMask, AttributeSet, VertexAttribute};
pub use tangents::generate_tangents;
