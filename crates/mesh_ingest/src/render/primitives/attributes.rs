//! Vertex attribute sets handed to the renderer
//!
//! Geometry leaves the ingestion pipeline as a flat, unindexed stream: every
//! triangle corner owns its own copy of each attribute. An attribute is either
//! a per-vertex buffer or a single constant value that the renderer applies to
//! every vertex (a disabled vertex attribute array with a fixed value, in GL
//! terms).

use bitflags::bitflags;

/// Texcoord used when a mesh has no `vt` data
pub const DEFAULT_TEXCOORD: [f32; 2] = [0.0, 0.0];

/// Normal used when a mesh has no `vn` data
pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 0.0, 1.0];

/// Tangent used when no tangent basis can be derived
pub const DEFAULT_TANGENT: [f32; 3] = [1.0, 0.0, 0.0];

/// RGBA color used when a mesh carries no usable vertex colors
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// RGB color for individual vertices that lack one inside a colored mesh
pub const DEFAULT_VERTEX_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

bitflags! {
    /// Set of attribute kinds, e.g. the kinds a segment carries real data for
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttributeMask: u8 {
        /// Vertex positions
        const POSITION = 1 << 0;
        /// Texture coordinates
        const TEXCOORD = 1 << 1;
        /// Vertex normals
        const NORMAL = 1 << 2;
        /// Vertex colors
        const COLOR = 1 << 3;
        /// Tangents for normal mapping
        const TANGENT = 1 << 4;
    }
}

/// The named attributes a render part exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// `position`, 3 components
    Position,
    /// `texcoord`, 2 components
    Texcoord,
    /// `normal`, 3 components
    Normal,
    /// `color`, 3 components per vertex (4 when constant)
    Color,
    /// `tangent`, 3 components
    Tangent,
}

impl AttributeKind {
    /// Every kind, in shader attribute order
    pub const ALL: [AttributeKind; 5] = [
        AttributeKind::Position,
        AttributeKind::Texcoord,
        AttributeKind::Normal,
        AttributeKind::Color,
        AttributeKind::Tangent,
    ];

    /// Attribute name as the shader sees it (without any prefix)
    pub const fn name(self) -> &'static str {
        match self {
            AttributeKind::Position => "position",
            AttributeKind::Texcoord => "texcoord",
            AttributeKind::Normal => "normal",
            AttributeKind::Color => "color",
            AttributeKind::Tangent => "tangent",
        }
    }

    /// Components per vertex in a buffer of this kind
    pub const fn components(self) -> usize {
        match self {
            AttributeKind::Texcoord => 2,
            _ => 3,
        }
    }

    /// Single-bit mask for this kind
    pub const fn mask(self) -> AttributeMask {
        match self {
            AttributeKind::Position => AttributeMask::POSITION,
            AttributeKind::Texcoord => AttributeMask::TEXCOORD,
            AttributeKind::Normal => AttributeMask::NORMAL,
            AttributeKind::Color => AttributeMask::COLOR,
            AttributeKind::Tangent => AttributeMask::TANGENT,
        }
    }
}

/// One vertex attribute: per-vertex data or a constant
#[derive(Debug, Clone, PartialEq)]
pub enum VertexAttribute {
    /// Flat per-vertex data, `components` floats per vertex
    Buffer {
        /// Flat float data
        data: Vec<f32>,
        /// Floats per vertex
        components: usize,
    },
    /// A single value applied to every vertex
    Constant(Vec<f32>),
}

impl VertexAttribute {
    /// Wrap flat per-vertex data
    pub fn per_vertex(data: Vec<f32>, components: usize) -> Self {
        VertexAttribute::Buffer { data, components }
    }

    /// A constant value for all vertices
    pub fn constant(value: &[f32]) -> Self {
        VertexAttribute::Constant(value.to_vec())
    }

    /// True for [`VertexAttribute::Constant`]
    pub fn is_constant(&self) -> bool {
        matches!(self, VertexAttribute::Constant(_))
    }

    /// Floats per vertex (the constant's length for constants)
    pub fn components(&self) -> usize {
        match self {
            VertexAttribute::Buffer { components, .. } => *components,
            VertexAttribute::Constant(value) => value.len(),
        }
    }

    /// Number of vertices in a buffer; `None` for constants
    pub fn vertex_count(&self) -> Option<usize> {
        match self {
            VertexAttribute::Buffer { data, components } if *components > 0 => {
                Some(data.len() / components)
            }
            VertexAttribute::Buffer { .. } => Some(0),
            VertexAttribute::Constant(_) => None,
        }
    }

    /// Value seen by vertex `index`. Constants answer for any index.
    pub fn value_at(&self, index: usize) -> Option<&[f32]> {
        match self {
            VertexAttribute::Buffer { data, components } => {
                let start = index.checked_mul(*components)?;
                data.get(start..start + components)
            }
            VertexAttribute::Constant(value) => Some(value.as_slice()),
        }
    }

    /// Raw bytes of the buffer or constant, native endian, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            VertexAttribute::Buffer { data, .. } => bytemuck::cast_slice(data),
            VertexAttribute::Constant(value) => bytemuck::cast_slice(value),
        }
    }
}

/// Finalized attributes for one render part
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSet {
    /// Always a per-vertex buffer
    pub position: VertexAttribute,
    /// Buffer, or constant `(0, 0)`
    pub texcoord: VertexAttribute,
    /// Buffer, or constant `(0, 0, 1)`
    pub normal: VertexAttribute,
    /// Buffer, or constant `(1, 1, 1, 1)`
    pub color: VertexAttribute,
    /// Buffer, or constant `(1, 0, 0)`
    pub tangent: VertexAttribute,
}

impl AttributeSet {
    /// Look up an attribute by kind
    pub fn get(&self, kind: AttributeKind) -> &VertexAttribute {
        match kind {
            AttributeKind::Position => &self.position,
            AttributeKind::Texcoord => &self.texcoord,
            AttributeKind::Normal => &self.normal,
            AttributeKind::Color => &self.color,
            AttributeKind::Tangent => &self.tangent,
        }
    }

    /// `(name, attribute)` pairs in shader attribute order
    pub fn attributes(&self) -> impl Iterator<Item = (&'static str, &VertexAttribute)> + '_ {
        AttributeKind::ALL
            .into_iter()
            .map(move |kind| (kind.name(), self.get(kind)))
    }

    /// Vertex count, taken from the position buffer
    pub fn vertex_count(&self) -> usize {
        self.position.vertex_count().unwrap_or(0)
    }

    /// Kinds backed by per-vertex buffers rather than constants
    pub fn buffer_mask(&self) -> AttributeMask {
        AttributeKind::ALL
            .into_iter()
            .filter(|kind| !self.get(*kind).is_constant())
            .fold(AttributeMask::empty(), |mask, kind| mask | kind.mask())
    }
}
