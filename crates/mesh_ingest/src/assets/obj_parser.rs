//! OBJ (Wavefront geometry) text parser
//!
//! Turns `.obj` text into a list of [`GeometrySegment`]s holding flat,
//! unindexed attribute arrays. Faces are fan-triangulated and every
//! triangle corner gets its own copy of its position/texcoord/normal/color,
//! so no vertex sharing survives parsing.
//!
//! Parsing never fails. Unknown directives, malformed numbers and bad face
//! indices are reported as [`Diagnostic`]s and the parser carries on.

use crate::assets::diagnostics::{Diagnostic, Diagnostics, IndexKind};
use crate::render::primitives::attributes::{
    AttributeMask, DEFAULT_NORMAL, DEFAULT_TEXCOORD, DEFAULT_VERTEX_COLOR,
};

/// Name used for object, group and material until the file sets one
pub const DEFAULT_NAME: &str = "default";

/// A contiguous run of faces sharing one object/group/material association
#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySegment {
    /// Object name from the last `o` directive
    pub object: String,
    /// Group names from the last `g` directive
    pub groups: Vec<String>,
    /// Material name from the last `usemtl` directive
    pub material: String,
    /// Flat positions, 3 floats per vertex
    pub position: Vec<f32>,
    /// Flat texcoords, 2 floats per vertex; `None` when no face referenced one
    pub texcoord: Option<Vec<f32>>,
    /// Flat normals, 3 floats per vertex; `None` when no face referenced one
    pub normal: Option<Vec<f32>>,
    /// Flat RGB vertex colors, 3 floats per vertex; `None` when the file has no colored vertices
    pub color: Option<Vec<f32>>,
}

impl GeometrySegment {
    /// Number of vertices (triangle corners) in the segment
    pub fn vertex_count(&self) -> usize {
        self.position.len() / 3
    }

    /// Number of triangles in the segment
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    /// Attribute kinds this segment carries data for
    pub fn present_attributes(&self) -> AttributeMask {
        let mut mask = AttributeMask::POSITION;
        mask.set(AttributeMask::TEXCOORD, self.texcoord.is_some());
        mask.set(AttributeMask::NORMAL, self.normal.is_some());
        mask.set(AttributeMask::COLOR, self.color.is_some());
        mask
    }
}

/// Result of parsing one OBJ file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedScene {
    /// Segments in the order their first face appeared
    pub geometries: Vec<GeometrySegment>,
    /// `mtllib` entries in file order
    pub material_libraries: Vec<String>,
    /// Recoverable problems met while parsing
    pub diagnostics: Vec<Diagnostic>,
}

/// The closed set of OBJ directives the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive<'a> {
    Position,
    Texcoord,
    Normal,
    Face,
    UseMaterial,
    Group,
    Object,
    MaterialLibrary,
    Smoothing,
    Unknown(&'a str),
}

impl<'a> Directive<'a> {
    fn from_keyword(keyword: &'a str) -> Self {
        match keyword {
            "v" => Directive::Position,
            "vt" => Directive::Texcoord,
            "vn" => Directive::Normal,
            "f" => Directive::Face,
            "usemtl" => Directive::UseMaterial,
            "g" => Directive::Group,
            "o" => Directive::Object,
            "mtllib" => Directive::MaterialLibrary,
            "s" => Directive::Smoothing,
            other => Directive::Unknown(other),
        }
    }
}

/// Split a trimmed line into its keyword and the trimmed remainder
pub(crate) fn split_directive(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    }
}

/// Resolve a raw OBJ index against a table of `len` entries (seed included).
///
/// Tables keep a dummy entry at slot 0, so a positive index is used as is and
/// a negative one counts back from the current end: `-1` is the last entry
/// pushed so far. Zero, and anything landing on the seed or past the end,
/// does not resolve.
pub fn resolve_index(raw: i64, len: usize) -> Option<usize> {
    let resolved = if raw >= 0 {
        usize::try_from(raw).ok()?
    } else {
        let back = usize::try_from(raw.unsigned_abs()).ok()?;
        len.checked_sub(back)?
    };
    (resolved >= 1 && resolved < len).then_some(resolved)
}

/// Vertex tables indexed by OBJ face references, each seeded at slot 0
#[derive(Debug)]
struct VertexTables {
    positions: Vec<[f32; 3]>,
    texcoords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    /// Parallel to `positions`: the color given on the same `v` line, if any
    colors: Vec<Option<[f32; 3]>>,
    has_colors: bool,
}

impl VertexTables {
    fn new() -> Self {
        Self {
            positions: vec![[0.0; 3]],
            texcoords: vec![[0.0; 2]],
            normals: vec![[0.0; 3]],
            colors: vec![None],
            has_colors: false,
        }
    }
}

/// One face-vertex token with its indices resolved against the tables
#[derive(Debug, Clone, Copy)]
struct FaceVertex {
    position: Option<usize>,
    texcoord: Option<usize>,
    normal: Option<usize>,
}

/// Segment under construction; arrays stay equal in vertex count
#[derive(Debug)]
struct SegmentBuilder {
    object: String,
    groups: Vec<String>,
    material: String,
    position: Vec<f32>,
    texcoord: Vec<f32>,
    normal: Vec<f32>,
    color: Vec<f32>,
    vertex_count: usize,
}

impl SegmentBuilder {
    fn new(object: &str, groups: &[String], material: &str) -> Self {
        Self {
            object: object.to_string(),
            groups: groups.to_vec(),
            material: material.to_string(),
            position: Vec::new(),
            texcoord: Vec::new(),
            normal: Vec::new(),
            color: Vec::new(),
            vertex_count: 0,
        }
    }

    fn push_vertex(
        &mut self,
        position: [f32; 3],
        texcoord: Option<[f32; 2]>,
        normal: Option<[f32; 3]>,
        color: Option<[f32; 3]>,
    ) {
        self.position.extend_from_slice(&position);
        push_optional(&mut self.texcoord, texcoord, DEFAULT_TEXCOORD, self.vertex_count);
        push_optional(&mut self.normal, normal, DEFAULT_NORMAL, self.vertex_count);
        push_optional(&mut self.color, color, DEFAULT_VERTEX_COLOR, self.vertex_count);
        self.vertex_count += 1;
    }

    fn finish(self) -> GeometrySegment {
        let non_empty = |data: Vec<f32>| (!data.is_empty()).then_some(data);
        GeometrySegment {
            object: self.object,
            groups: self.groups,
            material: self.material,
            position: self.position,
            texcoord: non_empty(self.texcoord),
            normal: non_empty(self.normal),
            color: non_empty(self.color),
        }
    }
}

/// Append an optional attribute value for the vertex at `vertex_index`.
///
/// The first real value back-fills earlier vertices with `fallback`; once an
/// attribute is present, vertices without a value get `fallback` too.
fn push_optional<const N: usize>(
    data: &mut Vec<f32>,
    value: Option<[f32; N]>,
    fallback: [f32; N],
    vertex_index: usize,
) {
    match value {
        Some(value) => {
            while data.len() < vertex_index * N {
                data.extend_from_slice(&fallback);
            }
            data.extend_from_slice(&value);
        }
        None if !data.is_empty() => data.extend_from_slice(&fallback),
        None => {}
    }
}

/// Line-oriented OBJ parser.
///
/// All state lives in the parser value and is dropped when [`ObjParser::parse`]
/// returns, so independent inputs can be parsed concurrently.
#[derive(Debug)]
pub struct ObjParser {
    tables: VertexTables,
    object: String,
    groups: Vec<String>,
    material: String,
    current: Option<SegmentBuilder>,
    geometries: Vec<GeometrySegment>,
    material_libraries: Vec<String>,
    diagnostics: Diagnostics,
}

impl ObjParser {
    /// Parse OBJ text into geometry segments and material library names
    ///
    /// # Example
    /// ```
    /// use mesh_ingest::assets::ObjParser;
    ///
    /// let scene = ObjParser::parse("v -1 -1 0\nv 1 -1 0\nv 0 1 0\nf 1 2 3");
    /// assert_eq!(scene.geometries.len(), 1);
    /// assert_eq!(scene.geometries[0].vertex_count(), 3);
    /// ```
    pub fn parse(text: &str) -> ParsedScene {
        let mut parser = Self::new();
        for (line_index, line) in text.lines().enumerate() {
            parser.parse_line(line_index + 1, line);
        }
        parser.finish()
    }

    fn new() -> Self {
        Self {
            tables: VertexTables::new(),
            object: DEFAULT_NAME.to_string(),
            groups: vec![DEFAULT_NAME.to_string()],
            material: DEFAULT_NAME.to_string(),
            current: None,
            geometries: Vec::new(),
            material_libraries: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn parse_line(&mut self, line_number: usize, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        let (keyword, rest) = split_directive(line);
        match Directive::from_keyword(keyword) {
            Directive::Position => self.parse_position(line_number, rest),
            Directive::Texcoord => {
                let mut fields = rest.split_whitespace();
                let u = self.diagnostics.parse_f32(fields.next(), line_number, "vt");
                let v = self.diagnostics.parse_f32(fields.next(), line_number, "vt");
                self.tables.texcoords.push([u, v]);
            }
            Directive::Normal => {
                let normal = self.parse_vec3(&mut rest.split_whitespace(), line_number, "vn");
                self.tables.normals.push(normal);
            }
            Directive::Face => self.parse_face(line_number, rest),
            Directive::UseMaterial => {
                self.material = rest.to_string();
                self.close_segment();
            }
            Directive::Group => {
                self.groups = rest.split_whitespace().map(str::to_string).collect();
                self.close_segment();
            }
            Directive::Object => {
                self.object = rest.to_string();
                self.close_segment();
            }
            Directive::MaterialLibrary => {
                if !rest.is_empty() {
                    self.material_libraries.push(rest.to_string());
                }
            }
            Directive::Smoothing => {}
            Directive::Unknown(keyword) => {
                self.diagnostics.report(Diagnostic::UnknownDirective {
                    line: line_number,
                    keyword: keyword.to_string(),
                });
            }
        }
    }

    fn parse_vec3<'a>(
        &mut self,
        fields: &mut impl Iterator<Item = &'a str>,
        line_number: usize,
        keyword: &str,
    ) -> [f32; 3] {
        let x = self.diagnostics.parse_f32(fields.next(), line_number, keyword);
        let y = self.diagnostics.parse_f32(fields.next(), line_number, keyword);
        let z = self.diagnostics.parse_f32(fields.next(), line_number, keyword);
        [x, y, z]
    }

    /// `v x y z [r g b]`: exactly three extra fields are a vertex color.
    /// Any other extras (such as a homogeneous `w`) are ignored.
    fn parse_position(&mut self, line_number: usize, rest: &str) {
        let mut fields = rest.split_whitespace();
        let position = self.parse_vec3(&mut fields, line_number, "v");

        let extra: Vec<&str> = fields.collect();
        let color = if extra.len() == 3 {
            self.tables.has_colors = true;
            Some(self.parse_vec3(&mut extra.into_iter(), line_number, "v"))
        } else {
            None
        };

        self.tables.positions.push(position);
        self.tables.colors.push(color);
    }

    fn parse_face(&mut self, line_number: usize, rest: &str) {
        let vertices: Vec<FaceVertex> = rest
            .split_whitespace()
            .map(|token| self.resolve_face_vertex(line_number, token))
            .collect();

        if vertices.len() < 3 {
            self.diagnostics.report(Diagnostic::DegenerateFace {
                line: line_number,
                vertex_count: vertices.len(),
            });
            return;
        }

        // Fan around the first vertex: (0, i, i + 1)
        for i in 1..vertices.len() - 1 {
            for vertex in [vertices[0], vertices[i], vertices[i + 1]] {
                self.emit_vertex(vertex);
            }
        }
    }

    /// Resolve a `p[/t][/n]` token. Each index resolves against its own table.
    fn resolve_face_vertex(&mut self, line_number: usize, token: &str) -> FaceVertex {
        let mut fields = token.split('/');
        let mut next_index = |kind: IndexKind, len: usize, diagnostics: &mut Diagnostics| {
            let raw = fields.next().filter(|field| !field.is_empty())?;
            let Ok(parsed) = raw.parse::<i64>() else {
                diagnostics.report(Diagnostic::MalformedNumber {
                    line: line_number,
                    keyword: "f".to_string(),
                    token: raw.to_string(),
                });
                return None;
            };
            let resolved = resolve_index(parsed, len);
            if resolved.is_none() {
                diagnostics.report(Diagnostic::IndexOutOfRange {
                    line: line_number,
                    kind,
                    index: raw.to_string(),
                });
            }
            resolved
        };

        let position = next_index(IndexKind::Position, self.tables.positions.len(), &mut self.diagnostics);
        let texcoord = next_index(IndexKind::Texcoord, self.tables.texcoords.len(), &mut self.diagnostics);
        let normal = next_index(IndexKind::Normal, self.tables.normals.len(), &mut self.diagnostics);

        FaceVertex { position, texcoord, normal }
    }

    fn emit_vertex(&mut self, vertex: FaceVertex) {
        // Unresolvable positions fall back to the seed entry
        let position_index = vertex.position.unwrap_or(0);
        let position = self.tables.positions[position_index];
        let texcoord = vertex.texcoord.map(|index| self.tables.texcoords[index]);
        let normal = vertex.normal.map(|index| self.tables.normals[index]);
        let color = self
            .tables
            .has_colors
            .then(|| self.tables.colors[position_index].unwrap_or(DEFAULT_VERTEX_COLOR));

        let segment = self.current.get_or_insert_with(|| {
            SegmentBuilder::new(&self.object, &self.groups, &self.material)
        });
        segment.push_vertex(position, texcoord, normal, color);
    }

    fn close_segment(&mut self) {
        if let Some(segment) = self.current.take() {
            self.geometries.push(segment.finish());
        }
    }

    fn finish(mut self) -> ParsedScene {
        self.close_segment();
        log::debug!(
            "Parsed OBJ: {} segment(s), {} position(s), {} diagnostic(s)",
            self.geometries.len(),
            self.tables.positions.len() - 1,
            self.diagnostics.len()
        );
        ParsedScene {
            geometries: self.geometries,
            material_libraries: self.material_libraries,
            diagnostics: self.diagnostics.into_vec(),
        }
    }
}
