//! Assembly of parsed geometry and materials into render parts
//!
//! Each [`GeometrySegment`] becomes one [`RenderPart`]: missing attributes are
//! replaced by constants, tangents are generated when the segment has both
//! texcoords and normals, and the segment's material is merged over the
//! default material.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::assets::materials::Material;
use crate::assets::obj_parser::GeometrySegment;
use crate::render::primitives::attributes::{
    AttributeKind, AttributeSet, VertexAttribute, DEFAULT_COLOR, DEFAULT_NORMAL,
    DEFAULT_TANGENT, DEFAULT_TEXCOORD,
};
use crate::render::primitives::tangents::generate_tangents;

/// Settings for turning segments into render parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Base every part's material is merged over
    pub default_material: Material,
    /// Fields forced onto every material found in the libraries, e.g.
    /// `shininess = 25, specular = (3, 2, 1)` to inspect specular maps
    pub material_override: Option<Material>,
    /// When false, tangents are always the constant `(1, 0, 0)`
    pub generate_tangents: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            default_material: Material::fallback(),
            material_override: None,
            generate_tangents: true,
        }
    }
}

/// One drawable piece: finalized attributes plus a fully merged material
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPart {
    /// Name the segment asked for with `usemtl`
    pub material_name: String,
    /// Object the segment belongs to
    pub object: String,
    /// Groups the segment belongs to
    pub groups: Vec<String>,
    /// Material after merging over the default
    pub material: Material,
    /// Render-ready attributes
    pub geometry: AttributeSet,
}

/// Build the attribute set for one segment
pub fn finalize_attributes(segment: GeometrySegment, generate: bool) -> AttributeSet {
    let vertex_count = segment.vertex_count();

    let color = match segment.color {
        Some(color) if color.len() == segment.position.len() => {
            VertexAttribute::per_vertex(color, AttributeKind::Color.components())
        }
        Some(color) => {
            log::debug!(
                "Ignoring vertex colors: {} values for {} vertices",
                color.len(),
                vertex_count
            );
            VertexAttribute::constant(&DEFAULT_COLOR)
        }
        None => VertexAttribute::constant(&DEFAULT_COLOR),
    };

    let tangent = match (&segment.texcoord, &segment.normal) {
        (Some(texcoord), Some(_)) if generate => VertexAttribute::per_vertex(
            generate_tangents(&segment.position, texcoord, None),
            AttributeKind::Tangent.components(),
        ),
        _ => VertexAttribute::constant(&DEFAULT_TANGENT),
    };

    let texcoord = segment.texcoord.map_or_else(
        || VertexAttribute::constant(&DEFAULT_TEXCOORD),
        |data| VertexAttribute::per_vertex(data, AttributeKind::Texcoord.components()),
    );
    let normal = segment.normal.map_or_else(
        || VertexAttribute::constant(&DEFAULT_NORMAL),
        |data| VertexAttribute::per_vertex(data, AttributeKind::Normal.components()),
    );

    AttributeSet {
        position: VertexAttribute::per_vertex(segment.position, AttributeKind::Position.components()),
        texcoord,
        normal,
        color,
        tangent,
    }
}

/// Resolve a material name against the parsed libraries and merge it over
/// the configured default
pub fn resolve_material(
    name: &str,
    materials: &HashMap<String, Material>,
    config: &AssemblyConfig,
) -> Material {
    match materials.get(name) {
        Some(found) => {
            let found = match &config.material_override {
                Some(forced) => forced.merged_over(found),
                None => found.clone(),
            };
            found.merged_over(&config.default_material)
        }
        None => {
            log::debug!("Material '{}' not found, using default material", name);
            config.default_material.clone()
        }
    }
}

/// Turn parsed segments into render parts, preserving segment order
pub fn assemble_parts(
    geometries: impl IntoIterator<Item = GeometrySegment>,
    materials: &HashMap<String, Material>,
    config: &AssemblyConfig,
) -> Vec<RenderPart> {
    geometries
        .into_iter()
        .map(|segment| {
            let material = resolve_material(&segment.material, materials, config);
            let material_name = segment.material.clone();
            let object = segment.object.clone();
            let groups = segment.groups.clone();
            RenderPart {
                material_name,
                object,
                groups,
                material,
                geometry: finalize_attributes(segment, config.generate_tangents),
            }
        })
        .collect()
}
