//! Per-triangle tangent generation for normal mapping
//!
//! Each triangle gets one tangent, aligned with increasing texture U and
//! written once per corner. Tangents are not averaged across neighbouring
//! faces.

use crate::foundation::math::{normalize, scale, subtract, vec2_at, vec3_at, Vec3};
use crate::render::primitives::attributes::DEFAULT_TANGENT;

/// Generate a flat tangent stream for a triangle list.
///
/// * `positions` - flat `xyz` per vertex
/// * `texcoords` - flat `uv` per vertex
/// * `indices` - triangle corners in groups of three; when `None`, every three
///   consecutive vertices form a triangle
///
/// Returns three floats per triangle corner: `positions.len()` floats in
/// unindexed mode, `3 * indices.len()` in indexed mode. Triangles whose UV
/// area is zero (or whose data is missing or non-finite) get `(1, 0, 0)`.
pub fn generate_tangents(positions: &[f32], texcoords: &[f32], indices: Option<&[u32]>) -> Vec<f32> {
    match indices {
        Some(indices) => {
            let mut tangents = Vec::with_capacity(indices.len() * 3);
            let corners = indices.iter().map(|&index| index as usize);
            emit_triangles(corners, indices.len(), positions, texcoords, &mut tangents);
            tangents
        }
        None => {
            let vertex_count = positions.len() / 3;
            let mut tangents = Vec::with_capacity(positions.len());
            emit_triangles(0..vertex_count, vertex_count, positions, texcoords, &mut tangents);
            // Trailing floats that do not form a whole position
            tangents.resize(positions.len(), 0.0);
            tangents
        }
    }
}

fn emit_triangles(
    mut corners: impl Iterator<Item = usize>,
    corner_count: usize,
    positions: &[f32],
    texcoords: &[f32],
    tangents: &mut Vec<f32>,
) {
    for _ in 0..corner_count / 3 {
        let (Some(n1), Some(n2), Some(n3)) = (corners.next(), corners.next(), corners.next()) else {
            break;
        };
        let tangent = triangle_tangent(positions, texcoords, [n1, n2, n3]).unwrap_or_else(|| {
            Vec3::new(DEFAULT_TANGENT[0], DEFAULT_TANGENT[1], DEFAULT_TANGENT[2])
        });
        for _ in 0..3 {
            tangents.extend_from_slice(tangent.as_slice());
        }
    }

    // Corners that do not complete a triangle still get a tangent each
    for _ in 0..corner_count % 3 {
        tangents.extend_from_slice(&DEFAULT_TANGENT);
    }
}

/// Tangent of one triangle, or `None` when the UV basis is degenerate
pub fn triangle_tangent(positions: &[f32], texcoords: &[f32], corners: [usize; 3]) -> Option<Vec3> {
    let [n1, n2, n3] = corners;
    let p1 = vec3_at(positions, n1)?;
    let p2 = vec3_at(positions, n2)?;
    let p3 = vec3_at(positions, n3)?;
    let uv1 = vec2_at(texcoords, n1)?;
    let uv2 = vec2_at(texcoords, n2)?;
    let uv3 = vec2_at(texcoords, n3)?;

    let dp12 = subtract(&p2, &p1);
    let dp13 = subtract(&p3, &p1);
    let duv12 = uv2 - uv1;
    let duv13 = uv3 - uv1;

    let f = 1.0 / (duv12.x * duv13.y - duv13.x * duv12.y);
    if !f.is_finite() {
        return None;
    }

    let direction = subtract(&scale(&dp12, duv13.y), &scale(&dp13, duv12.y));
    normalize(&scale(&direction, f))
}
