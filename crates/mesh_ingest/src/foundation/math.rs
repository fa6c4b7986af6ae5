//! Math utilities and types
//!
//! Thin layer over nalgebra holding the handful of vector operations that
//! tangent generation needs, plus helpers for reading vectors out of flat
//! attribute arrays.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Lengths at or below this are treated as zero by [`normalize`].
pub const NORMALIZE_EPSILON: f32 = 0.00001;

/// Component-wise `a - b`
pub fn subtract(a: &Vec3, b: &Vec3) -> Vec3 {
    a - b
}

/// Right-handed cross product
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

/// Multiply every component by `factor`
pub fn scale(v: &Vec3, factor: f32) -> Vec3 {
    v * factor
}

/// Unit vector in the direction of `v`.
///
/// Returns `None` for vectors too short to have a meaningful direction
/// (including vectors containing NaN).
pub fn normalize(v: &Vec3) -> Option<Vec3> {
    let length = v.norm();
    if length.is_finite() && length > NORMALIZE_EPSILON {
        Some(v / length)
    } else {
        None
    }
}

/// Read the `index`-th 3-component vector out of a flat `[x, y, z, x, y, z, ...]` array
pub fn vec3_at(data: &[f32], index: usize) -> Option<Vec3> {
    let start = index.checked_mul(3)?;
    data.get(start..start + 3)
        .map(|v| Vec3::new(v[0], v[1], v[2]))
}

/// Read the `index`-th 2-component vector out of a flat `[u, v, u, v, ...]` array
pub fn vec2_at(data: &[f32], index: usize) -> Option<Vec2> {
    let start = index.checked_mul(2)?;
    data.get(start..start + 2)
        .map(|v| Vec2::new(v[0], v[1]))
}
