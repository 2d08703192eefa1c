//! Math type re-exports.
//!
//! All vector and matrix outputs of the loader are `glam` types.

pub use glam::{Mat4, Quat, UVec4, Vec2, Vec3, Vec4};

/// Axis-aligned bounds of a point set, `None` when the set is empty.
pub fn point_bounds(points: &[Vec3]) -> Option<(Vec3, Vec3)> {
    let (first, rest) = points.split_first()?;
    let mut min = *first;
    let mut max = *first;
    for &p in rest {
        min = min.min(p);
        max = max.max(p);
    }
    Some((min, max))
}
