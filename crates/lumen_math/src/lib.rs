// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
mod transform;

pub use interval::Interval;
pub use ray::Ray;
pub use transform::Transform;

/// A position in world space.
pub type Point = DVec3;

/// A direction or displacement in world space.
pub type Vector = DVec3;

/// An RGB intensity triple. Unbounded until clamped for output.
pub type Color = DVec3;

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vector, n: Vector) -> Vector {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit direction `d` through a surface with unit normal `n`.
///
/// `n` must face the side `d` arrives from (`d · n <= 0`). `ni` is the index
/// of refraction on that side and `nt` the index on the far side. Returns
/// `None` on total internal reflection.
#[inline]
pub fn refract(d: Vector, n: Vector, ni: f64, nt: f64) -> Option<Vector> {
    let ratio = ni / nt;
    let cos_i = (-d.dot(n)).min(1.0);
    let k = 1.0 - ratio * ratio * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some((ratio * d + (ratio * cos_i - k.sqrt()) * n).normalize())
}
