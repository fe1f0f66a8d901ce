//! Hit record and the intersection trait shared by every primitive.

use lumen_math::{Ray, Vector};

/// Smallest accepted ray parameter. Intersections closer to the ray origin
/// are treated as self-intersections and ignored.
pub const HIT_EPSILON: f64 = 1e-9;

/// Result of a ray-object intersection test.
///
/// A miss is the sentinel `Hit::NO_HIT` with `t = +inf`; always check
/// `is_hit()` before using the normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Distance along the (unit-length) ray
    pub t: f64,
    /// Unit surface normal at the hit point
    pub normal: Vector,
}

impl Hit {
    /// The no-intersection sentinel.
    pub const NO_HIT: Hit = Hit {
        t: f64::INFINITY,
        normal: Vector::ZERO,
    };

    /// Create a new hit.
    #[inline]
    pub fn new(t: f64, normal: Vector) -> Self {
        Self { t, normal }
    }

    /// Whether this record describes an actual intersection.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.t.is_finite()
    }

    /// The closer of two hits. Ties keep `self`.
    #[inline]
    pub fn nearest(self, other: Hit) -> Hit {
        if other.t < self.t {
            other
        } else {
            self
        }
    }
}

impl Default for Hit {
    fn default() -> Self {
        Self::NO_HIT
    }
}

/// Trait for geometry that can be hit by rays.
pub trait Intersect: Send + Sync {
    /// Intersect `ray` with this surface.
    ///
    /// Returns `Hit::NO_HIT` unless the ray meets the surface at
    /// `t > HIT_EPSILON`. Degenerate configurations (parallel rays,
    /// zero determinants) are misses, never NaN.
    fn intersect(&self, ray: &Ray) -> Hit;
}

/// Nearest hit over a sequence of surfaces, first seen wins on exact ties.
pub(crate) fn nearest_hit<'a, T, I>(items: I, ray: &Ray) -> Hit
where
    T: Intersect + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .fold(Hit::NO_HIT, |best, item| best.nearest(item.intersect(ray)))
}
