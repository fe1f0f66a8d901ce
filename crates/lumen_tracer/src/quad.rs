//! Quadrilateral made of two triangles sharing the v0-v2 diagonal.

use crate::hit::{nearest_hit, Hit, Intersect};
use crate::Triangle;
use lumen_math::{Point, Ray};

/// A planar quad split into (v0, v1, v2) and (v2, v3, v0).
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    triangles: [Triangle; 2],
}

impl Quad {
    /// Create a quad from four (ideally coplanar) corners in winding order.
    pub fn new(v0: Point, v1: Point, v2: Point, v3: Point) -> Self {
        Self {
            triangles: [Triangle::new(v0, v1, v2), Triangle::new(v2, v3, v0)],
        }
    }

    /// The two triangles forming this quad.
    pub fn triangles(&self) -> &[Triangle; 2] {
        &self.triangles
    }
}

impl Intersect for Quad {
    fn intersect(&self, ray: &Ray) -> Hit {
        nearest_hit(&self.triangles, ray)
    }
}
