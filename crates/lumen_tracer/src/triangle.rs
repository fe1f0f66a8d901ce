//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::hit::{Hit, Intersect, HIT_EPSILON};
use lumen_math::{Interval, Point, Ray, Vector};

/// A triangle primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    /// Vertices
    v0: Point,
    v1: Point,
    v2: Point,
    /// Pre-computed edges from v0
    edge1: Vector,
    edge2: Vector,
    /// Pre-computed face normal (unit length, zero if degenerate)
    normal: Vector,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    pub fn new(v0: Point, v1: Point, v2: Point) -> Self {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let normal = edge1.cross(edge2).normalize_or_zero();

        Self {
            v0,
            v1,
            v2,
            edge1,
            edge2,
            normal,
        }
    }

    /// The vertices in construction order.
    pub fn vertices(&self) -> [Point; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Face normal following the right-hand rule over (v0, v1, v2).
    pub fn normal(&self) -> Vector {
        self.normal
    }

    /// True if the vertices are collinear (zero area).
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector::ZERO
    }
}

impl Intersect for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn intersect(&self, ray: &Ray) -> Hit {
        let h = ray.direction().cross(self.edge2);
        let det = self.edge1.dot(h);

        // Ray is parallel to triangle
        if det.abs() < f64::EPSILON {
            return Hit::NO_HIT;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin() - self.v0;
        let u = inv_det * s.dot(h);

        if !Interval::UNIT.contains(u) {
            return Hit::NO_HIT;
        }

        let q = s.cross(self.edge1);
        let v = inv_det * ray.direction().dot(q);

        if v < 0.0 || u + v > 1.0 {
            return Hit::NO_HIT;
        }

        let t = inv_det * self.edge2.dot(q);
        if t <= HIT_EPSILON {
            return Hit::NO_HIT;
        }

        // Report the normal facing the incoming ray
        let normal = if self.normal.dot(ray.direction()) < 0.0 {
            self.normal
        } else {
            -self.normal
        };

        Hit::new(t, normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xy_triangle() -> Triangle {
        // Triangle in XY plane at z=-1, normal +Z
        Triangle::new(
            Point::new(-1.0, -1.0, -1.0),
            Point::new(1.0, -1.0, -1.0),
            Point::new(0.0, 1.0, -1.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let tri = xy_triangle();
        let ray = Ray::new(Point::ZERO, Vector::new(0.0, 0.0, -1.0));

        let hit = tri.intersect(&ray);
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert_eq!(hit.normal, Vector::Z);
    }

    #[test]
    fn test_triangle_normal_faces_ray_from_behind() {
        let tri = xy_triangle();
        let ray = Ray::new(Point::new(0.0, 0.0, -3.0), Vector::Z);

        let hit = tri.intersect(&ray);
        assert!((hit.t - 2.0).abs() < 1e-12);
        assert_eq!(hit.normal, -Vector::Z);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = xy_triangle();

        // Ray pointing away
        let ray = Ray::new(Point::ZERO, Vector::Z);
        assert!(!tri.intersect(&ray).is_hit());

        // Ray passing beside the triangle
        let ray = Ray::new(Point::new(5.0, 0.0, 0.0), -Vector::Z);
        assert!(!tri.intersect(&ray).is_hit());
    }

    #[test]
    fn test_triangle_parallel_ray() {
        let tri = xy_triangle();
        let ray = Ray::new(Point::new(-5.0, 0.0, -1.0), Vector::X);

        let hit = tri.intersect(&ray);
        assert_eq!(hit, Hit::NO_HIT);
    }

    #[test]
    fn test_degenerate_triangle_never_hits() {
        let tri = Triangle::new(Point::ZERO, Point::X, Point::new(2.0, 0.0, 0.0));
        assert!(tri.is_degenerate());

        let ray = Ray::new(Point::new(0.5, 0.0, 1.0), -Vector::Z);
        assert_eq!(tri.intersect(&ray), Hit::NO_HIT);
    }

    #[test]
    fn test_triangle_origin_on_surface_is_ignored() {
        let tri = xy_triangle();
        let ray = Ray::new(Point::new(0.0, 0.0, -1.0), -Vector::Z);
        assert!(!tri.intersect(&ray).is_hit());
    }
}
