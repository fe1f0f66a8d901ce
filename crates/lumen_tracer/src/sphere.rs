//! Sphere primitive for ray tracing.

use crate::hit::{Hit, Intersect, HIT_EPSILON};
use lumen_math::{Point, Ray};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersect for Sphere {
    /// Solves |O + tD - C|^2 = r^2 and keeps the smallest root beyond epsilon.
    fn intersect(&self, ray: &Ray) -> Hit {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        if a < f64::EPSILON {
            return Hit::NO_HIT;
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Hit::NO_HIT;
        }

        let sqrtd = discriminant.sqrt();
        let near = (-b - sqrtd) / (2.0 * a);
        let far = (-b + sqrtd) / (2.0 * a);

        // Find the nearest root in front of the ray
        let t = if near > HIT_EPSILON {
            near
        } else if far > HIT_EPSILON {
            far
        } else {
            return Hit::NO_HIT;
        };

        let normal = (ray.at(t) - self.center).normalize();
        Hit::new(t, normal)
    }
}
