//! Finite open cylinder primitive.
//!
//! The tube is solved as an infinite cylinder in the xy projection around
//! the base position, then clipped to the z extent spanned by the base and
//! `base + direction`.

use crate::hit::{Hit, Intersect, HIT_EPSILON};
use lumen_math::{Interval, Point, Ray, Vector};

/// A finite cylinder without end caps.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    position: Point,
    direction: Vector,
    radius: f64,
    z_extent: Interval,
}

impl Cylinder {
    /// Create a cylinder with base `position`, axis `direction` (whose z
    /// component gives the length) and `radius`.
    pub fn new(position: Point, direction: Vector, radius: f64) -> Self {
        let z_extent = Interval::spanning(position.z, position.z + direction.z);
        Self {
            position,
            direction,
            radius,
            z_extent,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The z range the tube is clipped to.
    pub fn z_extent(&self) -> Interval {
        self.z_extent
    }
}

impl Intersect for Cylinder {
    fn intersect(&self, ray: &Ray) -> Hit {
        let d = ray.direction();
        let oc = ray.origin() - self.position;

        let a = d.x * d.x + d.y * d.y;
        // Ray runs along the axis: never crosses the tube wall
        if a < f64::EPSILON {
            return Hit::NO_HIT;
        }

        let b = 2.0 * (oc.x * d.x + oc.y * d.y);
        let c = oc.x * oc.x + oc.y * oc.y - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Hit::NO_HIT;
        }

        let sqrtd = discriminant.sqrt();
        let roots = [(-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)];

        let Some(t) = roots.into_iter().find(|&t| {
            t > HIT_EPSILON && self.z_extent.surrounds(ray.origin().z + t * d.z)
        }) else {
            return Hit::NO_HIT;
        };

        let p = ray.at(t);
        let radial = Vector::new(p.x - self.position.x, p.y - self.position.y, 0.0);
        let Some(normal) = radial.try_normalize() else {
            return Hit::NO_HIT;
        };

        // Normal: directed towards ray origin
        let normal = if normal.dot(d) < 0.0 { normal } else { -normal };
        Hit::new(t, normal)
    }
}
