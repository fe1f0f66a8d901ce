//! Scene objects: a shape paired with its material.

use crate::hit::{Hit, Intersect};
use crate::{Cylinder, Material, Mesh, Quad, SceneError, SceneResult, Sphere, Triangle};
use lumen_math::Ray;

/// Closed set of supported geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Triangle(Triangle),
    Quad(Quad),
    Cylinder(Cylinder),
    Mesh(Mesh),
}

impl Shape {
    /// Short lowercase name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Sphere(_) => "sphere",
            Shape::Triangle(_) => "triangle",
            Shape::Quad(_) => "quad",
            Shape::Cylinder(_) => "cylinder",
            Shape::Mesh(_) => "mesh",
        }
    }

    /// Reject geometry whose intersection math would not be well defined.
    pub fn validate(&self) -> SceneResult<()> {
        let invalid = |reason: String| SceneError::InvalidGeometry {
            shape: self.kind(),
            reason,
        };

        match self {
            Shape::Sphere(sphere) => {
                if !sphere.center().is_finite() {
                    return Err(invalid("center is not finite".into()));
                }
                if !(sphere.radius() > 0.0 && sphere.radius().is_finite()) {
                    return Err(invalid(format!("radius {} is not positive", sphere.radius())));
                }
            }
            Shape::Cylinder(cylinder) => {
                if !(cylinder.position().is_finite() && cylinder.direction().is_finite()) {
                    return Err(invalid("position or direction is not finite".into()));
                }
                if !(cylinder.radius() > 0.0 && cylinder.radius().is_finite()) {
                    return Err(invalid(format!(
                        "radius {} is not positive",
                        cylinder.radius()
                    )));
                }
                if cylinder.z_extent().size() <= 0.0 {
                    return Err(invalid("direction has no z extent".into()));
                }
            }
            Shape::Triangle(triangle) => {
                check_vertices(triangle).map_err(invalid)?;
                if triangle.is_degenerate() {
                    log::warn!("Degenerate triangle {:?} will never be hit", triangle.vertices());
                }
            }
            Shape::Quad(quad) => {
                for triangle in quad.triangles() {
                    check_vertices(triangle).map_err(invalid)?;
                }
            }
            Shape::Mesh(mesh) => {
                for triangle in mesh.triangles() {
                    check_vertices(triangle).map_err(invalid)?;
                }
                if mesh.is_empty() {
                    log::warn!("Mesh has no triangles");
                }
            }
        }

        Ok(())
    }
}

fn check_vertices(triangle: &Triangle) -> Result<(), String> {
    match triangle.vertices().iter().find(|v| !v.is_finite()) {
        Some(vertex) => Err(format!("vertex {} is not finite", vertex)),
        None => Ok(()),
    }
}

impl Intersect for Shape {
    fn intersect(&self, ray: &Ray) -> Hit {
        match self {
            Shape::Sphere(s) => s.intersect(ray),
            Shape::Triangle(t) => t.intersect(ray),
            Shape::Quad(q) => q.intersect(ray),
            Shape::Cylinder(c) => c.intersect(ray),
            Shape::Mesh(m) => m.intersect(ray),
        }
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Quad> for Shape {
    fn from(quad: Quad) -> Self {
        Shape::Quad(quad)
    }
}

impl From<Cylinder> for Shape {
    fn from(cylinder: Cylinder) -> Self {
        Shape::Cylinder(cylinder)
    }
}

impl From<Mesh> for Shape {
    fn from(mesh: Mesh) -> Self {
        Shape::Mesh(mesh)
    }
}

/// A renderable object. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    shape: Shape,
    material: Material,
}

impl Object {
    /// Create an object from any shape and a material.
    pub fn new(shape: impl Into<Shape>, material: Material) -> Self {
        Self {
            shape: shape.into(),
            material,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn material(&self) -> &Material {
        &self.material
    }
}

impl Intersect for Object {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Hit {
        self.shape.intersect(ray)
    }
}
