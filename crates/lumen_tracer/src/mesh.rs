//! Triangle mesh object.
//!
//! The object-to-world transform is baked into the triangles once at
//! construction; intersection is a linear scan over all of them.

use crate::hit::{nearest_hit, Hit, Intersect};
use crate::Triangle;
use lumen_core::MeshSource;
use lumen_math::{Ray, Transform};

/// A flat collection of world-space triangles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    /// Build a mesh from an object-space source, applying scale, rotation
    /// (x, then y, then z) and translation to every vertex.
    pub fn new(source: &MeshSource, transform: &Transform) -> Self {
        let matrix = transform.to_matrix();

        let mut degenerate = 0usize;
        let triangles: Vec<Triangle> = source
            .triangles()
            .map(|[v0, v1, v2]| {
                Triangle::new(
                    matrix.transform_point3(v0),
                    matrix.transform_point3(v1),
                    matrix.transform_point3(v2),
                )
            })
            .filter(|tri| {
                let keep = !tri.is_degenerate();
                if !keep {
                    degenerate += 1;
                }
                keep
            })
            .collect();

        if degenerate > 0 {
            log::warn!("Skipped {} degenerate mesh triangles", degenerate);
        }
        log::debug!("Built mesh with {} triangles", triangles.len());

        Self::from_triangles(triangles)
    }

    /// Create a mesh from world-space triangles.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Get the number of triangles.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

impl Intersect for Mesh {
    fn intersect(&self, ray: &Ray) -> Hit {
        nearest_hit(&self.triangles, ray)
    }
}
