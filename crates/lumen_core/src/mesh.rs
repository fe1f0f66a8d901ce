//! Triangle soup source for mesh objects.
//!
//! A `MeshSource` is a flat list of object-space vertex positions grouped in
//! triples, one triangle per three consecutive positions. It can be built from
//! an indexed mesh or loaded from a Wavefront OBJ file. The tracer bakes its
//! own transform into the triangles; nothing here is renderer specific.

use std::path::Path;

use lumen_math::Point;
use thiserror::Error;

/// Errors that can occur while building or loading a mesh source.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("OBJ load error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("Index count {0} is not a multiple of 3")]
    NotTriangulated(usize),

    #[error("Vertex index {index} out of range ({count} positions)")]
    IndexOutOfRange { index: u32, count: usize },

    #[error("No triangles found in {0}")]
    Empty(String),
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Object-space triangle soup.
#[derive(Clone, Debug, Default)]
pub struct MeshSource {
    /// Vertex positions, every 3 form a triangle
    pub positions: Vec<Point>,
}

impl MeshSource {
    /// Create a source from positions already grouped in triples.
    ///
    /// Trailing positions that do not complete a triangle are dropped.
    pub fn new(mut positions: Vec<Point>) -> Self {
        let remainder = positions.len() % 3;
        if remainder != 0 {
            log::warn!(
                "Dropping {} trailing vertices that do not form a triangle",
                remainder
            );
            positions.truncate(positions.len() - remainder);
        }
        Self { positions }
    }

    /// Flatten an indexed mesh into a triangle soup.
    pub fn from_indexed(positions: &[Point], indices: &[u32]) -> MeshResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangulated(indices.len()));
        }

        let flat = indices
            .iter()
            .map(|&index| {
                positions
                    .get(index as usize)
                    .copied()
                    .ok_or(MeshError::IndexOutOfRange {
                        index,
                        count: positions.len(),
                    })
            })
            .collect::<MeshResult<Vec<_>>>()?;

        Ok(Self { positions: flat })
    }

    /// Load every model of an OBJ file and concatenate their triangles.
    pub fn load_obj<P: AsRef<Path>>(path: P) -> MeshResult<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )?;

        let mut source = MeshSource::default();
        for model in &models {
            let mesh = &model.mesh;
            let positions: Vec<Point> = mesh
                .positions
                .chunks_exact(3)
                .map(|p| Point::new(p[0] as f64, p[1] as f64, p[2] as f64))
                .collect();

            let part = Self::from_indexed(&positions, &mesh.indices)?;
            log::debug!(
                "OBJ model '{}': {} triangles",
                model.name,
                part.triangle_count()
            );
            source.positions.extend(part.positions);
        }

        if source.is_empty() {
            return Err(MeshError::Empty(path.display().to_string()));
        }

        log::info!(
            "Loaded model {} with {} triangles",
            path.display(),
            source.triangle_count()
        );
        Ok(source)
    }

    /// Number of complete triangles.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Check if the source has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Iterate over triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Point; 3]> + '_ {
        self.positions.chunks_exact(3).map(|v| [v[0], v[1], v[2]])
    }
}
