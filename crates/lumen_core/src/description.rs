//! Declarative scene description.
//!
//! A JSON document naming the eye point, render parameters, lights and
//! objects. The tracer turns it into a renderable scene; this module only
//! parses and carries the data.
//!
//! ```json
//! {
//!   "Eye": [200, 200, 1000],
//!   "Shadows": true,
//!   "MaxRecursionDepth": 2,
//!   "SuperSamplingFactor": 2,
//!   "Lights": [{ "position": [-200, 600, 1500], "color": [1, 1, 1] }],
//!   "Objects": [{
//!     "type": "sphere", "position": [90, 320, 100], "radius": 50,
//!     "material": { "color": [0, 0, 1], "ka": 0.2, "kd": 0.7, "ks": 0.5, "n": 64 }
//!   }]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use lumen_math::{Color, Point, Vector};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while reading a scene description.
#[derive(Error, Debug)]
pub enum DescriptionError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene description: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for description parsing.
pub type DescriptionResult<T> = Result<T, DescriptionError>;

/// Top-level scene description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SceneDescription {
    /// Eye (camera) position
    pub eye: Point,

    /// Whether shadow rays are cast
    #[serde(default)]
    pub shadows: bool,

    /// Maximum number of reflection/refraction bounces
    #[serde(default)]
    pub max_recursion_depth: u32,

    /// Primary rays per pixel
    #[serde(default = "default_super_sampling")]
    pub super_sampling_factor: u32,

    /// Output image size as [width, height]
    #[serde(default = "default_size")]
    pub size: [u32; 2],

    #[serde(default)]
    pub lights: Vec<LightDescription>,

    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

fn default_super_sampling() -> u32 {
    1
}

fn default_size() -> [u32; 2] {
    [400, 400]
}

fn default_scale() -> Vector {
    Vector::ONE
}

fn default_refractive_index() -> f64 {
    1.0
}

/// A point light.
#[derive(Debug, Clone, Deserialize)]
pub struct LightDescription {
    pub position: Point,
    pub color: Color,
}

/// Phong material parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialDescription {
    pub color: Color,
    pub ka: f64,
    pub kd: f64,
    pub ks: f64,
    /// Shininess exponent
    pub n: f64,
    #[serde(default)]
    pub transparent: bool,
    /// Refractive index, only meaningful for transparent materials
    #[serde(default = "default_refractive_index")]
    pub nt: f64,
}

/// One object with its material.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDescription {
    #[serde(flatten)]
    pub geometry: GeometryDescription,
    pub material: MaterialDescription,
}

/// Geometry of a single object, tagged by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeometryDescription {
    Sphere {
        position: Point,
        radius: f64,
    },
    Triangle {
        v0: Point,
        v1: Point,
        v2: Point,
    },
    Quad {
        v0: Point,
        v1: Point,
        v2: Point,
        v3: Point,
    },
    Cylinder {
        position: Point,
        direction: Vector,
        radius: f64,
    },
    Mesh {
        /// OBJ file, relative to the description file
        model: PathBuf,
        #[serde(default)]
        position: Point,
        /// Rotation about x, y, z in radians
        #[serde(default)]
        rotation: Vector,
        #[serde(default = "default_scale")]
        scale: Vector,
    },
}

impl SceneDescription {
    /// Parse a description from a JSON string.
    pub fn from_json_str(json: &str) -> DescriptionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a description file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> DescriptionResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| DescriptionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let description = Self::from_json_str(&json)?;
        log::info!(
            "Read scene {}: {} objects, {} lights",
            path.display(),
            description.objects.len(),
            description.lights.len()
        );
        Ok(description)
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.size[0]
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.size[1]
    }
}
