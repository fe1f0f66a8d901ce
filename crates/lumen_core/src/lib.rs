//! Lumen Core - renderer-agnostic scene inputs.
//!
//! This crate provides:
//!
//! - **Scene descriptions**: JSON configuration of eye, lights, objects and
//!   render parameters
//! - **Mesh sources**: object-space triangle soups, loadable from OBJ files
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::SceneDescription;
//!
//! let desc = SceneDescription::from_path("scenes/spheres.json")?;
//! println!("{} objects, {} lights", desc.objects.len(), desc.lights.len());
//! ```

pub mod description;
pub mod mesh;

// Re-export commonly used types
pub use description::{
    DescriptionError, GeometryDescription, LightDescription, MaterialDescription,
    ObjectDescription, SceneDescription,
};
pub use mesh::{MeshError, MeshSource};
