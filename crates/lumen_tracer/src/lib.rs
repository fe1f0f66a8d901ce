//! Lumen Tracer - CPU recursive ray tracing.
//!
//! A Whitted-style ray tracer: nearest-hit queries over a flat object list,
//! Phong shading with optional shadow rays, recursive reflection and
//! Fresnel-weighted refraction up to a bounded depth, and diagonal
//! supersampling per pixel.
//!
//! ```ignore
//! use lumen_tracer::{render, ImageBuffer, Light, Material, Object, Scene, Sphere};
//! use lumen_tracer::{Color, Point};
//!
//! let mut scene = Scene::new();
//! scene.add_object(Object::new(
//!     Sphere::new(Point::new(200.0, 200.0, 0.0), 100.0),
//!     Material::new(Color::new(1.0, 0.0, 0.0), 0.2, 0.7, 0.5, 64.0),
//! ))?;
//! scene.add_light(Light::new(Point::new(-200.0, 600.0, 1500.0), Color::ONE))?;
//! scene.set_eye(Point::new(200.0, 200.0, 1000.0))?;
//!
//! let mut image = ImageBuffer::new(400, 400);
//! render(&scene, &mut image);
//! image.save("out.png")?;
//! ```

mod bucket;
mod cylinder;
mod error;
mod hit;
mod light;
mod loader;
mod material;
mod mesh;
mod object;
mod quad;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{
    generate_buckets, render, render_bucket, render_with_bucket_size, Bucket, BucketResult,
    DEFAULT_BUCKET_SIZE,
};
pub use cylinder::Cylinder;
pub use error::{SceneError, SceneResult};
pub use hit::{Hit, Intersect, HIT_EPSILON};
pub use light::Light;
pub use loader::build_object;
pub use material::Material;
pub use mesh::Mesh;
pub use object::{Object, Shape};
pub use quad::Quad;
pub use renderer::{clamp_color, color_to_rgb8, render_pixel, render_serial, ImageBuffer};
pub use scene::{RayCast, RenderSettings, Scene, TraceStats, BACKGROUND, SURFACE_EPSILON};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types used throughout the public API
pub use lumen_math::{Color, Interval, Point, Ray, Transform, Vector};
