//! Building a `Scene` from a parsed `SceneDescription`.

use std::path::Path;

use crate::{Cylinder, Light, Material, Mesh, Object, Quad, Scene, SceneResult, Sphere, Triangle};
use lumen_core::{
    GeometryDescription, MaterialDescription, MeshSource, ObjectDescription, SceneDescription,
};
use lumen_math::Transform;

impl From<&MaterialDescription> for Material {
    fn from(desc: &MaterialDescription) -> Self {
        let material = Material::new(desc.color, desc.ka, desc.kd, desc.ks, desc.n);
        if desc.transparent {
            material.with_transparency(desc.nt)
        } else {
            material
        }
    }
}

/// Build one object. Mesh models are resolved relative to `base_dir`.
pub fn build_object(desc: &ObjectDescription, base_dir: &Path) -> SceneResult<Object> {
    let material = Material::from(&desc.material);

    let object = match &desc.geometry {
        GeometryDescription::Sphere { position, radius } => {
            Object::new(Sphere::new(*position, *radius), material)
        }
        GeometryDescription::Triangle { v0, v1, v2 } => {
            Object::new(Triangle::new(*v0, *v1, *v2), material)
        }
        GeometryDescription::Quad { v0, v1, v2, v3 } => {
            Object::new(Quad::new(*v0, *v1, *v2, *v3), material)
        }
        GeometryDescription::Cylinder {
            position,
            direction,
            radius,
        } => Object::new(Cylinder::new(*position, *direction, *radius), material),
        GeometryDescription::Mesh {
            model,
            position,
            rotation,
            scale,
        } => {
            let source = MeshSource::load_obj(base_dir.join(model))?;
            let transform = Transform::new(*position, *rotation, *scale);
            Object::new(Mesh::new(&source, &transform), material)
        }
    };

    Ok(object)
}

impl Scene {
    /// Build and validate a scene from a description.
    pub fn from_description(desc: &SceneDescription, base_dir: &Path) -> SceneResult<Scene> {
        let mut scene = Scene::new();
        scene.set_eye(desc.eye)?;
        scene.set_render_shadows(desc.shadows)?;
        scene.set_recursion_depth(desc.max_recursion_depth)?;
        scene.set_super_sample(desc.super_sampling_factor)?;

        for light in &desc.lights {
            scene.add_light(Light::new(light.position, light.color))?;
        }

        for object in &desc.objects {
            scene.add_object(build_object(object, base_dir)?)?;
        }

        log::info!(
            "Built scene with {} objects and {} lights",
            scene.objects().len(),
            scene.lights().len()
        );
        Ok(scene)
    }

    /// Read a description file and build the scene it describes.
    pub fn load<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
        let path = path.as_ref();
        let desc = SceneDescription::from_path(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_description(&desc, base_dir)
    }
}
