//! Scene container and the recursive Whitted-style shading.
//!
//! A `Scene` owns its objects and lights behind `Arc` handles and is
//! configured through fallible setters. Once rendering starts the scene is
//! frozen: every setter fails with `SceneError::Frozen`, and the tracer only
//! ever sees shared references.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::hit::{Hit, Intersect};
use crate::{Light, Material, Object, SceneError, SceneResult};
use lumen_math::{reflect, refract, Color, Point, Ray, Vector};

/// Distance secondary rays are pushed off the surface to avoid shadow acne.
pub const SURFACE_EPSILON: f64 = 1e-4;

/// Color returned for rays that escape the scene.
pub const BACKGROUND: Color = Color::ZERO;

/// Global render parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSettings {
    /// Cast shadow rays towards each light
    pub shadows: bool,
    /// Maximum number of reflection/refraction bounces
    pub max_depth: u32,
    /// Primary rays per pixel (at least 1)
    pub super_samples: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shadows: false,
            max_depth: 0,
            super_samples: 1,
        }
    }
}

/// Result of the nearest-hit query: the winning object, if any, and its hit.
#[derive(Debug, Clone, Copy)]
pub struct RayCast<'a> {
    pub object: Option<&'a Object>,
    pub hit: Hit,
}

/// Counters gathered while tracing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Number of `trace` invocations (primary and secondary rays)
    pub traced_rays: u64,
    /// Number of shadow rays cast
    pub shadow_rays: u64,
    /// Deepest nesting of `trace` calls, 1 for a primary ray alone
    pub max_nesting: u32,
}

impl TraceStats {
    /// Accumulate another set of counters into this one.
    pub fn merge(&mut self, other: &TraceStats) {
        self.traced_rays += other.traced_rays;
        self.shadow_rays += other.shadow_rays;
        self.max_nesting = self.max_nesting.max(other.max_nesting);
    }
}

/// Objects, lights, eye point and render settings.
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<Arc<Object>>,
    lights: Vec<Arc<Light>>,
    eye: Point,
    settings: RenderSettings,
    frozen: AtomicBool,
}

impl Scene {
    /// Create an empty scene with the eye at the origin and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_mutable(&self) -> SceneResult<()> {
        if self.is_frozen() {
            return Err(SceneError::Frozen);
        }
        Ok(())
    }

    /// Add an object. Its material and geometry are validated here so that
    /// bad configurations fail before rendering.
    pub fn add_object(&mut self, object: impl Into<Arc<Object>>) -> SceneResult<()> {
        self.ensure_mutable()?;
        let object = object.into();
        object.material().validate()?;
        object.shape().validate()?;
        self.objects.push(object);
        Ok(())
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: impl Into<Arc<Light>>) -> SceneResult<()> {
        self.ensure_mutable()?;
        self.lights.push(light.into());
        Ok(())
    }

    pub fn set_eye(&mut self, eye: Point) -> SceneResult<()> {
        self.ensure_mutable()?;
        self.eye = eye;
        Ok(())
    }

    pub fn set_render_shadows(&mut self, shadows: bool) -> SceneResult<()> {
        self.ensure_mutable()?;
        self.settings.shadows = shadows;
        Ok(())
    }

    /// Set the maximum recursion depth. 0 disables secondary rays.
    pub fn set_recursion_depth(&mut self, depth: u32) -> SceneResult<()> {
        self.ensure_mutable()?;
        self.settings.max_depth = depth;
        Ok(())
    }

    /// Set the number of primary rays per pixel.
    pub fn set_super_sample(&mut self, factor: u32) -> SceneResult<()> {
        self.ensure_mutable()?;
        if factor == 0 {
            return Err(SceneError::InvalidSupersampling);
        }
        self.settings.super_samples = factor;
        Ok(())
    }

    pub fn objects(&self) -> &[Arc<Object>] {
        &self.objects
    }

    pub fn lights(&self) -> &[Arc<Light>] {
        &self.lights
    }

    pub fn eye(&self) -> Point {
        self.eye
    }

    pub fn settings(&self) -> RenderSettings {
        self.settings
    }

    /// Whether rendering has started on this scene.
    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Mark the scene read-only. Called by every render entry point.
    pub(crate) fn freeze(&self) {
        if !self.frozen.swap(true, Ordering::AcqRel) {
            log::debug!(
                "Scene frozen with {} objects and {} lights",
                self.objects.len(),
                self.lights.len()
            );
        }
    }

    /// Find the nearest object along `ray`.
    ///
    /// Objects are tested in insertion order and only a strictly closer hit
    /// replaces the current one, so the first object wins exact ties.
    pub fn cast_ray(&self, ray: &Ray) -> RayCast<'_> {
        let mut nearest = RayCast {
            object: None,
            hit: Hit::NO_HIT,
        };

        for object in &self.objects {
            let hit = object.intersect(ray);
            if hit.t < nearest.hit.t {
                nearest = RayCast {
                    object: Some(object.as_ref()),
                    hit,
                };
            }
        }

        nearest
    }

    /// Compute the color seen along `ray`, spawning at most `depth` levels of
    /// reflection/refraction rays. The result is not clamped.
    pub fn trace(&self, ray: &Ray, depth: u32) -> Color {
        self.trace_with_stats(ray, depth, &mut TraceStats::default())
    }

    /// `trace`, also counting rays into `stats`.
    pub fn trace_with_stats(&self, ray: &Ray, depth: u32, stats: &mut TraceStats) -> Color {
        self.trace_nested(ray, depth, 1, stats)
    }

    fn trace_nested(&self, ray: &Ray, depth: u32, level: u32, stats: &mut TraceStats) -> Color {
        stats.traced_rays += 1;
        stats.max_nesting = stats.max_nesting.max(level);

        let RayCast { object, hit } = self.cast_ray(ray);
        let Some(object) = object else {
            return BACKGROUND;
        };

        let material = object.material();
        let point = ray.at(hit.t);
        let view = -ray.direction();

        // Shading normal faces the viewer so both sides of a surface light up
        let facing = hit.normal.dot(view) >= 0.0;
        let normal = if facing { hit.normal } else { -hit.normal };
        let outside = point + SURFACE_EPSILON * normal;

        // Ambient once, regardless of the number of lights
        let mut color = material.ka * material.color;

        for light in &self.lights {
            color += self.direct_light(light, material, point, outside, normal, view, stats);
        }

        if depth == 0 {
            return color;
        }

        if material.transparent {
            color += self.transmit(
                ray, material, point, outside, normal, facing, depth, level, stats,
            );
        } else if material.ks > 0.0 {
            let reflected = Ray::new(outside, reflect(ray.direction(), normal));
            color += material.ks * self.trace_nested(&reflected, depth - 1, level + 1, stats);
        }

        color
    }

    /// Diffuse and specular contribution of one light, zero when shadowed.
    #[allow(clippy::too_many_arguments)]
    fn direct_light(
        &self,
        light: &Light,
        material: &Material,
        point: Point,
        outside: Point,
        normal: Vector,
        view: Vector,
        stats: &mut TraceStats,
    ) -> Color {
        let Some(to_light) = (light.position - point).try_normalize() else {
            return Color::ZERO;
        };

        if self.settings.shadows && self.occluded(outside, light.position, stats) {
            return Color::ZERO;
        }

        let diffuse = normal.dot(to_light).max(0.0);
        let spec_angle = reflect(-to_light, normal).dot(view).max(0.0);
        let specular = spec_angle.powf(material.shininess);

        diffuse * material.kd * light.color * material.color + specular * material.ks * light.color
    }

    /// True if an object lies strictly between `origin` and `target`.
    fn occluded(&self, origin: Point, target: Point, stats: &mut TraceStats) -> bool {
        let Some(shadow) = Ray::try_new(origin, target - origin) else {
            return false;
        };
        stats.shadow_rays += 1;

        let distance = (target - origin).length();
        let cast = self.cast_ray(&shadow);
        cast.hit.is_hit() && cast.hit.t < distance
    }

    /// Fresnel-weighted reflection plus refraction for transparent surfaces.
    #[allow(clippy::too_many_arguments)]
    fn transmit(
        &self,
        ray: &Ray,
        material: &Material,
        point: Point,
        outside: Point,
        normal: Vector,
        entering: bool,
        depth: u32,
        level: u32,
        stats: &mut TraceStats,
    ) -> Color {
        let direction = ray.direction();
        let reflected = Ray::new(outside, reflect(direction, normal));

        let (ni, nt) = if entering {
            (1.0, material.refractive_index)
        } else {
            (material.refractive_index, 1.0)
        };

        match refract(direction, normal, ni, nt) {
            Some(refracted_dir) => {
                let cosine = normal.dot(-direction).clamp(0.0, 1.0);
                let kr = material.reflectance(cosine);
                let kt = 1.0 - kr;

                // Start just behind the surface on the transmitted side
                let refracted = Ray::new(point - SURFACE_EPSILON * normal, refracted_dir);

                kr * self.trace_nested(&reflected, depth - 1, level + 1, stats)
                    + kt * self.trace_nested(&refracted, depth - 1, level + 1, stats)
            }
            // Total internal reflection
            None => self.trace_nested(&reflected, depth - 1, level + 1, stats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quad, Sphere};

    fn approx(a: Color, b: Color) -> bool {
        (a - b).length() < 1e-9
    }

    fn white_light(position: Point) -> Light {
        Light::new(position, Color::ONE)
    }

    fn floor(material: Material) -> Object {
        Object::new(
            Quad::new(
                Point::new(-10.0, 0.0, 10.0),
                Point::new(10.0, 0.0, 10.0),
                Point::new(10.0, 0.0, -10.0),
                Point::new(-10.0, 0.0, -10.0),
            ),
            material,
        )
    }

    /// Two large mirrors at z = -1 and z = 1 facing each other.
    fn mirror_box() -> Scene {
        let mirror = Material::new(Color::ONE, 0.1, 0.2, 0.5, 8.0);
        let mut scene = Scene::new();
        for z in [-1.0, 1.0] {
            scene
                .add_object(Object::new(
                    Quad::new(
                        Point::new(-50.0, -50.0, z),
                        Point::new(50.0, -50.0, z),
                        Point::new(50.0, 50.0, z),
                        Point::new(-50.0, 50.0, z),
                    ),
                    mirror,
                ))
                .unwrap();
        }
        scene.add_light(white_light(Point::new(0.0, 0.0, 0.5))).unwrap();
        scene
    }

    #[test]
    fn test_cast_ray_empty_scene() {
        let scene = Scene::new();
        let cast = scene.cast_ray(&Ray::new(Point::ZERO, Vector::Z));

        assert!(cast.object.is_none());
        assert_eq!(cast.hit.t, f64::INFINITY);
    }

    #[test]
    fn test_cast_ray_unit_sphere() {
        let mut scene = Scene::new();
        scene
            .add_object(Object::new(Sphere::new(Point::ZERO, 1.0), Material::default()))
            .unwrap();

        let cast = scene.cast_ray(&Ray::new(Point::new(0.0, 0.0, 5.0), -Vector::Z));
        assert!(cast.object.is_some());
        assert!((cast.hit.t - 4.0).abs() < 1e-12);
        assert!(approx(cast.hit.normal, Vector::Z));
    }

    #[test]
    fn test_cast_ray_first_object_wins_tie() {
        let red = Material::new(Color::X, 0.1, 0.5, 0.0, 1.0);
        let blue = Material::new(Color::Z, 0.1, 0.5, 0.0, 1.0);

        let mut scene = Scene::new();
        scene.add_object(Object::new(Sphere::new(Point::ZERO, 1.0), red)).unwrap();
        scene.add_object(Object::new(Sphere::new(Point::ZERO, 1.0), blue)).unwrap();

        let cast = scene.cast_ray(&Ray::new(Point::new(0.0, 0.0, 5.0), -Vector::Z));
        assert_eq!(cast.object.map(|o| o.material().color), Some(Color::X));
    }

    #[test]
    fn test_cast_ray_nearest_object() {
        let mut scene = Scene::new();
        scene
            .add_object(Object::new(
                Sphere::new(Point::new(0.0, 0.0, -10.0), 1.0),
                Material::default(),
            ))
            .unwrap();
        scene
            .add_object(Object::new(
                Sphere::new(Point::new(0.0, 0.0, -4.0), 1.0),
                Material::default(),
            ))
            .unwrap();

        let cast = scene.cast_ray(&Ray::new(Point::ZERO, -Vector::Z));
        assert!((cast.hit.t - 3.0).abs() < 1e-12);
        assert!(std::ptr::eq(cast.object.unwrap(), scene.objects()[1].as_ref()));
    }

    #[test]
    fn test_miss_returns_background() {
        let mut scene = mirror_box();
        scene.set_recursion_depth(4).unwrap();
        scene.add_light(white_light(Point::new(3.0, 3.0, 0.0))).unwrap();

        // Parallel to both mirrors
        let ray = Ray::new(Point::ZERO, Vector::X);
        for depth in [0, 1, 4] {
            assert_eq!(scene.trace(&ray, depth), BACKGROUND);
        }
        assert_eq!(Scene::new().trace(&ray, 3), BACKGROUND);
    }

    #[test]
    fn test_phong_head_on() {
        let material = Material::new(Color::X, 0.1, 0.5, 0.25, 10.0);
        let mut scene = Scene::new();
        scene.add_object(Object::new(Sphere::new(Point::ZERO, 1.0), material)).unwrap();
        scene.add_light(white_light(Point::new(0.0, 0.0, 10.0))).unwrap();

        let ray = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector::Z);
        let color = scene.trace(&ray, 0);
        assert!(approx(color, Color::new(0.85, 0.25, 0.25)), "{:?}", color);
    }

    #[test]
    fn test_no_lights_is_ambient_only() {
        let material = Material::new(Color::new(0.2, 0.4, 0.6), 0.5, 0.5, 0.0, 1.0);
        let mut scene = Scene::new();
        scene.add_object(Object::new(Sphere::new(Point::ZERO, 1.0), material)).unwrap();

        let ray = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector::Z);
        assert!(approx(scene.trace(&ray, 3), Color::new(0.1, 0.2, 0.3)));
    }

    #[test]
    fn test_underside_is_lit() {
        // Viewed from below, light below: the shading normal flips to face the viewer.
        let material = Material::new(Color::ONE, 0.0, 1.0, 0.0, 1.0);
        let mut scene = Scene::new();
        scene.add_object(floor(material)).unwrap();
        scene.add_light(white_light(Point::new(0.0, -5.0, 0.0))).unwrap();

        let ray = Ray::new(Point::new(0.0, -5.0, 0.0), Vector::Y);
        let color = scene.trace(&ray, 0);
        assert!(approx(color, Color::ONE), "{:?}", color);
    }

    #[test]
    fn test_blocker_removes_direct_light() {
        let material = Material::new(Color::ONE, 0.1, 0.8, 0.3, 4.0);
        let ambient = 0.1 * Color::ONE;
        let ray = Ray::towards(Point::new(0.0, 5.0, 5.0), Point::ZERO);

        let build = |shadows: bool, blocker: bool| {
            let mut scene = Scene::new();
            scene.add_object(floor(material)).unwrap();
            if blocker {
                scene
                    .add_object(Object::new(
                        Sphere::new(Point::new(0.0, 5.0, 0.0), 1.0),
                        Material::default(),
                    ))
                    .unwrap();
            }
            scene.add_light(white_light(Point::new(0.0, 10.0, 0.0))).unwrap();
            scene.set_render_shadows(shadows).unwrap();
            scene
        };

        let lit = build(true, false).trace(&ray, 0);
        let shadowed = build(true, true).trace(&ray, 0);
        let ignored = build(false, true).trace(&ray, 0);

        assert!(lit.x > ambient.x + 0.5);
        assert_eq!(shadowed, ambient);
        assert!(approx(ignored, lit));
    }

    #[test]
    fn test_light_in_front_of_blocker_not_shadowed() {
        let material = Material::new(Color::ONE, 0.1, 0.8, 0.0, 1.0);
        let mut scene = Scene::new();
        scene.add_object(floor(material)).unwrap();
        // Blocker above the light, not between light and floor
        scene
            .add_object(Object::new(
                Sphere::new(Point::new(0.0, 8.0, 0.0), 1.0),
                Material::default(),
            ))
            .unwrap();
        scene.add_light(white_light(Point::new(0.0, 4.0, 0.0))).unwrap();
        scene.set_render_shadows(true).unwrap();

        let ray = Ray::towards(Point::new(0.0, 5.0, 5.0), Point::ZERO);
        let color = scene.trace(&ray, 0);
        assert!(color.x > 0.5);
    }

    #[test]
    fn test_depth_zero_spawns_no_secondary_rays() {
        let scene = mirror_box();
        let mut stats = TraceStats::default();
        scene.trace_with_stats(&Ray::new(Point::ZERO, -Vector::Z), 0, &mut stats);

        assert_eq!(stats.traced_rays, 1);
        assert_eq!(stats.max_nesting, 1);
    }

    #[test]
    fn test_recursion_is_bounded_by_depth() {
        let scene = mirror_box();
        for depth in [1, 3, 7] {
            let mut stats = TraceStats::default();
            let ray = Ray::new(Point::ZERO, -Vector::Z);
            let color = scene.trace_with_stats(&ray, depth, &mut stats);

            assert!(color.is_finite());
            assert_eq!(stats.max_nesting, depth + 1);
            assert_eq!(stats.traced_rays, depth as u64 + 1);
        }
    }

    #[test]
    fn test_mirror_reflection_adds_light() {
        let scene = mirror_box();
        let ray = Ray::new(Point::ZERO, -Vector::Z);
        let direct = scene.trace(&ray, 0);
        let reflected = scene.trace(&ray, 1);
        assert!(reflected.x > direct.x);
    }

    #[test]
    fn test_depth_irrelevant_without_specular() {
        let matte = Material::new(Color::new(0.3, 0.6, 0.9), 0.2, 0.7, 0.0, 16.0);
        let mut scene = Scene::new();
        scene.add_object(floor(matte)).unwrap();
        scene.add_object(Object::new(Sphere::new(Point::new(0.0, 1.0, 0.0), 1.0), matte)).unwrap();
        scene.add_light(white_light(Point::new(3.0, 6.0, 2.0))).unwrap();
        scene.set_render_shadows(true).unwrap();

        for target in [Point::ZERO, Point::new(2.0, 0.0, 1.0), Point::new(0.0, 1.0, 1.0)] {
            let ray = Ray::towards(Point::new(0.0, 4.0, 8.0), target);
            let base = scene.trace(&ray, 0);
            for depth in 1..5 {
                assert_eq!(scene.trace(&ray, depth), base);
            }
        }
    }

    #[test]
    fn test_transparent_spawns_reflection_and_refraction() {
        let glass = Material::new(Color::ONE, 0.0, 0.1, 0.5, 32.0).with_transparency(1.5);
        let mut scene = Scene::new();
        scene.add_object(Object::new(Sphere::new(Point::ZERO, 1.0), glass)).unwrap();
        scene.add_light(white_light(Point::new(0.0, 5.0, 5.0))).unwrap();

        let mut stats = TraceStats::default();
        let ray = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector::Z);
        let color = scene.trace_with_stats(&ray, 1, &mut stats);

        assert!(color.is_finite());
        assert_eq!(stats.traced_rays, 3);
        assert_eq!(stats.max_nesting, 2);
    }

    #[test]
    fn test_refraction_through_glass_sphere() {
        // Pure glass in front of an ambient-only backdrop: the backdrop is seen
        // through two interfaces, each transmitting 1 - R0 = 0.96 head-on.
        let glass = Material::new(Color::ONE, 0.0, 0.0, 0.0, 1.0).with_transparency(1.5);
        let backdrop = Material::new(Color::ONE, 1.0, 0.0, 0.0, 1.0);
        let mut scene = Scene::new();
        scene.add_object(Object::new(Sphere::new(Point::ZERO, 1.0), glass)).unwrap();
        scene
            .add_object(Object::new(Sphere::new(Point::new(0.0, 0.0, -5.0), 1.0), backdrop))
            .unwrap();

        let ray = Ray::new(Point::new(0.0, 0.0, 5.0), -Vector::Z);
        for depth in [2, 3] {
            let color = scene.trace(&ray, depth);
            assert!(approx(color, Color::splat(0.96 * 0.96)), "depth {}: {:?}", depth, color);
        }

        // Too shallow to leave the glass
        assert!(approx(scene.trace(&ray, 1), Color::ZERO));
    }

    #[test]
    fn test_total_internal_reflection_keeps_full_weight() {
        let ka = 0.2;
        let glass = Material::new(Color::ONE, ka, 0.0, 0.0, 1.0).with_transparency(1.5);
        let mut scene = Scene::new();
        scene.add_object(Object::new(Sphere::new(Point::ZERO, 1.0), glass)).unwrap();

        // Leaves the sphere at about 64 degrees incidence, past the critical angle
        let ray = Ray::new(Point::new(0.0, 0.9, 0.0), Vector::X);
        let point = ray.at(scene.cast_ray(&ray).hit.t);
        let inward = -point;
        let reflected = Ray::new(point + SURFACE_EPSILON * inward, reflect(Vector::X, inward));

        let color = scene.trace(&ray, 2);
        assert!(approx(color, Color::splat(ka) + scene.trace(&reflected, 1)));
        // Every bounce along the chord is internal again
        assert!(approx(color, Color::splat(3.0 * ka)), "{:?}", color);
    }

    #[test]
    fn test_transparent_grazing_rays_stay_finite() {
        let glass = Material::new(Color::ONE, 0.1, 0.3, 0.5, 32.0).with_transparency(2.4);
        let mut scene = Scene::new();
        scene.add_object(Object::new(Sphere::new(Point::ZERO, 1.0), glass)).unwrap();
        scene.add_object(floor(Material::default())).unwrap();
        scene.add_light(white_light(Point::new(2.0, 5.0, 5.0))).unwrap();
        scene.set_render_shadows(true).unwrap();

        // Sweep offsets up to the silhouette to provoke total internal reflection
        for i in 0..=20 {
            let y = 1.0 - i as f64 * 0.05;
            let ray = Ray::new(Point::new(0.0, y.max(-0.999) + 1e-3, 5.0), -Vector::Z);
            let color = scene.trace(&ray, 6);
            assert!(color.is_finite(), "non-finite color at y={}: {:?}", y, color);
        }
    }

    #[test]
    fn test_configuration_errors() {
        let mut scene = Scene::new();

        let bad_glass = Material::default().with_transparency(0.0);
        let result = scene.add_object(Object::new(Sphere::new(Point::ZERO, 1.0), bad_glass));
        assert!(matches!(result, Err(SceneError::InvalidRefractiveIndex(_))));
        assert!(scene.objects().is_empty());

        assert!(matches!(scene.set_super_sample(0), Err(SceneError::InvalidSupersampling)));
        assert_eq!(scene.settings().super_samples, 1);

        scene.set_recursion_depth(0).unwrap();
        scene.set_super_sample(4).unwrap();
        assert_eq!(scene.settings().super_samples, 4);
    }

    #[test]
    fn test_frozen_scene_rejects_mutation() {
        let mut scene = Scene::new();
        scene.freeze();

        assert!(scene.is_frozen());
        assert!(matches!(scene.add_light(white_light(Point::ZERO)), Err(SceneError::Frozen)));
        assert!(matches!(scene.set_eye(Point::ONE), Err(SceneError::Frozen)));
        assert!(matches!(scene.set_recursion_depth(2), Err(SceneError::Frozen)));
        assert!(scene.lights().is_empty());
    }
}
