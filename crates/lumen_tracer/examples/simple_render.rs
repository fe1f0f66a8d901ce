//! Simple Whitted ray tracer example.
//!
//! Renders spheres on a mirror floor with a glass ball and saves to PNG.

use lumen_tracer::{
    render, Color, Cylinder, ImageBuffer, Light, Material, Object, Point, Quad, Scene,
    SceneResult, Sphere, Vector,
};

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let start = std::time::Instant::now();
    let scene = build_scene().expect("Failed to build scene");
    println!("Scene built in {:?}", start.elapsed());

    let mut image = ImageBuffer::new(400, 400);

    let start = std::time::Instant::now();
    let stats = render(&scene, &mut image);
    println!("Rendered in {:?} ({} rays)", start.elapsed(), stats.traced_rays);

    let filename = "simple_render.png";
    image.save(filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> SceneResult<Scene> {
    let mut scene = Scene::new();

    // Mirror-ish floor
    scene.add_object(Object::new(
        Quad::new(
            Point::new(-200.0, 20.0, 400.0),
            Point::new(600.0, 20.0, 400.0),
            Point::new(600.0, 20.0, -600.0),
            Point::new(-200.0, 20.0, -600.0),
        ),
        Material::new(Color::splat(0.6), 0.1, 0.6, 0.4, 8.0),
    ))?;

    scene.add_object(Object::new(
        Sphere::new(Point::new(120.0, 120.0, 0.0), 90.0),
        Material::new(Color::new(0.9, 0.3, 0.2), 0.2, 0.7, 0.5, 64.0),
    ))?;

    scene.add_object(Object::new(
        Sphere::new(Point::new(290.0, 110.0, 120.0), 80.0),
        Material::new(Color::ONE, 0.0, 0.05, 0.5, 128.0).with_transparency(1.5),
    ))?;

    scene.add_object(Object::new(
        Cylinder::new(Point::new(300.0, 300.0, -200.0), Vector::new(0.0, 0.0, 150.0), 40.0),
        Material::new(Color::new(0.2, 0.8, 0.3), 0.2, 0.7, 0.2, 16.0),
    ))?;

    scene.add_light(Light::new(Point::new(-200.0, 600.0, 1500.0), Color::splat(0.8)))?;
    scene.add_light(Light::new(Point::new(600.0, 400.0, 800.0), Color::splat(0.4)))?;

    scene.set_eye(Point::new(200.0, 200.0, 1000.0))?;
    scene.set_render_shadows(true)?;
    scene.set_recursion_depth(4)?;
    scene.set_super_sample(3)?;

    Ok(scene)
}
