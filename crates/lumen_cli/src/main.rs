mod cli;

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_core::SceneDescription;
use lumen_tracer::{render, render_serial, ImageBuffer, Scene};

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    log::info!("Starting Lumen");

    let start = Instant::now();
    let mut desc = SceneDescription::from_path(&args.scene)
        .with_context(|| format!("Failed to read scene {}", args.scene.display()))?;

    if let Some(depth) = args.depth {
        desc.max_recursion_depth = depth;
    }
    if let Some(factor) = args.supersample {
        desc.super_sampling_factor = factor;
    }
    if let Some(shadows) = args.shadows {
        desc.shadows = shadows;
    }

    let base_dir = args.scene.parent().unwrap_or_else(|| Path::new("."));
    let scene = Scene::from_description(&desc, base_dir).context("Invalid scene")?;
    log::info!("Scene ready in {:?}", start.elapsed());

    let mut image = ImageBuffer::new(desc.width(), desc.height());
    let start = Instant::now();
    let stats = if args.serial {
        render_serial(&scene, &mut image)
    } else {
        render(&scene, &mut image)
    };
    log::info!(
        "Rendered in {:?} ({} rays, {} shadow rays)",
        start.elapsed(),
        stats.traced_rays,
        stats.shadow_rays
    );

    let output = args.output_path();
    image
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}
