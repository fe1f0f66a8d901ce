//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! and in parallel using rayon. Each bucket writes to a disjoint block of
//! pixels, so the result is identical to a serial render.

use rayon::prelude::*;

use crate::renderer::{render_pixel, ImageBuffer};
use crate::{Color, Scene, TraceStats};

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Generate buckets covering a `width` x `height` image in row-major order.
///
/// Edge buckets are cropped to the image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh));
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
    /// Ray counters for this bucket
    pub stats: TraceStats,
}

/// Render a single bucket of an image `image_height` pixels tall.
pub fn render_bucket(bucket: &Bucket, scene: &Scene, image_height: u32) -> BucketResult {
    let mut stats = TraceStats::default();
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let global_x = bucket.x + local_x;
            let global_y = bucket.y + local_y;
            pixels.push(render_pixel(scene, global_x, global_y, image_height, &mut stats));
        }
    }

    BucketResult {
        bucket: *bucket,
        pixels,
        stats,
    }
}

/// Render the entire scene into `image`, in parallel over buckets.
pub fn render(scene: &Scene, image: &mut ImageBuffer) -> TraceStats {
    render_with_bucket_size(scene, image, DEFAULT_BUCKET_SIZE)
}

/// `render` with an explicit bucket size.
pub fn render_with_bucket_size(
    scene: &Scene,
    image: &mut ImageBuffer,
    bucket_size: u32,
) -> TraceStats {
    scene.freeze();

    let buckets = generate_buckets(image.width, image.height, bucket_size);
    log::info!(
        "Rendering {}x{} in {} buckets ({} samples/pixel, depth {}, shadows {})",
        image.width,
        image.height,
        buckets.len(),
        scene.settings().super_samples,
        scene.settings().max_depth,
        scene.settings().shadows
    );

    let height = image.height;
    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, scene, height))
        .collect();

    let mut stats = TraceStats::default();
    for result in &results {
        let bucket = &result.bucket;
        for (i, &color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            image.set(bucket.x + local_x, bucket.y + local_y, color);
        }
        stats.merge(&result.stats);
    }

    log::info!(
        "Traced {} rays and {} shadow rays (max nesting {})",
        stats.traced_rays,
        stats.shadow_rays,
        stats.max_nesting
    );
    stats
}
