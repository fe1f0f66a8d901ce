//! Image synthesis.
//!
//! Implements the per-pixel sampling loop:
//! - Primary rays from the eye through the pixel grid on the z = 0 plane
//! - Diagonal supersampling at offsets i / factor, i in 1..=factor
//! - Averaging and [0, 1] clamping into an `ImageBuffer`

use std::path::Path;

use crate::{Scene, TraceStats};
use lumen_math::{Color, Interval, Point, Ray};

/// Clamp each channel of a color to [0, 1].
#[inline]
pub fn clamp_color(color: Color) -> Color {
    Color::new(
        Interval::UNIT.clamp(color.x),
        Interval::UNIT.clamp(color.y),
        Interval::UNIT.clamp(color.z),
    )
}

/// Convert a color to 8-bit RGB. Linear, no gamma correction.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let c = clamp_color(color);
    [
        (255.0 * c.x).round() as u8,
        (255.0 * c.y).round() as u8,
        (255.0 * c.z).round() as u8,
    ]
}

/// Compute the averaged, clamped color of pixel (x, y).
///
/// Row `y` counts from the top of the image; world "up" is +y, so the
/// pixel is placed at world row `height - 1 - y`.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, height: u32, stats: &mut TraceStats) -> Color {
    let settings = scene.settings();
    let factor = settings.super_samples.max(1);
    let eye = scene.eye();
    let row = height.saturating_sub(1 + y) as f64;

    let mut pixel_color = Color::ZERO;
    for i in 1..=factor {
        let offset = i as f64 / factor as f64;
        let pixel = Point::new(x as f64 + offset, row + offset, 0.0);

        // An eye lying exactly on the sample position sees nothing
        if let Some(ray) = Ray::try_new(eye, pixel - eye) {
            pixel_color += scene.trace_with_stats(&ray, settings.max_depth, stats);
        }
    }

    clamp_color(pixel_color / factor as f64)
}

/// Image buffer storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} image",
            x,
            y,
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y), clamping every channel to [0, 1].
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = clamp_color(color);
    }

    /// Convert to packed RGB bytes, row-major from the top-left.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&c| color_to_rgb8(c)).collect()
    }

    /// Write the image to `path`. The format follows the file extension;
    /// only PNG encoding is compiled in.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let path = path.as_ref();
        let img = image::RgbImage::from_raw(self.width, self.height, self.to_rgb8())
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;
        img.save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Render the entire scene into `image` on the calling thread.
///
/// Produces exactly the same pixels as the parallel `render`.
pub fn render_serial(scene: &Scene, image: &mut ImageBuffer) -> TraceStats {
    scene.freeze();
    let mut stats = TraceStats::default();

    for y in 0..image.height {
        for x in 0..image.width {
            let color = render_pixel(scene, x, y, image.height, &mut stats);
            image.set(x, y, color);
        }
    }

    stats
}
