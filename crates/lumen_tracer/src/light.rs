//! Point light source.

use lumen_math::{Color, Point};

/// A point light with no distance falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point,
    pub color: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Point, color: Color) -> Self {
        Self { position, color }
    }
}
