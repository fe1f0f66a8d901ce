//! Phong surface material.

use crate::{SceneError, SceneResult};
use lumen_math::Color;

/// Material properties for Phong shading with optional transparency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color of the surface
    pub color: Color,
    /// Ambient coefficient
    pub ka: f64,
    /// Diffuse coefficient
    pub kd: f64,
    /// Specular coefficient, also the mirror weight of opaque surfaces
    pub ks: f64,
    /// Phong shininess exponent
    pub shininess: f64,
    /// Whether the surface refracts light
    pub transparent: bool,
    /// Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub refractive_index: f64,
}

impl Material {
    /// Create an opaque material.
    pub fn new(color: Color, ka: f64, kd: f64, ks: f64, shininess: f64) -> Self {
        Self {
            color,
            ka,
            kd,
            ks,
            shininess,
            transparent: false,
            refractive_index: 1.0,
        }
    }

    /// Make this material transparent with the given index of refraction.
    pub fn with_transparency(mut self, refractive_index: f64) -> Self {
        self.transparent = true;
        self.refractive_index = refractive_index;
        self
    }

    /// Check the material can be shaded without producing NaNs.
    pub fn validate(&self) -> SceneResult<()> {
        let coefficients = [
            ("ka", self.ka),
            ("kd", self.kd),
            ("ks", self.ks),
            ("shininess", self.shininess),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(SceneError::InvalidCoefficient { name, value });
            }
        }

        if !self.color.is_finite() {
            return Err(SceneError::InvalidCoefficient {
                name: "color",
                value: f64::NAN,
            });
        }

        if self.transparent && !(self.refractive_index > 0.0 && self.refractive_index.is_finite()) {
            return Err(SceneError::InvalidRefractiveIndex(self.refractive_index));
        }

        Ok(())
    }

    /// Schlick's approximation of the Fresnel reflectance, assuming the
    /// outside medium has index 1.
    pub fn reflectance(&self, cosine: f64) -> f64 {
        let r0 = ((1.0 - self.refractive_index) / (1.0 + self.refractive_index)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Color::splat(0.5), 0.2, 0.7, 0.0, 1.0)
    }
}
