// Object-to-world transforms baked into geometry at load time.
//
// Composition order is fixed: scale, then rotation about x, y and z (in that
// order), then translation.

use glam::{DMat4, DVec3};

/// Scale, Euler rotation (radians) and translation applied to object-space points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation
    pub translation: DVec3,

    /// Rotation about the x, y and z axes, in radians
    pub rotation: DVec3,

    /// Non-uniform scale
    pub scale: DVec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: DVec3::ZERO,
            rotation: DVec3::ZERO,
            scale: DVec3::ONE,
        }
    }
}

impl Transform {
    /// Create a transform from its three components.
    pub fn new(translation: DVec3, rotation: DVec3, scale: DVec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// The combined matrix `T * Rz * Ry * Rx * S`.
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_translation(self.translation)
            * DMat4::from_rotation_z(self.rotation.z)
            * DMat4::from_rotation_y(self.rotation.y)
            * DMat4::from_rotation_x(self.rotation.x)
            * DMat4::from_scale(self.scale)
    }
}
