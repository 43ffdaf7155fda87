use glam::{Mat4, Quat, Vec3};

/// Places a model in the world: scale first, then rotate, then translate.
///
/// Changing that order changes the meaning of the transform. A unit
/// cylinder scaled then rotated becomes a tilted disc; rotated then scaled
/// it would be skewed instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    pub size_scale: Vec3,
    pub orientation: Quat,
    pub position: Vec3,
}

impl Transform3D {
    /// Unit scale, no rotation, origin position
    pub const IDENTITY: Self = Self {
        size_scale: Vec3::ONE,
        orientation: Quat::IDENTITY,
        position: Vec3::ZERO,
    };

    pub fn new(size_scale: Vec3, orientation: Quat, position: Vec3) -> Self {
        Self {
            size_scale,
            orientation,
            position,
        }
    }

    /// Model matrix `T * R * S`
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.size_scale, self.orientation, self.position)
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::IDENTITY
    }
}
