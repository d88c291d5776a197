use glam::{Mat4, Quat, Vec2, Vec3};

/// A decorative rigid body drawn as an instanced mesh.
///
/// Positions are in logical pixels with the origin at the top-left corner of
/// the viewport; velocity is in pixels per second.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Icon {
    pub translation: Vec2,
    pub velocity: Vec2,
    pub rotation: Quat,
    /// Uniform scale, equal to the icon size in pixels.
    pub scale: f32,
    /// Linear RGB used for the glow drawn underneath the icon.
    pub color: Vec3,
}

impl Icon {
    pub fn new(translation: Vec2, velocity: Vec2, scale: f32) -> Self {
        Self {
            translation,
            velocity,
            rotation: Quat::IDENTITY,
            scale,
            color: Vec3::ONE,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Model matrix placing the unit mesh at the icon's translation on the z = 0 plane.
    pub fn model(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation,
            self.translation.extend(0.0),
        )
    }
}
