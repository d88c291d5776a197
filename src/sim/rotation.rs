use glam::{Quat, Vec2, Vec3};

/// How an icon's orientation evolves between frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum RotationMode {
    /// Velocity components spin the icon about X and Y; Z turns at one radian per second.
    Velocity { gain: f32 },
    /// Constant angular rates (radians per second) about X, Y and Z.
    Time { rates: Vec3 },
    Still,
}

impl Default for RotationMode {
    fn default() -> Self {
        Self::Velocity { gain: 0.01 }
    }
}

impl RotationMode {
    /// Returns `rotation` advanced by `dt` seconds.
    pub fn advance(self, rotation: Quat, velocity: Vec2, default_speed: f32, dt: f32) -> Quat {
        let angles = match self {
            Self::Velocity { gain } => Vec3::new(
                velocity.x * default_speed * dt * gain,
                velocity.y * default_speed * dt * gain,
                dt,
            ),
            Self::Time { rates } => rates * dt,
            Self::Still => return rotation,
        };

        (rotation
            * Quat::from_rotation_x(angles.x)
            * Quat::from_rotation_y(angles.y)
            * Quat::from_rotation_z(angles.z))
        .normalize()
    }
}
