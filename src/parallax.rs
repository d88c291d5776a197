//! Parallax offset for the composited scene layers.
//!
//! While the pointer is active the layers lean toward it; after
//! [`FOLLOW_TIMEOUT_MS`] of stillness they drift on a slow orbit whose pull
//! strengthens frame by frame.

use std::f32::consts::PI;

use glam::Vec2;

pub const FOLLOW_TIMEOUT_MS: f64 = 15_000.0;
const FOLLOW_RIGIDITY: f32 = 0.5;
const RIGIDITY_STEP: f32 = 0.001;

#[derive(Debug, Clone)]
pub struct Parallax {
    window: Vec2,
    pointer: Vec2,
    last_pointer_move: Option<f64>,
    offset: Vec2,
    rigidity: f32,
}

impl Parallax {
    pub fn new(window: Vec2) -> Self {
        Self {
            window,
            pointer: window * 0.5,
            last_pointer_move: None,
            offset: Vec2::ZERO,
            rigidity: 0.0,
        }
    }

    pub fn resize(&mut self, window: Vec2) {
        self.window = window;
    }

    pub fn pointer_moved(&mut self, position: Vec2, time: f64) {
        self.pointer = position;
        self.last_pointer_move = Some(time);
    }

    pub fn is_following(&self) -> bool {
        self.last_pointer_move.is_some()
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn rigidity(&self) -> f32 {
        self.rigidity
    }

    /// Eases the offset toward this frame's target and returns it. Offsets are in
    /// `[-0.5, 0.5]` on both axes.
    pub fn update(&mut self, time: f64, parallax_amount: f32) -> Vec2 {
        if let Some(moved) = self.last_pointer_move {
            if time - moved > FOLLOW_TIMEOUT_MS {
                self.last_pointer_move = None;
                self.rigidity = 0.0;
            }
        }

        let target = if self.is_following() && self.window.x > 0.0 && self.window.y > 0.0 {
            self.rigidity = FOLLOW_RIGIDITY;
            self.pointer / self.window - Vec2::splat(0.5)
        } else {
            if self.rigidity < 1.0 {
                self.rigidity = (self.rigidity + RIGIDITY_STEP).min(1.0);
            }
            orbit(time, parallax_amount)
        };

        self.offset += (target - self.offset) * self.rigidity;
        self.offset
    }
}

fn orbit(time: f64, parallax_amount: f32) -> Vec2 {
    if parallax_amount <= 0.0 {
        return Vec2::ZERO;
    }

    let speed = 1.0 / (PI as f64 * parallax_amount as f64) * 0.02;
    let angle = time * speed;
    Vec2::new(angle.sin() as f32, angle.cos() as f32) * 0.5
}

/// Pixel translation of a layer at depth `z`.
#[inline]
pub fn layer_translation(offset: Vec2, z: f32, parallax_amount: f32) -> Vec2 {
    offset * z * parallax_amount
}
