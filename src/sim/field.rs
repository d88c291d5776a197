use std::f32::consts::TAU;

use glam::{Mat4, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::{Icon, RotationMode};

/// Tuning for [`IconField`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FieldConfig {
    /// Inverse-square repulsion coefficient shared by icon pairs and viewport edges.
    pub repulsion: f32,
    /// Icon diameter in pixels; subtracted from pair distances before the force law.
    pub icon_size: f32,
    /// Speed every icon relaxes toward, in pixels per second.
    pub default_speed: f32,
    /// Viewport size in logical pixels. Edge repulsion is off while either side is zero.
    pub bounds: Vec2,
    pub rotation: RotationMode,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            repulsion: 1000.0,
            icon_size: 45.0,
            default_speed: 30.0,
            bounds: Vec2::ZERO,
            rotation: RotationMode::default(),
        }
    }
}

/// Explicit-Euler soft-repulsion simulation over a handful of icons.
///
/// Pairs are visited with a plain O(n²) loop; the sketches never hold more than a
/// dozen icons.
#[derive(Debug, Clone)]
pub struct IconField {
    config: FieldConfig,
    icons: Vec<Icon>,
}

impl IconField {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            icons: Vec::new(),
        }
    }

    pub fn with_icons(config: FieldConfig, icons: Vec<Icon>) -> Self {
        Self { config, icons }
    }

    /// Places `count` icons uniformly inside the bounds (kept one icon size away
    /// from every edge) with random headings at the default speed.
    pub fn scatter(config: FieldConfig, count: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut field = Self::new(config);

        for _ in 0..count {
            let x = sample_axis(&mut rng, config.bounds.x, config.icon_size);
            let y = sample_axis(&mut rng, config.bounds.y, config.icon_size);
            let heading = Vec2::from_angle(rng.gen_range(0.0..TAU));

            field.icons.push(Icon::new(
                Vec2::new(x, y),
                heading * config.default_speed,
                config.icon_size,
            ));
        }

        field
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn icons(&self) -> &[Icon] {
        &self.icons
    }

    pub fn icons_mut(&mut self) -> &mut [Icon] {
        &mut self.icons
    }

    pub fn push(&mut self, icon: Icon) {
        self.icons.push(icon);
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Updates the viewport the icons are confined to.
    pub fn resize(&mut self, bounds: Vec2) {
        self.config.bounds = bounds;
    }

    /// Changes the icon size and rescales every icon to match.
    pub fn set_icon_size(&mut self, icon_size: f32) {
        self.config.icon_size = icon_size;
        for icon in &mut self.icons {
            icon.scale = icon_size;
        }
    }

    pub fn model(&self, index: usize) -> Option<Mat4> {
        self.icons.get(index).map(Icon::model)
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Forces from every pair and every edge are accumulated into velocities before
    /// any position moves, so the result does not depend on icon order.
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }

        let FieldConfig {
            repulsion,
            icon_size,
            default_speed,
            bounds,
            rotation,
        } = self.config;

        let count = self.icons.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let a = self.icons[i].translation;
                let b = self.icons[j].translation;

                let distance = (a.distance(b) - icon_size).max(1.0);
                let direction = (a - b).try_normalize().unwrap_or(Vec2::X);
                let impulse = direction * (repulsion / (distance * distance) * dt);

                self.icons[i].velocity += impulse;
                self.icons[j].velocity -= impulse;
            }
        }

        if bounds.x > 0.0 && bounds.y > 0.0 {
            let half = icon_size * 0.5;
            for icon in &mut self.icons {
                let t = icon.translation;
                let edges = [
                    (t.x - half, Vec2::X),
                    (bounds.x - t.x - half, Vec2::NEG_X),
                    (t.y - half, Vec2::Y),
                    (bounds.y - t.y - half, Vec2::NEG_Y),
                ];

                for (gap, push) in edges {
                    let distance = gap.max(1.0);
                    icon.velocity += push * (repulsion / (distance * distance) * dt);
                }
            }
        }

        for icon in &mut self.icons {
            icon.translation += icon.velocity * dt;

            let speed = icon.velocity.length();
            let heading = icon.velocity.normalize_or_zero();
            icon.velocity += heading * ((default_speed - speed) * dt);

            icon.rotation = rotation.advance(icon.rotation, icon.velocity, default_speed, dt);
        }
    }
}

fn sample_axis(rng: &mut SmallRng, extent: f32, margin: f32) -> f32 {
    let low = margin.min(extent * 0.5);
    let high = (extent - margin).max(low);
    if high > low {
        rng.gen_range(low..high)
    } else {
        low
    }
}
