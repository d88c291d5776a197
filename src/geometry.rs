//! Shared meshes and per-instance records for the instanced renderers.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::projection::Viewport;

/// Line quad template. `x` runs along the segment, `y` across it (both scaled by
/// the line width) and `z` blends between the segment's start (0) and end (1).
pub const SEGMENT: [[f32; 3]; 12] = [
    [-0.5, 0.0, 0.0],
    [0.0, 0.5, 0.0],
    [0.5, 0.0, 1.0],
    [0.0, 0.5, 0.0],
    [0.0, 0.5, 1.0],
    [0.5, 0.0, 1.0],
    [-0.5, 0.0, 0.0],
    [0.0, -0.5, 0.0],
    [0.5, 0.0, 1.0],
    [0.0, -0.5, 0.0],
    [0.5, 0.0, 1.0],
    [0.0, -0.5, 1.0],
];

/// One instanced line segment.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub start: [f32; 3],
    pub end: [f32; 3],
}

impl LineInstance {
    pub const STRIDE: i32 = std::mem::size_of::<Self>() as i32;

    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start: start.to_array(),
            end: end.to_array(),
        }
    }
}

/// One instanced glow disc.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GlowInstance {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub radius: f32,
}

impl GlowInstance {
    pub const STRIDE: i32 = std::mem::size_of::<Self>() as i32;
}

const CUBE_CORNERS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
    [0.0, 1.0, 1.0],
];

const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (3, 7),
    (2, 6),
];

/// The twelve edges of a unit cube centred on the origin.
pub fn cube_edges() -> [LineInstance; 12] {
    let corner = |index: usize| Vec3::from_array(CUBE_CORNERS[index]) - Vec3::splat(0.5);
    CUBE_EDGES.map(|(a, b)| LineInstance::new(corner(a), corner(b)))
}

/// Triangle list for a unit-radius disc in the xy plane.
pub fn circle(segments: usize) -> Vec<[f32; 2]> {
    let segments = segments.max(3);
    let point = |k: usize| {
        let angle = k as f32 / segments as f32 * TAU;
        [angle.cos(), angle.sin()]
    };

    let mut vertices = Vec::with_capacity(segments * 3);
    for k in 0..segments {
        vertices.push([0.0, 0.0]);
        vertices.push(point(k));
        vertices.push(point(k + 1));
    }
    vertices
}

/// `(col, row)` offsets for a background grid covering the viewport.
pub fn grid_offsets(viewport: Viewport, cell: f32) -> Vec<[f32; 2]> {
    if !viewport.is_valid() || !(cell > 0.0) {
        return Vec::new();
    }

    let cols = (viewport.width / cell).ceil() as usize;
    let rows = (viewport.height / cell).ceil() as usize;

    let mut offsets = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            offsets.push([col as f32, row as f32]);
        }
    }
    offsets
}
