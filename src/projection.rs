//! Pixel-space projections for the canvas sketches.

use glam::{Mat4, Vec3};

/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Backing-store size for a canvas at the given device pixel ratio.
    pub fn physical(self, dpr: f32) -> (u32, u32) {
        (
            (self.width * dpr).round().max(0.0) as u32,
            (self.height * dpr).round().max(0.0) as u32,
        )
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ProjectionKind {
    /// Top-left origin, y pointing down, depth range `[-depth, depth]`.
    Orthographic { depth: f32 },
    /// Camera at `5 * height` in front of the viewport centre; the z = 0 plane maps
    /// one unit to one pixel.
    Perspective,
}

/// Projection matrix kept in sync with the canvas size.
#[derive(Debug, Clone)]
pub struct Projection {
    kind: ProjectionKind,
    viewport: Viewport,
    dpr: f32,
    matrix: Mat4,
}

impl Projection {
    pub fn orthographic(depth: f32) -> Self {
        Self::new(ProjectionKind::Orthographic { depth })
    }

    pub fn perspective() -> Self {
        Self::new(ProjectionKind::Perspective)
    }

    pub fn new(kind: ProjectionKind) -> Self {
        Self {
            kind,
            viewport: Viewport::default(),
            dpr: 1.0,
            matrix: Mat4::IDENTITY,
        }
    }

    /// Recomputes the matrix for a new viewport. Returns `false` and keeps the
    /// previous state while the viewport or ratio is degenerate.
    pub fn resize(&mut self, viewport: Viewport, dpr: f32) -> bool {
        if !viewport.is_valid() || !(dpr > 0.0) {
            return false;
        }

        self.viewport = viewport;
        self.dpr = dpr;
        self.matrix = match self.kind {
            ProjectionKind::Orthographic { depth } => pixel_orthographic(viewport, depth),
            ProjectionKind::Perspective => pixel_perspective(viewport),
        };
        true
    }

    pub fn set_kind(&mut self, kind: ProjectionKind) {
        self.kind = kind;
        if self.viewport.is_valid() {
            self.resize(self.viewport, self.dpr);
        }
    }

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[inline]
    pub fn dpr(&self) -> f32 {
        self.dpr
    }

    pub fn physical_size(&self) -> (u32, u32) {
        self.viewport.physical(self.dpr)
    }

    /// Projects a pixel-space point to normalised device coordinates.
    pub fn to_ndc(&self, point: Vec3) -> Vec3 {
        self.matrix.project_point3(point)
    }
}

pub fn pixel_orthographic(viewport: Viewport, depth: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, viewport.width, viewport.height, 0.0, -depth, depth)
}

pub fn pixel_perspective(viewport: Viewport) -> Mat4 {
    let depth = viewport.height * 5.0;
    let fov = 2.0 * (viewport.height * 0.5 / depth).atan();

    let projection = Mat4::perspective_rh_gl(
        fov,
        viewport.width / viewport.height,
        depth - viewport.height,
        depth + viewport.height,
    );
    // Pixel y points down, as in the orthographic projection.
    let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -depth))
        * Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0))
        * Mat4::from_translation(Vec3::new(-viewport.width * 0.5, -viewport.height * 0.5, 0.0));

    projection * view
}
