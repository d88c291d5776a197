//! Instanced line and glow programs. Each owns its VAO; locations are looked up
//! once here and reused every frame.

use glam::{Mat4, Vec3};
use wasm_bindgen::JsValue;
use web_sys::{WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlUniformLocation, WebGlVertexArrayObject};

use super::gl;
use crate::geometry::{self, GlowInstance, LineInstance, SEGMENT};

const LINE_VERT: &str = include_str!("shaders/line.vert");
const LINE_FRAG: &str = include_str!("shaders/line.frag");
const GLOW_VERT: &str = include_str!("shaders/glow.vert");
const GLOW_FRAG: &str = include_str!("shaders/glow.frag");

const FLOAT: i32 = std::mem::size_of::<f32>() as i32;

/// Draws a fixed set of segments as screen-facing quads, one instance per segment.
pub struct LineProgram {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    instance_count: i32,
    projection: WebGlUniformLocation,
    model: WebGlUniformLocation,
    width: WebGlUniformLocation,
    color: WebGlUniformLocation,
    depth_range: WebGlUniformLocation,
}

impl LineProgram {
    pub fn new(ctx: &GL, instances: &[LineInstance]) -> Result<Self, JsValue> {
        let program = gl::link_program(ctx, LINE_VERT, LINE_FRAG)?;

        let position = gl::attribute(ctx, &program, "a_pos")?;
        let start = gl::attribute(ctx, &program, "a_start")?;
        let end = gl::attribute(ctx, &program, "a_end")?;

        let vao = ctx.create_vertex_array().ok_or("unable to create vertex array")?;
        ctx.bind_vertex_array(Some(&vao));

        let segment = gl::static_buffer(ctx, bytemuck::cast_slice(&SEGMENT))?;
        gl::float_attribute(ctx, &segment, position, 3, 0, 0, 0);

        let edges = gl::static_buffer(ctx, bytemuck::cast_slice(instances))?;
        gl::float_attribute(ctx, &edges, start, 3, LineInstance::STRIDE, 0, 1);
        gl::float_attribute(ctx, &edges, end, 3, LineInstance::STRIDE, 3 * FLOAT, 1);

        ctx.bind_vertex_array(None);

        Ok(Self {
            projection: gl::uniform(ctx, &program, "u_projection")?,
            model: gl::uniform(ctx, &program, "u_model")?,
            width: gl::uniform(ctx, &program, "u_width")?,
            color: gl::uniform(ctx, &program, "u_color")?,
            depth_range: gl::uniform(ctx, &program, "u_depth_range")?,
            instance_count: instances.len() as i32,
            program,
            vao,
        })
    }

    /// Wireframe of a unit cube centred on the origin.
    pub fn cube(ctx: &GL) -> Result<Self, JsValue> {
        Self::new(ctx, &geometry::cube_edges())
    }

    pub fn use_program(&self, ctx: &GL) {
        ctx.use_program(Some(&self.program));
    }

    pub fn set_projection(&self, ctx: &GL, projection: &Mat4) {
        ctx.uniform_matrix4fv_with_f32_array(Some(&self.projection), false, &projection.to_cols_array());
    }

    pub fn set_width(&self, ctx: &GL, width: f32) {
        ctx.uniform1f(Some(&self.width), width);
    }

    pub fn set_depth_range(&self, ctx: &GL, range: f32) {
        ctx.uniform1f(Some(&self.depth_range), range.max(f32::EPSILON));
    }

    pub fn draw(&self, ctx: &GL, model: &Mat4, color: Vec3) {
        ctx.uniform_matrix4fv_with_f32_array(Some(&self.model), false, &model.to_cols_array());
        ctx.uniform3f(Some(&self.color), color.x, color.y, color.z);

        ctx.bind_vertex_array(Some(&self.vao));
        ctx.draw_arrays_instanced(GL::TRIANGLES, 0, SEGMENT.len() as i32, self.instance_count);
        ctx.bind_vertex_array(None);
    }
}

/// Additive soft discs; the instance buffer is rewritten every frame.
pub struct GlowProgram {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    instances: WebGlBuffer,
    vertex_count: i32,
    projection: WebGlUniformLocation,
    intensity: WebGlUniformLocation,
}

impl GlowProgram {
    pub fn new(ctx: &GL, segments: usize) -> Result<Self, JsValue> {
        let program = gl::link_program(ctx, GLOW_VERT, GLOW_FRAG)?;

        let position = gl::attribute(ctx, &program, "a_pos")?;
        let center = gl::attribute(ctx, &program, "a_center")?;
        let color = gl::attribute(ctx, &program, "a_color")?;
        let radius = gl::attribute(ctx, &program, "a_radius")?;

        let vao = ctx.create_vertex_array().ok_or("unable to create vertex array")?;
        ctx.bind_vertex_array(Some(&vao));

        let disc = geometry::circle(segments);
        let mesh = gl::static_buffer(ctx, bytemuck::cast_slice(&disc))?;
        gl::float_attribute(ctx, &mesh, position, 2, 0, 0, 0);

        let instances = ctx.create_buffer().ok_or("unable to create buffer")?;
        gl::float_attribute(ctx, &instances, center, 3, GlowInstance::STRIDE, 0, 1);
        gl::float_attribute(ctx, &instances, color, 3, GlowInstance::STRIDE, 3 * FLOAT, 1);
        gl::float_attribute(ctx, &instances, radius, 1, GlowInstance::STRIDE, 6 * FLOAT, 1);

        ctx.bind_vertex_array(None);

        Ok(Self {
            projection: gl::uniform(ctx, &program, "u_projection")?,
            intensity: gl::uniform(ctx, &program, "u_intensity")?,
            vertex_count: disc.len() as i32,
            program,
            vao,
            instances,
        })
    }

    pub fn use_program(&self, ctx: &GL) {
        ctx.use_program(Some(&self.program));
    }

    pub fn set_projection(&self, ctx: &GL, projection: &Mat4) {
        ctx.uniform_matrix4fv_with_f32_array(Some(&self.projection), false, &projection.to_cols_array());
    }

    /// Uploads `instances` and draws them with additive blending.
    pub fn draw(&self, ctx: &GL, instances: &[GlowInstance], intensity: f32) {
        if instances.is_empty() {
            return;
        }

        ctx.uniform1f(Some(&self.intensity), intensity);

        ctx.bind_buffer(GL::ARRAY_BUFFER, Some(&self.instances));
        ctx.buffer_data_with_u8_array(GL::ARRAY_BUFFER, bytemuck::cast_slice(instances), GL::DYNAMIC_DRAW);

        ctx.enable(GL::BLEND);
        ctx.blend_func(GL::ONE, GL::ONE);

        ctx.bind_vertex_array(Some(&self.vao));
        ctx.draw_arrays_instanced(GL::TRIANGLES, 0, self.vertex_count, instances.len() as i32);
        ctx.bind_vertex_array(None);

        ctx.disable(GL::BLEND);
    }
}
