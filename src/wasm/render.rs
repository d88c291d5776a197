use std::cell::RefCell;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, WebGl2RenderingContext as GL, Window};

use super::programs::{GlowProgram, LineProgram};
use crate::frame::FrameClock;
use crate::geometry::{self, GlowInstance};
use crate::projection::{Projection, Viewport};
use crate::sim::{FieldConfig, IconField};

const ICON_COLORS: [Vec3; 3] = [
    Vec3::new(0.086, 0.639, 0.29),
    Vec3::new(0.98, 0.8, 0.082),
    Vec3::new(0.078, 0.722, 0.651),
];

const DEPTH: f32 = 400.0;
const LINE_WIDTH: f32 = 2.0;
const GLOW_SEGMENTS: usize = 32;
const GLOW_INTENSITY: f32 = 0.6;
const GRID_CELL: f32 = 34.0;
const GRID_DOT: Vec3 = Vec3::splat(0.12);

struct Sketch {
    gl: GL,
    canvas: HtmlCanvasElement,
    projection: Projection,
    field: IconField,
    clock: FrameClock,
    lines: LineProgram,
    glow: GlowProgram,
    grid: Vec<GlowInstance>,
    glows: Vec<GlowInstance>,
}

impl Sketch {
    fn resize(&mut self, window: &Window) {
        let viewport = Viewport::new(inner_size(window.inner_width()), inner_size(window.inner_height()));
        if !self.projection.resize(viewport, window.device_pixel_ratio() as f32) {
            return;
        }

        let (width, height) = self.projection.physical_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gl.viewport(0, 0, width as i32, height as i32);

        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width.round()));
        let _ = style.set_property("height", &format!("{}px", viewport.height.round()));

        self.field.resize(Vec2::new(viewport.width, viewport.height));
        self.grid = geometry::grid_offsets(viewport, GRID_CELL)
            .into_iter()
            .map(|[col, row]| GlowInstance {
                position: [(col + 0.5) * GRID_CELL, (row + 0.5) * GRID_CELL, -DEPTH * 0.5],
                color: GRID_DOT.to_array(),
                radius: 2.0,
            })
            .collect();

        log::debug!(
            "sketch resized to {}x{} @ {}",
            viewport.width,
            viewport.height,
            self.projection.dpr()
        );
    }

    fn frame(&mut self, time: f64) {
        if let Some(frame) = self.clock.tick(time) {
            self.field.step(frame.dt);
        }
        self.draw();
    }

    fn draw(&mut self) {
        let gl = &self.gl;
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        let projection = self.projection.matrix();
        let icon_size = self.field.config().icon_size;

        self.glows.clear();
        self.glows.extend(self.field.icons().iter().map(|icon| GlowInstance {
            position: icon.translation.extend(-icon_size).to_array(),
            color: icon.color.to_array(),
            radius: icon_size * 1.5,
        }));

        self.glow.use_program(gl);
        self.glow.set_projection(gl, &projection);
        self.glow.draw(gl, &self.grid, 1.0);
        self.glow.draw(gl, &self.glows, GLOW_INTENSITY);

        self.lines.use_program(gl);
        self.lines.set_projection(gl, &projection);
        self.lines.set_width(gl, LINE_WIDTH);
        self.lines.set_depth_range(gl, icon_size);
        for icon in self.field.icons() {
            self.lines.draw(gl, &icon.model(), icon.color);
        }
    }
}

fn inner_size(value: Result<JsValue, JsValue>) -> f32 {
    value.ok().and_then(|value| value.as_f64()).unwrap_or(0.0) as f32
}

/// Starts the icon sketch on `canvas`: a few wireframe icons that drift, repel each
/// other and keep clear of the viewport edges.
pub fn start(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into()?;

    let seed = js_sys::Date::now().to_bits();
    let bounds = Vec2::new(inner_size(window.inner_width()), inner_size(window.inner_height()));
    let config = FieldConfig {
        bounds,
        default_speed: GRID_CELL,
        ..FieldConfig::default()
    };

    let mut field = IconField::scatter(config, ICON_COLORS.len(), seed);
    for (icon, color) in field.icons_mut().iter_mut().zip(ICON_COLORS) {
        *icon = icon.with_color(color);
    }

    let sketch = Rc::new(RefCell::new(Sketch {
        lines: LineProgram::cube(&gl)?,
        glow: GlowProgram::new(&gl, GLOW_SEGMENTS)?,
        gl,
        canvas,
        projection: Projection::orthographic(DEPTH),
        field,
        clock: FrameClock::new(),
        grid: Vec::new(),
        glows: Vec::with_capacity(ICON_COLORS.len()),
    }));
    sketch.borrow_mut().resize(&window);

    let resize_closure = {
        let sketch = sketch.clone();
        Closure::wrap(Box::new(move || {
            if let Some(window) = web_sys::window() {
                sketch.borrow_mut().resize(&window);
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // The frame closure reschedules itself, so it lives in a slot it can reach.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
        sketch.borrow_mut().frame(time);

        if let Err(err) = request_frame(&f) {
            log::error!("icon sketch stopped: {err:?}");
        }
    }) as Box<dyn FnMut(f64)>));

    request_frame(&g)?;
    log::info!("icon sketch started");
    Ok(())
}

pub(super) fn request_frame(slot: &Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>) -> Result<i32, JsValue> {
    let window = window().ok_or("no window")?;
    let slot = slot.borrow();
    let callback = slot.as_ref().ok_or("frame callback missing")?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}
