//! Browser entry points exported through wasm-bindgen.

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::logging::{init_logging, LoggingConfig};
use crate::SKETCH_CANVAS_ID;

mod gl;
mod parallax;
mod programs;
mod render;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    init_logging(LoggingConfig::default());

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    match document.get_element_by_id(SKETCH_CANVAS_ID) {
        Some(element) => start_icons(element.dyn_into::<HtmlCanvasElement>()?)?,
        None => log::debug!("no #{SKETCH_CANVAS_ID} canvas, icon sketch not started"),
    }
    Ok(())
}

/// Runs the icon sketch on `canvas` until the page unloads.
#[wasm_bindgen]
pub fn start_icons(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    render::start(canvas)
}

/// Starts the scene parallax. Called by the page's bootstrap script with the
/// generated scene and object selectors.
#[wasm_bindgen]
pub fn start_parallax(scene_selector: &str, object_selector: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    parallax::start(window, scene_selector, object_selector)
}
