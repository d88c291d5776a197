#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn icon_sketch_starts_on_a_canvas() {
    let document = document();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    document.body().unwrap().append_child(&canvas).unwrap();

    folio::start_icons(canvas.clone()).expect("sketch starts");

    assert!(canvas.width() > 0 && canvas.height() > 0);
    let style = canvas.style();
    assert!(style.get_property_value("width").unwrap().ends_with("px"));
}

#[wasm_bindgen_test]
fn parallax_accepts_generated_markup() {
    let document = document();
    let scene = document.create_element("div").unwrap().dyn_into::<HtmlElement>().unwrap();
    scene.set_class_name("scene-test");
    scene.dataset().set("mediaQuery", "screen").unwrap();
    scene.dataset().set("parallaxAmount", "20").unwrap();

    let layer = document.create_element("div").unwrap().dyn_into::<HtmlElement>().unwrap();
    layer.set_class_name("layer-test");
    layer.dataset().set("z", "2").unwrap();
    scene.append_child(&layer).unwrap();
    document.body().unwrap().append_child(&scene).unwrap();

    folio::start_parallax(".scene-test", ".layer-test").expect("parallax starts");
}

#[wasm_bindgen_test]
fn parallax_without_scenes_is_a_no_op() {
    folio::start_parallax(".missing-scene", ".missing-layer").expect("nothing to drive");
}
