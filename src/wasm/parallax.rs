use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, HtmlElement, MediaQueryList, MouseEvent, Window};

use super::render::request_frame;
use crate::parallax::{layer_translation, Parallax};

struct Layer {
    element: HtmlElement,
    z: f32,
}

struct SceneLayers {
    media: MediaQueryList,
    parallax_amount: f32,
    layers: Vec<Layer>,
}

struct Driver {
    scenes: Vec<SceneLayers>,
    current: usize,
    parallax: Parallax,
}

impl Driver {
    /// The last scene whose media query matches; scenes are held widest first.
    fn select_scene(&mut self) {
        if let Some(index) = self.scenes.iter().rposition(|scene| scene.media.matches()) {
            self.current = index;
        }
    }

    fn frame(&mut self, time: f64) {
        let Some(scene) = self.scenes.get(self.current) else {
            return;
        };

        let offset = self.parallax.update(time, scene.parallax_amount);
        for layer in &scene.layers {
            let shift = layer_translation(offset, layer.z, scene.parallax_amount);
            let _ = layer
                .element
                .style()
                .set_property("transform", &format!("translate3d({}px, {}px, 1px)", shift.x, shift.y));
        }
    }
}

fn window_size(window: &Window) -> Vec2 {
    let size = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    Vec2::new(size(window.inner_width()), size(window.inner_height()))
}

fn elements(root: &Document, scope: Option<&HtmlElement>, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let list = match scope {
        Some(element) => element.query_selector_all(selector)?,
        None => root.query_selector_all(selector)?,
    };

    Ok((0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

fn load_scenes(window: &Window, document: &Document, scene_selector: &str, object_selector: &str) -> Result<Vec<SceneLayers>, JsValue> {
    let mut scenes = Vec::new();

    for element in elements(document, None, scene_selector)? {
        let data = element.dataset();
        let query = data.get("mediaQuery").unwrap_or_else(|| "screen".into());
        let media = window.match_media(&query)?.ok_or("matchMedia unavailable")?;
        let parallax_amount = data
            .get("parallaxAmount")
            .and_then(|value| value.parse::<f32>().ok())
            .unwrap_or(0.0);

        let layers = elements(document, Some(&element), object_selector)?
            .into_iter()
            .map(|element| {
                let z = element
                    .dataset()
                    .get("z")
                    .and_then(|value| value.parse::<f32>().ok())
                    .unwrap_or(0.0);
                Layer { element, z }
            })
            .collect();

        scenes.push(SceneLayers {
            media,
            parallax_amount,
            layers,
        });
    }

    scenes.reverse();
    Ok(scenes)
}

/// Moves every object of the active scene by its depth each frame.
pub fn start(window: Window, scene_selector: &str, object_selector: &str) -> Result<(), JsValue> {
    let document = window.document().ok_or("no document")?;
    let scenes = load_scenes(&window, &document, scene_selector, object_selector)?;

    if scenes.is_empty() {
        log::warn!("no scenes match {scene_selector}");
        return Ok(());
    }
    log::info!("parallax over {} scenes", scenes.len());

    let driver = Rc::new(RefCell::new(Driver {
        scenes,
        current: 0,
        parallax: Parallax::new(window_size(&window)),
    }));
    driver.borrow_mut().select_scene();

    let on_change = {
        let driver = driver.clone();
        Closure::wrap(Box::new(move || driver.borrow_mut().select_scene()) as Box<dyn FnMut()>)
    };
    for scene in &driver.borrow().scenes {
        scene
            .media
            .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    }
    on_change.forget();

    let on_resize = {
        let driver = driver.clone();
        Closure::wrap(Box::new(move || {
            if let Some(window) = web_sys::window() {
                driver.borrow_mut().parallax.resize(window_size(&window));
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    let on_mouse_move = {
        let driver = driver.clone();
        let performance = window.performance();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let now = performance.as_ref().map(|p| p.now()).unwrap_or_default();
            let position = Vec2::new(event.client_x() as f32, event.client_y() as f32);
            driver.borrow_mut().parallax.pointer_moved(position, now);
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    window.add_event_listener_with_callback("mousemove", on_mouse_move.as_ref().unchecked_ref())?;
    on_mouse_move.forget();

    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
        driver.borrow_mut().frame(time);

        if let Err(err) = request_frame(&f) {
            log::error!("parallax stopped: {err:?}");
        }
    }) as Box<dyn FnMut(f64)>));

    request_frame(&g)?;
    Ok(())
}
