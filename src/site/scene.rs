//! Scene records exchanged with the external renderer.
//!
//! The renderer fills in `render` blocks that arrive as `{}` on the first pass,
//! so every field here tolerates being absent.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where a sprite was written and at which scale, in scene pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneRender {
    pub file: PathBuf,
    pub scale: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneColor {
    pub css: String,
    pub render: SceneRender,
}

impl Default for SceneColor {
    fn default() -> Self {
        Self {
            css: "rgb(0, 0, 0)".into(),
            render: SceneRender::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneBackground {
    pub color: SceneColor,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    pub render: SceneRender,
}

/// A foreground sprite composited above the background.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thing {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    pub render: SceneRender,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Scene {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub background: SceneBackground,
    pub things: Vec<Thing>,
}

/// Sprite placement shared by backgrounds and things.
pub trait Sprite {
    fn bounds(&self) -> (f64, f64, f64, f64);
    fn z(&self) -> f64;
    fn render(&self) -> &SceneRender;
    fn render_mut(&mut self) -> &mut SceneRender;
    fn set_bounds(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Moves the sprite to new trimmed bounds; the render keeps the same offset.
    fn place(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.set_bounds(x, y, width, height);
        let render = self.render_mut();
        render.x = x;
        render.y = y;
    }
}

impl Sprite for SceneBackground {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.width, self.height)
    }

    fn set_bounds(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
    }

    fn z(&self) -> f64 {
        self.z
    }

    fn render(&self) -> &SceneRender {
        &self.render
    }

    fn render_mut(&mut self) -> &mut SceneRender {
        &mut self.render
    }
}

impl Sprite for Thing {
    fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.width, self.height)
    }

    fn set_bounds(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.x = x;
        self.y = y;
        self.width = width;
        self.height = height;
    }

    fn z(&self) -> f64 {
        self.z
    }

    fn render(&self) -> &SceneRender {
        &self.render
    }

    fn render_mut(&mut self) -> &mut SceneRender {
        &mut self.render
    }
}
