//! Requests to the external scene renderer.
//!
//! The renderer is an opaque collaborator: it receives a JSON request on its
//! command line, writes sprite files somewhere under the temp directory and
//! leaves a JSON array of [`Scene`] records at the requested path.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::config::{SiteConfig, SCALE_STEP};
use super::error::{BuildError, BuildResult};
use super::hash::content_hash;
use super::process;
use super::scene::Scene;

/// Sample count and resolution scale for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PassSettings {
    pub samples: u32,
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundSettings {
    pub samples: u32,
    pub scale: f64,
    pub color: PassSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    pub things: PassSettings,
    pub background: BackgroundSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenes: Option<Vec<Scene>>,
}

const COLOR_PASS: PassSettings = PassSettings {
    samples: 256,
    scale: 0.25,
};

impl RenderRequest {
    /// Cheap low-resolution pass used to find trim bounds.
    pub fn probe() -> Self {
        Self {
            things: PassSettings {
                samples: 16,
                scale: SCALE_STEP,
            },
            background: BackgroundSettings {
                samples: 32,
                scale: SCALE_STEP,
                color: COLOR_PASS,
            },
            scenes: None,
        }
    }

    /// Full-resolution pass over the probed and trimmed scenes.
    pub fn final_pass(config: &SiteConfig, scenes: Vec<Scene>) -> Self {
        let scale = config.scale_max();
        let samples = |budget: f64| (budget / (scale * scale)).round() as u32;

        Self {
            things: PassSettings {
                samples: samples(if config.dev { 128.0 } else { 4096.0 }),
                scale,
            },
            background: BackgroundSettings {
                samples: samples(if config.dev { 32.0 } else { 128.0 }),
                scale,
                color: COLOR_PASS,
            },
            scenes: Some(scenes),
        }
    }

    /// Where the renderer is asked to leave its scene list.
    pub fn output_file(&self, temp_dir: &Path) -> BuildResult<PathBuf> {
        let encoded = serde_json::to_vec(self).map_err(|err| BuildError::json(temp_dir, err))?;
        Ok(temp_dir.join(format!("scenes_{}.json", content_hash(&encoded))))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Invocation<'a> {
    #[serde(flatten)]
    request: &'a RenderRequest,
    scene_name_whitelist: &'a [String],
    file: &'a Path,
}

/// Command-line arguments for one renderer run.
pub fn arguments(config: &SiteConfig, request: &RenderRequest, file: &Path) -> BuildResult<Vec<String>> {
    let invocation = Invocation {
        request,
        scene_name_whitelist: &config.scene_name_whitelist,
        file,
    };
    let payload = serde_json::to_string(&invocation).map_err(|err| BuildError::json(file, err))?;

    Ok(vec![
        config.resources_dir.join("scenes.blend").display().to_string(),
        "--background".into(),
        "--python-exit-code".into(),
        "1".into(),
        "--python".into(),
        config.renderer_script.display().to_string(),
        "--".into(),
        payload,
    ])
}

/// Runs the renderer and reads back its scene list.
pub async fn render(config: &SiteConfig, request: &RenderRequest) -> BuildResult<Vec<Scene>> {
    let file = request.output_file(&config.temp_dir)?;
    let args = arguments(config, request, &file)?;

    log::info!(
        "rendering scenes (things: {} samples @ {}x, background: {} samples @ {}x)",
        request.things.samples,
        request.things.scale,
        request.background.samples,
        request.background.scale
    );

    process::run(&config.renderer, &args).await?;

    let text = tokio::fs::read_to_string(&file)
        .await
        .map_err(|err| BuildError::io(&file, err))?;
    serde_json::from_str(&text).map_err(|err| BuildError::json(&file, err))
}
