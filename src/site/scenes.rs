//! Scene preparation: probe render, trim, final render, fade and crop.
//!
//! The result is cached per environment in the temp directory; delete it (or
//! run `folio clean`) to render again.

use std::future::Future;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use image::Rgba;

use super::config::{SiteConfig, SCALE_STEP};
use super::error::{BuildError, BuildResult};
use super::hash::content_hash;
use super::imaging::{self, TrimBounds};
use super::renderer::{self, RenderRequest};
use super::scene::{Scene, Sprite};

/// Channel difference tolerated when trimming a background against its colour.
const TRIM_THRESHOLD: u8 = 1;

pub fn cache_file(config: &SiteConfig) -> PathBuf {
    config
        .temp_dir
        .join(format!("scenes_{}_{}.json", SCALE_STEP, config.env_name()))
}

/// Returns the prepared scenes, rendering them when no cache exists.
pub async fn load_scenes(config: &SiteConfig) -> BuildResult<Vec<Scene>> {
    let cache = cache_file(config);

    let scenes = match read_cache(&cache).await {
        Some(scenes) => {
            log::info!("using cached scenes from {}", cache.display());
            scenes
        }
        None => prepare(config).await?,
    };

    let encoded = serde_json::to_vec(&scenes).map_err(|err| BuildError::json(&cache, err))?;
    tokio::fs::write(&cache, encoded)
        .await
        .map_err(|err| BuildError::io(&cache, err))?;

    Ok(scenes)
}

async fn read_cache(path: &Path) -> Option<Vec<Scene>> {
    let text = tokio::fs::read_to_string(path).await.ok()?;
    match serde_json::from_str(&text) {
        Ok(scenes) => Some(scenes),
        Err(err) => {
            log::warn!("ignoring unreadable scene cache {}: {err}", path.display());
            None
        }
    }
}

async fn prepare(config: &SiteConfig) -> BuildResult<Vec<Scene>> {
    let scenes = renderer::render(config, &RenderRequest::probe()).await?;
    log::info!("probed {} scenes", scenes.len());

    let scenes = map_scenes(scenes, background_color).await?;
    let scenes = map_scenes(scenes, |scene| fade_background(config, scene)).await?;
    let scenes = map_scenes(scenes, trim_background).await?;
    let scenes = map_scenes(scenes, trim_things).await?;

    let scenes = renderer::render(config, &RenderRequest::final_pass(config, scenes)).await?;

    let scenes = map_scenes(scenes, |scene| fade_background(config, scene)).await?;
    let scenes = map_scenes(scenes, crop_background).await?;
    map_scenes(scenes, crop_things).await
}

/// Runs one stage over every scene concurrently; the first failure wins.
async fn map_scenes<F, Fut>(scenes: Vec<Scene>, stage: F) -> BuildResult<Vec<Scene>>
where
    F: Fn(Scene) -> Fut,
    Fut: Future<Output = BuildResult<Scene>>,
{
    try_join_all(scenes.into_iter().map(stage)).await
}

async fn blocking<T, F>(work: F) -> BuildResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> BuildResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

async fn background_color(mut scene: Scene) -> BuildResult<Scene> {
    let file = scene.background.color.render.file.clone();
    let color = blocking(move || Ok(imaging::center_color(&imaging::open(&file)?))).await?;

    scene.background.color.css = imaging::css_rgb(color);
    log::debug!("scene {} background {}", scene.name, scene.background.color.css);
    Ok(scene)
}

/// Vignettes the background render into the scene colour, writing `*_faded.png`.
async fn fade_background(config: &SiteConfig, mut scene: Scene) -> BuildResult<Scene> {
    let source = scene.background.render.file.clone();
    let faded = imaging::with_suffix(&source, "faded");
    let mask_file = imaging::with_suffix(&source, "fade");

    let render_scale = scene.background.render.scale;
    let width = (scene.width * render_scale).round().max(1.0) as u32;
    let height = (scene.height * render_scale).round().max(1.0) as u32;
    let horizontal = config.is_default_scene(&scene.name);
    let seed = fade_seed(&scene.name);
    let color = imaging::parse_css_rgb(&scene.background.color.css).unwrap_or(image::Rgb([0, 0, 0]));

    let output = faded.clone();
    blocking(move || {
        let mask = imaging::fade_mask(width, height, render_scale, horizontal, seed);
        imaging::save(&image::DynamicImage::ImageLuma8(mask.clone()), &mask_file)?;

        let render = imaging::open(&source)?;
        let flattened = imaging::flatten_with_mask(&render, &mask, color);
        imaging::save(&image::DynamicImage::ImageRgb8(flattened), &output)
    })
    .await?;

    scene.background.render.file = faded;
    Ok(scene)
}

fn fade_seed(name: &str) -> u64 {
    u64::from_str_radix(&content_hash(name.as_bytes()), 16).unwrap_or_default()
}

async fn trim_background(mut scene: Scene) -> BuildResult<Scene> {
    let file = scene.background.render.file.clone();
    let render_scale = scene.background.render.scale;
    let scene_size = (scene.width, scene.height);
    let color = imaging::parse_css_rgb(&scene.background.color.css).unwrap_or(image::Rgb([0, 0, 0]));

    let bounds = blocking(move || {
        let image = imaging::open(&file)?.to_rgba8();
        let [r, g, b] = color.0;
        let content = imaging::content_bounds(&image, Rgba([r, g, b, 255]), TRIM_THRESHOLD)
            .unwrap_or_else(|| imaging::PixelRect::full(image.width(), image.height()));
        Ok(TrimBounds::snap(content, render_scale, scene_size, SCALE_STEP))
    })
    .await?;

    scene.background.place(bounds.x, bounds.y, bounds.width, bounds.height);
    Ok(scene)
}

async fn trim_things(mut scene: Scene) -> BuildResult<Scene> {
    let scene_size = (scene.width, scene.height);

    let bounds = try_join_all(scene.things.iter().map(|thing| {
        let file = thing.render.file.clone();
        let render_scale = thing.render.scale;
        blocking(move || {
            let image = imaging::open(&file)?.to_rgba8();
            let content = imaging::transparent_content(&image);
            Ok(TrimBounds::snap(content, render_scale, scene_size, SCALE_STEP))
        })
    }))
    .await?;

    for (thing, bounds) in scene.things.iter_mut().zip(bounds) {
        thing.place(bounds.x, bounds.y, bounds.width, bounds.height);
    }
    Ok(scene)
}

fn sprite_bounds(sprite: &dyn Sprite) -> TrimBounds {
    let (x, y, width, height) = sprite.bounds();
    TrimBounds { x, y, width, height }
}

/// Extracts the trimmed region into `*_cropped.png` and rebases the render at the origin.
fn crop_file(source: PathBuf, bounds: TrimBounds, render_scale: f64) -> BuildResult<PathBuf> {
    let output = imaging::with_suffix(&source, "cropped");
    let image = imaging::open(&source)?;
    let cropped = imaging::crop(&image, bounds.pixel_rect(render_scale), &source)?;
    imaging::save(&cropped, &output)?;
    Ok(output)
}

async fn crop_background(mut scene: Scene) -> BuildResult<Scene> {
    let bounds = sprite_bounds(&scene.background);
    let source = scene.background.render.file.clone();
    let render_scale = scene.background.render.scale;

    let file = blocking(move || crop_file(source, bounds, render_scale)).await?;

    scene.background.render.file = file;
    scene.background.render.x = 0.0;
    scene.background.render.y = 0.0;
    Ok(scene)
}

async fn crop_things(mut scene: Scene) -> BuildResult<Scene> {
    let files = try_join_all(scene.things.iter().map(|thing| {
        let bounds = sprite_bounds(thing);
        let source = thing.render.file.clone();
        let render_scale = thing.render.scale;
        blocking(move || crop_file(source, bounds, render_scale))
    }))
    .await?;

    for (thing, file) in scene.things.iter_mut().zip(files) {
        thing.render.file = file;
        thing.render.x = 0.0;
        thing.render.y = 0.0;
    }
    Ok(scene)
}
