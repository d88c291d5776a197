//! Sprite trimming, cropping and background fading.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::error::{BuildError, BuildResult};

/// Rectangle in image pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }
}

/// Sprite bounds in scene pixels, snapped outward to the scale step grid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrimBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TrimBounds {
    /// Converts `content` (pixels of a render made at `render_scale`) to scene
    /// pixels, grows it by one grid cell on every side, snaps it to multiples of
    /// `1 / step` and clamps it to the scene.
    pub fn snap(content: PixelRect, render_scale: f64, scene: (f64, f64), step: f64) -> Self {
        let scale = if render_scale > 0.0 { render_scale } else { 1.0 };

        let trim_x = content.x as f64 / scale;
        let trim_y = content.y as f64 / scale;
        let trim_width = content.width as f64 / scale;
        let trim_height = content.height as f64 / scale;

        let x1 = ((trim_x * step - step).floor() / step).max(0.0);
        let y1 = ((trim_y * step - step).floor() / step).max(0.0);
        let x2 = (((trim_x + trim_width) * step + step).ceil() / step).min(scene.0);
        let y2 = (((trim_y + trim_height) * step + step).ceil() / step).min(scene.1);

        Self {
            x: x1,
            y: y1,
            width: (x2 - x1).max(0.0),
            height: (y2 - y1).max(0.0),
        }
    }

    /// Same size, positioned at the origin of an already cropped sprite.
    pub fn at_origin(self) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            ..self
        }
    }

    /// Region to extract from a render made at `render_scale`.
    pub fn pixel_rect(&self, render_scale: f64) -> PixelRect {
        let px = |value: f64| (value * render_scale).round().max(0.0) as u32;
        PixelRect {
            x: px(self.x),
            y: px(self.y),
            width: px(self.width),
            height: px(self.height),
        }
    }
}

/// Smallest rectangle holding every pixel that differs from `background` by more
/// than `threshold` in any channel. `None` when the image is uniformly background.
pub fn content_bounds(image: &RgbaImage, background: Rgba<u8>, threshold: u8) -> Option<PixelRect> {
    bounds_where(image, |pixel| {
        pixel
            .0
            .iter()
            .zip(background.0.iter())
            .any(|(a, b)| a.abs_diff(*b) > threshold)
    })
}

/// Trim rectangle for a sprite rendered on a transparent film. Only alpha counts:
/// fully transparent pixels may carry any colour. An empty sprite keeps its whole
/// canvas.
pub fn transparent_content(image: &RgbaImage) -> PixelRect {
    bounds_where(image, |pixel| pixel.0[3] > 1)
        .unwrap_or_else(|| PixelRect::full(image.width(), image.height()))
}

fn bounds_where<F>(image: &RgbaImage, keep: F) -> Option<PixelRect>
where
    F: Fn(&Rgba<u8>) -> bool,
{
    let mut min = (u32::MAX, u32::MAX);
    let mut max = (0u32, 0u32);
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if keep(pixel) {
            found = true;
            min = (min.0.min(x), min.1.min(y));
            max = (max.0.max(x), max.1.max(y));
        }
    }

    found.then(|| PixelRect {
        x: min.0,
        y: min.1,
        width: max.0 - min.0 + 1,
        height: max.1 - min.1 + 1,
    })
}

/// Extracts `rect`, failing when it does not fit inside the image.
pub fn crop(image: &DynamicImage, rect: PixelRect, path: &Path) -> BuildResult<DynamicImage> {
    let fits = rect.width > 0
        && rect.height > 0
        && rect.x.checked_add(rect.width).is_some_and(|right| right <= image.width())
        && rect.y.checked_add(rect.height).is_some_and(|bottom| bottom <= image.height());

    if !fits {
        return Err(BuildError::Crop {
            path: path.to_path_buf(),
            reason: format!(
                "{}x{}+{}+{} outside {}x{}",
                rect.width,
                rect.height,
                rect.x,
                rect.y,
                image.width(),
                image.height()
            ),
        });
    }

    Ok(image.crop_imm(rect.x, rect.y, rect.width, rect.height))
}

/// Average colour around the centre of a render.
pub fn center_color(image: &DynamicImage) -> Rgb<u8> {
    let rgb = image.to_rgb8();
    let small = imageops::resize(&rgb, 3, 3, FilterType::Triangle);
    *small.get_pixel(1, 1)
}

pub fn css_rgb(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("rgb({r}, {g}, {b})")
}

/// Parses `rgb(r, g, b)` as produced by [`css_rgb`].
pub fn parse_css_rgb(css: &str) -> Option<Rgb<u8>> {
    let inner = css.trim().strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut channels = inner.split(',').map(|part| part.trim().parse::<u8>());

    let r = channels.next()?.ok()?;
    let g = channels.next()?.ok()?;
    let b = channels.next()?.ok()?;
    if channels.next().is_some() {
        return None;
    }

    Some(Rgb([r, g, b]))
}

/// Opacity of the edge gradient at `t` in `[0, 1]`: opaque at both ends, clear
/// across the middle half.
fn edge_opacity(t: f32) -> f32 {
    if t < 0.25 {
        1.0 - t / 0.25
    } else if t > 0.75 {
        (t - 0.75) / 0.25
    } else {
        0.0
    }
}

/// Vignette mask for a background render: white where the render shows, black
/// toward the faded edges. The top and bottom always fade; the sides only when
/// `horizontal` is set.
///
/// The mask is built in scene pixels, blurred by 32 scene pixels, scaled up to the
/// render size and dithered with Gaussian noise through a hard-light blend.
pub fn fade_mask(width: u32, height: u32, render_scale: f64, horizontal: bool, seed: u64) -> GrayImage {
    let scale = if render_scale > 0.0 { render_scale } else { 1.0 };
    let small_width = ((width as f64 / scale).round() as u32).max(1);
    let small_height = ((height as f64 / scale).round() as u32).max(1);

    let vignette = GrayImage::from_fn(small_width, small_height, |x, y| {
        let gx = if horizontal {
            edge_opacity(x as f32 / (small_width.max(2) - 1) as f32)
        } else {
            0.0
        };
        let gy = edge_opacity(y as f32 / (small_height.max(2) - 1) as f32);
        Luma([((1.0 - gx) * (1.0 - gy) * 255.0).round() as u8])
    });

    let blurred = imageops::blur(&vignette, 32.0);
    let mut mask = imageops::resize(&blurred, width, height, FilterType::Triangle);

    let mut rng = SmallRng::seed_from_u64(seed);
    for pixel in mask.pixels_mut() {
        let noise = (128.0 + gaussian(&mut rng) * 8.0).clamp(0.0, 255.0) / 255.0;
        let blend = pixel.0[0] as f32 / 255.0;
        pixel.0[0] = (hard_light(noise, blend) * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    mask
}

fn hard_light(base: f32, blend: f32) -> f32 {
    if blend < 0.5 {
        2.0 * base * blend
    } else {
        1.0 - 2.0 * (1.0 - base) * (1.0 - blend)
    }
}

// Box-Muller; the small RNG has no normal distribution of its own.
fn gaussian(rng: &mut SmallRng) -> f32 {
    let u1: f32 = rng.gen_range(f32::EPSILON..1.0);
    let u2: f32 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos()
}

/// Uses `mask` as the render's alpha and flattens the result over `color`.
pub fn flatten_with_mask(image: &DynamicImage, mask: &GrayImage, color: Rgb<u8>) -> RgbImage {
    let rgb = image.to_rgb8();
    let mask = if mask.dimensions() == rgb.dimensions() {
        mask.clone()
    } else {
        imageops::resize(mask, rgb.width(), rgb.height(), FilterType::Triangle)
    };

    RgbImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let alpha = mask.get_pixel(x, y).0[0] as f32 / 255.0;
        let source = rgb.get_pixel(x, y).0;
        let mut out = [0u8; 3];
        for channel in 0..3 {
            let value = source[channel] as f32 * alpha + color.0[channel] as f32 * (1.0 - alpha);
            out[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    })
}

pub fn open(path: &Path) -> BuildResult<DynamicImage> {
    image::open(path).map_err(|err| BuildError::image(path, err))
}

pub fn save(image: &DynamicImage, path: &Path) -> BuildResult<()> {
    image.save(path).map_err(|err| BuildError::image(path, err))
}

/// Inserts `suffix` before the extension: `thing.png` becomes `thing_cropped.png`.
pub fn with_suffix(path: &Path, suffix: &str) -> std::path::PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".into());
    path.with_file_name(format!("{stem}_{suffix}.{extension}"))
}
