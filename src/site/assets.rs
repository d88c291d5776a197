//! Content-hashed image variants written to the public directory.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use super::error::{BuildError, BuildResult};
use super::hash::content_hash;

/// One emitted resolution of an image, relative to the public directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageVariant {
    pub file: String,
    pub scale: f64,
}

fn pixels(value: f64) -> u32 {
    (value.round() as u32).max(1)
}

/// Writes `{hash}@{scale}x.webp` for every scale, each sized to `size * scale`.
pub fn write_variants(
    image: &DynamicImage,
    size: (f64, f64),
    scales: &[f64],
    public_dir: &Path,
) -> BuildResult<Vec<ImageVariant>> {
    let hash = content_hash(image.as_bytes());

    scales
        .iter()
        .map(|&scale| {
            let file = format!("{hash}@{scale}x.webp");
            let path = public_dir.join(&file);

            let resized = image.resize_exact(pixels(size.0 * scale), pixels(size.1 * scale), FilterType::Lanczos3);
            DynamicImage::ImageRgba8(resized.to_rgba8())
                .save_with_format(&path, ImageFormat::WebP)
                .map_err(|err| BuildError::image(&path, err))?;

            log::debug!("wrote {}", path.display());
            Ok(ImageVariant { file, scale })
        })
        .collect()
}

/// Writes square `{hash}@{size}.png` icons, returning `(size, file)` pairs.
pub fn write_png_sizes(image: &DynamicImage, sizes: &[u32], public_dir: &Path) -> BuildResult<Vec<(u32, String)>> {
    let hash = content_hash(image.as_bytes());

    sizes
        .iter()
        .map(|&size| {
            let file = format!("{hash}@{size}.png");
            let path = public_dir.join(&file);

            image
                .resize_exact(size, size, FilterType::Lanczos3)
                .save_with_format(&path, ImageFormat::Png)
                .map_err(|err| BuildError::image(&path, err))?;

            Ok((size, file))
        })
        .collect()
}

/// Media query selecting the variant for `scale`; the largest one is the fallback.
pub fn media_query(scale: f64, scale_max: f64) -> String {
    if scale >= scale_max {
        "screen".into()
    } else {
        format!("screen and (max-resolution: {}dpi)", scale * 96.0)
    }
}

/// Style sort index for a variant rule: larger scales first so the narrower
/// `max-resolution` queries win.
pub fn media_index(scale: f64, scale_max: f64) -> Vec<f64> {
    if scale >= scale_max {
        vec![2.0]
    } else {
        vec![2.0, -scale]
    }
}

pub fn srcset(variants: &[ImageVariant]) -> String {
    variants
        .iter()
        .map(|variant| format!("{} {}x", variant.file, variant.scale))
        .collect::<Vec<_>>()
        .join(", ")
}
