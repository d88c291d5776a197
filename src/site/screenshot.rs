use std::path::{Path, PathBuf};

use super::config::SiteConfig;
use super::error::{BuildError, BuildResult};
use super::process;

pub const WINDOW_SIZE: (u32, u32) = (1024, 1024);

pub const OUTPUT_NAME: &str = "screenshot.png";

/// Headless browser arguments capturing `page` with a transparent background.
pub fn arguments(page: &Path, output: &Path) -> Vec<String> {
    vec![
        "--headless".into(),
        "--no-sandbox".into(),
        format!("--screenshot={}", output.display()),
        format!("--window-size={},{}", WINDOW_SIZE.0, WINDOW_SIZE.1),
        "--hide-scrollbars".into(),
        "--default-background-color=00000000".into(),
        format!("file://{}", page.display()),
    ]
}

/// Captures the static page at `page` into `resources/screenshot.png`.
pub async fn capture(config: &SiteConfig, browser: &Path, page: &Path) -> BuildResult<PathBuf> {
    let page = tokio::fs::canonicalize(page)
        .await
        .map_err(|err| BuildError::io(page, err))?;
    let output = tokio::fs::canonicalize(&config.resources_dir)
        .await
        .map_err(|err| BuildError::io(&config.resources_dir, err))?
        .join(OUTPUT_NAME);

    process::run(browser, arguments(&page, &output)).await?;

    log::info!("saved screenshot to {}", output.display());
    Ok(output)
}
