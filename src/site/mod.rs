//! Static-site build: scene preparation, image variants and `index.html`.

pub mod assets;
pub mod config;
pub mod error;
pub mod hash;
pub mod imaging;
pub mod page;
pub mod process;
pub mod profile;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod screenshot;
pub mod script;
pub mod styles;

use std::io::ErrorKind;
use std::path::Path;

use fs_extra::dir::CopyOptions;

pub use config::SiteConfig;
pub use error::{BuildError, BuildResult};

use page::Page;
use profile::Profile;

/// Builds the public directory. Any failure aborts the whole build.
///
/// Ctrl-C abandons the build with [`BuildError::Interrupted`]; a running
/// renderer or browser is killed when its future is dropped.
pub async fn build(config: &SiteConfig) -> BuildResult<()> {
    tokio::select! {
        result = build_site(config) => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            log::warn!("interrupt received, abandoning the build");
            Err(BuildError::Interrupted)
        }
    }
}

async fn build_site(config: &SiteConfig) -> BuildResult<()> {
    create_dir(&config.temp_dir).await?;
    create_dir(&config.public_dir).await?;
    copy_static(config).await?;

    let profile = Profile::load(&config.resources_dir.join("site.json")).await?;
    let index = config.public_dir.join("index.html");

    if let Some(browser) = &config.screenshot_browser {
        let html = Page::new(config, &profile).render(None).await?;
        write(&index, html).await?;
        screenshot::capture(config, browser, &index).await?;
    }

    let scenes = scenes::load_scenes(config).await?;
    let html = Page::new(config, &profile).render(Some(&scenes)).await?;
    write(&index, html).await?;

    log::info!("wrote {}", index.display());
    Ok(())
}

/// Removes the temp and public directories; missing ones are fine.
pub async fn clean(config: &SiteConfig) -> BuildResult<()> {
    for dir in [&config.temp_dir, &config.public_dir] {
        match tokio::fs::remove_dir_all(dir).await {
            Ok(()) => log::info!("removed {}", dir.display()),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(BuildError::io(dir, err)),
        }
    }
    Ok(())
}

async fn create_dir(path: &Path) -> BuildResult<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|err| BuildError::io(path, err))
}

async fn write(path: &Path, contents: String) -> BuildResult<()> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|err| BuildError::io(path, err))
}

async fn copy_static(config: &SiteConfig) -> BuildResult<()> {
    if !config.static_dir.exists() {
        log::warn!("static directory {} not found, skipping copy", config.static_dir.display());
        return Ok(());
    }

    let from = config.static_dir.clone();
    let to = config.public_dir.clone();
    tokio::task::spawn_blocking(move || {
        let mut options = CopyOptions::new();
        options.overwrite = true;
        options.content_only = true;
        fs_extra::dir::copy(&from, &to, &options)
    })
    .await??;

    log::debug!("copied {} to {}", config.static_dir.display(), config.public_dir.display());
    Ok(())
}
