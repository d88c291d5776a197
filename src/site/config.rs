use std::path::PathBuf;

/// Resolution step between emitted image variants.
pub const SCALE_STEP: f64 = 0.25;

/// Build settings, read from `WEBSITE_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub resources_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub public_dir: PathBuf,
    pub static_dir: PathBuf,
    pub dev: bool,
    pub default_scene_name: String,
    pub scene_name_whitelist: Vec<String>,
    /// External renderer executable.
    pub renderer: PathBuf,
    /// Script handed to the renderer; defaults to `<resources>/scenes.py`.
    pub renderer_script: PathBuf,
    /// Headless browser used for the page screenshot. Skipped when unset.
    pub screenshot_browser: Option<PathBuf>,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let path = |key: &str, default: &str| PathBuf::from(get(key).unwrap_or_else(|| default.into()));

        let resources_dir = path("WEBSITE_RESOURCES_DIR", "./resources");
        let renderer_script = get("WEBSITE_RENDERER_SCRIPT")
            .map(PathBuf::from)
            .unwrap_or_else(|| resources_dir.join("scenes.py"));

        Self {
            temp_dir: path("WEBSITE_TEMP_DIR", "./tmp"),
            public_dir: path("WEBSITE_PUBLIC_DIR", "./dist"),
            static_dir: path("WEBSITE_STATIC_DIR", "./static"),
            dev: get("WEBSITE_DEV")
                .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            default_scene_name: get("WEBSITE_DEFAULT_SCENE_NAME").unwrap_or_else(|| "Default".into()),
            scene_name_whitelist: get("WEBSITE_SCENE_NAME_WHITELIST")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            renderer: path("WEBSITE_RENDERER", "blender"),
            screenshot_browser: get("WEBSITE_SCREENSHOT_BROWSER").map(PathBuf::from),
            resources_dir,
            renderer_script,
        }
    }

    /// Largest emitted image scale.
    pub fn scale_max(&self) -> f64 {
        if self.dev {
            1.5
        } else {
            3.0
        }
    }

    /// Every emitted scale, `1` through [`Self::scale_max`] in [`SCALE_STEP`] increments.
    pub fn scales(&self) -> Vec<f64> {
        let count = ((self.scale_max() - 1.0) / SCALE_STEP).round() as usize + 1;
        (0..count).map(|k| 1.0 + k as f64 * SCALE_STEP).collect()
    }

    pub fn env_name(&self) -> &'static str {
        if self.dev {
            "dev"
        } else {
            "prod"
        }
    }

    pub fn is_default_scene(&self, name: &str) -> bool {
        name == self.default_scene_name
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
