//! HTML and CSS generation for `index.html`.
//!
//! A [`Page`] owns the class-name counter, the stylesheet and the bootstrap script
//! for one render, so two renders never share state.

use std::fmt::Write;
use std::path::PathBuf;

use futures::future::try_join_all;

use super::assets::{self, ImageVariant};
use super::config::SiteConfig;
use super::error::BuildResult;
use super::imaging;
use super::profile::Profile;
use super::scene::{Scene, Sprite, Thing};
use super::script::{Script, OBJECT_SELECTOR, SCENE_SELECTOR};
use super::styles::{ClassNames, StyleSheet};
use crate::SKETCH_CANVAS_ID;

const AVATAR_SIZE: f64 = 144.0;
const FAVICON_SIZES: [u32; 2] = [16, 32];

/// Relative URL of the wasm-bindgen package entry.
pub const PACKAGE_URL: &str = "./pkg/folio.js";

const BASE_CSS: &str = r#"
html {
  overflow: scroll;
  height: 100%;
  font-family: -apple-system, BlinkMacSystemFont, Segoe UI, Roboto, Oxygen-Sans, Ubuntu, Cantarell, Helvetica Neue, sans-serif;
}

body {
  margin: 0;
  height: 100%;
  overflow: hidden;
  position: relative;
  display: flex;
  align-items: center;
  justify-content: center;
}

main {
  max-width: 360px;
  height: 440px;
  margin: 21px;
}

h1 {
  font-size: 26px;
  margin: 21px 0;
  line-height: 42px;
  text-align: center;
}

p {
  margin: 21px 0;
  line-height: 26px;
  font-size: 16px;
}
"#;

pub struct Page<'a> {
    config: &'a SiteConfig,
    profile: &'a Profile,
    class_names: ClassNames,
    styles: StyleSheet,
    script: Script,
}

impl<'a> Page<'a> {
    pub fn new(config: &'a SiteConfig, profile: &'a Profile) -> Self {
        Self {
            config,
            profile,
            class_names: ClassNames::new(),
            styles: StyleSheet::new(),
            script: Script::new(PACKAGE_URL),
        }
    }

    /// Renders the document. Without scenes the page is the static,
    /// screenshot-only variant: no scene layers, no canvas and no script.
    pub async fn render(mut self, scenes: Option<&[Scene]>) -> BuildResult<String> {
        self.styles.add(BASE_CSS);

        let avatar = self.avatar().await?;
        let links = self.links();
        let favicons = self.favicons().await?;

        let interactive = match scenes {
            Some(scenes) => Some(self.scenes(scenes).await?),
            None => None,
        };

        let canvas = if interactive.is_some() {
            self.sketch_canvas()
        } else {
            String::new()
        };

        let styles = self.styles.build(!self.config.dev);
        let profile = self.profile;

        let mut html = String::new();
        let _ = writeln!(html, "<!DOCTYPE html>");
        let _ = writeln!(html, r#"<html lang="{}">"#, escape_html(&profile.lang));
        let _ = writeln!(html, "<head>");
        let _ = writeln!(html, "<title>{}</title>", escape_html(profile.title()));
        let _ = writeln!(html, r#"<meta name="viewport" content="width=device-width, initial-scale=1" />"#);
        html.push_str(&favicons);
        let _ = writeln!(html, "<style>\n{styles}</style>");
        let _ = writeln!(html, "</head>");
        let _ = writeln!(html, "<body>");
        html.push_str(&canvas);
        let _ = writeln!(html, "<main>");
        html.push_str(&avatar);
        let _ = writeln!(html, "<h1>{}</h1>", escape_html(&profile.name));
        for paragraph in &profile.paragraphs {
            let _ = writeln!(html, "<p>{paragraph}</p>");
        }
        html.push_str(&links);
        let _ = writeln!(html, "</main>");
        if let Some(scenes) = &interactive {
            html.push_str(scenes);
            let _ = writeln!(html, "<script type=\"module\">\n{}</script>", self.script.build());
        }
        let _ = writeln!(html, "</body>");
        let _ = writeln!(html, "</html>");

        Ok(html)
    }

    fn avatar_path(&self) -> PathBuf {
        self.config.resources_dir.join(&self.profile.avatar)
    }

    async fn avatar(&mut self) -> BuildResult<String> {
        let container = self.class_names.make();
        let class = self.class_names.make();

        self.styles.add(format!(
            ".{container} {{\n  display: flex;\n  justify-content: center;\n  margin-bottom: 34px;\n}}\n.{class} {{\n  border-radius: 50%;\n}}"
        ));

        let path = self.avatar_path();
        let scales = self.config.scales();
        let scale_max = self.config.scale_max();
        let public_dir = self.config.public_dir.clone();

        let variants = tokio::task::spawn_blocking(move || {
            let source = imaging::open(&path)?;
            let side = (AVATAR_SIZE * scale_max).round() as u32;
            let source = source.resize_exact(side, side, image::imageops::FilterType::Lanczos3);
            assets::write_variants(&source, (AVATAR_SIZE, AVATAR_SIZE), &scales, &public_dir)
        })
        .await??;

        let default = variants
            .iter()
            .find(|variant| variant.scale == 1.0)
            .map(|variant| variant.file.as_str())
            .unwrap_or_default();

        Ok(format!(
            "<div class=\"{container}\">\n<img class=\"{class}\" alt=\"{alt}\" width=\"{size}\" height=\"{size}\" src=\"{default}\" srcset=\"{srcset}\" />\n</div>\n",
            alt = escape_html(&self.profile.name),
            size = AVATAR_SIZE,
            srcset = assets::srcset(&variants),
        ))
    }

    async fn favicons(&mut self) -> BuildResult<String> {
        let path = self.avatar_path();
        let public_dir = self.config.public_dir.clone();

        let icons = tokio::task::spawn_blocking(move || {
            let source = imaging::open(&path)?;
            assets::write_png_sizes(&source, &FAVICON_SIZES, &public_dir)
        })
        .await??;

        Ok(icons
            .iter()
            .map(|(size, file)| format!("<link rel=\"icon\" type=\"image/png\" sizes=\"{size}x{size}\" href=\"{file}\" />\n"))
            .collect())
    }

    fn links(&mut self) -> String {
        if self.profile.links.is_empty() {
            return String::new();
        }

        let container = self.class_names.make();
        let class = self.class_names.make();

        self.styles.add(format!(
            r#".{container} {{
  display: flex;
  justify-content: center;
  margin: 34px 0;
}}

.{class} {{
  display: flex;
  align-items: center;
  height: 34px;
  padding: 0 13px;
  margin: 0 3px;
  border-radius: 8px;
  text-decoration: none;
  color: blue;
  background: rgba(255, 255, 255, 0);
  transition: background-color 250ms, color 250ms;
}}

.{class}:hover {{
  background: rgba(255, 255, 255, 0.25);
}}

.{class} > span {{
  text-decoration: none;
  line-height: 1;
}}

.{class} > svg {{
  margin-right: 5px;
}}"#
        ));

        let mut html = format!("<div class=\"{container}\">\n");
        for link in &self.profile.links {
            let _ = writeln!(
                html,
                "<a class=\"{class}\" href=\"{href}\">{svg}<span>{label}</span></a>",
                href = escape_html(&link.href),
                svg = link.icon.svg(),
                label = escape_html(&link.label),
            );
        }
        html.push_str("</div>\n");
        html
    }

    fn sketch_canvas(&mut self) -> String {
        self.styles.add(format!(
            "#{SKETCH_CANVAS_ID} {{\n  position: fixed;\n  top: 0;\n  left: 0;\n  width: 100%;\n  height: 100%;\n  z-index: -2;\n  pointer-events: none;\n}}"
        ));
        format!("<canvas id=\"{SKETCH_CANVAS_ID}\"></canvas>\n")
    }

    async fn scenes(&mut self, scenes: &[Scene]) -> BuildResult<String> {
        let scene_class = self.class_names.make();
        let thing_class = self.class_names.make();
        let background_class = self.class_names.make();

        self.script.add_variable(SCENE_SELECTOR, &format!(".{scene_class}"));
        self.script
            .add_variable(OBJECT_SELECTOR, &format!(".{background_class}, .{thing_class}"));

        self.styles.add(format!(
            ".{scene_class} {{\n  display: none;\n  position: absolute;\n  top: 50%;\n  left: 50%;\n  z-index: -1;\n}}\n\n.{thing_class}, .{background_class} {{\n  position: absolute;\n}}"
        ));

        let mut ordered: Vec<&Scene> = scenes.iter().collect();
        ordered.sort_by(|a, b| a.width.total_cmp(&b.width));

        let mut html = String::new();
        for scene in ordered {
            html.push_str(&self.scene(scene, &scene_class, &background_class, &thing_class).await?);
        }
        Ok(html)
    }

    async fn scene(
        &mut self,
        scene: &Scene,
        scene_class: &str,
        background_class: &str,
        thing_class: &str,
    ) -> BuildResult<String> {
        let own_class = self.class_names.make();
        let is_default = self.config.is_default_scene(&scene.name);
        let parallax = parallax_amount(scene.width, is_default);
        let media = scene_media_query(scene.width, parallax, is_default);

        self.styles.add_indexed(
            format!(
                "@media {media} {{\n  html {{\n    background-color: {color};\n  }}\n  body {{\n    min-height: {min_height}px;\n  }}\n  .{own_class} {{\n    display: block;\n  }}\n  .{own_class} + .{scene_class} {{\n    display: none;\n  }}\n}}",
                color = scene.background.color.css,
                min_height = scene.height / 2.0 + parallax,
            ),
            if is_default { vec![1.0] } else { vec![1.0, -scene.width] },
        );

        let mut things: Vec<&Thing> = scene.things.iter().collect();
        things.sort_by(|a, b| a.z.total_cmp(&b.z));

        let mut sprites: Vec<&dyn Sprite> = Vec::with_capacity(things.len() + 1);
        sprites.push(&scene.background);
        sprites.extend(things.iter().map(|thing| *thing as &dyn Sprite));

        let variants = self.sprite_variants(&sprites).await?;

        let mut html = format!(
            "<div class=\"{scene_class} {own_class}\" data-media-query=\"{media}\" data-parallax-amount=\"{parallax}\">\n"
        );
        for (index, (sprite, variants)) in sprites.iter().zip(variants).enumerate() {
            let layer_class = if index == 0 { background_class } else { thing_class };
            html.push_str(&self.sprite(scene, *sprite, &variants, layer_class));
        }
        html.push_str("</div>\n");

        Ok(html)
    }

    async fn sprite_variants(&self, sprites: &[&dyn Sprite]) -> BuildResult<Vec<Vec<ImageVariant>>> {
        let tasks = sprites.iter().map(|sprite| {
            let path = sprite.render().file.clone();
            let (_, _, width, height) = sprite.bounds();
            let scales = self.config.scales();
            let public_dir = self.config.public_dir.clone();

            tokio::task::spawn_blocking(move || {
                let source = imaging::open(&path)?;
                assets::write_variants(&source, (width, height), &scales, &public_dir)
            })
        });

        try_join_all(tasks).await?.into_iter().collect()
    }

    fn sprite(&mut self, scene: &Scene, sprite: &dyn Sprite, variants: &[ImageVariant], layer_class: &str) -> String {
        let class = self.class_names.make();
        let scale_max = self.config.scale_max();
        let (x, y, width, height) = sprite.bounds();

        for variant in variants {
            self.styles.add_indexed(
                format!(
                    "@media {} {{\n  .{class} {{\n    background-image: url(\"{}\");\n  }}\n}}",
                    assets::media_query(variant.scale, scale_max),
                    variant.file
                ),
                assets::media_index(variant.scale, scale_max),
            );
        }

        self.styles.add(format!(
            ".{class} {{\n  width: {width}px;\n  height: {height}px;\n  left: {left}px;\n  top: {top}px;\n  background-size: {width}px {height}px;\n}}",
            left = x - scene.width / 2.0,
            top = y - scene.height / 2.0,
        ));

        format!("<div class=\"{layer_class} {class}\" data-z=\"{}\"></div>\n", sprite.z())
    }
}

/// Parallax travel in pixels. The default scene is shown at every width, so it
/// moves half as far.
pub fn parallax_amount(scene_width: f64, is_default: bool) -> f64 {
    let basis = if is_default { scene_width / 2.0 } else { scene_width };
    (basis / 40.0).round()
}

pub fn scene_media_query(scene_width: f64, parallax: f64, is_default: bool) -> String {
    if is_default {
        "screen".into()
    } else {
        format!("screen and (max-width: {}px)", scene_width - parallax)
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
