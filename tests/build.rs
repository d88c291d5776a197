#![cfg(not(target_arch = "wasm32"))]

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

use folio::site::config::SiteConfig;
use folio::site::page::Page;
use folio::site::profile::Profile;
use folio::site::process::{self, OUTPUT_TAIL_CHARS};
use folio::site::renderer::{self, RenderRequest};
use folio::site::scene::{Scene, SceneBackground, SceneRender, Thing};
use folio::site::{clean, scenes, BuildError};

fn workspace(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("folio-{}-{name}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("resources")).expect("resources dir");
    std::fs::create_dir_all(dir.join("public")).expect("public dir");
    std::fs::create_dir_all(dir.join("tmp")).expect("temp dir");
    dir
}

fn config(root: &Path) -> SiteConfig {
    SiteConfig {
        resources_dir: root.join("resources"),
        public_dir: root.join("public"),
        temp_dir: root.join("tmp"),
        static_dir: root.join("static"),
        dev: true,
        ..SiteConfig::default()
    }
}

fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    RgbaImage::from_pixel(width, height, Rgba(color))
        .save(path)
        .expect("write test image");
}

fn profile() -> Profile {
    Profile::parse(
        r#"{
            "name": "Ada <Lovelace>",
            "paragraphs": ["I write <em>programs</em>."],
            "links": [{ "label": "Code", "href": "https://example.com/ada", "icon": "github" }]
        }"#,
    )
    .expect("profile")
}

fn scene(root: &Path) -> Scene {
    let background = root.join("tmp/background.png");
    let thing = root.join("tmp/thing.png");
    write_png(&background, 120, 60, [20, 30, 40, 255]);
    write_png(&thing, 30, 45, [200, 10, 10, 255]);

    Scene {
        name: "Default".into(),
        width: 1600.0,
        height: 900.0,
        background: SceneBackground {
            x: 0.0,
            y: 0.0,
            z: 0.5,
            width: 160.0,
            height: 80.0,
            render: SceneRender {
                file: background,
                scale: 1.5,
                ..SceneRender::default()
            },
            ..SceneBackground::default()
        },
        things: vec![Thing {
            name: "tree".into(),
            x: 800.0,
            y: 400.0,
            z: 2.0,
            width: 20.0,
            height: 30.0,
            render: SceneRender {
                file: thing,
                scale: 1.5,
                ..SceneRender::default()
            },
        }],
    }
}

#[tokio::test]
async fn page_renders_scenes_and_bootstrap() {
    let root = workspace("page");
    let config = config(&root);
    write_png(&config.resources_dir.join("avatar.png"), 64, 64, [90, 120, 150, 255]);

    let profile = profile();
    let scenes = vec![scene(&root)];
    let html = Page::new(&config, &profile)
        .render(Some(&scenes))
        .await
        .expect("page renders");

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Ada &lt;Lovelace&gt;</title>"));
    assert!(html.contains("<p>I write <em>programs</em>.</p>"));
    assert!(html.contains(r#"href="https://example.com/ada""#));
    assert!(html.contains(r#"<canvas id="c"></canvas>"#));
    assert!(html.contains(r#"data-media-query="screen""#));
    assert!(html.contains(r#"data-parallax-amount="20""#));
    assert!(html.contains(r#"data-z="2""#));
    assert!(html.contains("start_parallax(SCENE_SELECTOR, OBJECT_SELECTOR);"));
    assert!(html.contains("background-color: rgb(0, 0, 0)"));
    assert!(html.contains("left: 0px"));

    let webp = std::fs::read_dir(&config.public_dir)
        .expect("public dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "webp"))
        .count();
    // Avatar, background and thing, three scales each.
    assert_eq!(webp, 9);

    let favicons = std::fs::read_dir(&config.public_dir)
        .expect("public dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "png"))
        .count();
    assert_eq!(favicons, 2);

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn screenshot_page_has_no_scenes_or_script() {
    let root = workspace("screenshot");
    let config = config(&root);
    write_png(&config.resources_dir.join("avatar.png"), 32, 32, [1, 2, 3, 255]);

    let profile = profile();
    let html = Page::new(&config, &profile).render(None).await.expect("page renders");

    assert!(!html.contains("<script"));
    assert!(!html.contains("<canvas"));
    assert!(html.contains("<h1>Ada &lt;Lovelace&gt;</h1>"));

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn missing_avatar_aborts_the_page() {
    let root = workspace("missing");
    let config = config(&root);
    let profile = profile();

    assert!(Page::new(&config, &profile).render(None).await.is_err());

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn cached_scenes_skip_the_renderer() {
    let root = workspace("cache");
    let config = SiteConfig {
        renderer: root.join("no-such-renderer"),
        ..config(&root)
    };

    let cached = vec![scene(&root)];
    let cache = scenes::cache_file(&config);
    assert!(cache.ends_with("scenes_0.25_dev.json"));
    std::fs::write(&cache, serde_json::to_vec(&cached).expect("encode")).expect("write cache");

    let loaded = scenes::load_scenes(&config).await.expect("cached scenes");
    assert_eq!(loaded, cached);

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn missing_renderer_aborts_scene_preparation() {
    let root = workspace("renderer");
    let config = SiteConfig {
        renderer: root.join("no-such-renderer"),
        ..config(&root)
    };

    let err = scenes::load_scenes(&config).await.expect_err("renderer missing");
    assert!(matches!(err, BuildError::Spawn { .. }));
    assert!(!scenes::cache_file(&config).exists());

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn clean_removes_output_and_tolerates_missing_dirs() {
    let root = workspace("clean");
    let config = config(&root);
    std::fs::write(config.public_dir.join("index.html"), "x").expect("write");

    clean(&config).await.expect("first clean");
    assert!(!config.public_dir.exists());
    assert!(!config.temp_dir.exists());

    clean(&config).await.expect("second clean");

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn failing_process_reports_the_end_of_its_output() {
    let script = "i=0; while [ $i -lt 300 ]; do printf 0123456789; i=$((i+1)); done; printf END; exit 3";
    let err = process::run(Path::new("sh"), ["-c", script])
        .await
        .expect_err("non-zero exit");

    match err {
        BuildError::ProcessFailed { program, status, output } => {
            assert_eq!(program, Path::new("sh"));
            assert!(status.contains('3'), "status {status}");
            assert_eq!(output.chars().count(), OUTPUT_TAIL_CHARS);
            assert!(output.ends_with("789END"));
            assert!(output.starts_with("3456789"));
        }
        other => panic!("expected a process failure, got {other:?}"),
    }
}

#[tokio::test]
async fn successful_process_returns_its_output() {
    let output = process::run(Path::new("sh"), ["-c", "printf 'rendered é'"])
        .await
        .expect("exit 0");
    assert_eq!(output, "rendered é");
}

#[tokio::test]
async fn renderer_scenes_are_read_from_the_requested_file() {
    let root = workspace("render");
    let config = SiteConfig {
        renderer: PathBuf::from("sh"),
        ..config(&root)
    };
    // `sh` runs the project file; the request JSON is the last argument.
    std::fs::write(
        config.resources_dir.join("scenes.blend"),
        r#"for last; do :; done
file=$(printf '%s' "$last" | sed 's/.*"file":"\([^"]*\)".*/\1/')
printf '[{"name":"Default","width":800,"height":600,"things":[{"name":"tree","z":2}]}]' > "$file"
echo rendered
"#,
    )
    .expect("renderer script");

    let request = RenderRequest::probe();
    let scenes = renderer::render(&config, &request).await.expect("render succeeds");

    assert!(request.output_file(&config.temp_dir).expect("file name").exists());
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].name, "Default");
    assert_eq!(scenes[0].width, 800.0);
    assert_eq!(scenes[0].things.len(), 1);
    assert_eq!(scenes[0].things[0].name, "tree");
    assert_eq!(scenes[0].things[0].z, 2.0);
    assert_eq!(scenes[0].background.color.css, "rgb(0, 0, 0)");

    let _ = std::fs::remove_dir_all(&root);
}

#[tokio::test]
async fn renderer_exit_without_scene_file_aborts() {
    let root = workspace("render-fail");
    let config = SiteConfig {
        renderer: PathBuf::from("sh"),
        ..config(&root)
    };
    std::fs::write(config.resources_dir.join("scenes.blend"), "echo 'no camera in scene'\nexit 1\n")
        .expect("renderer script");

    let err = renderer::render(&config, &RenderRequest::probe())
        .await
        .expect_err("renderer fails");
    match err {
        BuildError::ProcessFailed { output, .. } => assert_eq!(output.trim_end(), "no camera in scene"),
        other => panic!("expected a process failure, got {other:?}"),
    }

    let _ = std::fs::remove_dir_all(&root);
}
