#![cfg(all(unix, not(target_arch = "wasm32")))]

// Sends SIGINT to the test process, so it lives in its own test binary.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tokio::signal::unix::{signal, SignalKind};

use folio::site::{self, BuildError, SiteConfig};

fn workspace() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("folio-{}-interrupt", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(dir.join("resources")).expect("resources dir");
    dir
}

#[tokio::test]
async fn ctrl_c_abandons_the_build_after_a_renderer_run() {
    // Keeps SIGINT from terminating the test binary itself.
    let _listener = signal(SignalKind::interrupt()).expect("install SIGINT listener");

    let root = workspace();
    let resources = root.join("resources");
    std::fs::write(resources.join("site.json"), r#"{ "name": "Ada" }"#).expect("profile");
    // The renderer is `sh`, so the project file is the script it runs.
    std::fs::write(resources.join("scenes.blend"), "exec sleep 30\n").expect("renderer script");

    let config = SiteConfig {
        resources_dir: resources,
        public_dir: root.join("public"),
        temp_dir: root.join("tmp"),
        static_dir: root.join("static"),
        renderer: PathBuf::from("sh"),
        dev: true,
        ..SiteConfig::default()
    };

    // A finished child must not leave SIGINT swallowed for the rest of the build.
    site::process::run(std::path::Path::new("true"), std::iter::empty::<&str>())
        .await
        .expect("true succeeds");

    let interrupt = async {
        tokio::time::sleep(Duration::from_millis(500)).await;
        std::process::Command::new("kill")
            .args(["-INT", &std::process::id().to_string()])
            .status()
            .expect("send SIGINT")
    };

    let started = Instant::now();
    let (result, sent) = tokio::join!(
        tokio::time::timeout(Duration::from_secs(20), site::build(&config)),
        interrupt
    );

    assert!(sent.success());
    let result = result.expect("build stopped before the renderer finished");
    assert!(matches!(result, Err(BuildError::Interrupted)), "unexpected result {result:?}");
    assert!(started.elapsed() < Duration::from_secs(20));
    assert!(!site::scenes::cache_file(&config).exists());

    let _ = std::fs::remove_dir_all(&root);
}
