//! Host-side entry: `folio build` compiles the wasm package and generates the
//! site, `folio clean` removes generated output and `folio serve` serves it.

#[cfg(not(target_arch = "wasm32"))]
mod host {
    use std::process::Stdio;

    use anyhow::{bail, Context, Result};
    use folio::site::{self, SiteConfig};
    use folio::{init_logging, LoggingConfig};
    use tokio::process::Command;

    const SERVE_PORT: u16 = 3000;
    const USAGE: &str = "usage: folio <build|clean|serve>";

    #[tokio::main]
    pub async fn main() -> Result<()> {
        init_logging(LoggingConfig::default());

        let config = SiteConfig::from_env();
        let command = std::env::args().nth(1).unwrap_or_else(|| "build".into());

        match command.as_str() {
            "build" => {
                build_wasm(&config).await?;
                site::build(&config).await.context("site build failed")?;
            }
            "clean" => site::clean(&config).await.context("clean failed")?,
            "serve" => serve(&config).await?,
            "-h" | "--help" | "help" => println!("{USAGE}"),
            other => bail!("unknown command `{other}`\n{USAGE}"),
        }

        Ok(())
    }

    /// Compiles the browser package into `<static>/pkg` so the static copy ships it.
    async fn build_wasm(config: &SiteConfig) -> Result<()> {
        let out_dir = config.static_dir.join("pkg");
        let profile = if config.dev { "--dev" } else { "--release" };

        log::info!("building wasm package into {}", out_dir.display());
        let status = Command::new("wasm-pack")
            .args(["build", profile, "--target", "web", "--out-dir"])
            .arg(&out_dir)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await;

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => bail!("wasm-pack exited with {status}"),
            Err(err) => {
                log::warn!("wasm-pack not available ({err}); the page will use whatever is already in {}", out_dir.display());
                Ok(())
            }
        }
    }

    async fn serve(config: &SiteConfig) -> Result<()> {
        log::info!("serving {} at http://localhost:{SERVE_PORT}", config.public_dir.display());

        let status = Command::new("python3")
            .args(["-m", "http.server", &SERVE_PORT.to_string(), "--directory"])
            .arg(&config.public_dir)
            .kill_on_drop(true)
            .status()
            .await
            .context("failed to start python3 http.server")?;

        if !status.success() {
            bail!("http server exited with {status}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    host::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
