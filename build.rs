// Rebuild when shader sources change; they are embedded with `include_str!`.
use std::{fs, path::Path};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let shaders = Path::new("src/wasm/shaders");
    println!("cargo:rerun-if-changed={}", shaders.display());

    if let Ok(entries) = fs::read_dir(shaders) {
        for entry in entries.flatten() {
            println!("cargo:rerun-if-changed={}", entry.path().display());
        }
    }
}
