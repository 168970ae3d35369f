use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// config.toml is looked up next to the backend binary, so put a copy of the
// workspace one into target/<profile>.
fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    let Some(target_dir) = target_profile_dir() else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    if !source.exists() {
        println!("cargo:warning=no config.toml in workspace root, embedded defaults will be used");
        return;
    }

    let dest = target_dir.join("config.toml");
    match fs::copy(&source, &dest) {
        Ok(_) => println!("cargo:warning=Copied config.toml to {}", dest.display()),
        Err(e) => panic!("Failed to copy config.toml: {}", e),
    }
}

fn target_profile_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    let profile = env::var("PROFILE").ok()?;
    Path::new(&out_dir)
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}
