use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

const DEFAULT_API_VERSION: &str = "2022-11-28";

/// `[package.metadata] github_api_version`, if set
fn pinned_api_version(manifest: &str) -> Option<String> {
    let table = manifest.parse::<toml::Table>().ok()?;
    table
        .get("package")?
        .get("metadata")?
        .get("github_api_version")?
        .as_str()
        .map(str::to_owned)
}

fn short_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_owned())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let manifest = fs::read_to_string(manifest_dir.join("Cargo.toml"))?;

    let api_version = pinned_api_version(&manifest).unwrap_or_else(|| DEFAULT_API_VERSION.to_owned());
    let built_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let commit = short_commit().unwrap_or_else(|| "unknown".to_owned());

    let generated = format!(
        "pub const GITHUB_API_VERSION: &str = {api_version:?};\n\
         pub const BUILD_TIME: &str = \"{built_at}\";\n\
         pub const GIT_HASH: &str = {commit:?};\n"
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    fs::write(out_dir.join("version.rs"), generated)?;
    Ok(())
}
