use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("version.rs");

    let cargo_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
    let git_hash = git(&["rev-parse", "--short", "HEAD"]);
    let version = service_version(&cargo_version, git_hash.as_deref());
    let build_time = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string();

    let version_code = format!(
        r#"
/// Version string generated at compile time
pub const VERSION: &str = "{}";

/// Git commit hash (short)
pub const GIT_HASH: &str = "{}";

/// Build timestamp
pub const BUILD_TIME: &str = "{}";
"#,
        version,
        git_hash.as_deref().unwrap_or("unknown"),
        build_time
    );

    fs::write(&dest_path, version_code).unwrap();

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
}

/// Runs git and returns trimmed stdout, or `None` outside a repository.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// A tag description (`v1.2.0-3-gabc123`) wins; a bare hash is appended to
/// the crate version; with no git at all the crate version is used alone.
fn service_version(cargo_version: &str, git_hash: Option<&str>) -> String {
    if let Some(described) = git(&["describe", "--tags", "--dirty", "--always"]) {
        if described.starts_with('v') || described.contains('-') {
            return described;
        }
    }

    match git_hash {
        Some(hash) => format!("{}-g{}", cargo_version, hash),
        None => cargo_version.to_string(),
    }
}
