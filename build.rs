//! Embeds the commit and build time shown by `lsh --version`.
//!
//! Each value can be pinned through an environment variable of the same name
//! (useful for reproducible packaging). Otherwise it is probed, and a probe
//! that fails yields "unknown" instead of failing the build.

use std::env;
use std::fs;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const GIT_HASH_VAR: &str = "LSH_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "LSH_BUILD_TIMESTAMP";

fn main() {
    watch_git_head();
    emit(GIT_HASH_VAR, || {
        probe("git", &["rev-parse", "--short=12", "HEAD"]).unwrap_or_else(|| "unknown".into())
    });
    emit(TIMESTAMP_VAR, || {
        probe("date", &["-u", "+%Y-%m-%dT%H:%M:%SZ"]).unwrap_or_else(epoch_seconds)
    });
}

/// Export `name` to the crate, preferring a pinned value from the environment.
fn emit(name: &str, compute: impl FnOnce() -> String) {
    println!("cargo:rerun-if-env-changed={name}");
    let value = env::var(name).unwrap_or_else(|_| compute());
    println!("cargo:rustc-env={name}={value}");
}

/// Rebuild when HEAD moves, whether it is detached or a branch ref.
fn watch_git_head() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    if let Some(branch) = fs::read_to_string(".git/HEAD")
        .ok()
        .and_then(|head| head.trim().strip_prefix("ref: ").map(str::to_owned))
    {
        println!("cargo:rerun-if-changed=.git/{branch}");
    }
}

fn epoch_seconds() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs());
    format!("unix:{secs}")
}

/// First line of a successful command's stdout, if any.
fn probe(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    stdout
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
}
