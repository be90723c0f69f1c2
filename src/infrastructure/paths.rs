//! Data directory resolution and tilde expansion.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "GROOP_DATA_DIR";

/// Returns the directory trace files are written to.
///
/// Resolved from `GROOP_DATA_DIR`, then `$HOME/.local/share/groop`, then a
/// `.groop` directory under the working directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var(DATA_DIR_ENV).ok().as_deref(),
        std::env::var("HOME").ok().as_deref(),
    )
}

fn resolve_data_dir(override_dir: Option<&str>, home: Option<&str>) -> PathBuf {
    match (override_dir.filter(|dir| !dir.is_empty()), home.filter(|home| !home.is_empty())) {
        (Some(dir), _) => PathBuf::from(expand_with_home(dir, home)),
        (None, Some(home)) => PathBuf::from(home).join(".local").join("share").join("groop"),
        (None, None) => PathBuf::from(".groop"),
    }
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading tilde, or any path when `HOME` is unset, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    expand_with_home(path, std::env::var("HOME").ok().as_deref())
}

fn expand_with_home(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if path == "~" => home.to_string(),
        Some(home) if path.starts_with("~/") => path.replacen('~', home, 1),
        _ => path.to_string(),
    }
}
