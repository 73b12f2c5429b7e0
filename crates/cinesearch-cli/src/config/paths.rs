//! Config and log file locations.

use std::path::PathBuf;

use anyhow::{Context, Result};

/// Config file name.
const CONFIG_FILE: &str = "config.toml";
/// TUI log file name.
const LOG_FILE: &str = "cinesearch.log";

/// Returns `{dir}/{file}`, or `$HOME/{home_subdir}/cinesearch/{file}`.
fn app_file(dir: Option<&PathBuf>, home_subdir: &[&str], file: &str) -> Result<PathBuf> {
    let base = match dir {
        Some(d) => d.clone(),
        None => {
            let home = std::env::var_os("HOME").context("HOME environment variable is not set")?;
            home_subdir
                .iter()
                .fold(PathBuf::from(home), |path, part| path.join(part))
                .join("cinesearch")
        }
    };
    Ok(base.join(file))
}

/// Resolves the config file path: `{dir}/config.toml`, or
/// `~/.config/cinesearch/config.toml` without `dir`.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and `HOME` is unset.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    app_file(dir, &[".config"], CONFIG_FILE)
}

/// Resolves the log file used while the TUI owns the terminal:
/// `{dir}/cinesearch.log`, or `~/.local/state/cinesearch/cinesearch.log`.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and `HOME` is unset.
pub fn resolve_log_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    app_file(dir, &[".local", "state"], LOG_FILE)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/myproject");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/myproject/config.toml"));
    }

    #[test]
    fn test_resolve_default() {
        // Arrange & Act
        let path = resolve_config_path(None).unwrap();

        // Assert
        assert!(path.ends_with(".config/cinesearch/config.toml"));
    }

    #[test]
    fn test_resolve_log_path_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/myproject");

        // Act
        let path = resolve_log_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/myproject/cinesearch.log"));
    }

    #[test]
    fn test_resolve_log_path_default() {
        // Arrange & Act
        let path = resolve_log_path(None).unwrap();

        // Assert
        assert!(path.ends_with(".local/state/cinesearch/cinesearch.log"));
    }
}
