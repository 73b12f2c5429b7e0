//! Store connection management.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::migrations::run_migrations;

/// Store file name.
const STORE_FILE: &str = "cinesearch.db";

/// Opens (or creates) the annotation store and runs migrations.
///
/// - If `dir` is `Some`, uses `{dir}/cinesearch.db`.
/// - Otherwise uses `~/.local/share/cinesearch/cinesearch.db`.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrations fail.
pub fn open_store(dir: Option<&PathBuf>) -> Result<Connection> {
    let db_path = resolve_store_path(dir)?;

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let conn = Connection::open(&db_path)
        .with_context(|| format!("failed to open store {}", db_path.display()))?;

    run_migrations(&conn).context("store migration failed")?;
    tracing::debug!(path = %db_path.display(), "Annotation store opened");

    Ok(conn)
}

/// Data directory under `$HOME` used when no `dir` is given.
const DEFAULT_DATA_DIR: [&str; 3] = [".local", "share", "cinesearch"];

/// Resolves the store file path.
fn resolve_store_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let data_dir = match dir {
        Some(d) => d.clone(),
        None => {
            let home = std::env::var_os("HOME").context("HOME environment variable is not set")?;
            DEFAULT_DATA_DIR
                .iter()
                .fold(PathBuf::from(home), |path, part| path.join(part))
        }
    };
    Ok(data_dir.join(STORE_FILE))
}
