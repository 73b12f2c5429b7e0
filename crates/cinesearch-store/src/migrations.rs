//! Schema version management using `PRAGMA user_version`.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Schema steps; step `n` (1-based) upgrades the store to version `n`.
const MIGRATIONS: &[&str] = &[
    // v1: key-value table holding ratings and comment lists.
    "CREATE TABLE IF NOT EXISTS local_storage (
        key         TEXT PRIMARY KEY,
        value       TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );",
];

/// Current schema version.
const CURRENT_VERSION: u32 = 1;

/// Applies every schema step newer than the stored `user_version`.
///
/// # Errors
///
/// Returns an error if any SQL statement fails.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let version: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version")?;

    for (target, sql) in (1..=CURRENT_VERSION).zip(MIGRATIONS) {
        if version >= target {
            continue;
        }
        conn.execute_batch(sql)
            .with_context(|| format!("migration to v{target} failed"))?;
        tracing::debug!(version = target, "Store schema migrated");
    }

    conn.pragma_update(None, "user_version", CURRENT_VERSION)
        .context("failed to update user_version")?;

    Ok(())
}
