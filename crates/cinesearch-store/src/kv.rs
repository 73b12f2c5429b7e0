//! String key-value operations over the `local_storage` table.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

/// Reads the value stored under `key`, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_item(conn: &Connection, key: &str) -> Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM local_storage WHERE key = ?1",
        [key],
        |row| row.get(0),
    )
    .optional()
    .with_context(|| format!("failed to read key {key}"))
}

/// Stores `value` under `key`, replacing any previous value.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn set_item(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO local_storage (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET
             value = excluded.value,
             updated_at = excluded.updated_at",
        rusqlite::params![key, value],
    )
    .with_context(|| format!("failed to write key {key}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::connection::open_store;

    fn setup_store() -> (Connection, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let conn = open_store(Some(&dir.path().to_path_buf())).unwrap();
        (conn, dir)
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        // Arrange
        let (conn, _dir) = setup_store();

        // Act
        let value = get_item(&conn, "rating_tt0000001").unwrap();

        // Assert
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get() {
        // Arrange
        let (conn, _dir) = setup_store();

        // Act
        set_item(&conn, "rating_tt0372784", "4").unwrap();
        let value = get_item(&conn, "rating_tt0372784").unwrap();

        // Assert
        assert_eq!(value.as_deref(), Some("4"));
    }

    #[test]
    fn test_set_overwrites_single_row() {
        // Arrange
        let (conn, _dir) = setup_store();
        set_item(&conn, "k", "old").unwrap();

        // Act
        set_item(&conn, "k", "new").unwrap();

        // Assert
        assert_eq!(get_item(&conn, "k").unwrap().as_deref(), Some("new"));
        let rows: u32 = conn
            .query_row("SELECT COUNT(*) FROM local_storage", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_values_survive_reopen() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let dir_path = dir.path().to_path_buf();
        {
            let conn = open_store(Some(&dir_path)).unwrap();
            set_item(&conn, "comments_tt1", r#"["hi"]"#).unwrap();
        }

        // Act
        let conn = open_store(Some(&dir_path)).unwrap();
        let value = get_item(&conn, "comments_tt1").unwrap();

        // Assert
        assert_eq!(value.as_deref(), Some(r#"["hi"]"#));
    }
}
