use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] refinery::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// Key-value settings store backed by SQLite
pub struct SettingsService {
    conn: Arc<Mutex<Connection>>,
}

impl SettingsService {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| SettingsError::LockPoisoned)
    }

    /// Get a setting value by key
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;

        let result: std::result::Result<String, _> = conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a setting value (insert or update)
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;

        tracing::debug!("Setting saved: {} = {}", key, value);
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        tracing::debug!("Setting deleted: {}", key);
        Ok(())
    }

    // --- Source preference ---

    /// Last remote source URL that connected successfully
    pub fn source_url(&self) -> Result<Option<String>> {
        self.get(keys::SOURCE_URL)
    }

    pub fn set_source_url(&self, url: &str) -> Result<()> {
        self.set(keys::SOURCE_URL, url)
    }

    pub fn clear_source_url(&self) -> Result<()> {
        self.delete(keys::SOURCE_URL)
    }
}

// Well-known setting keys
pub mod keys {
    pub const SOURCE_URL: &str = "source_url";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn in_memory() -> SettingsService {
        SettingsService::new(Database::in_memory().unwrap().connection())
    }

    #[test]
    fn test_get_set_overwrite_delete() {
        let settings = in_memory();
        assert_eq!(settings.get("theme").unwrap(), None);

        settings.set("theme", "dark").unwrap();
        settings.set("theme", "light").unwrap();
        assert_eq!(settings.get("theme").unwrap().as_deref(), Some("light"));

        settings.delete("theme").unwrap();
        assert_eq!(settings.get("theme").unwrap(), None);
    }

    #[test]
    fn test_source_url_round_trip() {
        let settings = in_memory();
        settings.set_source_url("https://example.com/models.json").unwrap();

        assert_eq!(
            settings.source_url().unwrap().as_deref(),
            Some("https://example.com/models.json")
        );
        assert_eq!(
            settings.get(keys::SOURCE_URL).unwrap().as_deref(),
            Some("https://example.com/models.json")
        );

        settings.clear_source_url().unwrap();
        assert_eq!(settings.source_url().unwrap(), None);
    }

    #[test]
    fn test_source_url_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("modelboard.db");

        {
            let db = Database::open(Some(path.clone())).unwrap();
            SettingsService::new(db.connection())
                .set_source_url("https://example.com/a.json")
                .unwrap();
        }

        let db = Database::open(Some(path)).unwrap();
        let settings = SettingsService::new(db.connection());
        assert_eq!(
            settings.source_url().unwrap().as_deref(),
            Some("https://example.com/a.json")
        );
    }

    #[test]
    fn test_reset_clears_values() {
        let db = Database::in_memory().unwrap();
        let settings = SettingsService::new(db.connection());
        settings.set_source_url("https://example.com/a.json").unwrap();
        db.reset().unwrap();
        assert_eq!(settings.source_url().unwrap(), None);
    }
}
