use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::settings::{Result, SettingsError};

mod embedded {
    refinery::embed_migrations!("migrations");
}

/// SQLite database holding persisted settings
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl Database {
    pub fn open(db_path: Option<PathBuf>) -> Result<Self> {
        let path = db_path.unwrap_or_else(default_db_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut conn = Connection::open(&path)?;
        embedded::migrations::runner().run(&mut conn)?;

        tracing::info!("Settings database initialized at {:?}", path);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: Some(path),
        })
    }

    /// Non-durable database, dropped with the last connection handle
    pub fn in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        embedded::migrations::runner().run(&mut conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            path: None,
        })
    }

    /// Get a clone of the database connection for sharing with services
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Drop all tables and re-run migrations
    pub fn reset(&self) -> Result<()> {
        let mut conn = self.conn.lock().map_err(|_| SettingsError::LockPoisoned)?;

        conn.execute("DROP TABLE IF EXISTS settings", [])?;
        conn.execute("DROP TABLE IF EXISTS refinery_schema_history", [])?;

        embedded::migrations::runner().run(&mut *conn)?;

        tracing::info!("Settings database reset complete");
        Ok(())
    }
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("modelboard")
        .join("modelboard.db")
}
