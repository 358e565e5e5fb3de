//! Service container - wires storage, the source client and the board actor

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use modelboard_core::{Board, Catalog, ModelboardConfig, ModelboardError};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{
    BoardHandle, BoardService, ConnectMode, ConnectOutcome, Database, SettingsError,
    SettingsService, SourceClient,
};

#[derive(Debug, Error)]
pub enum ServicesError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Config(#[from] ModelboardError),
}

pub struct Services {
    pub board: BoardHandle,
    pub settings: Arc<SettingsService>,
    pub config: ModelboardConfig,
    db_path: Option<PathBuf>,
}

impl Services {
    /// Open the settings database named by the config and spawn the board.
    /// Must be called from within a tokio runtime.
    pub fn start(config: ModelboardConfig) -> Result<Self, ServicesError> {
        let db = Database::open(config.storage.db_path.clone())?;
        Self::with_database(config, db)
    }

    pub fn with_database(config: ModelboardConfig, db: Database) -> Result<Self, ServicesError> {
        let view = config.view.view_state()?;
        let settings = Arc::new(SettingsService::new(db.connection()));
        let timeout = Duration::from_secs(config.source.timeout_secs);

        let board = BoardService::spawn(
            Board::new(Catalog::builtin(), view),
            SourceClient::new(),
            settings.clone(),
            timeout,
        );

        Ok(Self {
            board,
            settings,
            config,
            db_path: db.path().map(PathBuf::from),
        })
    }

    pub fn db_path(&self) -> Option<&std::path::Path> {
        self.db_path.as_deref()
    }

    /// Source to try at startup: the stored preference, else the configured default
    pub fn startup_source(&self) -> Option<String> {
        let stored = self.settings.source_url().unwrap_or_else(|e| {
            warn!("Failed to read source preference: {}", e);
            None
        });
        stored.or_else(|| self.config.source.default_url.clone())
    }

    /// Source to reconnect to, unless reconnecting is disabled
    fn reconnect_target(&self) -> Option<String> {
        if !self.config.source.auto_reconnect {
            return None;
        }
        self.startup_source()
    }

    /// Best-effort reconnect to the last good source. Failures leave the
    /// built-in catalog and status in place.
    pub async fn auto_reconnect(&self) -> Option<ConnectOutcome> {
        let url = self.reconnect_target()?;
        Some(reconnect(self.board.clone(), url).await)
    }

    /// Same as [`Services::auto_reconnect`], but on its own task. Returns at
    /// once; the board serves the current catalog until the attempt lands.
    pub fn spawn_auto_reconnect(&self) -> Option<JoinHandle<ConnectOutcome>> {
        let url = self.reconnect_target()?;
        Some(tokio::spawn(reconnect(self.board.clone(), url)))
    }
}

async fn reconnect(board: BoardHandle, url: String) -> ConnectOutcome {
    info!("Reconnecting to saved source {}", url);
    board
        .connect_with(&url, ConnectMode::Background)
        .await
        .unwrap_or_else(|e| {
            warn!("Auto-reconnect skipped: {}", e);
            ConnectOutcome::Skipped
        })
}
