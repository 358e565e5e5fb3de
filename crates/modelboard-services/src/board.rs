//! Board actor - sole owner of catalog, view and status
//!
//! Every mutation goes through one task, so a catalog replacement is never
//! observed half-applied. Callers talk to it through a cloneable [`BoardHandle`].
//! Remote fetches run on their own task; filter, sort and render commands are
//! served while a fetch is outstanding.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use modelboard_core::{
    Board, CardDescriptor, Catalog, ModelboardError, SourcePayload, SourceStatus, ViewState,
};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{SettingsService, SourceClient, SourceError};

const COMMAND_BUFFER: usize = 64;
const SUPERSEDED: &str = "superseded by a newer connection attempt";

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("board has shut down")]
    Closed,

    #[error(transparent)]
    Core(#[from] ModelboardError),
}

pub type Result<T> = std::result::Result<T, BoardError>;

/// Result of one `connect` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected { url: String, models: usize },
    Failed { url: String, reason: String },
    /// Empty URL; nothing happened
    Skipped,
}

impl ConnectOutcome {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectOutcome::Connected { .. })
    }
}

/// How a failed attempt is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectMode {
    /// Failure is written to the status regions
    Interactive,
    /// Failure restores the status that was showing before the attempt
    Background,
}

/// Point-in-time copy of the board
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub catalog: Catalog,
    pub view: ViewState,
    pub status: SourceStatus,
    pub connecting: Option<String>,
}

enum Command {
    SetFilter {
        filter: String,
        reply: oneshot::Sender<Vec<CardDescriptor>>,
    },
    SetSort {
        key: String,
        reply: oneshot::Sender<modelboard_core::Result<Vec<CardDescriptor>>>,
    },
    Render {
        reply: oneshot::Sender<Vec<CardDescriptor>>,
    },
    Snapshot {
        reply: oneshot::Sender<BoardSnapshot>,
    },
    Connect {
        url: String,
        mode: ConnectMode,
        reply: oneshot::Sender<ConnectOutcome>,
    },
    Reset {
        reply: oneshot::Sender<Vec<CardDescriptor>>,
    },
}

struct FetchDone {
    attempt: u64,
    result: std::result::Result<SourcePayload, SourceError>,
}

struct InFlight {
    attempt: u64,
    url: String,
    cancel: CancellationToken,
    reply: oneshot::Sender<ConnectOutcome>,
    mode: ConnectMode,
    /// Status before the first attempt of an unbroken chain of connects
    previous: SourceStatus,
}

#[derive(Clone)]
pub struct BoardHandle {
    tx: mpsc::Sender<Command>,
}

impl BoardHandle {
    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(build(reply))
            .await
            .map_err(|_| BoardError::Closed)?;
        rx.await.map_err(|_| BoardError::Closed)
    }

    /// Any value is accepted; unknown categories show no benchmarks
    pub async fn set_filter(&self, filter: &str) -> Result<Vec<CardDescriptor>> {
        let filter = filter.to_string();
        self.request(|reply| Command::SetFilter { filter, reply })
            .await
    }

    pub async fn set_sort(&self, key: &str) -> Result<Vec<CardDescriptor>> {
        let key = key.to_string();
        Ok(self.request(|reply| Command::SetSort { key, reply }).await??)
    }

    pub async fn render(&self) -> Result<Vec<CardDescriptor>> {
        self.request(|reply| Command::Render { reply }).await
    }

    pub async fn snapshot(&self) -> Result<BoardSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Replace the catalog from a remote document. Resolves once the attempt
    /// finishes, fails, or is superseded by a later `connect`.
    pub async fn connect(&self, url: &str) -> Result<ConnectOutcome> {
        self.connect_with(url, ConnectMode::Interactive).await
    }

    pub async fn connect_with(&self, url: &str, mode: ConnectMode) -> Result<ConnectOutcome> {
        let url = url.trim().to_string();
        self.request(|reply| Command::Connect { url, mode, reply })
            .await
    }

    /// Back to the built-in catalog and status. Cancels any outstanding fetch.
    pub async fn reset(&self) -> Result<Vec<CardDescriptor>> {
        self.request(|reply| Command::Reset { reply }).await
    }
}

pub struct BoardService;

impl BoardService {
    /// Spawn the actor on the current tokio runtime
    pub fn spawn(
        board: Board,
        client: SourceClient,
        settings: Arc<SettingsService>,
        timeout: Duration,
    ) -> BoardHandle {
        let (tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (fetch_tx, fetches) = mpsc::unbounded_channel();

        let actor = BoardActor {
            board,
            client,
            settings,
            timeout,
            attempt: 0,
            in_flight: None,
            fetch_tx,
        };
        tokio::spawn(actor.run(commands, fetches));

        BoardHandle { tx }
    }
}

struct BoardActor {
    board: Board,
    client: SourceClient,
    settings: Arc<SettingsService>,
    timeout: Duration,
    attempt: u64,
    in_flight: Option<InFlight>,
    fetch_tx: mpsc::UnboundedSender<FetchDone>,
}

impl BoardActor {
    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        mut fetches: mpsc::UnboundedReceiver<FetchDone>,
    ) {
        debug!("Board actor started");
        loop {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(cmd) => self.handle(cmd),
                    None => break,
                },
                Some(done) = fetches.recv() => self.finish(done),
            }
        }

        if let Some(pending) = self.in_flight.take() {
            pending.cancel.cancel();
        }
        debug!("Board actor stopped");
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::SetFilter { filter, reply } => {
                let _ = reply.send(self.board.set_filter(&filter));
            }
            Command::SetSort { key, reply } => {
                let _ = reply.send(self.board.set_sort(&key));
            }
            Command::Render { reply } => {
                let _ = reply.send(self.board.render());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(BoardSnapshot {
                    catalog: self.board.catalog().clone(),
                    view: self.board.view().clone(),
                    status: self.board.status().clone(),
                    connecting: self.in_flight.as_ref().map(|p| p.url.clone()),
                });
            }
            Command::Connect { url, mode, reply } => self.start_connect(url, mode, reply),
            Command::Reset { reply } => {
                self.supersede();
                self.board.replace_catalog(Catalog::builtin().records().to_vec());
                self.board.set_status(SourceStatus::builtin());
                let _ = reply.send(self.board.render());
            }
        }
    }

    fn start_connect(&mut self, url: String, mode: ConnectMode, reply: oneshot::Sender<ConnectOutcome>) {
        if url.is_empty() {
            let _ = reply.send(ConnectOutcome::Skipped);
            return;
        }

        let previous = self
            .supersede()
            .unwrap_or_else(|| self.board.status().clone());

        self.attempt += 1;
        let attempt = self.attempt;
        let cancel = CancellationToken::new();

        info!("Connecting to {} (attempt {})", url, attempt);
        let connecting = self.board.status().connecting(&url);
        self.board.set_status(connecting);

        let client = self.client.clone();
        let fetch_tx = self.fetch_tx.clone();
        let fetch_url = url.clone();
        let fetch_cancel = cancel.clone();
        let timeout = self.timeout;
        tokio::spawn(async move {
            let result = client.fetch(&fetch_url, timeout, &fetch_cancel).await;
            let _ = fetch_tx.send(FetchDone { attempt, result });
        });

        self.in_flight = Some(InFlight {
            attempt,
            url,
            cancel,
            reply,
            mode,
            previous,
        });
    }

    /// Cancel the outstanding attempt, if any. Returns the status from before
    /// it, so a replacing attempt can carry it forward.
    fn supersede(&mut self) -> Option<SourceStatus> {
        let pending = self.in_flight.take()?;
        info!("Cancelling connection to {} (attempt {})", pending.url, pending.attempt);
        pending.cancel.cancel();
        let _ = pending.reply.send(ConnectOutcome::Failed {
            url: pending.url,
            reason: SUPERSEDED.to_string(),
        });
        Some(pending.previous)
    }

    fn finish(&mut self, done: FetchDone) {
        let current = self.in_flight.as_ref().map(|p| p.attempt);
        if current != Some(done.attempt) {
            debug!("Ignoring stale result for attempt {}", done.attempt);
            return;
        }
        let Some(pending) = self.in_flight.take() else {
            return;
        };

        let outcome = match done.result {
            Ok(payload) => self.apply(&pending.url, payload),
            Err(e) => {
                let reason = e.to_string();
                match pending.mode {
                    ConnectMode::Background => {
                        warn!("Background connection to {} failed: {}", pending.url, reason);
                        self.board.set_status(pending.previous);
                    }
                    ConnectMode::Interactive => {
                        warn!("Connection to {} failed: {}", pending.url, reason);
                        let failed = self.board.status().failed(&pending.url, &reason);
                        self.board.set_status(failed);
                    }
                }
                ConnectOutcome::Failed {
                    url: pending.url,
                    reason,
                }
            }
        };

        let _ = pending.reply.send(outcome);
    }

    fn apply(&mut self, url: &str, payload: SourcePayload) -> ConnectOutcome {
        let now = Local::now();
        let models = payload.models.len();
        let last_updated = payload
            .last_updated
            .unwrap_or_else(|| now.format("%Y-%m-%d").to_string());
        let verification = payload
            .source_check
            .unwrap_or_else(|| format!("Verified {}", now.format("%Y-%m-%d %H:%M")));

        self.board.replace_catalog(payload.models);
        self.board
            .set_status(SourceStatus::connected(url, models, &last_updated, &verification));

        match self.settings.set_source_url(url) {
            Ok(()) => info!("Connected to {}: {} models", url, models),
            Err(e) => warn!("Connected to {} but failed to save source preference: {}", url, e),
        }

        ConnectOutcome::Connected {
            url: url.to_string(),
            models,
        }
    }
}
