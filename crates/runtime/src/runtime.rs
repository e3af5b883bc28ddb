//! High-level runtime orchestrator.
//!
//! The runtime owns the scoring worker, wires up command/event channels, and
//! exposes a builder-based API for hosts to configure clock, content, and
//! persistence.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use scoring_content::ModifierCatalog;
use scoring_core::{Clock, Player, ScoreEvent, SystemClock};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::config::RuntimeConfig;
use crate::repository::{FilePlayerRepository, PlayerRepository};
use crate::workers::{Command, ScoringWorker, WorkerContext};

/// Main runtime that hosts the scoring worker.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to score events
    pub fn subscribe(&self) -> broadcast::Receiver<ScoreEvent> {
        self.handle.subscribe()
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// Outstanding handles start failing with
    /// [`RuntimeError::CommandChannelClosed`] afterwards.
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already be gone; joining reports the real outcome.
        let _ = self.handle.shutdown().await;
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    clock: Option<Arc<dyn Clock>>,
    catalog: Option<ModifierCatalog>,
    repository: Option<Arc<dyn PlayerRepository>>,
    players: Vec<Player>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            clock: None,
            catalog: None,
            repository: None,
            players: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Time source for expiry. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Catalog used to seed players added without any modifiers.
    pub fn catalog(mut self, catalog: ModifierCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Persist players through `repository`.
    ///
    /// Takes precedence over `RuntimeConfig::save_dir`.
    pub fn repository(mut self, repository: Arc<dyn PlayerRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Preload a player. Replaces a stored player with the same id.
    pub fn player(mut self, player: Player) -> Self {
        self.players.push(player);
        self
    }

    /// Build the runtime and spawn its worker.
    ///
    /// Players already stored in the repository are loaded first.
    pub async fn build(self) -> Result<Runtime> {
        let repository = match (self.repository, &self.config.save_dir) {
            (Some(repo), _) => Some(repo),
            (None, Some(dir)) => {
                let files = FilePlayerRepository::new(dir)?;
                info!(
                    target: "runtime",
                    save_dir = %files.base_dir().display(),
                    "persisting players to disk"
                );
                Some(Arc::new(files) as Arc<dyn PlayerRepository>)
            }
            (None, None) => None,
        };

        let mut players = match &repository {
            Some(repo) => repo.load_all()?,
            None => Vec::new(),
        };
        for player in self.players {
            players.retain(|p| p.id != player.id);
            players.push(player);
        }

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let (event_tx, _event_rx) =
            broadcast::channel::<ScoreEvent>(self.config.event_buffer_size);

        let handle = RuntimeHandle::new(command_tx, event_tx.clone());

        let ctx = WorkerContext {
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            config: self.config.scoring,
            catalog: self.catalog,
            repository,
            sweep_interval: self.config.sweep_interval,
        };
        let worker = ScoringWorker::new(players, ctx, command_rx, event_tx);

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
