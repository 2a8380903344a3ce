//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive a duel.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use duel_core::{DuelConfig, MatchState, PcgRng, RngSource, SpellCatalog};

use crate::api::{
    ActionProvider, DuelHandle, InstantPresenter, PresentationPort, Result, RuntimeError,
};
use crate::events::EventBus;
use crate::providers::RandomOpponentProvider;
use crate::workers::{Command, DuelController, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub duel: DuelConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Pause before the non-human side declares.
    pub opponent_delay: Duration,
    /// Seed for the accuracy rolls; random when unset.
    pub seed: Option<u64>,
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `DUEL_OPPONENT_DELAY_MS` - opponent pacing delay (default: 1000)
    /// - `DUEL_SEED` - fixed seed for accuracy rolls and opponent picks
    /// - `DUEL_EVENT_BUFFER` / `DUEL_COMMAND_BUFFER` - channel capacities
    /// - `DUEL_PLAYER_NAME` / `DUEL_OPPONENT_NAME` - combatant names
    /// - `DUEL_LOG_CAPACITY` - match log entries kept (default: 4)
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(delay) = read_env::<u64>("DUEL_OPPONENT_DELAY_MS") {
            config.opponent_delay = Duration::from_millis(delay);
        }

        if let Some(seed) = read_env::<u64>("DUEL_SEED") {
            config.seed = Some(seed);
        }

        if let Some(capacity) = read_env::<usize>("DUEL_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(capacity) = read_env::<usize>("DUEL_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        let player_name = read_env::<String>("DUEL_PLAYER_NAME")
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| config.duel.player_name.clone());
        let opponent_name = read_env::<String>("DUEL_OPPONENT_NAME")
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| config.duel.opponent_name.clone());
        config.duel = DuelConfig::with_names(player_name, opponent_name);

        if let Some(capacity) = read_env::<usize>("DUEL_LOG_CAPACITY") {
            config.duel = config.duel.with_log_capacity(capacity);
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            duel: DuelConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            opponent_delay: Duration::from_millis(1000),
            seed: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that hosts one duel.
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`DuelHandle`] provides a cloneable façade for clients.
pub struct DuelRuntime {
    handle: DuelHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl DuelRuntime {
    /// Create a new runtime builder
    pub fn builder() -> DuelRuntimeBuilder {
        DuelRuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> DuelHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every handle (including clones held elsewhere)
    /// has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`DuelRuntime`] with flexible configuration.
pub struct DuelRuntimeBuilder {
    config: RuntimeConfig,
    catalog: SpellCatalog,
    state: Option<MatchState>,
    rng: Option<Box<dyn RngSource + Send>>,
    presenter: Option<Arc<dyn PresentationPort>>,
    opponent_provider: Option<Arc<dyn ActionProvider>>,
}

impl DuelRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: SpellCatalog::standard(),
            state: None,
            rng: None,
            presenter: None,
            opponent_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the spell catalog (defaults to the four standard spells)
    pub fn catalog(mut self, catalog: SpellCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Resume from an existing match state instead of a fresh duel
    pub fn initial_state(mut self, state: MatchState) -> Self {
        self.state = Some(state);
        self
    }

    /// Replace the accuracy-roll source (defaults to a [`PcgRng`] seeded from
    /// the config, or from entropy)
    pub fn rng(mut self, rng: impl RngSource + Send + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    /// Set the presentation port (defaults to [`InstantPresenter`])
    pub fn presenter(mut self, presenter: impl PresentationPort + 'static) -> Self {
        self.presenter = Some(Arc::new(presenter));
        self
    }

    /// Set the non-human side's action provider (defaults to
    /// [`RandomOpponentProvider`], seeded from the config when a seed is set)
    pub fn opponent_provider(mut self, provider: impl ActionProvider + 'static) -> Self {
        self.opponent_provider = Some(Arc::new(provider));
        self
    }

    /// Build the runtime and spawn its worker
    pub fn build(self) -> DuelRuntime {
        let config = self.config;
        let seed = config.seed.unwrap_or_else(rand::random);

        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(PcgRng::new(seed)));
        let controller = match self.state {
            Some(state) => DuelController::from_state(self.catalog, config.duel.clone(), state, rng),
            None => DuelController::new(self.catalog, config.duel.clone(), rng),
        };

        let presenter = self
            .presenter
            .unwrap_or_else(|| Arc::new(InstantPresenter));
        let opponent = self.opponent_provider.unwrap_or_else(|| {
            let provider = match config.seed {
                Some(seed) => RandomOpponentProvider::seeded(seed),
                None => RandomOpponentProvider::new(),
            };
            Arc::new(provider.with_catalog(controller.catalog().clone()))
        });

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);
        let handle = DuelHandle::new(command_tx, event_bus.clone());

        tracing::debug!(
            seed,
            opponent_delay_ms = config.opponent_delay.as_millis() as u64,
            "Building duel runtime"
        );

        let sim_worker = SimulationWorker::new(
            controller,
            presenter,
            opponent,
            config.opponent_delay,
            command_rx,
            event_bus,
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        DuelRuntime {
            handle,
            sim_worker_handle,
        }
    }
}
