//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use scoring_core::ScoringConfig;

use crate::logging::LoggingConfig;
use crate::repository::FilePlayerRepository;

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub scoring: ScoringConfig,
    /// How often the worker expires modifiers for every player.
    pub sweep_interval: Duration,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// Directory for JSON player saves. `None` disables file persistence
    /// unless a repository is supplied to the builder.
    pub save_dir: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl RuntimeConfig {
    pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_millis(250);
    pub const DEFAULT_COMMAND_BUFFER: usize = 32;
    pub const DEFAULT_EVENT_CAPACITY: usize = 256;

    /// Construct configuration from process environment variables.
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// Environment variables:
    /// - `SCORING_SWEEP_INTERVAL_MS` - Expiry sweep period (default: 250)
    /// - `SCORING_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `SCORING_EVENT_CAPACITY` - Event broadcast capacity (default: 256)
    /// - `SCORING_SAVE_DIR` - Directory for player saves (default: the
    ///   platform data directory; set it empty to disable persistence)
    /// - `SCORING_LOG_DIR` - Write logs to this directory instead of stderr
    /// - `SCORING_LOG` - Default log filter when `RUST_LOG` is unset (default: info)
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::default();

        if let Some(millis) = read_env::<u64>("SCORING_SWEEP_INTERVAL_MS") {
            config.sweep_interval = Duration::from_millis(millis.max(1));
        }
        if let Some(capacity) = read_env::<usize>("SCORING_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("SCORING_EVENT_CAPACITY") {
            config.event_buffer_size = capacity.max(1);
        }

        config.save_dir = match env::var("SCORING_SAVE_DIR") {
            Ok(dir) if dir.is_empty() => None,
            Ok(dir) => Some(PathBuf::from(dir)),
            Err(_) => Some(FilePlayerRepository::default_dir()),
        };
        config.logging.log_dir = env::var("SCORING_LOG_DIR").ok().map(PathBuf::from);
        if let Ok(filter) = env::var("SCORING_LOG") {
            config.logging.filter = filter;
        }

        config
    }

    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            sweep_interval: Self::DEFAULT_SWEEP_INTERVAL,
            command_buffer_size: Self::DEFAULT_COMMAND_BUFFER,
            event_buffer_size: Self::DEFAULT_EVENT_CAPACITY,
            save_dir: None,
            logging: LoggingConfig::default(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
