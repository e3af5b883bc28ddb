//! Tracing subscriber setup for hosts embedding the runtime.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::api::{Result, RuntimeError};

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Write to `scoring.log` in this directory; stderr when `None`.
    pub log_dir: Option<PathBuf>,
    /// Filter used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            filter: "info".to_string(),
        }
    }
}

/// Installs the global subscriber.
///
/// Keep the returned guard alive for as long as logs should be flushed to
/// the file; it is `None` for stderr logging.
pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| RuntimeError::Logging(e.to_string()))?;

    match &config.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "scoring.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .try_init()
                .map_err(|e| RuntimeError::Logging(e.to_string()))?;

            tracing::info!(target: "runtime", log_dir = %dir.display(), "logging initialized");
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| RuntimeError::Logging(e.to_string()))?;
            Ok(None)
        }
    }
}
