//! Environment-driven runtime configuration.
//!
//! One test per binary: the process environment is shared.

use std::path::PathBuf;
use std::time::Duration;

use scoring_runtime::{FilePlayerRepository, RuntimeConfig};

#[test]
fn from_env_reads_overrides_and_defaults() {
    // SAFETY: this binary runs a single test, so nothing reads the environment concurrently.
    unsafe {
        std::env::remove_var("SCORING_SAVE_DIR");
        std::env::remove_var("SCORING_LOG");
        std::env::remove_var("SCORING_COMMAND_BUFFER");
        std::env::set_var("SCORING_SWEEP_INTERVAL_MS", "40");
        std::env::set_var("SCORING_EVENT_CAPACITY", "0");
    }
    let config = RuntimeConfig::from_env();

    assert_eq!(config.sweep_interval, Duration::from_millis(40));
    assert_eq!(config.event_buffer_size, 1);
    assert_eq!(
        config.command_buffer_size,
        RuntimeConfig::DEFAULT_COMMAND_BUFFER
    );
    assert_eq!(config.save_dir, Some(FilePlayerRepository::default_dir()));
    assert_eq!(config.logging.filter, "info");

    unsafe {
        std::env::set_var("SCORING_SAVE_DIR", "/tmp/scoring-saves");
    }
    assert_eq!(
        RuntimeConfig::from_env().save_dir,
        Some(PathBuf::from("/tmp/scoring-saves"))
    );

    unsafe {
        std::env::set_var("SCORING_SAVE_DIR", "");
    }
    assert_eq!(RuntimeConfig::from_env().save_dir, None);
}
