//! Host runtime for the scoring engine.
//!
//! This crate wires the pure engine from `scoring-core` into an async host:
//! one worker task owns every loaded player, clients talk to it through a
//! cloneable [`RuntimeHandle`], a ticker drives expiry sweeps, and score
//! events fan out on a broadcast channel.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`repository`] persists players between sessions
//! - [`config`] and [`logging`] cover process-level setup
pub mod api;
pub mod config;
pub mod logging;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{PlayerOp, Result, RuntimeError, RuntimeHandle, Standing};
pub use config::RuntimeConfig;
pub use logging::LoggingConfig;
pub use repository::{FilePlayerRepository, InMemoryPlayerRepo, PlayerRepository, RepositoryError};
pub use runtime::{Runtime, RuntimeBuilder};
