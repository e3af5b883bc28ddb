//! Worker tasks that back the runtime orchestration.
//!
//! The scoring worker is the single writer for every loaded player.

mod scoring;

pub use scoring::{Command, ScoringWorker, WorkerContext};
