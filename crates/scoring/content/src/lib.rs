//! Data-driven scoring content and loaders.
//!
//! This crate reads the tunable parts of the scoring engine from data files:
//! - Scoring configuration and the penalty catalog (TOML)
//! - Modifier catalogs: achievements, custom rules, starter power-ups (RON)
//!
//! Content seeds players and configures the engine; it never appears in the
//! score fold itself.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    AchievementSpec, CatalogLoader, ConfigLoader, ContentFactory, LoadResult, ModifierCatalog,
    PowerUpGrant, RuleSpec,
};
