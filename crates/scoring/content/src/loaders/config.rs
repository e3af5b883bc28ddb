//! Scoring configuration loader.

use std::path::Path;

use scoring_core::ScoringConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for scoring configuration from TOML files.
///
/// Missing keys fall back to [`ScoringConfig::default`], so a file only
/// needs to name the values it overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing ScoringConfig
    pub fn load(path: &Path) -> LoadResult<ScoringConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse config data from TOML text.
    pub fn parse(content: &str) -> LoadResult<ScoringConfig> {
        let config: ScoringConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
