//! Content factory for loading scoring content from a data directory.

use std::path::{Path, PathBuf};

use scoring_core::ScoringConfig;

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, ModifierCatalog};

/// Content factory that loads all scoring content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── scoring.toml
/// └── catalog.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the content shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load scoring configuration from `scoring.toml`.
    pub fn load_config(&self) -> LoadResult<ScoringConfig> {
        ConfigLoader::load(&self.data_dir.join("scoring.toml"))
    }

    /// Load the modifier catalog from `catalog.ron`.
    pub fn load_catalog(&self) -> LoadResult<ModifierCatalog> {
        CatalogLoader::load(&self.data_dir.join("catalog.ron"))
    }
}

#[cfg(test)]
mod tests {
    use scoring_core::{PenaltyEvent, PenaltyKind};

    use super::*;

    #[test]
    fn bundled_content_loads() {
        let factory = ContentFactory::bundled();

        let config = factory.load_config().unwrap();
        assert_eq!(
            config.penalty_catalog.template(PenaltyEvent::OversteppedTurn).kind,
            PenaltyKind::Silenced
        );

        let catalog = factory.load_catalog().unwrap();
        assert!(!catalog.achievements.is_empty());
        assert!(!catalog.rules.is_empty());
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path().join("absent"));
        assert!(factory.load_config().is_err());
        assert!(factory.load_catalog().is_err());
    }
}
