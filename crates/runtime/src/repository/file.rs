//! File-based PlayerRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use scoring_core::{Player, PlayerId};

use super::PlayerRepository;
use super::error::{RepositoryError, Result};

/// File-based implementation of PlayerRepository.
///
/// Stores each player as `player_{id}.json` under a base directory. Writes
/// go to a temporary file first and are renamed into place, so a crash
/// mid-save leaves the previous copy intact.
pub struct FilePlayerRepository {
    base_dir: PathBuf,
}

impl FilePlayerRepository {
    /// Create a new file-based player repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    /// Platform data directory for player saves.
    ///
    /// - Linux: `~/.local/share/spotting-scoring/players`
    /// - macOS: `~/Library/Application Support/spotting-scoring/players`
    /// - Windows: `%APPDATA%\spotting-scoring\players`
    /// - Fallback: `./save_data/players`
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "spotting-scoring")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"))
            .join("players")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn player_path(&self, id: PlayerId) -> PathBuf {
        self.base_dir.join(format!("player_{}.json", id.0))
    }
}

impl PlayerRepository for FilePlayerRepository {
    fn save(&self, player: &Player) -> Result<()> {
        let path = self.player_path(player.id);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(player)?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            target: "runtime::repository",
            player = %player.id,
            path = %path.display(),
            "player saved"
        );
        Ok(())
    }

    fn load(&self, id: PlayerId) -> Result<Option<Player>> {
        let path = self.player_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let player: Player = serde_json::from_slice(&bytes)?;
        if player.id != id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds player {}",
                path.display(),
                player.id
            )));
        }
        Ok(Some(player))
    }

    fn exists(&self, id: PlayerId) -> bool {
        self.player_path(id).exists()
    }

    fn delete(&self, id: PlayerId) -> Result<()> {
        let path = self.player_path(id);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(target: "runtime::repository", player = %id, "player deleted");
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<PlayerId>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(id_str) = filename
                    .strip_prefix("player_")
                    .and_then(|s| s.strip_suffix(".json"))
                && let Ok(id) = id_str.parse::<u32>()
            {
                ids.push(PlayerId(id));
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use scoring_core::{Penalty, PenaltyId, PenaltyKind, PowerUpKind, Rarity, Timestamp};
    use scoring_core::engine::{penalty, power_up};

    use super::*;

    fn seeded_player() -> Player {
        let mut player = Player::new(PlayerId(4), "lin").with_base_points(80);
        penalty::apply(
            &mut player,
            Penalty::new(PenaltyId(1), "fine", PenaltyKind::PointDeduction, Timestamp(10))
                .with_points(7)
                .with_multiplier(1.5),
        )
        .unwrap();
        power_up::grant(&mut player, PowerUpKind::DoublePoints, 0, 5000, 2, Rarity::Epic);
        power_up::activate(&mut player, PowerUpKind::DoublePoints, Timestamp(20)).unwrap();
        player
    }

    #[test]
    fn save_then_load_preserves_modifiers() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepository::new(dir.path().join("nested")).unwrap();
        assert_eq!(repo.base_dir(), dir.path().join("nested"));
        let player = seeded_player();

        repo.save(&player).unwrap();
        let loaded = repo.load(PlayerId(4)).unwrap().unwrap();

        assert_eq!(loaded, player);
        assert_eq!(scoring_core::calculate_score(&loaded), 140);
    }

    #[test]
    fn list_ignores_foreign_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepository::new(dir.path()).unwrap();
        repo.save(&Player::new(PlayerId(12), "a")).unwrap();
        repo.save(&Player::new(PlayerId(3), "b")).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("player_x.json"), "{}").unwrap();

        assert_eq!(repo.list().unwrap(), vec![PlayerId(3), PlayerId(12)]);
    }

    #[test]
    fn delete_and_missing_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepository::new(dir.path()).unwrap();
        repo.save(&Player::new(PlayerId(1), "a")).unwrap();

        repo.delete(PlayerId(1)).unwrap();
        repo.delete(PlayerId(1)).unwrap();
        assert!(!repo.exists(PlayerId(1)));
        assert!(repo.load(PlayerId(1)).unwrap().is_none());
    }

    #[test]
    fn load_all_skips_unreadable_saves() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepository::new(dir.path()).unwrap();
        repo.save(&Player::new(PlayerId(1), "a")).unwrap();
        fs::write(dir.path().join("player_2.json"), "{ truncated").unwrap();

        assert!(repo.load(PlayerId(2)).is_err());
        let players = repo.load_all().unwrap();
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, PlayerId(1));
    }

    #[test]
    fn mismatched_id_is_corrupted() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepository::new(dir.path()).unwrap();
        repo.save(&Player::new(PlayerId(1), "a")).unwrap();
        fs::rename(dir.path().join("player_1.json"), dir.path().join("player_2.json")).unwrap();

        assert!(matches!(
            repo.load(PlayerId(2)),
            Err(RepositoryError::CorruptedData(_))
        ));
    }
}
