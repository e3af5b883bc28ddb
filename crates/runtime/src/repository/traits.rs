//! Repository contract for saving and loading players.

use scoring_core::{Player, PlayerId};

use super::error::Result;

/// Repository for player persistence.
///
/// The runtime worker is the only writer; implementations only need to be
/// safe to share across threads, not to merge concurrent updates.
pub trait PlayerRepository: Send + Sync {
    /// Save a player, replacing any previous copy.
    fn save(&self, player: &Player) -> Result<()>;

    /// Load a player by id.
    fn load(&self, id: PlayerId) -> Result<Option<Player>>;

    /// Check if a player exists.
    fn exists(&self, id: PlayerId) -> bool;

    /// Delete a player. Deleting an unknown id is not an error.
    fn delete(&self, id: PlayerId) -> Result<()>;

    /// List all stored player ids in ascending order.
    fn list(&self) -> Result<Vec<PlayerId>>;

    /// Load every stored player.
    ///
    /// A save that cannot be read is logged and skipped so one bad record
    /// does not keep the others from loading. Only a failure to list fails.
    fn load_all(&self) -> Result<Vec<Player>> {
        let mut players = Vec::new();
        for id in self.list()? {
            match self.load(id) {
                Ok(Some(player)) => players.push(player),
                Ok(None) => {}
                Err(error) => tracing::warn!(
                    target: "runtime::repository",
                    player = %id,
                    %error,
                    "skipping unreadable save"
                ),
            }
        }
        Ok(players)
    }
}
