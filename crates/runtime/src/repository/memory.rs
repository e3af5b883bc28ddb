use std::collections::BTreeMap;
use std::sync::RwLock;

use scoring_core::{Player, PlayerId};

use super::PlayerRepository;
use super::error::{RepositoryError, Result};

/// In-memory implementation of PlayerRepository
#[derive(Default)]
pub struct InMemoryPlayerRepo {
    players: RwLock<BTreeMap<PlayerId, Player>>,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.players.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlayerRepository for InMemoryPlayerRepo {
    fn save(&self, player: &Player) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        players.insert(player.id, player.clone());
        Ok(())
    }

    fn load(&self, id: PlayerId) -> Result<Option<Player>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(players.get(&id).cloned())
    }

    fn exists(&self, id: PlayerId) -> bool {
        self.players
            .read()
            .map(|p| p.contains_key(&id))
            .unwrap_or(false)
    }

    fn delete(&self, id: PlayerId) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        players.remove(&id);
        Ok(())
    }

    fn list(&self) -> Result<Vec<PlayerId>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(players.keys().copied().collect())
    }
}
