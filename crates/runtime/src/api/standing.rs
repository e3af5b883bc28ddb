use scoring_core::{LeaderboardEntry, PlayerId};
use serde::{Deserialize, Serialize};

/// Owned leaderboard row returned across the worker boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub name: String,
    pub score: i64,
    pub rank: usize,
}

impl From<LeaderboardEntry<'_>> for Standing {
    fn from(entry: LeaderboardEntry<'_>) -> Self {
        Self {
            player: entry.player.id,
            name: entry.player.name.clone(),
            score: entry.score,
            rank: entry.rank,
        }
    }
}
