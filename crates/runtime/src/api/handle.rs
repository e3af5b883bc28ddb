//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! mutating players, querying scores, and streaming [`ScoreEvent`]s.
use tokio::sync::{broadcast, mpsc, oneshot};

use scoring_content::PowerUpGrant;
use scoring_core::{
    AchievementKind, PenaltyEvent, Player, PlayerId, PowerUpKind, ScoreEvent, Team, TeamStanding,
};

use super::errors::{Result, RuntimeError};
use super::ops::PlayerOp;
use super::standing::Standing;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<ScoreEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<ScoreEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the reply.
    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Load a player into the runtime.
    ///
    /// Returns the events produced by seeding it from the catalog.
    pub async fn add_player(&self, player: Player) -> Result<Vec<ScoreEvent>> {
        self.request(|reply| Command::AddPlayer {
            player: Box::new(player),
            reply,
        })
        .await?
    }

    /// Unload a player, returning its final state.
    pub async fn remove_player(&self, id: PlayerId) -> Result<Player> {
        self.request(|reply| Command::RemovePlayer { id, reply })
            .await?
    }

    /// Apply a mutation to one player.
    pub async fn apply(&self, id: PlayerId, op: PlayerOp) -> Result<Vec<ScoreEvent>> {
        self.request(|reply| Command::Apply { id, op, reply })
            .await?
    }

    pub async fn award_points(&self, id: PlayerId, points: i64) -> Result<Vec<ScoreEvent>> {
        self.apply(id, PlayerOp::AwardPoints(points)).await
    }

    pub async fn penalize(&self, id: PlayerId, event: PenaltyEvent) -> Result<Vec<ScoreEvent>> {
        self.apply(id, PlayerOp::Penalize(event)).await
    }

    pub async fn grant_power_up(
        &self,
        id: PlayerId,
        grant: PowerUpGrant,
    ) -> Result<Vec<ScoreEvent>> {
        self.apply(id, PlayerOp::GrantPowerUp(grant)).await
    }

    pub async fn activate_power_up(
        &self,
        id: PlayerId,
        kind: PowerUpKind,
    ) -> Result<Vec<ScoreEvent>> {
        self.apply(id, PlayerOp::ActivatePowerUp(kind)).await
    }

    pub async fn track_progress(
        &self,
        id: PlayerId,
        kind: AchievementKind,
        amount: u32,
    ) -> Result<Vec<ScoreEvent>> {
        self.apply(id, PlayerOp::TrackProgress { kind, amount }).await
    }

    /// Close a round for every loaded player.
    pub async fn advance_round(&self) -> Result<Vec<ScoreEvent>> {
        self.request(|reply| Command::AdvanceRound { reply }).await
    }

    /// Expire modifiers now rather than on the next periodic sweep.
    pub async fn sweep(&self) -> Result<Vec<ScoreEvent>> {
        self.request(|reply| Command::Sweep { reply }).await
    }

    /// Query a player (read-only snapshot)
    pub async fn player(&self, id: PlayerId) -> Result<Player> {
        self.request(|reply| Command::QueryPlayer { id, reply })
            .await?
    }

    /// Effective score of one player.
    pub async fn score(&self, id: PlayerId) -> Result<i64> {
        self.request(|reply| Command::QueryScore { id, reply })
            .await?
    }

    pub async fn leaderboard(&self) -> Result<Vec<Standing>> {
        self.request(|reply| Command::Leaderboard { reply }).await
    }

    /// Team totals computed against one consistent view of all players.
    pub async fn team_standings(&self, teams: Vec<Team>) -> Result<Vec<TeamStanding>> {
        self.request(|reply| Command::TeamStandings { teams, reply })
            .await
    }

    /// Subscribe to score events from every player.
    pub fn subscribe(&self) -> broadcast::Receiver<ScoreEvent> {
        self.event_tx.subscribe()
    }

    pub(crate) async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }
}
