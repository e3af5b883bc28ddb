//! Scoring worker that owns every loaded [`Player`].
//!
//! Receives commands from [`crate::RuntimeHandle`], applies them through
//! [`ScoringEngine`], and publishes the resulting [`ScoreEvent`]s. Being the
//! only owner of the players, it serializes all mutations per player and
//! keeps team totals consistent without locks.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use scoring_content::ModifierCatalog;
use scoring_core::{
    AchievementKind, Clock, EngineError, Player, PlayerId, ScoreEvent, ScoringConfig,
    ScoringEngine, ScoringError, Team, TeamStanding,
};

use crate::api::{PlayerOp, Result, RuntimeError, Standing};
use crate::repository::PlayerRepository;

/// Commands that can be sent to the scoring worker.
pub enum Command {
    /// Load a player. Players without any modifiers are seeded from the catalog.
    AddPlayer {
        player: Box<Player>,
        reply: oneshot::Sender<Result<Vec<ScoreEvent>>>,
    },
    /// Unload a player and delete it from the repository.
    RemovePlayer {
        id: PlayerId,
        reply: oneshot::Sender<Result<Player>>,
    },
    /// Apply one mutation to one player.
    Apply {
        id: PlayerId,
        op: PlayerOp,
        reply: oneshot::Sender<Result<Vec<ScoreEvent>>>,
    },
    /// Close a round for every player.
    AdvanceRound {
        reply: oneshot::Sender<Vec<ScoreEvent>>,
    },
    /// Run an expiry sweep now instead of waiting for the ticker.
    Sweep {
        reply: oneshot::Sender<Vec<ScoreEvent>>,
    },
    QueryPlayer {
        id: PlayerId,
        reply: oneshot::Sender<Result<Player>>,
    },
    QueryScore {
        id: PlayerId,
        reply: oneshot::Sender<Result<i64>>,
    },
    Leaderboard {
        reply: oneshot::Sender<Vec<Standing>>,
    },
    TeamStandings {
        teams: Vec<Team>,
        reply: oneshot::Sender<Vec<TeamStanding>>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Everything the worker needs besides its channels.
pub struct WorkerContext {
    pub clock: Arc<dyn Clock>,
    pub config: ScoringConfig,
    pub catalog: Option<ModifierCatalog>,
    pub repository: Option<Arc<dyn PlayerRepository>>,
    pub sweep_interval: Duration,
}

/// Background task that processes scoring commands.
pub struct ScoringWorker {
    players: BTreeMap<PlayerId, Player>,
    ctx: WorkerContext,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<ScoreEvent>,
}

impl ScoringWorker {
    pub fn new(
        players: impl IntoIterator<Item = Player>,
        ctx: WorkerContext,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<ScoreEvent>,
    ) -> Self {
        let players: BTreeMap<PlayerId, Player> =
            players.into_iter().map(|p| (p.id, p)).collect();
        info!(
            target: "runtime::worker",
            players = players.len(),
            sweep_ms = ctx.sweep_interval.as_millis() as u64,
            persistence = ctx.repository.is_some(),
            "ScoringWorker initialized"
        );

        Self {
            players,
            ctx,
            command_rx,
            event_tx,
        }
    }

    /// Main worker loop. Exits on `Shutdown` or once every handle is dropped.
    pub async fn run(mut self) {
        let period = self.ctx.sweep_interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown { reply }) => {
                        let _ = reply.send(());
                        break;
                    }
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                _ = ticker.tick() => {
                    self.sweep();
                }
            }
        }

        info!(target: "runtime::worker", "ScoringWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::AddPlayer { player, reply } => {
                let result = self.add_player(*player);
                if reply.send(result).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "AddPlayer reply channel closed (caller dropped)"
                    );
                }
            }
            Command::RemovePlayer { id, reply } => {
                let result = self.remove_player(id);
                if reply.send(result).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "RemovePlayer reply channel closed (caller dropped)"
                    );
                }
            }
            Command::Apply { id, op, reply } => {
                let result = self.apply(id, op);
                if reply.send(result).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "Apply reply channel closed (caller dropped)"
                    );
                }
            }
            Command::AdvanceRound { reply } => {
                let events = self.advance_round();
                if reply.send(events).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "AdvanceRound reply channel closed (caller dropped)"
                    );
                }
            }
            Command::Sweep { reply } => {
                let events = self.sweep();
                if reply.send(events).is_err() {
                    debug!(
                        target: "runtime::worker",
                        "Sweep reply channel closed (caller dropped)"
                    );
                }
            }
            Command::QueryPlayer { id, reply } => {
                let result = self
                    .players
                    .get(&id)
                    .cloned()
                    .ok_or(RuntimeError::UnknownPlayer(id));
                let _ = reply.send(result);
            }
            Command::QueryScore { id, reply } => {
                let result = self
                    .players
                    .get(&id)
                    .map(|p| self.engine().score(p))
                    .ok_or(RuntimeError::UnknownPlayer(id));
                let _ = reply.send(result);
            }
            Command::Leaderboard { reply } => {
                let _ = reply.send(self.leaderboard());
            }
            Command::TeamStandings { teams, reply } => {
                let players: Vec<Player> = self.players.values().cloned().collect();
                let _ = reply.send(self.engine().team_standings(&teams, &players));
            }
            // Handled by the run loop.
            Command::Shutdown { reply } => {
                let _ = reply.send(());
            }
        }
    }

    fn engine(&self) -> ScoringEngine<'_> {
        ScoringEngine::new(self.ctx.clock.as_ref(), &self.ctx.config)
    }

    fn add_player(&mut self, mut player: Player) -> Result<Vec<ScoreEvent>> {
        if self.players.contains_key(&player.id) {
            return Err(RuntimeError::PlayerExists(player.id));
        }

        let events = match &self.ctx.catalog {
            Some(catalog) if is_fresh(&player) => {
                catalog.install(&mut player, self.ctx.clock.now())
            }
            _ => Vec::new(),
        };
        info!(target: "runtime::worker", player = %player.id, name = %player.name, "player added");

        self.persist(&player);
        self.publish(&events);
        self.players.insert(player.id, player);
        Ok(events)
    }

    fn remove_player(&mut self, id: PlayerId) -> Result<Player> {
        if !self.players.contains_key(&id) {
            return Err(RuntimeError::UnknownPlayer(id));
        }
        // Only unload once the stored copy is gone, or a restart resurrects it.
        if let Some(repo) = &self.ctx.repository {
            repo.delete(id)?;
        }
        let player = self
            .players
            .remove(&id)
            .ok_or(RuntimeError::UnknownPlayer(id))?;
        info!(target: "runtime::worker", player = %id, "player removed");
        Ok(player)
    }

    fn apply(&mut self, id: PlayerId, op: PlayerOp) -> Result<Vec<ScoreEvent>> {
        let engine = ScoringEngine::new(self.ctx.clock.as_ref(), &self.ctx.config);
        let player = self
            .players
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownPlayer(id))?;

        debug!(target: "runtime::worker", player = %id, op = ?op, "applying op");
        let mut events = match apply_op(&engine, player, op) {
            Ok(events) => events,
            Err(error) => {
                let severity = error.severity();
                if severity.is_recoverable() {
                    debug!(
                        target: "runtime::worker",
                        player = %id,
                        severity = severity.as_str(),
                        code = error.error_code(),
                        %error,
                        "op rejected"
                    );
                } else {
                    warn!(
                        target: "runtime::worker",
                        player = %id,
                        severity = severity.as_str(),
                        code = error.error_code(),
                        %error,
                        "op rejected"
                    );
                }
                return Err(error.into());
            }
        };
        events.extend(engine.reevaluate_achievements(player));

        let snapshot = player.clone();
        self.persist(&snapshot);
        self.publish(&events);
        Ok(events)
    }

    fn advance_round(&mut self) -> Vec<ScoreEvent> {
        let engine = ScoringEngine::new(self.ctx.clock.as_ref(), &self.ctx.config);
        let mut events = Vec::new();
        let mut touched = Vec::new();

        for player in self.players.values_mut() {
            let round = engine.advance_round(player);
            if !round.is_empty() {
                touched.push(player.clone());
                events.extend(round);
            }
        }

        for player in &touched {
            self.persist(player);
        }
        self.publish(&events);
        events
    }

    /// Expires modifiers for every player at the current time.
    fn sweep(&mut self) -> Vec<ScoreEvent> {
        let engine = ScoringEngine::new(self.ctx.clock.as_ref(), &self.ctx.config);
        let mut events = Vec::new();
        let mut touched = Vec::new();

        for player in self.players.values_mut() {
            let expired = engine.tick(player);
            if !expired.is_empty() {
                touched.push(player.clone());
                events.extend(expired);
            }
        }

        if !events.is_empty() {
            debug!(
                target: "runtime::worker",
                players = touched.len(),
                events = events.len(),
                "sweep expired modifiers"
            );
        }
        for player in &touched {
            self.persist(player);
        }
        self.publish(&events);
        events
    }

    fn leaderboard(&self) -> Vec<Standing> {
        let players: Vec<&Player> = self.players.values().collect();
        scoring_core::leaderboard(players)
            .into_iter()
            .map(Standing::from)
            .collect()
    }

    /// Saves a player. Failures are logged; the in-memory copy stays authoritative.
    fn persist(&self, player: &Player) {
        if let Some(repo) = &self.ctx.repository
            && let Err(error) = repo.save(player)
        {
            warn!(
                target: "runtime::worker",
                player = %player.id,
                %error,
                "failed to persist player"
            );
        }
    }

    fn publish(&self, events: &[ScoreEvent]) {
        for event in events {
            // No subscribers is fine.
            let _ = self.event_tx.send(event.clone());
        }
    }
}

/// True for a player that has never been seeded with catalog content.
fn is_fresh(player: &Player) -> bool {
    player.achievements.is_empty()
        && player.custom_rules.is_empty()
        && player.held_power_ups.is_empty()
        && player.active_power_ups.is_empty()
}

fn apply_op(
    engine: &ScoringEngine<'_>,
    player: &mut Player,
    op: PlayerOp,
) -> std::result::Result<Vec<ScoreEvent>, EngineError> {
    let events = match op {
        PlayerOp::AwardPoints(points) => {
            player.base_points = player.base_points.saturating_add(points);
            Vec::new()
        }
        PlayerOp::ObjectSpotted { points } => {
            player.base_points = player.base_points.saturating_add(points);
            engine.track_progress(player, AchievementKind::ObjectsSpotted, 1)
        }
        PlayerOp::QuestionAnswered { points } => {
            player.base_points = player.base_points.saturating_add(points);
            engine.track_progress(player, AchievementKind::QuestionsAnswered, 1)
        }
        PlayerOp::RecordGame { won: true } => {
            player.record_win();
            engine.track_progress(player, AchievementKind::GamesWon, 1)
        }
        PlayerOp::RecordGame { won: false } => {
            player.record_loss();
            Vec::new()
        }
        PlayerOp::RecordObjective => {
            player.record_objective();
            engine.track_progress(player, AchievementKind::Objectives, 1)
        }
        PlayerOp::AddTime(millis) => {
            player.add_time(millis);
            Vec::new()
        }
        PlayerOp::Penalize(event) => vec![engine.penalize(player, event)?],
        PlayerOp::ApplyPenalty(penalty) => vec![engine.apply_penalty(player, penalty)?],
        PlayerOp::RemovePenalty(id) => engine.remove_penalty(player, id),
        PlayerOp::GrantPowerUp(grant) => vec![scoring_core::engine::power_up::grant(
            player,
            grant.kind,
            grant.effect_value,
            grant.duration_ms,
            grant.level,
            grant.rarity,
        )],
        PlayerOp::ActivatePowerUp(kind) => {
            let mut events = engine.activate_power_up(player, kind)?;
            events.extend(engine.track_progress(player, AchievementKind::PowerUpsUsed, 1));
            events
        }
        PlayerOp::DeactivatePowerUp(kind) => engine.deactivate_power_up(player, kind)?,
        PlayerOp::AddRule(rule) => {
            player.add_rule(rule);
            Vec::new()
        }
        PlayerOp::ApplyRules => engine.apply_rules(player),
        PlayerOp::TrackProgress { kind, amount } => engine.track_progress(player, kind, amount),
    };
    Ok(events)
}
