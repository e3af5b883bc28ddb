//! Modifier engines and the [`ScoringEngine`] facade.
//!
//! Each submodule is a set of free functions over `&mut Player` taking the
//! current [`Timestamp`] explicitly. [`ScoringEngine`] binds a [`Clock`] and
//! a [`ScoringConfig`] so hosts do not thread either through every call.
//! Every mutating operation returns the [`ScoreEvent`]s it produced.

pub mod achievement;
mod errors;
mod event;
pub mod penalty;
pub mod power_up;
pub mod rules;
pub mod score;

pub use errors::{AchievementError, EngineError, PenaltyError, PowerUpError, RuleError};
pub use event::{RemovalReason, ScoreEvent};
pub use score::{LeaderboardEntry, TeamStanding, calculate_score, leaderboard, team_score};

use tracing::debug;

use crate::clock::Clock;
use crate::config::{PenaltyEvent, ScoringConfig};
use crate::state::{
    AchievementId, AchievementKind, CustomRule, DurationMs, Penalty, PenaltyId, Player, PowerUpKind,
    Rarity, RuleId, Team, Timestamp,
};

/// Borrowed view over a clock and configuration.
///
/// Stateless: two engines built from the same clock and config behave
/// identically, so hosts construct one per call site as needed.
#[derive(Clone, Copy)]
pub struct ScoringEngine<'a> {
    clock: &'a dyn Clock,
    config: &'a ScoringConfig,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(clock: &'a dyn Clock, config: &'a ScoringConfig) -> Self {
        Self { clock, config }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn config(&self) -> &ScoringConfig {
        self.config
    }

    // ===== score =====

    pub fn score(&self, player: &Player) -> i64 {
        calculate_score(player)
    }

    pub fn leaderboard<'p>(&self, players: &'p [Player]) -> Vec<LeaderboardEntry<'p>> {
        leaderboard(players)
    }

    pub fn team_standings(&self, teams: &[Team], players: &[Player]) -> Vec<TeamStanding> {
        score::team_standings(teams, players)
    }

    // ===== penalties =====

    pub fn apply_penalty(
        &self,
        player: &mut Player,
        penalty: Penalty,
    ) -> Result<ScoreEvent, PenaltyError> {
        penalty::apply(player, penalty)
    }

    /// Issues the configured penalty for a gameplay violation, starting now.
    pub fn penalize(
        &self,
        player: &mut Player,
        event: PenaltyEvent,
    ) -> Result<ScoreEvent, PenaltyError> {
        penalty::apply_event(player, event, &self.config.penalty_catalog, self.now())
    }

    pub fn remove_penalty(&self, player: &mut Player, id: PenaltyId) -> Vec<ScoreEvent> {
        penalty::remove(player, id, self.now())
    }

    pub fn advance_round(&self, player: &mut Player) -> Vec<ScoreEvent> {
        penalty::advance_round(player, self.now())
    }

    pub fn is_penalized(&self, player: &mut Player) -> bool {
        penalty::is_penalized(player, self.now())
    }

    // ===== power-ups =====

    pub fn grant_power_up(
        &self,
        player: &mut Player,
        kind: PowerUpKind,
        effect_value: i64,
        duration_ms: Option<DurationMs>,
        rarity: Rarity,
    ) -> ScoreEvent {
        let duration_ms = duration_ms.unwrap_or(self.config.default_power_up_duration_ms);
        power_up::grant(player, kind, effect_value, duration_ms, 1, rarity)
    }

    pub fn activate_power_up(
        &self,
        player: &mut Player,
        kind: PowerUpKind,
    ) -> Result<Vec<ScoreEvent>, PowerUpError> {
        power_up::activate(player, kind, self.now())
    }

    pub fn deactivate_power_up(
        &self,
        player: &mut Player,
        kind: PowerUpKind,
    ) -> Result<Vec<ScoreEvent>, PowerUpError> {
        power_up::deactivate(player, kind, self.now())
    }

    // ===== custom rules =====

    pub fn evaluate_rule(&self, player: &Player, rule: &CustomRule) -> bool {
        rules::evaluate(player, rule, self.now())
    }

    pub fn apply_rule(
        &self,
        player: &mut Player,
        rule: &mut CustomRule,
    ) -> Result<Vec<ScoreEvent>, RuleError> {
        rules::apply(player, rule, self.now())
    }

    pub fn apply_owned_rule(
        &self,
        player: &mut Player,
        id: RuleId,
    ) -> Result<Vec<ScoreEvent>, RuleError> {
        rules::apply_owned(player, id, self.now())
    }

    pub fn apply_rules(&self, player: &mut Player) -> Vec<ScoreEvent> {
        rules::apply_owned_all(player, self.now())
    }

    // ===== achievements =====

    pub fn track_progress(
        &self,
        player: &mut Player,
        kind: AchievementKind,
        amount: u32,
    ) -> Vec<ScoreEvent> {
        achievement::track_progress(player, kind, amount, self.now())
    }

    pub fn unlock(
        &self,
        player: &mut Player,
        id: AchievementId,
    ) -> Result<Vec<ScoreEvent>, AchievementError> {
        achievement::unlock(player, id, self.now())
    }

    pub fn reevaluate_achievements(&self, player: &mut Player) -> Vec<ScoreEvent> {
        achievement::reevaluate(player, self.now())
    }

    // ===== sweeps =====

    /// Expires penalties, power-ups, and player-owned rules at the current time.
    ///
    /// Total: a player with nothing due yields no events.
    pub fn tick(&self, player: &mut Player) -> Vec<ScoreEvent> {
        let now = self.now();
        let mut events = penalty::sweep_expired(player, now);
        events.extend(power_up::sweep_expired(player, now));

        let player_id = player.id;
        events.extend(
            rules::sweep_expired(&mut player.custom_rules, now)
                .into_iter()
                .map(|rule| ScoreEvent::RuleExpired {
                    player: player_id,
                    rule,
                }),
        );

        if !events.is_empty() {
            debug!(
                target: "scoring::engine",
                player = %player_id,
                now = %now,
                events = events.len(),
                "sweep completed"
            );
        }
        events
    }
}
