use super::achievement::Achievement;
use super::common::PlayerId;
use super::penalty::Penalty;
use super::power_up::PowerUp;
use super::rule::CustomRule;

/// Aggregate root for everything that feeds a player's score.
///
/// The engine never keeps its own copy of a player: every operation borrows
/// the caller's `Player` mutably and returns events describing the change.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,

    pub base_points: i64,
    pub bonus_points: i64,
    pub penalty_points: i64,

    /// Inert power-ups in the order they were granted.
    pub held_power_ups: Vec<PowerUp>,
    /// Active power-ups in activation order. The score fold depends on it.
    pub active_power_ups: Vec<PowerUp>,
    pub penalties: Vec<Penalty>,
    pub achievements: Vec<Achievement>,
    pub custom_rules: Vec<CustomRule>,

    pub is_silenced: bool,

    pub win_streak: u32,
    pub objectives_completed: u32,
    /// Elapsed play time, including time penalties.
    pub time_spent_ms: u64,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_points(mut self, points: i64) -> Self {
        self.base_points = points;
        self
    }

    #[must_use]
    pub fn with_achievement(mut self, achievement: Achievement) -> Self {
        self.achievements.push(achievement);
        self
    }

    /// Stored points before live power-up effects: `base + bonus - penalty`.
    pub fn raw_points(&self) -> i64 {
        self.base_points
            .saturating_add(self.bonus_points)
            .saturating_sub(self.penalty_points)
    }

    /// Records a won game.
    pub fn record_win(&mut self) {
        self.win_streak = self.win_streak.saturating_add(1);
    }

    /// Records a lost game, resetting the streak.
    pub fn record_loss(&mut self) {
        self.win_streak = 0;
    }

    pub fn record_objective(&mut self) {
        self.objectives_completed = self.objectives_completed.saturating_add(1);
    }

    pub fn add_time(&mut self, millis: u64) {
        self.time_spent_ms = self.time_spent_ms.saturating_add(millis);
    }
}
