//! Achievements and their unlock conditions.
//!
//! An achievement moves `LOCKED -> UNLOCKED` exactly once. There is no path
//! back, and the reward is granted only on that transition.

use super::common::{AchievementId, DurationMs, Timestamp};
use super::power_up::{PowerUpKind, Rarity};

/// Progress category an achievement listens to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AchievementKind {
    /// Objects spotted during a hunt.
    ObjectsSpotted,
    /// Trivia questions answered correctly.
    QuestionsAnswered,
    /// Rounds completed without a penalty.
    CleanRounds,
    /// Games won.
    GamesWon,
    /// Power-ups activated.
    PowerUpsUsed,
    /// Objectives completed across games.
    Objectives,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// Reward category, as reported to hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum RewardType {
    Points,
    PowerUp,
    UnlockItem,
    Badge,
}

/// What an achievement grants when it unlocks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Reward {
    /// Added to `bonus_points`.
    Points(i64),
    /// Granted into `held_power_ups`.
    PowerUp {
        kind: PowerUpKind,
        effect_value: i64,
        duration_ms: DurationMs,
        rarity: Rarity,
    },
    /// Cosmetic or content unlock; reported, no score effect.
    UnlockItem(String),
    /// Badge; reported, no score effect.
    Badge(String),
}

impl Reward {
    pub fn reward_type(&self) -> RewardType {
        match self {
            Reward::Points(_) => RewardType::Points,
            Reward::PowerUp { .. } => RewardType::PowerUp,
            Reward::UnlockItem(_) => RewardType::UnlockItem,
            Reward::Badge(_) => RewardType::Badge,
        }
    }
}

/// Predicate category over player state.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ConditionKind {
    /// Effective score `>= value`.
    ScoreThreshold,
    /// `time_spent_ms <= value`.
    TimeLimit,
    /// `win_streak >= value`.
    WinStreak,
    /// `objectives_completed >= value`.
    ObjectivesCompleted,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub kind: ConditionKind,
    pub value: i64,
}

impl Condition {
    pub const fn new(kind: ConditionKind, value: i64) -> Self {
        Self { kind, value }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub kind: AchievementKind,
    pub is_unlocked: bool,
    pub unlocked_at: Option<Timestamp>,
    /// Saturates at `goal`.
    pub current_progress: u32,
    pub goal: u32,
    pub reward: Reward,
    pub conditions: Vec<Condition>,
}

impl Achievement {
    /// Creates a locked achievement with no extra conditions.
    pub fn new(
        id: AchievementId,
        name: impl Into<String>,
        kind: AchievementKind,
        goal: u32,
        reward: Reward,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            is_unlocked: false,
            unlocked_at: None,
            current_progress: 0,
            goal,
            reward,
            conditions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn goal_reached(&self) -> bool {
        self.current_progress >= self.goal
    }
}
