//! Deterministic scoring and modifier logic for the spotting/trivia game.
//!
//! `scoring-core` defines the player aggregate, its modifiers (penalties,
//! power-ups, custom rules, achievements), and the pure functions that
//! combine and expire them. It performs no I/O: time comes from an injected
//! [`Clock`], and every mutation returns [`ScoreEvent`]s for the host to route.
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{PenaltyCatalog, PenaltyEvent, PenaltyTemplate, ScoringConfig};
pub use engine::{
    AchievementError, EngineError, LeaderboardEntry, PenaltyError, PowerUpError, RemovalReason,
    RuleError, ScoreEvent, ScoringEngine, TeamStanding, calculate_score, leaderboard, team_score,
};
pub use error::{ErrorSeverity, ModifierFamily, ScoringError, UnknownModifierType};
pub use state::{
    Achievement, AchievementId, AchievementKind, Condition, ConditionKind, CustomRule, DurationMs,
    EffectClass, Penalty, PenaltyId, PenaltyKind, Player, PlayerId, PowerUp, PowerUpKind, Rarity,
    Reward, RewardType, RuleCondition, RuleEffect, RuleId, Team, Timestamp,
};
