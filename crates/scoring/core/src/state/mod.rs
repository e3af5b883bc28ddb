//! Player aggregate and modifier data model.
//!
//! [`Player`] owns every modifier that feeds its score: penalties, held and
//! active power-ups, custom rules, and achievement progress. The modifier
//! store accessors in `store` maintain those collections; the engines in
//! [`crate::engine`] apply their effects.
mod store;
mod types;

pub use types::{
    Achievement, AchievementId, AchievementKind, Condition, ConditionKind, CustomRule, DurationMs,
    EffectClass, Penalty, PenaltyId, PenaltyKind, Player, PlayerId, PowerUp, PowerUpKind, Rarity,
    Reward, RewardType, RuleCondition, RuleEffect, RuleId, Team, Timestamp,
};
