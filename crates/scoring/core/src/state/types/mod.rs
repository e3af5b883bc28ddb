mod achievement;
mod common;
mod penalty;
mod player;
mod power_up;
mod rule;
mod team;

pub use achievement::{Achievement, AchievementKind, Condition, ConditionKind, Reward, RewardType};
pub use common::{AchievementId, DurationMs, PenaltyId, PlayerId, RuleId, Timestamp};
pub use penalty::{Penalty, PenaltyKind};
pub use player::Player;
pub use power_up::{EffectClass, PowerUp, PowerUpKind, Rarity};
pub use rule::{CustomRule, RuleCondition, RuleEffect};
pub use team::Team;
