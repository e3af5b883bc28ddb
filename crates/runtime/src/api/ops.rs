//! Player mutations accepted by the scoring worker.

use scoring_content::PowerUpGrant;
use scoring_core::{
    AchievementKind, CustomRule, DurationMs, Penalty, PenaltyEvent, PenaltyId, PowerUpKind,
};

/// A single mutation applied to one player inside the worker.
///
/// Every op is followed by an achievement re-evaluation, so score-gated
/// achievements unlock as soon as the score allows.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerOp {
    /// Adds (or with a negative value, removes) base points.
    AwardPoints(i64),
    /// Object spotted: awards points and advances `ObjectsSpotted`.
    ObjectSpotted { points: i64 },
    /// Trivia question answered correctly: awards points and advances
    /// `QuestionsAnswered`.
    QuestionAnswered { points: i64 },
    /// Closes a game for this player, updating the win streak.
    RecordGame { won: bool },
    RecordObjective,
    AddTime(DurationMs),
    Penalize(PenaltyEvent),
    ApplyPenalty(Penalty),
    RemovePenalty(PenaltyId),
    GrantPowerUp(PowerUpGrant),
    ActivatePowerUp(PowerUpKind),
    DeactivatePowerUp(PowerUpKind),
    AddRule(CustomRule),
    /// Applies every rule the player carries, in insertion order.
    ApplyRules,
    TrackProgress { kind: AchievementKind, amount: u32 },
}
