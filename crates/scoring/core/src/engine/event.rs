//! State-change notifications returned by engine operations.
//!
//! Engines return events as values; routing them to persistence, UI, or a
//! broadcast channel is the host's job.

use crate::state::{
    AchievementId, PenaltyId, PenaltyKind, PlayerId, PowerUpKind, Reward, RuleEffect, RuleId,
    Timestamp,
};

/// Why a penalty left the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum RemovalReason {
    Expired,
    Removed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScoreEvent {
    PenaltyApplied {
        player: PlayerId,
        penalty: PenaltyId,
        kind: PenaltyKind,
        /// Points added to `penalty_points`.
        deducted: i64,
    },
    PenaltyRemoved {
        player: PlayerId,
        penalty: PenaltyId,
        kind: PenaltyKind,
        reason: RemovalReason,
    },
    SilenceChanged {
        player: PlayerId,
        silenced: bool,
    },
    PowerUpGranted {
        player: PlayerId,
        kind: PowerUpKind,
    },
    /// Grant refused because the player's hold is full.
    PowerUpDiscarded {
        player: PlayerId,
        kind: PowerUpKind,
    },
    PowerUpActivated {
        player: PlayerId,
        kind: PowerUpKind,
        expires_at: Option<Timestamp>,
    },
    PowerUpDeactivated {
        player: PlayerId,
        kind: PowerUpKind,
        expired: bool,
    },
    RuleApplied {
        player: PlayerId,
        rule: RuleId,
        effect: RuleEffect,
        consumed: bool,
    },
    RuleExpired {
        player: PlayerId,
        rule: RuleId,
    },
    AchievementProgressed {
        player: PlayerId,
        achievement: AchievementId,
        progress: u32,
        goal: u32,
    },
    AchievementUnlocked {
        player: PlayerId,
        achievement: AchievementId,
        reward: Reward,
        at: Timestamp,
    },
}
