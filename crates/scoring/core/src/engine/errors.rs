//! Error types raised by the modifier engines.

use crate::error::{ErrorSeverity, ScoringError, UnknownModifierType};
use crate::state::{AchievementId, PenaltyKind, PlayerId, PowerUpKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PenaltyError {
    #[error("player already has an active non-stackable {kind} penalty")]
    Duplicate { kind: PenaltyKind },

    #[error("player {player} is immune to penalties")]
    Immune { player: PlayerId },
}

impl ScoringError for PenaltyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Duplicate { .. } => "DUPLICATE_PENALTY",
            Self::Immune { .. } => "PLAYER_IMMUNE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PowerUpError {
    #[error("no held {kind} power-up to activate")]
    NotHeld { kind: PowerUpKind },

    #[error("no active {kind} power-up to deactivate")]
    NotActive { kind: PowerUpKind },
}

impl ScoringError for PowerUpError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotHeld { .. } => "POWER_UP_NOT_HELD",
            Self::NotActive { .. } => "POWER_UP_NOT_ACTIVE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("rule {0} not found")]
    NotFound(crate::state::RuleId),

    #[error("custom penalty rejected: {0}")]
    Penalty(#[from] PenaltyError),
}

impl ScoringError for RuleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(_) => ErrorSeverity::Validation,
            Self::Penalty(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "RULE_NOT_FOUND",
            Self::Penalty(inner) => inner.error_code(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AchievementError {
    #[error("achievement {0} not found")]
    NotFound(AchievementId),
}

impl ScoringError for AchievementError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "ACHIEVEMENT_NOT_FOUND"
    }
}

/// Any error surfaced by [`super::ScoringEngine`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Penalty(#[from] PenaltyError),

    #[error(transparent)]
    PowerUp(#[from] PowerUpError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Achievement(#[from] AchievementError),

    #[error(transparent)]
    UnknownModifierType(#[from] UnknownModifierType),
}

impl ScoringError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Penalty(e) => e.severity(),
            Self::PowerUp(e) => e.severity(),
            Self::Rule(e) => e.severity(),
            Self::Achievement(e) => e.severity(),
            Self::UnknownModifierType(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Penalty(e) => e.error_code(),
            Self::PowerUp(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::Achievement(e) => e.error_code(),
            Self::UnknownModifierType(e) => e.error_code(),
        }
    }
}
