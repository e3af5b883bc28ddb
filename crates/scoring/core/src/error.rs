//! Common error infrastructure for scoring-core.
//!
//! Component errors (`PenaltyError`, `PowerUpError`, ...) live next to the
//! engines that raise them in [`crate::engine`]. This module holds what they
//! share: severity classification and the [`ScoringError`] trait.
//!
//! Nothing in the engine is fatal to the host. Every error is local and
//! recoverable; sweeps never fail.

/// Severity level of an error, used for logging and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request conflicts with current state and can be ignored or
    /// surfaced to the player (e.g. "already penalized").
    Recoverable,

    /// The request referenced something the player does not have
    /// (e.g. activating a power-up that is not held).
    Validation,

    /// Data/version mismatch, such as content newer than the engine.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all scoring-core errors.
pub trait ScoringError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for metrics and tests.
    fn error_code(&self) -> &'static str;
}

/// Modifier family an unrecognised variant belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ModifierFamily {
    Penalty,
    PowerUp,
    RuleEffect,
    RuleCondition,
    Condition,
    Achievement,
}

/// An unrecognised modifier variant reached a dispatch.
///
/// Engines never return this. They log it at `warn` and treat the modifier
/// as having no effect, so partial content updates keep gameplay running.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {family} modifier type in {context}")]
pub struct UnknownModifierType {
    pub family: ModifierFamily,
    pub context: String,
}

impl UnknownModifierType {
    pub fn new(family: ModifierFamily, context: impl Into<String>) -> Self {
        Self {
            family,
            context: context.into(),
        }
    }

    /// Logs this mismatch. Called at every dispatch that falls through.
    pub(crate) fn report(self) {
        tracing::warn!(
            target: "scoring::engine",
            family = self.family.as_ref(),
            error = %self,
            "ignoring modifier with unknown type"
        );
    }
}

impl ScoringError for UnknownModifierType {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        "UNKNOWN_MODIFIER_TYPE"
    }
}
