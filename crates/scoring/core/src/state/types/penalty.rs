//! Penalty records attached to a player.
//!
//! A penalty is either time-based (`duration_ms > 0`, expires at
//! `start_time + duration_ms`), round-based (`rounds_remaining` counts down
//! at each round boundary), or indefinite (neither) and only leaves the
//! player through explicit removal.

use super::common::{DurationMs, PenaltyId, Timestamp};

/// Category of a penalty, which decides its built-in effect on apply.
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
pub enum PenaltyKind {
    /// Subtracts `points_deducted * multiplier` from the score.
    PointDeduction,
    /// Player may not call objects until the penalty lapses.
    Silenced,
    /// Like `Silenced`, issued for misconduct.
    TemporaryBan,
    /// Wrong call; deducts points like `PointDeduction`.
    FalseCall,
    /// Adds `duration_ms` to the player's elapsed time.
    TimePenalty,
    /// No built-in effect. Hosts attach their own handling.
    Other,
    /// Produced by content newer than this engine.
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl PenaltyKind {
    /// Returns true if this kind silences the player while active.
    pub const fn is_silencing(self) -> bool {
        matches!(self, Self::Silenced | Self::TemporaryBan)
    }
}

/// A penalty applied to a player.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Penalty {
    pub id: PenaltyId,
    pub name: String,
    pub kind: PenaltyKind,
    pub points_deducted: i64,
    /// Severity scaling applied to `points_deducted`.
    pub multiplier: f64,
    /// Zero means indefinite or round-based.
    pub duration_ms: DurationMs,
    pub start_time: Timestamp,
    pub rounds_remaining: Option<i32>,
    pub stackable: bool,
}

impl Penalty {
    /// Creates a non-stackable, indefinite penalty with multiplier 1.0.
    pub fn new(
        id: PenaltyId,
        name: impl Into<String>,
        kind: PenaltyKind,
        start_time: Timestamp,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            points_deducted: 0,
            multiplier: 1.0,
            duration_ms: 0,
            start_time,
            rounds_remaining: None,
            stackable: false,
        }
    }

    #[must_use]
    pub fn with_points(mut self, points: i64) -> Self {
        self.points_deducted = points;
        self
    }

    /// Non-finite multipliers fall back to 1.0; they cannot be persisted as JSON.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self.normalize_multiplier();
        self
    }

    pub(crate) fn normalize_multiplier(&mut self) {
        if !self.multiplier.is_finite() {
            self.multiplier = 1.0;
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration_ms: DurationMs) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_rounds(mut self, rounds: i32) -> Self {
        self.rounds_remaining = Some(rounds);
        self
    }

    #[must_use]
    pub fn stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    /// Absolute expiry time for time-based penalties.
    pub fn expires_at(&self) -> Option<Timestamp> {
        (self.duration_ms > 0).then(|| self.start_time + self.duration_ms)
    }

    /// Returns true once the penalty's duration or round count has elapsed.
    pub fn has_expired(&self, now: Timestamp) -> bool {
        let time_elapsed = self.expires_at().is_some_and(|at| now >= at);
        let rounds_elapsed = self.rounds_remaining.is_some_and(|r| r <= 0);
        time_elapsed || rounds_elapsed
    }

    /// Points this penalty deducts: `points_deducted * multiplier`, truncated toward zero.
    pub fn deduction(&self) -> i64 {
        // `as` saturates on overflow and maps NaN to 0.
        (self.points_deducted as f64 * self.multiplier).trunc() as i64
    }

    pub fn is_silencing(&self) -> bool {
        self.kind.is_silencing()
    }
}
