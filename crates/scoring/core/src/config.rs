//! Engine configuration constants and tunable parameters.

use crate::state::{DurationMs, Penalty, PenaltyId, PenaltyKind, Timestamp};

/// Scoring configuration: compile-time caps plus runtime-tunable defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoringConfig {
    /// Lifetime given to power-ups granted without an explicit duration.
    pub default_power_up_duration_ms: DurationMs,
    /// Penalty issued for each gameplay violation.
    pub penalty_catalog: PenaltyCatalog,
}

impl ScoringConfig {
    // ===== compile-time constants =====
    pub const MAX_HELD_POWER_UPS: usize = 16;
    pub const DOUBLE_POINTS_FACTOR: i64 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_POWER_UP_DURATION_MS: DurationMs = 30_000;

    pub fn new() -> Self {
        Self {
            default_power_up_duration_ms: Self::DEFAULT_POWER_UP_DURATION_MS,
            penalty_catalog: PenaltyCatalog::default(),
        }
    }

    pub fn with_penalty_catalog(mut self, catalog: PenaltyCatalog) -> Self {
        self.penalty_catalog = catalog;
        self
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Gameplay violations that carry a penalty.
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
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PenaltyEvent {
    /// Player failed to call a visible object in time.
    MissedCall,
    /// Player acted outside their turn.
    OversteppedTurn,
    /// Player called an object that was not there.
    FalseCall,
    /// Trivia answer arrived after the deadline.
    SlowAnswer,
    /// Unsportsmanlike behaviour reported by the host.
    Misconduct,
}

/// Blueprint for the penalty issued on a [`PenaltyEvent`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyTemplate {
    pub name: String,
    pub kind: PenaltyKind,
    pub points: i64,
    #[cfg_attr(feature = "serde", serde(default = "default_multiplier"))]
    pub multiplier: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_ms: DurationMs,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rounds: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stackable: bool,
}

#[cfg(feature = "serde")]
fn default_multiplier() -> f64 {
    1.0
}

impl PenaltyTemplate {
    pub fn new(name: impl Into<String>, kind: PenaltyKind, points: i64) -> Self {
        Self {
            name: name.into(),
            kind,
            points,
            multiplier: 1.0,
            duration_ms: 0,
            rounds: None,
            stackable: false,
        }
    }

    fn lasting(mut self, duration_ms: DurationMs) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    fn stacking(mut self) -> Self {
        self.stackable = true;
        self
    }

    /// Builds a concrete penalty starting at `start`.
    pub fn instantiate(&self, id: PenaltyId, start: Timestamp) -> Penalty {
        let mut penalty = Penalty::new(id, self.name.clone(), self.kind, start)
            .with_points(self.points)
            .with_multiplier(self.multiplier)
            .with_duration(self.duration_ms)
            .stackable(self.stackable);
        penalty.rounds_remaining = self.rounds;
        penalty
    }
}

/// One template per violation. A struct rather than a map keeps the mapping
/// exhaustive: a new [`PenaltyEvent`] does not compile until it has a template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PenaltyCatalog {
    pub missed_call: PenaltyTemplate,
    pub overstepped_turn: PenaltyTemplate,
    pub false_call: PenaltyTemplate,
    pub slow_answer: PenaltyTemplate,
    pub misconduct: PenaltyTemplate,
}

impl PenaltyCatalog {
    pub fn template(&self, event: PenaltyEvent) -> &PenaltyTemplate {
        match event {
            PenaltyEvent::MissedCall => &self.missed_call,
            PenaltyEvent::OversteppedTurn => &self.overstepped_turn,
            PenaltyEvent::FalseCall => &self.false_call,
            PenaltyEvent::SlowAnswer => &self.slow_answer,
            PenaltyEvent::Misconduct => &self.misconduct,
        }
    }
}

impl Default for PenaltyCatalog {
    fn default() -> Self {
        Self {
            missed_call: PenaltyTemplate::new("Missed call", PenaltyKind::PointDeduction, 10)
                .stacking(),
            overstepped_turn: PenaltyTemplate::new("Overstepped turn", PenaltyKind::Silenced, 0)
                .lasting(30_000),
            false_call: PenaltyTemplate::new("False call", PenaltyKind::FalseCall, 5).stacking(),
            slow_answer: PenaltyTemplate::new("Slow answer", PenaltyKind::TimePenalty, 0)
                .lasting(10_000)
                .stacking(),
            misconduct: PenaltyTemplate::new("Misconduct", PenaltyKind::TemporaryBan, 25)
                .lasting(60_000),
        }
    }
}
