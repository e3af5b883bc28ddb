//! Host-defined custom rules.

use super::common::{DurationMs, PlayerId, RuleId, Timestamp};

/// What a custom rule does when its condition holds.
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
pub enum RuleEffect {
    AddPoints,
    DeductPoints,
    SilencePlayer,
    CustomPenalty,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// Trigger condition of a custom rule, evaluated against `base_points`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum RuleCondition {
    #[default]
    Always,
    PlayerHasLessThanXPoints,
    PlayerHasMoreThanXPoints,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomRule {
    pub id: RuleId,
    /// `None` applies to every player.
    pub player_id: Option<PlayerId>,
    pub effect: RuleEffect,
    pub value: i64,
    /// Lifetime measured from `created_at`. Zero never expires.
    pub duration_ms: DurationMs,
    pub created_at: Timestamp,
    pub condition: RuleCondition,
    pub condition_value: i64,
    pub one_time_use: bool,
    pub is_active: bool,
}

impl CustomRule {
    /// Creates an active, global, reusable rule with an `Always` condition.
    pub fn new(id: RuleId, effect: RuleEffect, value: i64, created_at: Timestamp) -> Self {
        Self {
            id,
            player_id: None,
            effect,
            value,
            duration_ms: 0,
            created_at,
            condition: RuleCondition::Always,
            condition_value: 0,
            one_time_use: false,
            is_active: true,
        }
    }

    #[must_use]
    pub fn for_player(mut self, player: PlayerId) -> Self {
        self.player_id = Some(player);
        self
    }

    #[must_use]
    pub fn when(mut self, condition: RuleCondition, condition_value: i64) -> Self {
        self.condition = condition;
        self.condition_value = condition_value;
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration_ms: DurationMs) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn one_time(mut self) -> Self {
        self.one_time_use = true;
        self
    }

    pub fn is_global(&self) -> bool {
        self.player_id.is_none()
    }

    pub fn has_expired(&self, now: Timestamp) -> bool {
        self.duration_ms > 0 && now.since(self.created_at) >= self.duration_ms
    }

    /// Returns true if this rule may target `player`.
    pub fn targets(&self, player: PlayerId) -> bool {
        self.is_global() || self.player_id == Some(player)
    }
}
