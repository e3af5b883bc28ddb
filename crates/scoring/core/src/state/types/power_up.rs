//! Power-ups a player can hold and activate.
//!
//! # Effect classes
//!
//! - **Instantaneous**: applied once at activation and baked into stored
//!   points (`ExtraPoints`). Deactivation is a no-op.
//! - **Continuous**: folded live by the score engine on every read while the
//!   power-up is active (`DoublePoints`, `BonusPoints`). Never stored.
//! - **Persistent**: toggles player state at activation and reverts it at
//!   deactivation (`Immunity`).
//! - **Gameplay**: affects play, not the number (`SpeedBoost`, `ExtraTime`,
//!   `Shield`, `HealthRegen`).

use super::common::{DurationMs, Timestamp};

/// Power-up type.
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
pub enum PowerUpKind {
    DoublePoints,
    BonusPoints,
    ExtraPoints,
    Immunity,
    SpeedBoost,
    ExtraTime,
    Shield,
    HealthRegen,
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

/// How a power-up's effect interacts with stored player state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectClass {
    Instantaneous,
    Continuous,
    Persistent,
    Gameplay,
}

impl PowerUpKind {
    pub const fn effect_class(self) -> EffectClass {
        match self {
            Self::ExtraPoints => EffectClass::Instantaneous,
            Self::DoublePoints | Self::BonusPoints => EffectClass::Continuous,
            Self::Immunity => EffectClass::Persistent,
            Self::SpeedBoost
            | Self::ExtraTime
            | Self::Shield
            | Self::HealthRegen
            | Self::Unknown => EffectClass::Gameplay,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// A power-up instance, either held (inert) or active.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub is_held: bool,
    pub is_active: bool,
    /// Lifetime once activated. Zero lasts until explicit deactivation.
    pub duration_ms: DurationMs,
    pub activated_at: Option<Timestamp>,
    /// Absolute expiry, set on activation.
    pub expires_at: Option<Timestamp>,
    pub effect_value: i64,
    pub level: u8,
    pub rarity: Rarity,
}

impl PowerUp {
    /// Creates an inert, held power-up.
    pub fn held(
        kind: PowerUpKind,
        effect_value: i64,
        duration_ms: DurationMs,
        level: u8,
        rarity: Rarity,
    ) -> Self {
        Self {
            kind,
            is_held: true,
            is_active: false,
            duration_ms,
            activated_at: None,
            expires_at: None,
            effect_value,
            level,
            rarity,
        }
    }

    /// Marks the power-up active at `now` and stamps its absolute expiry.
    pub(crate) fn activate_at(&mut self, now: Timestamp) {
        self.is_held = false;
        self.is_active = true;
        self.activated_at = Some(now);
        self.expires_at = (self.duration_ms > 0).then(|| now + self.duration_ms);
    }

    pub fn has_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Milliseconds until expiry, `None` for unbounded or inactive power-ups.
    pub fn remaining(&self, now: Timestamp) -> Option<DurationMs> {
        self.expires_at.map(|at| at.since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_sets_absolute_expiry() {
        let mut p = PowerUp::held(PowerUpKind::DoublePoints, 0, 3000, 1, Rarity::Rare);
        p.activate_at(Timestamp(1000));

        assert!(p.is_active);
        assert!(!p.is_held);
        assert_eq!(p.expires_at, Some(Timestamp(4000)));
        assert_eq!(p.remaining(Timestamp(2500)), Some(1500));
        assert!(!p.has_expired(Timestamp(3999)));
        assert!(p.has_expired(Timestamp(4000)));
    }

    #[test]
    fn zero_duration_never_expires() {
        let mut p = PowerUp::held(PowerUpKind::Immunity, 0, 0, 1, Rarity::Common);
        p.activate_at(Timestamp(10));
        assert_eq!(p.expires_at, None);
        assert!(!p.has_expired(Timestamp(u64::MAX)));
    }

    #[test]
    fn effect_classes() {
        assert_eq!(PowerUpKind::ExtraPoints.effect_class(), EffectClass::Instantaneous);
        assert_eq!(PowerUpKind::DoublePoints.effect_class(), EffectClass::Continuous);
        assert_eq!(PowerUpKind::Immunity.effect_class(), EffectClass::Persistent);
        assert_eq!(PowerUpKind::Shield.effect_class(), EffectClass::Gameplay);
    }
}
