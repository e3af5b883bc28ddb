//! Power-up engine: grant, activate, deactivate, expire.
//!
//! Instantaneous effects are applied once in [`activate`] and baked into
//! `bonus_points`. Continuous effects are left to the score fold and never
//! touch stored points here, which is what keeps a doubled score from being
//! counted twice.

use tracing::debug;

use super::errors::PowerUpError;
use super::event::ScoreEvent;
use crate::error::{ModifierFamily, UnknownModifierType};
use crate::state::{DurationMs, Player, PowerUp, PowerUpKind, Rarity, Timestamp};

/// Adds an inert power-up to the player's hold. Score is untouched.
///
/// Returns [`ScoreEvent::PowerUpDiscarded`] when the hold is full.
pub fn grant(
    player: &mut Player,
    kind: PowerUpKind,
    effect_value: i64,
    duration_ms: DurationMs,
    level: u8,
    rarity: Rarity,
) -> ScoreEvent {
    if !player.can_hold_more() {
        debug!(
            target: "scoring::power_up",
            player = %player.id,
            %kind,
            "hold full, power-up discarded"
        );
        return ScoreEvent::PowerUpDiscarded {
            player: player.id,
            kind,
        };
    }

    player.push_held(PowerUp::held(kind, effect_value, duration_ms, level, rarity));
    debug!(target: "scoring::power_up", player = %player.id, %kind, level, "power-up granted");
    ScoreEvent::PowerUpGranted {
        player: player.id,
        kind,
    }
}

/// Activates the first held power-up of `kind` at `now`.
///
/// # Errors
///
/// [`PowerUpError::NotHeld`] when the player holds no inactive power-up of `kind`.
pub fn activate(
    player: &mut Player,
    kind: PowerUpKind,
    now: Timestamp,
) -> Result<Vec<ScoreEvent>, PowerUpError> {
    let mut power_up = player.take_held(kind).ok_or(PowerUpError::NotHeld { kind })?;
    power_up.activate_at(now);

    let mut events = vec![ScoreEvent::PowerUpActivated {
        player: player.id,
        kind,
        expires_at: power_up.expires_at,
    }];

    match kind {
        PowerUpKind::ExtraPoints => {
            player.bonus_points = player.bonus_points.saturating_add(power_up.effect_value);
        }
        PowerUpKind::Immunity => {
            if player.is_silenced {
                player.is_silenced = false;
                events.push(ScoreEvent::SilenceChanged {
                    player: player.id,
                    silenced: false,
                });
            }
        }
        // Folded by the score engine while active.
        PowerUpKind::DoublePoints | PowerUpKind::BonusPoints => {}
        PowerUpKind::SpeedBoost
        | PowerUpKind::ExtraTime
        | PowerUpKind::Shield
        | PowerUpKind::HealthRegen => {}
        PowerUpKind::Unknown => {
            UnknownModifierType::new(ModifierFamily::PowerUp, "activate").report();
        }
    }

    debug!(
        target: "scoring::power_up",
        player = %player.id,
        %kind,
        expires_at = ?power_up.expires_at,
        "power-up activated"
    );
    player.push_active(power_up);
    Ok(events)
}

/// Deactivates the earliest-activated active power-up of `kind`.
///
/// # Errors
///
/// [`PowerUpError::NotActive`] when no power-up of `kind` is active.
pub fn deactivate(
    player: &mut Player,
    kind: PowerUpKind,
    now: Timestamp,
) -> Result<Vec<ScoreEvent>, PowerUpError> {
    let index = player
        .active_index(kind)
        .ok_or(PowerUpError::NotActive { kind })?;
    Ok(deactivate_at(player, index, now, false))
}

/// Deactivates every active power-up whose expiry is at or before `now`.
pub fn sweep_expired(player: &mut Player, now: Timestamp) -> Vec<ScoreEvent> {
    let mut events = Vec::new();
    while let Some(index) = player
        .active_power_ups
        .iter()
        .position(|p| p.has_expired(now))
    {
        events.extend(deactivate_at(player, index, now, true));
    }
    events
}

fn deactivate_at(
    player: &mut Player,
    index: usize,
    now: Timestamp,
    expired: bool,
) -> Vec<ScoreEvent> {
    let mut power_up = player.active_power_ups.remove(index);
    power_up.is_active = false;
    let kind = power_up.kind;

    let mut events = vec![ScoreEvent::PowerUpDeactivated {
        player: player.id,
        kind,
        expired,
    }];

    // Only persistent effects have anything to undo.
    if kind == PowerUpKind::Immunity && !player.is_immune() {
        let silenced = player.has_silencing_penalty(now);
        if silenced != player.is_silenced {
            player.is_silenced = silenced;
            events.push(ScoreEvent::SilenceChanged {
                player: player.id,
                silenced,
            });
        }
    }

    debug!(
        target: "scoring::power_up",
        player = %player.id,
        %kind,
        expired,
        "power-up deactivated"
    );
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::penalty;
    use crate::engine::score::calculate_score;
    use crate::state::{Penalty, PenaltyId, PenaltyKind, PlayerId};

    fn player(base: i64) -> Player {
        Player::new(PlayerId(1), "ada").with_base_points(base)
    }

    #[test]
    fn grant_is_inert() {
        let mut p = player(100);
        let event = grant(&mut p, PowerUpKind::DoublePoints, 0, 5000, 1, Rarity::Rare);

        assert_eq!(
            event,
            ScoreEvent::PowerUpGranted {
                player: PlayerId(1),
                kind: PowerUpKind::DoublePoints
            }
        );
        assert_eq!(p.held_power_ups.len(), 1);
        assert!(p.held_power_ups[0].is_held);
        assert_eq!(calculate_score(&p), 100);
    }

    #[test]
    fn grant_refuses_when_hold_is_full() {
        let mut p = player(0);
        for _ in 0..crate::config::ScoringConfig::MAX_HELD_POWER_UPS {
            grant(&mut p, PowerUpKind::Shield, 0, 0, 1, Rarity::Common);
        }
        let event = grant(&mut p, PowerUpKind::Shield, 0, 0, 1, Rarity::Common);
        assert!(matches!(event, ScoreEvent::PowerUpDiscarded { .. }));
    }

    #[test]
    fn double_points_reads_stable() {
        let mut p = player(100);
        grant(&mut p, PowerUpKind::DoublePoints, 0, 5000, 1, Rarity::Rare);
        activate(&mut p, PowerUpKind::DoublePoints, Timestamp(0)).unwrap();

        assert_eq!(calculate_score(&p), 200);
        assert_eq!(calculate_score(&p), 200);
        assert_eq!(p.base_points, 100);
        assert!(p.held_power_ups.is_empty());
        assert_eq!(p.active_power_ups.len(), 1);
    }

    #[test]
    fn extra_points_are_applied_once() {
        let mut p = player(100);
        grant(&mut p, PowerUpKind::ExtraPoints, 50, 1000, 1, Rarity::Common);
        activate(&mut p, PowerUpKind::ExtraPoints, Timestamp(0)).unwrap();

        assert_eq!(p.bonus_points, 50);
        assert_eq!(calculate_score(&p), 150);
        assert_eq!(calculate_score(&p), 150);

        sweep_expired(&mut p, Timestamp(1000));
        assert!(p.active_power_ups.is_empty());
        assert_eq!(calculate_score(&p), 150);
    }

    #[test]
    fn activate_without_held_fails() {
        let mut p = player(0);
        assert_eq!(
            activate(&mut p, PowerUpKind::Shield, Timestamp(0)),
            Err(PowerUpError::NotHeld { kind: PowerUpKind::Shield })
        );
    }

    #[test]
    fn deactivate_without_active_fails() {
        let mut p = player(0);
        grant(&mut p, PowerUpKind::Shield, 0, 0, 1, Rarity::Common);
        assert_eq!(
            deactivate(&mut p, PowerUpKind::Shield, Timestamp(0)),
            Err(PowerUpError::NotActive { kind: PowerUpKind::Shield })
        );
    }

    #[test]
    fn sweep_expires_only_due_power_ups() {
        let mut p = player(10);
        grant(&mut p, PowerUpKind::DoublePoints, 0, 1000, 1, Rarity::Common);
        grant(&mut p, PowerUpKind::BonusPoints, 5, 3000, 1, Rarity::Common);
        grant(&mut p, PowerUpKind::Shield, 0, 0, 1, Rarity::Common);
        activate(&mut p, PowerUpKind::DoublePoints, Timestamp(0)).unwrap();
        activate(&mut p, PowerUpKind::BonusPoints, Timestamp(0)).unwrap();
        activate(&mut p, PowerUpKind::Shield, Timestamp(0)).unwrap();
        assert_eq!(calculate_score(&p), 25);

        assert!(sweep_expired(&mut p, Timestamp(999)).is_empty());

        let events = sweep_expired(&mut p, Timestamp(1000));
        assert_eq!(events.len(), 1);
        assert_eq!(calculate_score(&p), 15);

        sweep_expired(&mut p, Timestamp(10_000));
        assert_eq!(p.active_power_ups.len(), 1);
        assert_eq!(calculate_score(&p), 10);
    }

    #[test]
    fn immunity_suspends_and_restores_silence() {
        let mut p = player(0);
        penalty::apply(
            &mut p,
            Penalty::new(PenaltyId(1), "muted", PenaltyKind::Silenced, Timestamp(0))
                .with_duration(10_000),
        )
        .unwrap();
        assert!(p.is_silenced);

        grant(&mut p, PowerUpKind::Immunity, 0, 2000, 1, Rarity::Epic);
        activate(&mut p, PowerUpKind::Immunity, Timestamp(100)).unwrap();
        assert!(!p.is_silenced);

        let events = deactivate(&mut p, PowerUpKind::Immunity, Timestamp(500)).unwrap();
        assert!(p.is_silenced);
        assert!(events.contains(&ScoreEvent::SilenceChanged {
            player: PlayerId(1),
            silenced: true
        }));
    }

    #[test]
    fn immunity_expiry_after_penalty_lapsed_stays_unsilenced() {
        let mut p = player(0);
        penalty::apply(
            &mut p,
            Penalty::new(PenaltyId(1), "muted", PenaltyKind::Silenced, Timestamp(0))
                .with_duration(1000),
        )
        .unwrap();
        grant(&mut p, PowerUpKind::Immunity, 0, 2000, 1, Rarity::Epic);
        activate(&mut p, PowerUpKind::Immunity, Timestamp(0)).unwrap();

        sweep_expired(&mut p, Timestamp(2000));
        assert!(!p.is_silenced);
    }
}
