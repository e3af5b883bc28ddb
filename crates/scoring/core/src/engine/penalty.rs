//! Penalty engine: apply, expire, and remove penalties.
//!
//! Silence is tracked both as `Player::is_silenced` and as the set of
//! silencing penalties in force. Removing one silencing penalty only lifts
//! the silence when no other silencing penalty remains.

use tracing::debug;

use super::errors::PenaltyError;
use super::event::{RemovalReason, ScoreEvent};
use crate::config::{PenaltyCatalog, PenaltyEvent};
use crate::error::{ModifierFamily, UnknownModifierType};
use crate::state::{Penalty, PenaltyId, PenaltyKind, Player, Timestamp};

/// Applies `penalty` to `player` and dispatches its built-in effect.
///
/// # Errors
///
/// - [`PenaltyError::Immune`] while the player has an active Immunity power-up.
/// - [`PenaltyError::Duplicate`] when `penalty` is not stackable and a penalty
///   of the same kind is still in force at `penalty.start_time`.
pub fn apply(player: &mut Player, mut penalty: Penalty) -> Result<ScoreEvent, PenaltyError> {
    if player.is_immune() {
        return Err(PenaltyError::Immune { player: player.id });
    }
    if !penalty.stackable && player.has_active_penalty(penalty.kind, penalty.start_time) {
        return Err(PenaltyError::Duplicate { kind: penalty.kind });
    }

    penalty.normalize_multiplier();
    let mut deducted = 0;
    match penalty.kind {
        PenaltyKind::PointDeduction | PenaltyKind::FalseCall => {
            deducted = penalty.deduction();
            player.penalty_points = player.penalty_points.saturating_add(deducted);
        }
        PenaltyKind::Silenced | PenaltyKind::TemporaryBan => {
            player.is_silenced = true;
        }
        PenaltyKind::TimePenalty => {
            player.add_time(penalty.duration_ms);
        }
        PenaltyKind::Other => {}
        PenaltyKind::Unknown => {
            UnknownModifierType::new(ModifierFamily::Penalty, penalty.name.clone()).report();
        }
    }

    debug!(
        target: "scoring::penalty",
        player = %player.id,
        penalty = %penalty.id,
        kind = %penalty.kind,
        deducted,
        "penalty applied"
    );

    let event = ScoreEvent::PenaltyApplied {
        player: player.id,
        penalty: penalty.id,
        kind: penalty.kind,
        deducted,
    };
    player.push_penalty(penalty);
    Ok(event)
}

/// Builds the configured penalty for `event` and applies it.
pub fn apply_event(
    player: &mut Player,
    event: PenaltyEvent,
    catalog: &PenaltyCatalog,
    now: Timestamp,
) -> Result<ScoreEvent, PenaltyError> {
    let penalty = from_event(event, catalog, player.next_penalty_id(), now);
    apply(player, penalty)
}

/// Maps a gameplay violation to a concrete penalty.
pub fn from_event(
    event: PenaltyEvent,
    catalog: &PenaltyCatalog,
    id: PenaltyId,
    now: Timestamp,
) -> Penalty {
    catalog.template(event).instantiate(id, now)
}

/// Removes one penalty by id. Point deductions stay applied.
pub fn remove(player: &mut Player, id: PenaltyId, now: Timestamp) -> Vec<ScoreEvent> {
    let Some(penalty) = player.take_penalty(id) else {
        return Vec::new();
    };
    let mut events = vec![removed_event(player, &penalty, RemovalReason::Removed)];
    if penalty.is_silencing() {
        events.extend(release_silence(player, now));
    }
    events
}

/// Removes every penalty that has expired at `now`.
///
/// Total: an already consistent player yields no events.
pub fn sweep_expired(player: &mut Player, now: Timestamp) -> Vec<ScoreEvent> {
    let (expired, kept): (Vec<Penalty>, Vec<Penalty>) = std::mem::take(&mut player.penalties)
        .into_iter()
        .partition(|p| p.has_expired(now));
    player.penalties = kept;

    let mut events: Vec<ScoreEvent> = expired
        .iter()
        .map(|p| removed_event(player, p, RemovalReason::Expired))
        .collect();
    if expired.iter().any(Penalty::is_silencing) {
        events.extend(release_silence(player, now));
    }
    events
}

/// Closes a round: round-based penalties lose one round, then expired
/// penalties are swept.
pub fn advance_round(player: &mut Player, now: Timestamp) -> Vec<ScoreEvent> {
    for penalty in &mut player.penalties {
        if let Some(rounds) = penalty.rounds_remaining.as_mut() {
            *rounds = rounds.saturating_sub(1);
        }
    }
    sweep_expired(player, now)
}

/// Sweeps, then reports whether any penalty is still attached.
pub fn is_penalized(player: &mut Player, now: Timestamp) -> bool {
    sweep_expired(player, now);
    !player.penalties.is_empty()
}

/// Clears `is_silenced` unless another silencing penalty is still in force.
fn release_silence(player: &mut Player, now: Timestamp) -> Option<ScoreEvent> {
    if !player.is_silenced || player.has_silencing_penalty(now) {
        return None;
    }
    player.is_silenced = false;
    debug!(target: "scoring::penalty", player = %player.id, "silence lifted");
    Some(ScoreEvent::SilenceChanged {
        player: player.id,
        silenced: false,
    })
}

fn removed_event(player: &Player, penalty: &Penalty, reason: RemovalReason) -> ScoreEvent {
    debug!(
        target: "scoring::penalty",
        player = %player.id,
        penalty = %penalty.id,
        kind = %penalty.kind,
        %reason,
        "penalty removed"
    );
    ScoreEvent::PenaltyRemoved {
        player: player.id,
        penalty: penalty.id,
        kind: penalty.kind,
        reason,
    }
}
