//! Custom rule engine.
//!
//! A rule fires when it is active, unexpired, targets the player, and its
//! condition holds. One-time rules are deactivated in the same step that
//! applies their effect, so a retried call cannot apply them twice.

use tracing::{debug, warn};

use super::errors::RuleError;
use super::event::ScoreEvent;
use super::penalty;
use crate::error::{ModifierFamily, UnknownModifierType};
use crate::state::{
    CustomRule, Penalty, PenaltyKind, Player, RuleCondition, RuleEffect, RuleId, Timestamp,
};

/// Returns true if `rule` would fire for `player` at `now`.
pub fn evaluate(player: &Player, rule: &CustomRule, now: Timestamp) -> bool {
    if !rule.is_active || rule.has_expired(now) || !rule.targets(player.id) {
        return false;
    }
    match rule.condition {
        RuleCondition::Always => true,
        RuleCondition::PlayerHasLessThanXPoints => player.base_points < rule.condition_value,
        RuleCondition::PlayerHasMoreThanXPoints => player.base_points > rule.condition_value,
        RuleCondition::Unknown => {
            UnknownModifierType::new(ModifierFamily::RuleCondition, rule.id.to_string()).report();
            false
        }
    }
}

/// Applies `rule` to `player` if it evaluates true. Returns no events when
/// the rule does not fire.
///
/// # Errors
///
/// [`RuleError::Penalty`] when a `CustomPenalty` is rejected by the penalty
/// engine. The rule is left untouched in that case.
pub fn apply(
    player: &mut Player,
    rule: &mut CustomRule,
    now: Timestamp,
) -> Result<Vec<ScoreEvent>, RuleError> {
    if !evaluate(player, rule, now) {
        return Ok(Vec::new());
    }

    let mut events = Vec::new();
    match rule.effect {
        RuleEffect::AddPoints => {
            player.base_points = player.base_points.saturating_add(rule.value);
        }
        RuleEffect::DeductPoints => {
            player.base_points = player.base_points.saturating_sub(rule.value);
        }
        RuleEffect::SilencePlayer => {
            if !player.is_immune() && !player.is_silenced {
                player.is_silenced = true;
                events.push(ScoreEvent::SilenceChanged {
                    player: player.id,
                    silenced: true,
                });
            }
        }
        RuleEffect::CustomPenalty => {
            let custom = Penalty::new(
                player.next_penalty_id(),
                format!("custom {}", rule.id),
                PenaltyKind::PointDeduction,
                now,
            )
            .with_points(rule.value)
            .with_duration(rule.duration_ms)
            .stackable(true);
            events.push(penalty::apply(player, custom)?);
        }
        RuleEffect::Unknown => {
            UnknownModifierType::new(ModifierFamily::RuleEffect, rule.id.to_string()).report();
        }
    }

    if rule.one_time_use {
        rule.is_active = false;
    }

    debug!(
        target: "scoring::rules",
        player = %player.id,
        rule = %rule.id,
        effect = %rule.effect,
        consumed = rule.one_time_use,
        "custom rule applied"
    );
    events.push(ScoreEvent::RuleApplied {
        player: player.id,
        rule: rule.id,
        effect: rule.effect,
        consumed: rule.one_time_use,
    });
    Ok(events)
}

/// Applies a rule stored on the player.
pub fn apply_owned(
    player: &mut Player,
    id: RuleId,
    now: Timestamp,
) -> Result<Vec<ScoreEvent>, RuleError> {
    let mut rule = player.rule(id).cloned().ok_or(RuleError::NotFound(id))?;
    let result = apply(player, &mut rule, now);
    player.add_rule(rule);
    result
}

/// Applies `rules` in order. Rejected custom penalties are logged and skipped.
pub fn apply_all(player: &mut Player, rules: &mut [CustomRule], now: Timestamp) -> Vec<ScoreEvent> {
    let mut events = Vec::new();
    for rule in rules.iter_mut() {
        match apply(player, rule, now) {
            Ok(fired) => events.extend(fired),
            Err(error) => {
                warn!(
                    target: "scoring::rules",
                    player = %player.id,
                    rule = %rule.id,
                    %error,
                    "rule skipped"
                );
            }
        }
    }
    events
}

/// Applies every rule stored on the player, in insertion order.
pub fn apply_owned_all(player: &mut Player, now: Timestamp) -> Vec<ScoreEvent> {
    let mut rules = std::mem::take(&mut player.custom_rules);
    let events = apply_all(player, &mut rules, now);
    player.custom_rules = rules;
    events
}

/// Drops rules whose lifetime has passed and returns their ids.
pub fn sweep_expired(rules: &mut Vec<CustomRule>, now: Timestamp) -> Vec<RuleId> {
    let mut expired = Vec::new();
    rules.retain(|rule| {
        let keep = !rule.has_expired(now);
        if !keep {
            expired.push(rule.id);
        }
        keep
    });
    expired
}
