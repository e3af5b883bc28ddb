//! Achievement tracker.
//!
//! Progress is saturating: `current_progress` never exceeds `goal`. An
//! achievement unlocks once its goal is reached and every condition holds;
//! [`unlock`] is idempotent so the reward is granted exactly once.

use tracing::info;

use super::errors::AchievementError;
use super::event::ScoreEvent;
use super::power_up;
use super::score::calculate_score;
use crate::error::{ModifierFamily, UnknownModifierType};
use crate::state::{
    Achievement, AchievementId, AchievementKind, Condition, ConditionKind, Player, Reward,
    Timestamp,
};

/// Evaluates one condition against the player. Pure.
pub fn condition_met(player: &Player, condition: &Condition) -> bool {
    match condition.kind {
        ConditionKind::ScoreThreshold => calculate_score(player) >= condition.value,
        ConditionKind::TimeLimit => i64::try_from(player.time_spent_ms)
            .is_ok_and(|spent| spent <= condition.value),
        ConditionKind::WinStreak => i64::from(player.win_streak) >= condition.value,
        ConditionKind::ObjectivesCompleted => {
            i64::from(player.objectives_completed) >= condition.value
        }
        ConditionKind::Unknown => {
            UnknownModifierType::new(ModifierFamily::Condition, format!("{condition:?}")).report();
            false
        }
    }
}

/// Goal reached and every condition met.
pub fn check_progress(player: &Player, achievement: &Achievement) -> bool {
    achievement.goal_reached()
        && achievement
            .conditions
            .iter()
            .all(|condition| condition_met(player, condition))
}

/// Adds `amount` to the first locked achievement of `kind` and unlocks it
/// if it now qualifies. An unknown kind is reported and tracks nothing.
pub fn track_progress(
    player: &mut Player,
    kind: AchievementKind,
    amount: u32,
    now: Timestamp,
) -> Vec<ScoreEvent> {
    if kind == AchievementKind::Unknown {
        UnknownModifierType::new(ModifierFamily::Achievement, "track_progress").report();
        return Vec::new();
    }
    let Some(index) = player.first_locked(kind) else {
        return Vec::new();
    };

    let achievement = &mut player.achievements[index];
    achievement.current_progress = achievement
        .current_progress
        .saturating_add(amount)
        .min(achievement.goal);
    let id = achievement.id;
    let mut events = vec![ScoreEvent::AchievementProgressed {
        player: player.id,
        achievement: id,
        progress: achievement.current_progress,
        goal: achievement.goal,
    }];

    if check_progress(player, &player.achievements[index]) {
        events.extend(unlock_at(player, index, now));
    }
    events
}

/// Unlocks an achievement and grants its reward. No-op when already unlocked.
///
/// # Errors
///
/// [`AchievementError::NotFound`] when the player has no achievement `id`.
pub fn unlock(
    player: &mut Player,
    id: AchievementId,
    now: Timestamp,
) -> Result<Vec<ScoreEvent>, AchievementError> {
    let index = player
        .achievement_index(id)
        .ok_or(AchievementError::NotFound(id))?;
    Ok(unlock_at(player, index, now))
}

/// Unlocks every locked achievement that now qualifies, e.g. after a score
/// change satisfied a `ScoreThreshold` condition.
pub fn reevaluate(player: &mut Player, now: Timestamp) -> Vec<ScoreEvent> {
    let mut events = Vec::new();
    for index in 0..player.achievements.len() {
        let achievement = &player.achievements[index];
        if !achievement.is_unlocked && check_progress(player, achievement) {
            events.extend(unlock_at(player, index, now));
        }
    }
    events
}

fn unlock_at(player: &mut Player, index: usize, now: Timestamp) -> Vec<ScoreEvent> {
    let achievement = &mut player.achievements[index];
    if achievement.is_unlocked {
        return Vec::new();
    }
    achievement.is_unlocked = true;
    achievement.unlocked_at = Some(now);
    let id = achievement.id;
    let reward = achievement.reward.clone();

    info!(
        target: "scoring::achievement",
        player = %player.id,
        achievement = %id,
        reward = %reward.reward_type(),
        "achievement unlocked"
    );

    let mut events = Vec::with_capacity(2);
    match &reward {
        Reward::Points(points) => {
            player.bonus_points = player.bonus_points.saturating_add(*points);
        }
        Reward::PowerUp {
            kind,
            effect_value,
            duration_ms,
            rarity,
        } => {
            events.push(power_up::grant(
                player,
                *kind,
                *effect_value,
                *duration_ms,
                1,
                *rarity,
            ));
        }
        Reward::UnlockItem(_) | Reward::Badge(_) => {}
    }

    events.insert(
        0,
        ScoreEvent::AchievementUnlocked {
            player: player.id,
            achievement: id,
            reward,
            at: now,
        },
    );
    events
}
