//! Modifier store: add/remove/query access to a player's modifier sets.
//!
//! These accessors only maintain the collections. Effects (points, silence)
//! are the engines' business, so callers that bypass the engines get exactly
//! the bookkeeping they asked for and nothing more.

use crate::config::ScoringConfig;
use crate::state::{
    Achievement, AchievementId, AchievementKind, CustomRule, Penalty, PenaltyId, PenaltyKind,
    Player, PowerUp, PowerUpKind, RuleId, Timestamp,
};

impl Player {
    // ===== penalties =====

    /// Returns true if a penalty of `kind` is still in force at `now`.
    pub fn has_active_penalty(&self, kind: PenaltyKind, now: Timestamp) -> bool {
        self.penalties
            .iter()
            .any(|p| p.kind == kind && !p.has_expired(now))
    }

    /// Returns true if any silencing penalty is still in force at `now`.
    pub fn has_silencing_penalty(&self, now: Timestamp) -> bool {
        self.penalties
            .iter()
            .any(|p| p.is_silencing() && !p.has_expired(now))
    }

    pub(crate) fn push_penalty(&mut self, penalty: Penalty) {
        self.penalties.push(penalty);
    }

    pub(crate) fn take_penalty(&mut self, id: PenaltyId) -> Option<Penalty> {
        let index = self.penalties.iter().position(|p| p.id == id)?;
        Some(self.penalties.remove(index))
    }

    /// Next free penalty id for this player.
    pub fn next_penalty_id(&self) -> PenaltyId {
        let max = self.penalties.iter().map(|p| p.id.0).max();
        PenaltyId(max.map_or(1, |m| m + 1))
    }

    // ===== power-ups =====

    pub fn held_count(&self, kind: PowerUpKind) -> usize {
        self.held_power_ups.iter().filter(|p| p.kind == kind).count()
    }

    pub fn is_power_up_active(&self, kind: PowerUpKind) -> bool {
        self.active_power_ups
            .iter()
            .any(|p| p.kind == kind && p.is_active)
    }

    pub fn is_immune(&self) -> bool {
        self.is_power_up_active(PowerUpKind::Immunity)
    }

    pub fn can_hold_more(&self) -> bool {
        self.held_power_ups.len() < ScoringConfig::MAX_HELD_POWER_UPS
    }

    pub(crate) fn push_held(&mut self, power_up: PowerUp) {
        self.held_power_ups.push(power_up);
    }

    /// Removes the first held, inactive power-up of `kind`.
    pub(crate) fn take_held(&mut self, kind: PowerUpKind) -> Option<PowerUp> {
        let index = self
            .held_power_ups
            .iter()
            .position(|p| p.kind == kind && p.is_held && !p.is_active)?;
        Some(self.held_power_ups.remove(index))
    }

    pub(crate) fn push_active(&mut self, power_up: PowerUp) {
        self.active_power_ups.push(power_up);
    }

    /// Index of the earliest-activated active power-up of `kind`.
    pub(crate) fn active_index(&self, kind: PowerUpKind) -> Option<usize> {
        self.active_power_ups
            .iter()
            .position(|p| p.kind == kind && p.is_active)
    }

    // ===== custom rules =====

    pub fn rule(&self, id: RuleId) -> Option<&CustomRule> {
        self.custom_rules.iter().find(|r| r.id == id)
    }

    /// Adds a rule, replacing any rule with the same id.
    pub fn add_rule(&mut self, rule: CustomRule) {
        match self.custom_rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule,
            None => self.custom_rules.push(rule),
        }
    }

    pub fn remove_rule(&mut self, id: RuleId) -> Option<CustomRule> {
        let index = self.custom_rules.iter().position(|r| r.id == id)?;
        Some(self.custom_rules.remove(index))
    }

    // ===== achievements =====

    pub fn achievement(&self, id: AchievementId) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    /// Index of the first locked achievement of `kind`.
    pub(crate) fn first_locked(&self, kind: AchievementKind) -> Option<usize> {
        self.achievements
            .iter()
            .position(|a| a.kind == kind && !a.is_unlocked)
    }

    pub(crate) fn achievement_index(&self, id: AchievementId) -> Option<usize> {
        self.achievements.iter().position(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PlayerId, Rarity, RuleEffect};

    #[test]
    fn next_penalty_id_follows_highest() {
        let mut player = Player::new(PlayerId(1), "ada");
        assert_eq!(player.next_penalty_id(), PenaltyId(1));

        player.push_penalty(Penalty::new(PenaltyId(7), "x", PenaltyKind::Other, Timestamp::ZERO));
        assert_eq!(player.next_penalty_id(), PenaltyId(8));
    }

    #[test]
    fn take_held_picks_first_matching_in_grant_order() {
        let mut player = Player::new(PlayerId(1), "ada");
        player.push_held(PowerUp::held(PowerUpKind::Shield, 0, 0, 1, Rarity::Common));
        player.push_held(PowerUp::held(PowerUpKind::DoublePoints, 0, 0, 1, Rarity::Common));
        player.push_held(PowerUp::held(PowerUpKind::DoublePoints, 0, 0, 2, Rarity::Epic));

        let taken = player.take_held(PowerUpKind::DoublePoints);
        assert_eq!(taken.map(|p| p.level), Some(1));
        assert_eq!(player.held_count(PowerUpKind::DoublePoints), 1);
        assert!(player.take_held(PowerUpKind::Immunity).is_none());
    }

    #[test]
    fn add_rule_replaces_same_id() {
        let mut player = Player::new(PlayerId(1), "ada");
        player.add_rule(CustomRule::new(RuleId(1), RuleEffect::AddPoints, 5, Timestamp::ZERO));
        player.add_rule(CustomRule::new(RuleId(1), RuleEffect::AddPoints, 9, Timestamp::ZERO));

        assert_eq!(player.custom_rules.len(), 1);
        assert_eq!(player.rule(RuleId(1)).map(|r| r.value), Some(9));
        assert!(player.remove_rule(RuleId(1)).is_some());
        assert!(player.rule(RuleId(1)).is_none());
    }
}
