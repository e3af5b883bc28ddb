//! Modifier catalog loader.
//!
//! A catalog lists the achievements, custom rules, and starter power-ups a
//! new player begins with. Entries are specs rather than engine types so
//! that runtime state (progress, unlock time, activation) never appears in
//! content files.

use std::path::Path;

use scoring_core::engine::power_up;
use scoring_core::{
    Achievement, AchievementId, AchievementKind, Condition, CustomRule, DurationMs, Player,
    PlayerId, PowerUpKind, Rarity, Reward, RuleCondition, RuleEffect, RuleId, ScoreEvent,
    Timestamp,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Achievement definition as written in content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementSpec {
    pub id: u32,
    pub name: String,
    pub kind: AchievementKind,
    pub goal: u32,
    pub reward: Reward,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl AchievementSpec {
    pub fn build(&self) -> Achievement {
        self.conditions.iter().fold(
            Achievement::new(
                AchievementId(self.id),
                self.name.clone(),
                self.kind,
                self.goal,
                self.reward.clone(),
            ),
            |achievement, condition| achievement.with_condition(*condition),
        )
    }
}

/// Custom rule definition as written in content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub id: u64,
    pub effect: RuleEffect,
    pub value: i64,
    /// Restricts the rule to one player; `None` makes it global.
    #[serde(default)]
    pub player: Option<u32>,
    #[serde(default)]
    pub duration_ms: DurationMs,
    #[serde(default)]
    pub condition: RuleCondition,
    #[serde(default)]
    pub condition_value: i64,
    #[serde(default)]
    pub one_time_use: bool,
}

impl RuleSpec {
    /// Builds an active rule whose lifetime starts at `created_at`.
    pub fn build(&self, created_at: Timestamp) -> CustomRule {
        let mut rule = CustomRule::new(RuleId(self.id), self.effect, self.value, created_at)
            .when(self.condition, self.condition_value)
            .with_duration(self.duration_ms);
        if let Some(player) = self.player {
            rule = rule.for_player(PlayerId(player));
        }
        if self.one_time_use {
            rule = rule.one_time();
        }
        rule
    }
}

fn default_level() -> u8 {
    1
}

/// Power-up placed in a new player's hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpGrant {
    pub kind: PowerUpKind,
    #[serde(default)]
    pub effect_value: i64,
    #[serde(default)]
    pub duration_ms: DurationMs,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub rarity: Rarity,
}

/// Modifier catalog structure for RON files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierCatalog {
    #[serde(default)]
    pub achievements: Vec<AchievementSpec>,
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    #[serde(default)]
    pub starter_power_ups: Vec<PowerUpGrant>,
}

impl ModifierCatalog {
    /// Seeds `player` with every catalog entry.
    ///
    /// Achievements the player already tracks keep their progress; rules
    /// with a known id are replaced. Starter power-ups go through the
    /// regular grant path, so a full hold discards the overflow.
    pub fn install(&self, player: &mut Player, now: Timestamp) -> Vec<ScoreEvent> {
        for spec in &self.achievements {
            if player.achievement(AchievementId(spec.id)).is_none() {
                player.achievements.push(spec.build());
            }
        }
        for spec in &self.rules {
            player.add_rule(spec.build(now));
        }

        let events: Vec<ScoreEvent> = self
            .starter_power_ups
            .iter()
            .map(|grant| {
                power_up::grant(
                    player,
                    grant.kind,
                    grant.effect_value,
                    grant.duration_ms,
                    grant.level,
                    grant.rarity,
                )
            })
            .collect();

        debug!(
            target: "scoring::content",
            player = %player.id,
            achievements = self.achievements.len(),
            rules = self.rules.len(),
            power_ups = events.len(),
            "catalog installed"
        );
        events
    }
}

/// Loader for modifier catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a modifier catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a ModifierCatalog
    pub fn load(path: &Path) -> LoadResult<ModifierCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse a modifier catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<ModifierCatalog> {
        let catalog: ModifierCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse modifier catalog RON: {}", e))?;

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use scoring_core::{ConditionKind, calculate_score};

    use super::*;

    const CATALOG: &str = r#"
(
    achievements: [
        (
            id: 1,
            name: "First find",
            kind: objects_spotted,
            goal: 1,
            reward: points(25),
        ),
        (
            id: 2,
            name: "On a roll",
            kind: games_won,
            goal: 3,
            reward: power_up(kind: double_points, effect_value: 0, duration_ms: 15000, rarity: epic),
            conditions: [(kind: win_streak, value: 3)],
        ),
    ],
    rules: [
        (id: 10, effect: add_points, value: 50, one_time_use: true),
        (id: 11, effect: deduct_points, value: 5, player: Some(7), condition: player_has_more_than_x_points, condition_value: 100),
    ],
    starter_power_ups: [
        (kind: extra_points, effect_value: 20),
    ],
)
"#;

    #[test]
    fn parses_catalog() {
        let catalog = CatalogLoader::parse(CATALOG).unwrap();

        assert_eq!(catalog.achievements.len(), 2);
        assert_eq!(catalog.achievements[1].conditions[0].kind, ConditionKind::WinStreak);
        assert_eq!(catalog.rules[1].player, Some(7));
        assert_eq!(catalog.rules[1].condition, RuleCondition::PlayerHasMoreThanXPoints);
        assert_eq!(catalog.starter_power_ups[0].level, 1);
        assert_eq!(catalog.starter_power_ups[0].rarity, Rarity::Common);
    }

    #[test]
    fn install_seeds_player() {
        let catalog = CatalogLoader::parse(CATALOG).unwrap();
        let mut player = Player::new(PlayerId(7), "grace");

        let events = catalog.install(&mut player, Timestamp(1_000));

        assert_eq!(events.len(), 1);
        assert_eq!(player.achievements.len(), 2);
        assert_eq!(player.custom_rules.len(), 2);
        assert_eq!(player.custom_rules[0].created_at, Timestamp(1_000));
        assert!(player.custom_rules[0].one_time_use);
        assert_eq!(player.held_count(PowerUpKind::ExtraPoints), 1);
        assert_eq!(calculate_score(&player), 0);
    }

    #[test]
    fn reinstall_keeps_achievement_progress() {
        let catalog = CatalogLoader::parse(CATALOG).unwrap();
        let mut player = Player::new(PlayerId(7), "grace");
        catalog.install(&mut player, Timestamp(0));
        player.achievements[1].current_progress = 2;

        catalog.install(&mut player, Timestamp(5));

        assert_eq!(player.achievements.len(), 2);
        assert_eq!(player.achievements[1].current_progress, 2);
        assert_eq!(player.custom_rules.len(), 2);
    }

    #[test]
    fn unknown_effect_loads_as_unknown() {
        let catalog =
            CatalogLoader::parse("(rules: [(id: 1, effect: teleport, value: 0)])").unwrap();
        assert_eq!(catalog.rules[0].effect, RuleEffect::Unknown);
    }

    #[test]
    fn malformed_catalog_is_rejected() {
        let err = CatalogLoader::parse("(rules: [(id: \"x\")])").unwrap_err();
        assert!(err.to_string().contains("modifier catalog"));
    }
}
