//! Effective score computation.
//!
//! ```text
//! total = base_points + bonus_points - penalty_points
//! for power-up in active_power_ups (activation order):
//!     DoublePoints => total *= 2
//!     BonusPoints  => total += effect_value
//!     _            => total            (already baked in, or gameplay-only)
//! ```
//!
//! The fold is order-sensitive: doubling before a flat bonus differs from
//! doubling after it. Negative totals are returned as-is. Arithmetic
//! saturates at the `i64` limits instead of wrapping.

use crate::config::ScoringConfig;
use crate::state::{Player, PlayerId, PowerUpKind, Team};

/// Folds stored points with every active power-up into one score.
///
/// Pure: calling it repeatedly on the same player always gives the same
/// value, because continuous effects are never written back.
pub fn calculate_score(player: &Player) -> i64 {
    player
        .active_power_ups
        .iter()
        .filter(|p| p.is_active)
        .fold(player.raw_points(), |total, power_up| match power_up.kind {
            PowerUpKind::DoublePoints => total.saturating_mul(ScoringConfig::DOUBLE_POINTS_FACTOR),
            PowerUpKind::BonusPoints => total.saturating_add(power_up.effect_value),
            PowerUpKind::ExtraPoints
            | PowerUpKind::Immunity
            | PowerUpKind::SpeedBoost
            | PowerUpKind::ExtraTime
            | PowerUpKind::Shield
            | PowerUpKind::HealthRegen
            | PowerUpKind::Unknown => total,
        })
}

/// One row of a leaderboard.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeaderboardEntry<'a> {
    pub player: &'a Player,
    pub score: i64,
    /// Competition rank: tied scores share a rank and the next rank skips (1, 1, 3).
    pub rank: usize,
}

/// Orders players by effective score, highest first.
///
/// Ties keep their input order.
pub fn leaderboard<'a, I>(players: I) -> Vec<LeaderboardEntry<'a>>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut scored: Vec<(&'a Player, i64)> =
        players.into_iter().map(|p| (p, calculate_score(p))).collect();
    // `sort_by` is stable.
    scored.sort_by(|a, b| b.1.cmp(&a.1));

    let mut entries = Vec::with_capacity(scored.len());
    let mut previous: Option<(i64, usize)> = None;
    for (index, (player, score)) in scored.into_iter().enumerate() {
        let rank = match previous {
            Some((prev_score, prev_rank)) if prev_score == score => prev_rank,
            _ => index + 1,
        };
        previous = Some((score, rank));
        entries.push(LeaderboardEntry {
            player,
            score,
            rank,
        });
    }
    entries
}

/// Sum of the members' effective scores.
pub fn team_score<'a, I>(members: I) -> i64
where
    I: IntoIterator<Item = &'a Player>,
{
    members
        .into_iter()
        .map(calculate_score)
        .fold(0i64, i64::saturating_add)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamStanding {
    pub team_id: u32,
    pub name: String,
    pub score: i64,
}

/// Totals each team from `players` and orders the teams, highest first.
///
/// Members missing from `players` contribute nothing. Ties keep input order.
pub fn team_standings(teams: &[Team], players: &[Player]) -> Vec<TeamStanding> {
    let lookup = |id: PlayerId| {
        let found = players.iter().find(|p| p.id == id);
        if found.is_none() {
            tracing::warn!(target: "scoring::score", player = %id, "team member not loaded");
        }
        found
    };

    let mut standings: Vec<TeamStanding> = teams
        .iter()
        .map(|team| TeamStanding {
            team_id: team.id,
            name: team.name.clone(),
            score: team_score(team.members.iter().filter_map(|&id| lookup(id))),
        })
        .collect();
    standings.sort_by(|a, b| b.score.cmp(&a.score));
    standings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PowerUp, Rarity, Timestamp};

    fn active(kind: PowerUpKind, effect_value: i64) -> PowerUp {
        let mut p = PowerUp::held(kind, effect_value, 0, 1, Rarity::Common);
        p.activate_at(Timestamp::ZERO);
        p
    }

    fn player(id: u32, base: i64) -> Player {
        Player::new(PlayerId(id), format!("p{id}")).with_base_points(base)
    }

    #[test]
    fn stored_points_combine() {
        let mut p = player(1, 100);
        p.bonus_points = 30;
        p.penalty_points = 45;
        assert_eq!(calculate_score(&p), 85);
    }

    #[test]
    fn doubling_is_folded_live_without_drift() {
        let mut p = player(1, 100);
        p.active_power_ups.push(active(PowerUpKind::DoublePoints, 0));

        assert_eq!(calculate_score(&p), 200);
        assert_eq!(calculate_score(&p), 200);
        assert_eq!(p.base_points, 100);
    }

    #[test]
    fn fold_respects_activation_order() {
        let mut double_first = player(1, 10);
        double_first.active_power_ups.push(active(PowerUpKind::DoublePoints, 0));
        double_first.active_power_ups.push(active(PowerUpKind::BonusPoints, 5));

        let mut bonus_first = player(2, 10);
        bonus_first.active_power_ups.push(active(PowerUpKind::BonusPoints, 5));
        bonus_first.active_power_ups.push(active(PowerUpKind::DoublePoints, 0));

        assert_eq!(calculate_score(&double_first), 25);
        assert_eq!(calculate_score(&bonus_first), 30);
    }

    #[test]
    fn inactive_and_gameplay_power_ups_are_transparent() {
        let mut p = player(1, 50);
        let mut dormant = active(PowerUpKind::DoublePoints, 0);
        dormant.is_active = false;
        p.active_power_ups.push(dormant);
        p.active_power_ups.push(active(PowerUpKind::Shield, 99));
        p.active_power_ups.push(active(PowerUpKind::ExtraPoints, 99));

        assert_eq!(calculate_score(&p), 50);
    }

    #[test]
    fn negative_score_is_not_clamped() {
        let mut p = player(1, 5);
        p.penalty_points = 20;
        assert_eq!(calculate_score(&p), -15);

        p.active_power_ups.push(active(PowerUpKind::DoublePoints, 0));
        assert_eq!(calculate_score(&p), -30);
    }

    #[test]
    fn leaderboard_is_stable_for_ties() {
        let players = vec![player(1, 10), player(2, 50), player(3, 10), player(4, 50)];
        let board = leaderboard(&players);

        let order: Vec<u32> = board.iter().map(|e| e.player.id.0).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);

        let ranks: Vec<usize> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3, 3]);
    }

    #[test]
    fn leaderboard_entries_compare_by_player_and_score() {
        let players = vec![player(1, 30), player(2, 10)];
        let board = leaderboard(&players);

        assert_eq!(
            board[0],
            LeaderboardEntry {
                player: &players[0],
                score: 30,
                rank: 1,
            }
        );
        assert_ne!(board[0], board[1]);
    }

    #[test]
    fn leaderboard_places_negative_scores_last() {
        let mut debtor = player(1, 5);
        debtor.penalty_points = 20;
        let players = vec![debtor, player(2, 0)];

        let board = leaderboard(&players);
        assert_eq!(board[0].player.id, PlayerId(2));
        assert_eq!(board[1].score, -15);
    }

    #[test]
    fn team_totals_sum_members() {
        let players = vec![player(1, 10), player(2, 20), player(3, 5)];
        let red = Team::new(1, "red").with_member(PlayerId(1)).with_member(PlayerId(3));
        let blue = Team::new(2, "blue")
            .with_member(PlayerId(2))
            .with_member(PlayerId(99));

        assert_eq!(team_score(&players[..2]), 30);

        let standings = team_standings(&[red, blue], &players);
        assert_eq!(standings[0].name, "blue");
        assert_eq!(standings[0].score, 20);
        assert_eq!(standings[1].score, 15);
    }
}
