//! Command round-trips and sweeps against a running worker.

use std::sync::Arc;
use std::time::Duration;

use scoring_content::{ContentFactory, PowerUpGrant};
use scoring_core::{
    AchievementId, EngineError, ManualClock, Penalty, PenaltyCatalog, PenaltyEvent, PenaltyId,
    PenaltyKind, Player, PlayerId, PowerUpError, PowerUpKind, Rarity, ScoreEvent, ScoringConfig,
    Team, Timestamp,
};
use scoring_runtime::{PlayerOp, Runtime, RuntimeBuilder, RuntimeConfig, RuntimeError};

const ADA: PlayerId = PlayerId(1);
const BOB: PlayerId = PlayerId(2);

/// Runtime whose ticker effectively never fires; tests sweep explicitly.
fn builder(clock: &ManualClock) -> RuntimeBuilder {
    Runtime::builder()
        .config(RuntimeConfig::default().with_sweep_interval(Duration::from_secs(3600)))
        .clock(Arc::new(clock.clone()))
}

fn grant(kind: PowerUpKind, effect_value: i64, duration_ms: u64) -> PowerUpGrant {
    PowerUpGrant {
        kind,
        effect_value,
        duration_ms,
        level: 1,
        rarity: Rarity::Common,
    }
}

#[tokio::test]
async fn mutations_and_expiry_round_trip() {
    let clock = ManualClock::new(Timestamp(0));
    let runtime = builder(&clock).build().await.unwrap();
    let handle = runtime.handle();

    handle
        .add_player(Player::new(ADA, "ada").with_base_points(100))
        .await
        .unwrap();
    handle.award_points(ADA, 20).await.unwrap();
    assert_eq!(handle.score(ADA).await.unwrap(), 120);

    handle.penalize(ADA, PenaltyEvent::FalseCall).await.unwrap();
    assert_eq!(handle.score(ADA).await.unwrap(), 115);

    handle
        .grant_power_up(ADA, grant(PowerUpKind::DoublePoints, 0, 1000))
        .await
        .unwrap();
    handle
        .activate_power_up(ADA, PowerUpKind::DoublePoints)
        .await
        .unwrap();
    assert_eq!(handle.score(ADA).await.unwrap(), 230);
    assert_eq!(handle.score(ADA).await.unwrap(), 230);

    clock.advance(999);
    assert!(handle.sweep().await.unwrap().is_empty());

    clock.advance(1);
    let events = handle.sweep().await.unwrap();
    assert!(events.contains(&ScoreEvent::PowerUpDeactivated {
        player: ADA,
        kind: PowerUpKind::DoublePoints,
        expired: true,
    }));
    assert_eq!(handle.score(ADA).await.unwrap(), 115);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn configured_penalty_catalog_is_used() {
    let clock = ManualClock::new(Timestamp(0));
    let mut catalog = PenaltyCatalog::default();
    catalog.false_call.points = 40;
    catalog.false_call.multiplier = 0.5;
    let config = RuntimeConfig::default()
        .with_sweep_interval(Duration::from_secs(3600))
        .with_scoring(ScoringConfig::default().with_penalty_catalog(catalog));

    let runtime = Runtime::builder()
        .config(config)
        .clock(Arc::new(clock))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    handle
        .add_player(Player::new(ADA, "ada").with_base_points(100))
        .await
        .unwrap();

    handle.penalize(ADA, PenaltyEvent::FalseCall).await.unwrap();
    assert_eq!(handle.score(ADA).await.unwrap(), 80);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn events_are_broadcast() {
    let clock = ManualClock::new(Timestamp(0));
    let runtime = builder(&clock).build().await.unwrap();
    let handle = runtime.handle();
    let mut events = runtime.subscribe();

    handle.add_player(Player::new(ADA, "ada")).await.unwrap();
    handle
        .penalize(ADA, PenaltyEvent::OversteppedTurn)
        .await
        .unwrap();

    let first = events.recv().await.unwrap();
    assert!(matches!(
        first,
        ScoreEvent::PenaltyApplied {
            kind: PenaltyKind::Silenced,
            ..
        }
    ));
    assert!(handle.player(ADA).await.unwrap().is_silenced);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn ticker_sweeps_without_commands() {
    let clock = ManualClock::new(Timestamp(0));
    let runtime = Runtime::builder()
        .config(RuntimeConfig::default().with_sweep_interval(Duration::from_millis(10)))
        .clock(Arc::new(clock.clone()))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut events = runtime.subscribe();

    handle.add_player(Player::new(ADA, "ada")).await.unwrap();
    handle
        .penalize(ADA, PenaltyEvent::OversteppedTurn)
        .await
        .unwrap();
    clock.advance(30_000);

    let lifted = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let ScoreEvent::SilenceChanged { silenced: false, .. } =
                events.recv().await.unwrap()
            {
                break;
            }
        }
    })
    .await;

    assert!(lifted.is_ok(), "periodic sweep never lifted the silence");
    assert!(!handle.player(ADA).await.unwrap().is_silenced);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_and_duplicate_players_are_rejected() {
    let clock = ManualClock::new(Timestamp(0));
    let runtime = builder(&clock).build().await.unwrap();
    let handle = runtime.handle();

    assert!(matches!(
        handle.score(ADA).await,
        Err(RuntimeError::UnknownPlayer(ADA))
    ));

    handle.add_player(Player::new(ADA, "ada")).await.unwrap();
    assert!(matches!(
        handle.add_player(Player::new(ADA, "again")).await,
        Err(RuntimeError::PlayerExists(ADA))
    ));

    let removed = handle.remove_player(ADA).await.unwrap();
    assert_eq!(removed.name, "ada");
    assert!(handle.player(ADA).await.is_err());

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn engine_errors_surface_with_severity() {
    let clock = ManualClock::new(Timestamp(0));
    let runtime = builder(&clock).build().await.unwrap();
    let handle = runtime.handle();
    handle.add_player(Player::new(ADA, "ada")).await.unwrap();

    let err = handle
        .activate_power_up(ADA, PowerUpKind::Shield)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::PowerUp(PowerUpError::NotHeld {
            kind: PowerUpKind::Shield
        }))
    ));
    assert_eq!(err.severity(), scoring_core::ErrorSeverity::Validation);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn catalog_seeds_players_and_achievements_unlock() {
    let clock = ManualClock::new(Timestamp(0));
    let catalog = ContentFactory::bundled().load_catalog().unwrap();
    let runtime = builder(&clock).catalog(catalog).build().await.unwrap();
    let handle = runtime.handle();

    let seeded = handle.add_player(Player::new(ADA, "ada")).await.unwrap();
    assert_eq!(seeded.len(), 2);

    let mut unlocked = Vec::new();
    for _ in 0..10 {
        for event in handle
            .apply(ADA, PlayerOp::ObjectSpotted { points: 5 })
            .await
            .unwrap()
        {
            if let ScoreEvent::AchievementUnlocked { achievement, .. } = event {
                unlocked.push(achievement);
            }
        }
    }
    assert_eq!(unlocked, vec![AchievementId(1)]);
    assert_eq!(handle.score(ADA).await.unwrap(), 100);

    handle.apply(ADA, PlayerOp::ApplyRules).await.unwrap();
    assert_eq!(handle.score(ADA).await.unwrap(), 125);
    handle.apply(ADA, PlayerOp::ApplyRules).await.unwrap();
    assert_eq!(handle.score(ADA).await.unwrap(), 125);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn leaderboard_and_team_standings() {
    let clock = ManualClock::new(Timestamp(0));
    let runtime = builder(&clock)
        .player(Player::new(ADA, "ada").with_base_points(40))
        .player(Player::new(BOB, "bob").with_base_points(40))
        .player(Player::new(PlayerId(3), "cy").with_base_points(90))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    let board = handle.leaderboard().await.unwrap();
    let ranks: Vec<(PlayerId, usize)> = board.iter().map(|s| (s.player, s.rank)).collect();
    assert_eq!(ranks, vec![(PlayerId(3), 1), (ADA, 2), (BOB, 2)]);

    let teams = vec![
        Team::new(1, "red").with_member(ADA).with_member(BOB),
        Team::new(2, "blue").with_member(PlayerId(3)),
    ];
    let standings = handle.team_standings(teams).await.unwrap();
    let totals: Vec<(&str, i64)> = standings
        .iter()
        .map(|t| (t.name.as_str(), t.score))
        .collect();
    assert_eq!(totals, vec![("blue", 90), ("red", 80)]);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn advance_round_expires_round_based_penalties() {
    let clock = ManualClock::new(Timestamp(0));
    let runtime = builder(&clock).build().await.unwrap();
    let handle = runtime.handle();
    handle.add_player(Player::new(ADA, "ada")).await.unwrap();

    let benched = Penalty::new(PenaltyId(1), "benched", PenaltyKind::TemporaryBan, Timestamp(0))
        .with_rounds(1);
    handle
        .apply(ADA, PlayerOp::ApplyPenalty(benched))
        .await
        .unwrap();
    assert!(handle.player(ADA).await.unwrap().is_silenced);

    let events = handle.advance_round().await.unwrap();
    assert!(events.contains(&ScoreEvent::SilenceChanged {
        player: ADA,
        silenced: false
    }));
    assert!(handle.player(ADA).await.unwrap().penalties.is_empty());

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn handles_fail_after_shutdown() {
    let clock = ManualClock::new(Timestamp(0));
    let runtime = builder(&clock).build().await.unwrap();
    let handle = runtime.handle();

    runtime.shutdown().await.unwrap();

    assert!(matches!(
        handle.leaderboard().await,
        Err(RuntimeError::CommandChannelClosed)
    ));
}
