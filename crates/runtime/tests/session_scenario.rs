use std::sync::Arc;

use game_content::{ScrollCatalog, ScrollDefinition};
use game_core::{
    ActorHandle, ActorKind, AudioCue, CharacterStat, GameConfig, StageConfig, StageState,
    StatTable,
};
use runtime::{
    FileProfileRepository, GameModeEvent, PlayerProfile, ProfileRepository, RewardOutcome,
    RuntimeError, Session, SessionConfig,
};

fn tables() -> Arc<StatTable> {
    let levels = (0..5)
        .map(|i| CharacterStat::new(100.0 + 50.0 * i as f32, 10.0, 150.0, 1.0, 600.0))
        .collect();
    Arc::new(StatTable::new(levels, CharacterStat::new(1000.0, 100.0, 500.0, 5.0, 1200.0)).unwrap())
}

fn scrolls() -> ScrollCatalog {
    ScrollCatalog::new(vec![
        ScrollDefinition::new("vigor", CharacterStat::with_max_hp(20.0)),
        ScrollDefinition::new("edge", CharacterStat::new(0.0, 5.0, 0.0, 0.0, 0.0)),
    ])
}

fn session_with(stage: StageConfig, game: GameConfig, seed: u64) -> Session {
    let config = SessionConfig::new(seed).with_stage(stage).with_game(game);
    Session::new(config, tables(), scrolls(), PlayerProfile::new())
}

fn session(stage: StageConfig) -> Session {
    session_with(stage, GameConfig::default(), 7)
}

fn kill_all(session: &mut Session) {
    for enemy in session.world().enemies() {
        session.damage_enemy(enemy, f32::MAX).unwrap();
    }
}

fn decoy_and_real(session: &Session) -> (ActorHandle, ActorHandle) {
    let rewards = &session.stage().session().active_rewards;
    (rewards[0], rewards[1])
}

/// Full wave cycle: READY → BATTLE → REWARD → READY with a scroll granted.
#[test]
fn complete_wave_cycle() {
    let mut session = session(StageConfig::default().with_target_enemy_count(2));

    // ================================================================
    // READY
    // ================================================================
    session.begin_play();
    assert_eq!(session.state(), StageState::Ready);
    assert_eq!(session.audio().looping(), Some(AudioCue::StageBgm));
    assert!(session.game_mode().hud().objective_visible);
    assert_eq!(session.game_mode().hud().stage_level, 2);

    assert_eq!(session.advance(1.5), 0);
    session.advance(0.5);
    assert_eq!(session.state(), StageState::Battle);

    // ================================================================
    // BATTLE
    // ================================================================
    session.advance(1.0);
    let enemies = session.world().enemies();
    assert_eq!(enemies.len(), 2);
    assert_eq!(session.stage().session().current_enemy_count, 2);

    assert_eq!(session.damage_enemy(enemies[0], 40.0).unwrap(), 60.0);
    kill_all(&mut session);

    // ================================================================
    // REWARD
    // ================================================================
    assert_eq!(session.state(), StageState::Reward);
    assert_eq!(session.world().rewards().len(), 4);
    assert!(!session.game_mode().hud().objective_visible);
    assert_eq!(session.stage().session().accumulated_reward_amount, 3);

    let (decoy, real) = decoy_and_real(&session);
    assert_eq!(
        session.world().get(decoy).unwrap().kind(),
        ActorKind::Reward { empty: true }
    );

    let outcome = session.pick_reward(real).unwrap();

    assert_eq!(
        outcome,
        RewardOutcome::Scroll {
            name: "vigor".to_string()
        }
    );
    assert_eq!(session.state(), StageState::Ready);
    assert!(session.world().rewards().is_empty());
    assert_eq!(session.player().max_hp(), 120.0);
    assert_eq!(session.reward_cycles(), 1);
}

#[test]
fn decoy_grants_nothing() {
    let mut session = session(StageConfig::default());
    session.begin_play();
    session.advance(3.0);
    kill_all(&mut session);

    let (decoy, _) = decoy_and_real(&session);
    let outcome = session.pick_reward(decoy).unwrap();

    assert_eq!(outcome, RewardOutcome::Empty);
    assert!(session.player().scroll_stats().is_empty());
    assert_eq!(session.state(), StageState::Ready);
}

#[test]
fn pickups_outside_reward_phase_are_ignored() {
    let mut session = session(StageConfig::default());
    session.begin_play();
    session.advance(3.0);
    kill_all(&mut session);
    let (_, real) = decoy_and_real(&session);
    session.pick_reward(real).unwrap();

    // the picked actor is gone; the pickup handle no longer resolves
    assert!(matches!(
        session.pick_reward(real),
        Err(RuntimeError::UnknownActor(_))
    ));
}

#[test]
fn wrong_actor_kinds_are_rejected() {
    let mut session = session(StageConfig::default().with_target_enemy_count(2));
    session.begin_play();
    session.advance(2.0);
    session.advance(0.5);
    let enemy = session.world().enemies()[0];

    assert!(matches!(
        session.pick_reward(enemy),
        Err(RuntimeError::NotAReward(_))
    ));
    assert!(matches!(
        session.damage_enemy(ActorHandle::new(99, 0), 1.0),
        Err(RuntimeError::UnknownActor(_))
    ));
}

#[test]
fn capacity_delays_spawns_without_losing_them() {
    let mut session = session_with(
        StageConfig::default().with_target_enemy_count(3),
        GameConfig::with_max_actors(2),
        7,
    );
    session.begin_play();
    session.advance(3.0);
    assert_eq!(session.world().enemies().len(), 2);
    assert_eq!(session.stage().session().current_enemy_count, 2);

    let first = session.world().enemies()[0];
    session.damage_enemy(first, f32::MAX).unwrap();
    session.advance(1.0);

    assert_eq!(session.stage().session().current_enemy_count, 3);
    kill_all(&mut session);

    assert_eq!(session.state(), StageState::Reward);
    assert_eq!(session.world().rewards().len(), 2);
}

#[test]
fn same_seed_same_waves() {
    let positions = |seed| {
        let mut session = session_with(
            StageConfig::default().with_target_enemy_count(4),
            GameConfig::default(),
            seed,
        );
        session.begin_play();
        session.advance(5.0);
        session
            .world()
            .enemies()
            .into_iter()
            .map(|enemy| session.world().get(enemy).unwrap().position())
            .collect::<Vec<_>>()
    };

    assert_eq!(positions(11), positions(11));
    assert_ne!(positions(11), positions(12));
}

#[test]
fn player_death_ends_the_run() {
    let mut session = session(StageConfig::default().with_target_enemy_count(2));
    session.begin_play();
    session.advance(3.0);
    let enemy = session.world().enemies()[0];
    session.damage_enemy(enemy, f32::MAX).unwrap();

    assert_eq!(session.damage_player(60.0).unwrap(), 40.0);
    assert!(!session.is_game_over());
    assert_eq!(session.damage_player(60.0).unwrap(), 0.0);
    assert!(session.is_game_over());
    assert!(session.audio().is_fading());

    session.advance(2.0);

    assert_eq!(session.audio().last_one_shot(), Some(AudioCue::GameOver));
    assert_eq!(session.state(), StageState::Battle);
    let events = session.game_mode().events();
    assert!(events.contains(&GameModeEvent::RewardReturned { amount: 1 }));
    assert!(events.contains(&GameModeEvent::EnemyKilled { count: 1 }));
    assert_eq!(
        events.last(),
        Some(&GameModeEvent::EnemyKilled { count: 1 })
    );

    let profile = session.profile();
    assert_eq!(profile.money, 1);
    assert_eq!(profile.new_game_count, 1);
    assert_eq!(profile.total_kills, 1);
    assert_eq!(profile.best_stage_level, 2);
}

#[test]
fn game_over_is_signalled_once() {
    let mut session = session(StageConfig::default());
    session.begin_play();
    session.game_over().unwrap();
    session.game_over().unwrap();

    let returned = session
        .game_mode()
        .events()
        .iter()
        .filter(|event| matches!(event, GameModeEvent::RewardReturned { .. }))
        .count();
    assert_eq!(returned, 1);
    assert_eq!(session.profile().new_game_count, 1);
}

#[test]
fn teardown_stops_everything() {
    let mut session = session(StageConfig::default().with_target_enemy_count(3));
    session.begin_play();
    session.advance(2.1);
    session.game_over().unwrap();
    assert!(session.clock().pending_count() > 0);

    session.teardown();

    assert_eq!(session.clock().pending_count(), 0);
    assert_eq!(session.advance(10.0), 0);
    assert!(matches!(
        session.damage_player(1.0),
        Err(RuntimeError::TornDown)
    ));
    assert!(session.audio().last_one_shot().is_none());
}

#[test]
fn profile_survives_a_run() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileProfileRepository::new(dir.path()).unwrap();
    let mut profile = repo.load_or_default().unwrap();
    profile.deposit_reward(10);

    let config = SessionConfig::new(3);
    let mut session = Session::new(config, tables(), scrolls(), profile);
    session.begin_play();
    session.advance(3.0);
    kill_all(&mut session);
    let (_, real) = decoy_and_real(&session);
    session.pick_reward(real).unwrap();
    session.game_over().unwrap();
    session.advance(2.0);
    session.teardown();

    let summary = session.summary();
    assert_eq!(summary.accumulated_reward, 2);
    assert_eq!(summary.scrolls, vec!["vigor".to_string()]);

    repo.save(&session.into_profile()).unwrap();
    let saved = repo.load().unwrap().unwrap();
    assert_eq!(saved.money, 12);
    assert_eq!(saved.new_game_count, 1);
    assert_eq!(saved.total_kills, 1);
}
