//! Full-run flows through the effect store and test harness.

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tui_dispatch::testing::*;
use tui_dispatch::EffectStore;
use rhythmon::{
    action::Action,
    battle::MoveId,
    config::GameConfig,
    effect::{Effect, PhaseTimer},
    leaderboard::LeaderboardEntry,
    reducer::reducer,
    state::{AppState, Phase},
};

fn seeded_state() -> AppState {
    let mut state = AppState::with_seed(GameConfig::default(), PathBuf::from("scores.json"), 9);
    state.muted = true;
    state
}

fn entry(name: &str, score: f64) -> LeaderboardEntry {
    LeaderboardEntry {
        name: name.into(),
        score,
        is_shiny: false,
        date: "2024-06-01T09:30:00Z".into(),
    }
}

fn correct_answer(state: &AppState) -> usize {
    let question = state.quiz.current().expect("active question");
    question
        .options
        .iter()
        .position(|opt| question.is_correct(&opt.value))
        .expect("correct option")
}

#[test]
fn test_init_requests_leaderboard() {
    let mut harness = EffectStoreTestHarness::new(seeded_state(), reducer);

    harness.dispatch_collect(Action::Init);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::LoadLeaderboard { .. }));

    harness.complete_action(Action::LeaderboardDidLoad(vec![
        entry("low", 5.0),
        entry("high", 500.0),
    ]));
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));
    harness.assert_state(|s| s.leaderboard.first().map(|e| e.name.as_str()) == Some("high"));
}

#[test]
fn test_leaderboard_error_starts_empty() {
    let mut harness = EffectStoreTestHarness::new(seeded_state(), reducer);
    harness.complete_action(Action::LeaderboardDidError("corrupted".into()));
    harness.process_emitted();
    harness.assert_state(|s| s.leaderboard.is_empty());
}

#[test]
fn test_intro_to_round_one() {
    let mut harness = EffectStoreTestHarness::new(seeded_state(), reducer);

    let results = harness.dispatch_all([
        Action::NameInput('A'),
        Action::NameInput('s'),
        Action::NameInput('h'),
        Action::StartGame,
        Action::SpeciesSelect(1),
        Action::SpeciesConfirm,
    ]);
    assert_eq!(results, vec![true; 6]);
    harness.assert_state(|s| s.phase == Phase::Round1);
    harness.assert_state(|s| s.stats.name == "Ash");
}

#[test]
fn test_full_run_reaches_victory_and_saves_once() {
    let mut store = EffectStore::new(seeded_state(), reducer);
    store.dispatch(Action::NameInput('A'));
    store.dispatch(Action::StartGame);
    store.dispatch(Action::SpeciesConfirm);

    for _ in 0..10 {
        let index = correct_answer(store.state());
        store.dispatch(Action::QuizAnswer(index));
    }
    assert_eq!(store.state().phase, Phase::Evolution);
    store.dispatch(Action::TimerDidFire(PhaseTimer::EvolutionEnd));
    assert_eq!(store.state().phase, Phase::Round2);

    for _ in 0..10 {
        let index = correct_answer(store.state());
        store.dispatch(Action::QuizAnswer(index));
    }
    assert_eq!(store.state().phase, Phase::Evolution);
    store.dispatch(Action::TimerDidFire(PhaseTimer::EvolutionEnd));
    store.dispatch(Action::TimerDidFire(PhaseTimer::BossAppear));
    assert_eq!(store.state().phase, Phase::BossBattle);

    // Perfect quiz score: 20 * (1.1^20 - 1) / 0.1
    let expected = 20.0 * (1.1f64.powi(20) - 1.0) / 0.1;
    assert!((store.state().stats.score - expected).abs() < 1e-6);

    let mut save_effects = 0;
    for _ in 0..200 {
        let state = store.state();
        if state.phase != Phase::BossBattle {
            break;
        }
        let result = if state.stats.is_fainted() {
            store.dispatch(Action::TimerDidFire(PhaseTimer::GameOver))
        } else if state.boss.is_defeated() {
            store.dispatch(Action::TimerDidFire(PhaseTimer::Victory))
        } else if state.battle.pending_strike.is_some() {
            store.dispatch(Action::TimerDidFire(PhaseTimer::BossStrike))
        } else if !state.battle.player_turn {
            store.dispatch(Action::TimerDidFire(PhaseTimer::BossTurn))
        } else {
            let index = [3, 2, 1]
                .into_iter()
                .find(|&i| {
                    MoveId::from_index(i)
                        .is_some_and(|id| state.battle.usage.can_use(id))
                })
                .unwrap_or(1);
            store.dispatch(Action::BossAttack(index))
        };
        save_effects += result
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::SaveScore { .. }))
            .count();
    }

    let state = store.state();
    assert!(matches!(state.phase, Phase::Victory | Phase::GameOver));
    if state.phase == Phase::Victory {
        assert_eq!(save_effects, 1);
        store.dispatch(Action::TimerDidFire(PhaseTimer::Victory));
    } else {
        assert_eq!(save_effects, 0);
    }
    assert!(store.state().stats.hp <= store.state().stats.max_hp);
}

#[test]
fn test_score_saved_updates_leaderboard() {
    let mut harness = EffectStoreTestHarness::new(seeded_state(), reducer);
    harness.complete_action(Action::ScoreDidSave(vec![entry("Ash", 900.0)]));
    harness.process_emitted();
    harness.assert_state(|s| s.leaderboard.len() == 1);
    harness.assert_state(|s| s.message.as_deref() == Some("Score saved to the leaderboard."));
}

#[test]
fn test_restart_returns_to_intro() {
    let mut state = seeded_state();
    state.phase = Phase::GameOver;
    state.leaderboard = vec![entry("kept", 10.0)];
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::Restart);
    harness.assert_state(|s| s.phase == Phase::Intro);
    harness.assert_state(|s| s.leaderboard.len() == 1);
    harness.assert_state(|s| s.muted);
}

#[test]
fn test_mute_toggle() {
    let mut harness = EffectStoreTestHarness::new(seeded_state(), reducer);
    harness.dispatch_collect(Action::ToggleMute);
    harness.assert_state(|s| !s.muted);
    harness.dispatch_collect(Action::ToggleMute);
    harness.assert_state(|s| s.muted);
}
