//! Render smoke tests for each phase screen.

use std::path::PathBuf;

use tui_dispatch::testing::*;
use rhythmon::{
    config::GameConfig,
    leaderboard::LeaderboardEntry,
    quiz::round1_questions,
    state::{AppState, Creature, Phase, QuizState},
    species::Species,
    ui,
};

fn state_in(phase: Phase) -> AppState {
    let mut state = AppState::with_seed(GameConfig::default(), PathBuf::from("scores.json"), 1);
    state.phase = phase;
    state.stats.name = "Ash".into();
    state.creature = Some(Creature::new(Species::Piplup));
    state
}

fn render(state: &AppState) -> String {
    let mut render = RenderHarness::new(100, 32);
    render.render_to_string_plain(|frame| ui::draw(frame, frame.area(), state))
}

#[test]
fn test_intro_shows_name_and_leaderboard() {
    let mut state = AppState::default();
    state.name_input = "Brock".into();
    state.leaderboard = vec![LeaderboardEntry {
        name: "Misty".into(),
        score: 1234.0,
        is_shiny: true,
        date: "2024-02-02T00:00:00Z".into(),
    }];
    let output = render(&state);
    assert!(output.contains("Brock"), "{output}");
    assert!(output.contains("Misty"), "{output}");
    assert!(output.contains("1234"), "{output}");
}

#[test]
fn test_empty_leaderboard_placeholder() {
    let output = render(&AppState::default());
    assert!(output.contains("No scores yet."), "{output}");
    assert!(output.contains("Tab: share"), "{output}");
}

#[test]
fn test_selection_lists_all_partners() {
    let output = render(&state_in(Phase::Selection));
    for species in Species::ALL {
        assert!(output.contains(species.profile().name), "{output}");
    }
}

#[test]
fn test_quiz_shows_prompt_and_progress() {
    let mut state = state_in(Phase::Round1);
    state.quiz = QuizState::new(1, round1_questions());
    let output = render(&state);
    assert!(output.contains("Question 1/10"), "{output}");
    assert!(output.contains("[Round 1]"), "{output}");
    assert!(output.contains("quarter"), "{output}");
    assert!(output.contains("HP"), "{output}");
}

#[test]
fn test_boss_screen_shows_moves_and_uses() {
    let mut state = state_in(Phase::BossBattle);
    state.battle.push_log("Dialga appeared!");
    let output = render(&state);
    assert!(output.contains("DIALGA"), "{output}");
    assert!(output.contains("Dragon Claw"), "{output}");
    assert!(output.contains("3/3"), "{output}");
    assert!(output.contains("Dialga appeared!"), "{output}");
}

#[test]
fn test_finished_screens() {
    let output = render(&state_in(Phase::Victory));
    assert!(output.contains("VICTORY"), "{output}");
    let output = render(&state_in(Phase::GameOver));
    assert!(output.contains("GAME OVER"), "{output}");
    assert!(output.contains("restart"), "{output}");
}
