use rand::Rng;
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::audio::SoundCue;
use crate::battle::{player_damage, roll_boss_strike, MoveId};
use crate::effect::{Effect, PhaseTimer};
use crate::leaderboard;
use crate::quiz::{round1_questions, round2_questions, roll_miss, scaled_damage, streak_points};
use crate::share;
use crate::species::{Species, BOSS_NAME, FINAL_STAGE};
use crate::state::{AppState, BattleState, Boss, Creature, Mood, Phase, QuizState, NAME_MAX_LEN};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => DispatchResult::changed_with(Effect::LoadLeaderboard {
            path: state.leaderboard_path.clone(),
        }),
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size != (width, height) {
                state.terminal_size = (width, height);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }
        Action::Tick => {
            state.tick = state.tick.wrapping_add(1);
            // Only these screens animate.
            if matches!(state.phase, Phase::Intro | Phase::Evolution | Phase::PreBoss) {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::NameInput(ch) => {
            if state.phase != Phase::Intro
                || ch.is_control()
                || state.name_input.chars().count() >= NAME_MAX_LEN
            {
                return DispatchResult::unchanged();
            }
            state.name_input.push(ch);
            DispatchResult::changed()
        }
        Action::NameBackspace => {
            if state.phase == Phase::Intro && state.name_input.pop().is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }
        Action::StartGame => start_game(state),

        Action::SpeciesSelect(index) => {
            if state.phase != Phase::Selection || index >= Species::ALL.len() {
                return DispatchResult::unchanged();
            }
            state.selection_index = index;
            DispatchResult::changed()
        }
        Action::SpeciesConfirm => species_confirm(state),

        Action::QuizSelect(index) => {
            let in_range = state
                .quiz
                .current()
                .is_some_and(|question| index < question.options.len());
            if !state.phase.is_quiz() || !in_range {
                return DispatchResult::unchanged();
            }
            state.quiz.selected = index;
            DispatchResult::changed()
        }
        Action::QuizAnswer(index) => quiz_answer(state, index),

        Action::MoveSelect(index) => {
            if state.phase != Phase::BossBattle || MoveId::from_index(index).is_none() {
                return DispatchResult::unchanged();
            }
            state.battle.selected = index;
            DispatchResult::changed()
        }
        Action::BossAttack(index) => boss_attack(state, index),

        Action::ShopBuyBerry => buy_berry(state),
        Action::ShopUseBerry => use_berry(state),

        Action::TimerDidFire(timer) => timer_fired(state, timer),

        Action::LeaderboardDidLoad(mut entries) => {
            leaderboard::rank(&mut entries);
            state.leaderboard = entries;
            DispatchResult::changed()
        }
        Action::LeaderboardDidError(error) => {
            tracing::warn!(%error, "leaderboard unavailable, starting empty");
            state.leaderboard.clear();
            DispatchResult::changed()
        }
        Action::ScoreDidSave(entries) => {
            state.leaderboard = entries;
            state.message = Some("Score saved to the leaderboard.".to_string());
            DispatchResult::changed()
        }
        Action::ScoreSaveError { entry, error } => {
            tracing::warn!(%error, "score not persisted");
            leaderboard::insert(&mut state.leaderboard, entry);
            state.message = Some(format!("Could not save score: {}", error));
            DispatchResult::changed()
        }

        Action::Share => {
            if state.phase != Phase::Intro && !state.phase.is_finished() {
                return DispatchResult::unchanged();
            }
            let result = state
                .phase
                .is_finished()
                .then(|| (state.stats.name.as_str(), state.stats.score));
            let text = share::share_message(&state.config.share_url, result);
            DispatchResult::changed_with(Effect::CopyShareLink { text })
        }
        Action::ShareDidCopy => {
            state.message = Some("Link copied! Share it with your friends.".to_string());
            DispatchResult::changed()
        }
        Action::ShareDidError(error) => {
            tracing::warn!(%error, "share failed");
            state.message = Some(format!("Could not copy the link: {}", error));
            DispatchResult::changed()
        }

        Action::ToggleMute => {
            state.muted = !state.muted;
            state.message = Some(if state.muted {
                "Sound off.".to_string()
            } else {
                "Sound on.".to_string()
            });
            DispatchResult::changed()
        }
        Action::Restart => {
            if !state.phase.is_finished() {
                return DispatchResult::unchanged();
            }
            tracing::info!(from = ?state.phase, "restarting run");
            *state = state.restarted();
            DispatchResult::changed()
        }
        Action::Quit => DispatchResult::unchanged(),
    }
}

fn finish(effects: Vec<Effect>) -> DispatchResult<Effect> {
    if effects.is_empty() {
        DispatchResult::changed()
    } else {
        DispatchResult::changed_with_many(effects)
    }
}

fn enter_phase(state: &mut AppState, phase: Phase) {
    tracing::info!(from = ?state.phase, to = ?phase, "phase change");
    state.phase = phase;
}

fn timer(timer: PhaseTimer, delay_ms: u64) -> Effect {
    Effect::StartTimer { timer, delay_ms }
}

fn sound(state: &AppState, cue: SoundCue, effects: &mut Vec<Effect>) {
    if !state.muted {
        effects.push(Effect::PlaySound(cue));
    }
}

fn set_mood(state: &mut AppState, mood: Mood, effects: &mut Vec<Effect>) {
    state.mood = mood;
    state.mood_generation = state.mood_generation.wrapping_add(1);
    effects.push(timer(
        PhaseTimer::MoodReset(state.mood_generation),
        state.config.timers.mood_ms,
    ));
}

fn start_game(state: &mut AppState) -> DispatchResult<Effect> {
    if state.phase != Phase::Intro {
        return DispatchResult::unchanged();
    }
    let name = state.name_input.trim();
    if name.is_empty() {
        state.message = Some("Enter a trainer name to begin.".to_string());
        return DispatchResult::changed();
    }
    state.stats.name = name.to_string();
    state.message = None;
    enter_phase(state, Phase::Selection);
    DispatchResult::changed()
}

fn species_confirm(state: &mut AppState) -> DispatchResult<Effect> {
    if state.phase != Phase::Selection {
        return DispatchResult::unchanged();
    }
    let Some(species) = Species::from_index(state.selection_index) else {
        return DispatchResult::unchanged();
    };
    state.creature = Some(Creature::new(species));
    state.stats.reset_hp(species.stage(0).max_hp);
    state.quiz = QuizState::new(1, round1_questions());
    state.message = Some(format!("{} is ready! Round 1 begins.", species.profile().name));
    enter_phase(state, Phase::Round1);
    DispatchResult::changed()
}

fn quiz_answer(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    if !state.phase.is_quiz() || state.stats.is_fainted() {
        return DispatchResult::unchanged();
    }
    let Some(question) = state.quiz.current() else {
        return DispatchResult::unchanged();
    };
    let Some(option) = question.option(index) else {
        return DispatchResult::unchanged();
    };
    let correct = question.is_correct(&option.value);

    let mut effects = Vec::new();
    if correct {
        let points = streak_points(
            state.stats.streak,
            state.config.base_points,
            state.config.streak_rate,
        );
        state.stats.score += points;
        state.stats.streak += 1;
        state.message = Some(format!(
            "Correct! +{:.1} points (streak {}).",
            points, state.stats.streak
        ));
        set_mood(state, Mood::Happy, &mut effects);

        state.quiz.index += 1;
        state.quiz.selected = 0;
        if state.quiz.index >= state.quiz.questions.len() {
            evolve(state, &mut effects);
        }
    } else {
        state.stats.streak = 0;
        let hit = roll_miss(&mut state.rng);
        let damage = scaled_damage(hit.base, state.species().profile().damage_taken_modifier);
        let lost = state.stats.take_damage(damage);
        let mut message = format!("Wrong! {} took {} damage.", state.creature_name(), lost);
        if let Some(extra) = hit.message {
            message.push(' ');
            message.push_str(extra);
        }
        sound(state, SoundCue::Impact { critical: hit.critical }, &mut effects);
        set_mood(state, Mood::Sad, &mut effects);
        if state.stats.is_fainted() {
            message.push_str(&format!(" {} fainted!", state.creature_name()));
            effects.push(timer(PhaseTimer::GameOver, state.config.timers.game_over_ms));
        }
        state.message = Some(message);
    }
    finish(effects)
}

fn evolve(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(mut creature) = state.creature else {
        return;
    };
    let next = creature.stage + 1;
    if next > FINAL_STAGE {
        enter_phase(state, Phase::PreBoss);
        effects.push(timer(
            PhaseTimer::BossAppear,
            state.config.timers.boss_appear_ms,
        ));
        return;
    }

    let from = creature.stage_name();
    let mut turned_shiny = false;
    if !creature.shiny && rolls_shiny(state.rng.gen(), state.config.shiny_chance) {
        creature.shiny = true;
        turned_shiny = true;
    }
    creature.stage = next;
    state.creature = Some(creature);
    state
        .stats
        .reset_hp(creature.species.stage(next).max_hp);

    let mut message = format!("What? {} is evolving into {}!", from, creature.stage_name());
    if turned_shiny {
        message.push_str(" It's shiny!");
    }
    tracing::info!(stage = next, shiny = creature.shiny, "creature evolved");
    state.evolution_message = Some(message);
    state.message = None;
    enter_phase(state, Phase::Evolution);
    sound(state, SoundCue::Evolution, effects);
    effects.push(timer(
        PhaseTimer::EvolutionEnd,
        state.config.timers.evolution_ms,
    ));
}

/// Inclusive at the boundary.
fn rolls_shiny(roll: f64, chance: f64) -> bool {
    roll <= chance
}

fn boss_attack(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    if state.phase != Phase::BossBattle
        || !state.battle.player_turn
        || state.battle.pending_strike.is_some()
        || state.boss.is_defeated()
        || state.stats.is_fainted()
    {
        return DispatchResult::unchanged();
    }
    let Some(id) = MoveId::from_index(index) else {
        return DispatchResult::unchanged();
    };
    let mv = id.info();
    state.battle.selected = index;
    if !state.battle.usage.can_use(id) {
        state.message = Some(format!("{} has no uses left!", mv.name));
        return DispatchResult::changed();
    }

    let damage = player_damage(id, state.species());
    let dealt = state.boss.take_damage(damage);
    state.battle.usage.record(id);
    state.battle.player_turn = false;
    state.message = None;
    let attacker = state.creature_name();
    state
        .battle
        .push_log(format!("{} used {}! {} damage.", attacker, mv.name, dealt));

    let mut effects = Vec::new();
    sound(state, SoundCue::Cry, &mut effects);
    if state.boss.is_defeated() {
        state.battle.push_log(format!("{} fainted!", BOSS_NAME));
        sound(state, SoundCue::BossDefeated, &mut effects);
        effects.push(timer(PhaseTimer::Victory, state.config.timers.victory_ms));
    } else {
        effects.push(timer(PhaseTimer::BossTurn, state.config.timers.boss_turn_ms));
    }
    finish(effects)
}

fn buy_berry(state: &mut AppState) -> DispatchResult<Effect> {
    if !state.phase.shop_open() || state.stats.is_fainted() {
        return DispatchResult::unchanged();
    }
    let cost = state.config.berry_cost;
    if state.stats.score < cost {
        state.message = Some(format!("A berry costs {:.0} points.", cost));
        return DispatchResult::changed();
    }
    state.stats.score -= cost;
    state.stats.berries += 1;
    state.message = Some(format!("Bought a berry ({} in bag).", state.stats.berries));
    DispatchResult::changed()
}

fn use_berry(state: &mut AppState) -> DispatchResult<Effect> {
    if !state.phase.shop_open() || state.stats.is_fainted() {
        return DispatchResult::unchanged();
    }
    if state.stats.berries == 0 {
        state.message = Some("No berries left.".to_string());
        return DispatchResult::changed();
    }
    if state.stats.hp >= state.stats.max_hp {
        state.message = Some("Already at full health.".to_string());
        return DispatchResult::changed();
    }
    let amount = (state.stats.max_hp as f64 * state.config.berry_heal_ratio).floor() as u32;
    let restored = state.stats.heal(amount);
    state.stats.berries -= 1;
    state.message = Some(format!(
        "{} recovered {} HP.",
        state.creature_name(),
        restored
    ));
    DispatchResult::changed()
}

fn timer_fired(state: &mut AppState, fired: PhaseTimer) -> DispatchResult<Effect> {
    let timers = state.config.timers.clone();
    let mut effects = Vec::new();
    match fired {
        PhaseTimer::EvolutionEnd => {
            if state.phase != Phase::Evolution {
                return stale(fired);
            }
            state.evolution_message = None;
            let stage = state.creature.map(|c| c.stage).unwrap_or(FINAL_STAGE);
            if stage < FINAL_STAGE {
                state.quiz = QuizState::new(2, round2_questions(&mut state.rng));
                state.message = Some("Round 2: match each note to its rhythm.".to_string());
                enter_phase(state, Phase::Round2);
            } else {
                state.message = Some("Something is approaching...".to_string());
                enter_phase(state, Phase::PreBoss);
                effects.push(timer(PhaseTimer::BossAppear, timers.boss_appear_ms));
            }
        }
        PhaseTimer::BossAppear => {
            if state.phase != Phase::PreBoss {
                return stale(fired);
            }
            state.boss = Boss::default();
            state.battle = BattleState::default();
            state.battle.push_log(format!("{} appeared!", BOSS_NAME));
            state.message = None;
            enter_phase(state, Phase::BossBattle);
        }
        PhaseTimer::BossTurn => {
            if state.phase != Phase::BossBattle
                || state.battle.player_turn
                || state.battle.pending_strike.is_some()
                || state.boss.is_defeated()
                || state.stats.is_fainted()
            {
                return stale(fired);
            }
            let species = state.species();
            let strike = roll_boss_strike(&mut state.rng, &state.config, species);
            let mut line = format!("{} used {}!", BOSS_NAME, strike.boss_move().name);
            if strike.critical {
                line.push_str(" A critical hit!");
            }
            state.battle.push_log(line);
            state.battle.pending_strike = Some(strike);
            effects.push(timer(PhaseTimer::BossStrike, timers.boss_strike_ms));
        }
        PhaseTimer::BossStrike => {
            if state.phase != Phase::BossBattle {
                return stale(fired);
            }
            let Some(strike) = state.battle.pending_strike.take() else {
                return stale(fired);
            };
            let lost = state.stats.take_damage(strike.damage);
            let defender = state.creature_name();
            state
                .battle
                .push_log(format!("{} took {} damage.", defender, lost));
            sound(
                state,
                SoundCue::Impact {
                    critical: strike.critical,
                },
                &mut effects,
            );
            if state.stats.is_fainted() {
                state.battle.push_log(format!("{} fainted!", defender));
                effects.push(timer(PhaseTimer::GameOver, timers.game_over_ms));
            } else {
                state.battle.player_turn = true;
            }
        }
        PhaseTimer::Victory => {
            if state.phase != Phase::BossBattle || !state.boss.is_defeated() {
                return stale(fired);
            }
            enter_phase(state, Phase::Victory);
            state.message = Some("You defeated the boss!".to_string());
            if !state.score_saved {
                state.score_saved = true;
                effects.push(Effect::SaveScore {
                    path: state.leaderboard_path.clone(),
                    name: state.stats.name.clone(),
                    score: state.stats.score,
                    is_shiny: state.creature.is_some_and(|c| c.shiny),
                });
            }
        }
        PhaseTimer::GameOver => {
            if !state.stats.is_fainted()
                || state.phase.is_finished()
                || matches!(state.phase, Phase::Intro | Phase::Selection)
            {
                return stale(fired);
            }
            enter_phase(state, Phase::GameOver);
            state.message = Some("Your partner can't battle anymore.".to_string());
        }
        PhaseTimer::MoodReset(generation) => {
            if generation != state.mood_generation || state.mood == Mood::Neutral {
                return DispatchResult::unchanged();
            }
            state.mood = Mood::Neutral;
        }
    }
    finish(effects)
}

fn stale(fired: PhaseTimer) -> DispatchResult<Effect> {
    tracing::debug!(timer = ?fired, "ignoring stale timer");
    DispatchResult::unchanged()
}
