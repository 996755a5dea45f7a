use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventOutcome, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use rhythmon::action::Action;
use rhythmon::config::{load_config, GameConfig};
use rhythmon::effect::Effect;
use rhythmon::leaderboard;
use rhythmon::reducer::reducer;
use rhythmon::state::AppState;
use rhythmon::{audio, logging, share, ui};

#[derive(Parser, Debug)]
#[command(name = "rhythmon")]
#[command(about = "Rhythm quiz TUI with an evolving partner and a boss battle")]
struct Args {
    /// Prefill the trainer name on the intro screen
    #[arg(long)]
    name: Option<String>,

    /// Seed for quiz shuffles, damage rolls and boss moves
    #[arg(long)]
    seed: Option<u64>,

    /// RON file overriding game balance values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the leaderboard and log file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Start with sound off
    #[arg(long)]
    mute: bool,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        name,
        seed,
        config,
        data_dir,
        mute,
        debug: debug_args,
    } = Args::parse();

    let data_dir = data_dir.unwrap_or_else(default_data_dir);
    let config = match config {
        Some(path) => match load_config(&path).await {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return Err(io::Error::new(io::ErrorKind::InvalidData, e));
            }
        },
        None => GameConfig::default(),
    };
    let _log_guard = logging::init(&data_dir);

    let debug = DebugSession::new(debug_args);
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let leaderboard_path = leaderboard::leaderboard_path(&data_dir);
    let state = debug
        .load_state_or_else_async(move || async move {
            let mut state = match seed {
                Some(seed) => AppState::with_seed(config, leaderboard_path, seed),
                None => AppState::new(config, leaderboard_path),
            };
            state.name_input = name.unwrap_or_default();
            state.muted = mute;
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    tracing::info!("rhythmon exited");
    Ok(())
}

fn default_data_dir() -> PathBuf {
    let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("rhythmon")
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    debug
        .run_effect_app(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(120), || Action::Tick);
            },
            |frame, area, state, render_ctx: RenderContext| {
                ui::render(frame, area, state, render_ctx);
            },
            |event, state| -> EventOutcome<Action> { ui::handle_event(event, state) },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::StartTimer { timer, delay_ms } => {
            tracing::debug!(?timer, delay_ms, "timer scheduled");
            ctx.tasks().spawn(TaskKey::new(timer.key()), async move {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Action::TimerDidFire(timer)
            });
        }
        Effect::LoadLeaderboard { path } => {
            ctx.tasks()
                .spawn(TaskKey::new("load_leaderboard"), async move {
                    load_leaderboard(&path).await
                });
        }
        Effect::SaveScore {
            path,
            name,
            score,
            is_shiny,
        } => {
            let entry = leaderboard::new_entry(&name, score, is_shiny);
            ctx.tasks().spawn(TaskKey::new("save_score"), async move {
                match leaderboard::save_score(&path, entry.clone()).await {
                    Ok(entries) => {
                        tracing::info!(score, path = ?path, "score saved");
                        Action::ScoreDidSave(entries)
                    }
                    Err(error) => {
                        tracing::error!(%error, "failed to save score");
                        Action::ScoreSaveError {
                            entry,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::PlaySound(cue) => audio::play(cue),
        Effect::CopyShareLink { text } => {
            let action = match share::copy_to_clipboard(&mut io::stdout(), &text) {
                Ok(()) => {
                    tracing::info!("share text copied");
                    Action::ShareDidCopy
                }
                Err(error) => {
                    tracing::warn!(%error, "clipboard copy failed");
                    Action::ShareDidError(error.to_string())
                }
            };
            ctx.tasks()
                .spawn(TaskKey::new("share"), async move { action });
        }
    }
}

async fn load_leaderboard(path: &Path) -> Action {
    match leaderboard::load(path).await {
        Ok(entries) => {
            tracing::info!(count = entries.len(), "leaderboard loaded");
            Action::LeaderboardDidLoad(entries)
        }
        Err(error) => Action::LeaderboardDidError(error.to_string()),
    }
}
