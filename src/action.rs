use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::effect::PhaseTimer;
use crate::leaderboard::LeaderboardEntry;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    Init,
    UiTerminalResize(u16, u16),
    Tick,

    // Intro
    NameInput(char),
    NameBackspace,
    StartGame,

    // Partner selection
    SpeciesSelect(usize),
    SpeciesConfirm,

    // Quiz rounds
    QuizSelect(usize),
    QuizAnswer(usize),

    // Boss battle
    MoveSelect(usize),
    BossAttack(usize),

    // Shop
    ShopBuyBerry,
    ShopUseBerry,

    TimerDidFire(PhaseTimer),

    // Leaderboard
    LeaderboardDidLoad(Vec<LeaderboardEntry>),
    LeaderboardDidError(String),
    ScoreDidSave(Vec<LeaderboardEntry>),
    ScoreSaveError {
        entry: LeaderboardEntry,
        error: String,
    },

    // Share
    Share,
    ShareDidCopy,
    ShareDidError(String),

    ToggleMute,
    Restart,
    Quit,
}
