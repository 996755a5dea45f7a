use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::audio::SoundCue;

/// Delayed phase steps. Each fires back as `Action::TimerDidFire`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PhaseTimer {
    EvolutionEnd,
    BossAppear,
    BossTurn,
    BossStrike,
    Victory,
    GameOver,
    /// Carries the mood generation it was scheduled for.
    MoodReset(u32),
}

impl PhaseTimer {
    pub fn key(self) -> &'static str {
        match self {
            PhaseTimer::EvolutionEnd => "timer_evolution",
            PhaseTimer::BossAppear => "timer_boss_appear",
            PhaseTimer::BossTurn => "timer_boss_turn",
            PhaseTimer::BossStrike => "timer_boss_strike",
            PhaseTimer::Victory => "timer_victory",
            PhaseTimer::GameOver => "timer_game_over",
            PhaseTimer::MoodReset(_) => "timer_mood",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    StartTimer {
        timer: PhaseTimer,
        delay_ms: u64,
    },
    LoadLeaderboard {
        path: PathBuf,
    },
    SaveScore {
        path: PathBuf,
        name: String,
        score: f64,
        is_shiny: bool,
    },
    PlaySound(SoundCue),
    CopyShareLink {
        text: String,
    },
}
