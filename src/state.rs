use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::battle::{BossStrike, MoveUsage};
use crate::config::GameConfig;
use crate::leaderboard::{LeaderboardEntry, LEADERBOARD_FILE};
use crate::quiz::Question;
use crate::rng::{create_rng, seed_from_time, GameRng};
use crate::species::{Species, BOSS_MAX_HP};

pub const BATTLE_LOG_CAP: usize = 6;
pub const NAME_MAX_LEN: usize = 16;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Phase {
    #[default]
    Intro,
    Selection,
    Round1,
    Evolution,
    Round2,
    PreBoss,
    BossBattle,
    GameOver,
    Victory,
}

impl Phase {
    pub fn is_quiz(self) -> bool {
        matches!(self, Phase::Round1 | Phase::Round2)
    }

    /// Berries can be bought and used in these phases.
    pub fn shop_open(self) -> bool {
        matches!(
            self,
            Phase::Round1 | Phase::Round2 | Phase::PreBoss | Phase::BossBattle
        )
    }

    pub fn is_finished(self) -> bool {
        matches!(self, Phase::GameOver | Phase::Victory)
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Intro => "Intro",
            Phase::Selection => "Selection",
            Phase::Round1 => "Round 1",
            Phase::Evolution => "Evolution",
            Phase::Round2 => "Round 2",
            Phase::PreBoss => "Boss approaching",
            Phase::BossBattle => "Boss battle",
            Phase::GameOver => "Game over",
            Phase::Victory => "Victory",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlayerStats {
    pub hp: u32,
    pub max_hp: u32,
    pub score: f64,
    pub streak: u32,
    pub berries: u32,
    pub name: String,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            hp: 80,
            max_hp: 80,
            score: 0.0,
            streak: 0,
            berries: 0,
            name: String::new(),
        }
    }
}

impl PlayerStats {
    /// Returns the hp actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Returns the hp actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += restored;
        restored
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn reset_hp(&mut self, max_hp: u32) {
        self.max_hp = max_hp;
        self.hp = max_hp;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Creature {
    pub species: Species,
    pub stage: u8,
    pub shiny: bool,
}

impl Creature {
    pub fn new(species: Species) -> Self {
        Self {
            species,
            stage: 0,
            shiny: false,
        }
    }

    pub fn stage_name(&self) -> &'static str {
        self.species.stage(self.stage).name
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Boss {
    pub hp: u32,
    pub max_hp: u32,
}

impl Default for Boss {
    fn default() -> Self {
        Self {
            hp: BOSS_MAX_HP,
            max_hp: BOSS_MAX_HP,
        }
    }
}

impl Boss {
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuizState {
    pub round: u8,
    pub questions: Vec<Question>,
    pub index: usize,
    pub selected: usize,
}

impl QuizState {
    pub fn new(round: u8, questions: Vec<Question>) -> Self {
        Self {
            round,
            questions,
            index: 0,
            selected: 0,
        }
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BattleState {
    pub player_turn: bool,
    pub usage: MoveUsage,
    pub log: Vec<String>,
    pub selected: usize,
    pub pending_strike: Option<BossStrike>,
}

impl Default for BattleState {
    fn default() -> Self {
        Self {
            player_turn: true,
            usage: MoveUsage::default(),
            log: Vec::new(),
            selected: 0,
            pending_strike: None,
        }
    }
}

impl BattleState {
    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > BATTLE_LOG_CAP {
            let overflow = self.log.len() - BATTLE_LOG_CAP;
            self.log.drain(..overflow);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Mood {
    #[default]
    Neutral,
    Happy,
    Sad,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct AppState {
    pub terminal_size: (u16, u16),
    pub phase: Phase,
    pub name_input: String,
    pub selection_index: usize,
    pub stats: PlayerStats,
    pub creature: Option<Creature>,
    pub boss: Boss,
    pub quiz: QuizState,
    pub battle: BattleState,
    pub evolution_message: Option<String>,
    pub mood: Mood,
    pub mood_generation: u32,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub leaderboard_path: PathBuf,
    pub config: GameConfig,
    pub message: Option<String>,
    pub muted: bool,
    pub score_saved: bool,
    pub tick: u64,
    #[schemars(skip)]
    pub rng: GameRng,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_seed(GameConfig::default(), PathBuf::from(LEADERBOARD_FILE), 0)
    }
}

impl AppState {
    pub fn new(config: GameConfig, leaderboard_path: PathBuf) -> Self {
        Self::with_seed(config, leaderboard_path, seed_from_time())
    }

    pub fn with_seed(config: GameConfig, leaderboard_path: PathBuf, seed: u64) -> Self {
        Self {
            terminal_size: (0, 0),
            phase: Phase::Intro,
            name_input: String::new(),
            selection_index: 0,
            stats: PlayerStats::default(),
            creature: None,
            boss: Boss::default(),
            quiz: QuizState::default(),
            battle: BattleState::default(),
            evolution_message: None,
            mood: Mood::Neutral,
            mood_generation: 0,
            leaderboard: Vec::new(),
            leaderboard_path,
            config,
            message: None,
            muted: false,
            score_saved: false,
            tick: 0,
            rng: create_rng(seed),
        }
    }

    /// Fresh run that keeps the session settings and the loaded leaderboard.
    pub fn restarted(&self) -> Self {
        Self {
            terminal_size: self.terminal_size,
            mood_generation: self.mood_generation,
            leaderboard: self.leaderboard.clone(),
            leaderboard_path: self.leaderboard_path.clone(),
            config: self.config.clone(),
            muted: self.muted,
            rng: self.rng.clone(),
            ..Self::with_seed(GameConfig::default(), PathBuf::new(), 0)
        }
    }

    pub fn creature_name(&self) -> &'static str {
        self.creature
            .map(|creature| creature.stage_name())
            .unwrap_or("???")
    }

    pub fn species(&self) -> Species {
        self.creature
            .map(|creature| creature.species)
            .unwrap_or(Species::Charmander)
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        let mut sections = vec![
            DebugSection::new("Game")
                .entry("phase", ron_string(&self.phase))
                .entry("message", ron_string(&self.message))
                .entry("muted", ron_string(&self.muted)),
            DebugSection::new("Player")
                .entry("name", ron_string(&self.stats.name))
                .entry("hp", ron_string(&(self.stats.hp, self.stats.max_hp)))
                .entry("score", ron_string(&self.stats.score))
                .entry("streak", ron_string(&self.stats.streak))
                .entry("berries", ron_string(&self.stats.berries)),
        ];

        if let Some(creature) = &self.creature {
            sections.push(
                DebugSection::new("Creature")
                    .entry("species", ron_string(&creature.species))
                    .entry("stage", ron_string(&creature.stage))
                    .entry("shiny", ron_string(&creature.shiny))
                    .entry("mood", ron_string(&self.mood)),
            );
        }

        if self.phase.is_quiz() {
            sections.push(
                DebugSection::new("Quiz")
                    .entry("round", ron_string(&self.quiz.round))
                    .entry("index", ron_string(&self.quiz.index))
                    .entry("selected", ron_string(&self.quiz.selected)),
            );
        }

        if self.phase == Phase::BossBattle {
            sections.push(
                DebugSection::new("Battle")
                    .entry("boss_hp", ron_string(&self.boss.hp))
                    .entry("player_turn", ron_string(&self.battle.player_turn))
                    .entry("usage", ron_string(&self.battle.usage))
                    .entry("pending", ron_string(&self.battle.pending_strike)),
            );
        }

        sections.push(
            DebugSection::new("Leaderboard")
                .entry("entries", ron_string(&self.leaderboard.len()))
                .entry("path", ron_string(&self.leaderboard_path)),
        );

        sections
    }
}
