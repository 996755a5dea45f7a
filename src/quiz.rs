use rand::seq::SliceRandom;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::rng::GameRng;

pub const QUESTIONS_PER_ROUND: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum NoteType {
    Whole,
    Half,
    Quarter,
    Eighth,
    DottedHalf,
    DottedQuarter,
}

impl NoteType {
    pub const ALL: [NoteType; 6] = [
        NoteType::Whole,
        NoteType::Half,
        NoteType::Quarter,
        NoteType::Eighth,
        NoteType::DottedHalf,
        NoteType::DottedQuarter,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            NoteType::Whole => "𝅝",
            NoteType::DottedHalf => "𝅗𝅥.",
            NoteType::Half => "𝅗𝅥",
            NoteType::DottedQuarter => "♩.",
            NoteType::Quarter => "♩",
            NoteType::Eighth => "♪",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            NoteType::Whole => "whole",
            NoteType::DottedHalf => "dotted half",
            NoteType::Half => "half",
            NoteType::DottedQuarter => "dotted quarter",
            NoteType::Quarter => "quarter",
            NoteType::Eighth => "eighth",
        }
    }

    /// Rhythm-pattern string in the pattern font (V = beat, / = half beat).
    pub fn rhythm_pattern(self) -> &'static str {
        match self {
            NoteType::Whole => "VVVV",
            NoteType::DottedHalf => "VVV",
            NoteType::Half => "VV",
            NoteType::DottedQuarter => "V/",
            NoteType::Quarter => "V",
            NoteType::Eighth => "/",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Answer {
    Note(NoteType),
    Pattern(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AnswerOption {
    pub label: String,
    pub value: Answer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<AnswerOption>,
    pub correct: Answer,
}

impl Question {
    pub fn is_correct(&self, answer: &Answer) -> bool {
        &self.correct == answer
    }

    pub fn option(&self, index: usize) -> Option<&AnswerOption> {
        self.options.get(index)
    }
}

fn note_option(note: NoteType) -> AnswerOption {
    AnswerOption {
        label: format!("{} {}", note.symbol(), note.label()),
        value: Answer::Note(note),
    }
}

fn equation(id: usize, prompt: String, options: [NoteType; 3], correct: NoteType) -> Question {
    Question {
        id: format!("r1_q{id}"),
        prompt,
        options: options.into_iter().map(note_option).collect(),
        correct: Answer::Note(correct),
    }
}

pub fn round1_questions() -> Vec<Question> {
    use NoteType::*;
    let s = |note: NoteType| note.symbol();
    vec![
        equation(
            1,
            format!("{} = {} + ?", s(Quarter), s(Eighth)),
            [Quarter, Eighth, Half],
            Eighth,
        ),
        equation(
            2,
            format!("{} = {} + ?", s(Half), s(Quarter)),
            [Eighth, Quarter, Whole],
            Quarter,
        ),
        equation(
            3,
            format!("{} = {} + ?", s(DottedHalf), s(Half)),
            [Quarter, Eighth, Half],
            Quarter,
        ),
        equation(
            4,
            format!("{} = {} + ?", s(Whole), s(Half)),
            [Half, Quarter, Whole],
            Half,
        ),
        equation(
            5,
            format!("{} + {} = ?", s(Quarter), s(Quarter)),
            [Whole, Half, Eighth],
            Half,
        ),
        equation(
            6,
            format!("{} + {} = ?", s(Eighth), s(Eighth)),
            [Quarter, Half, Eighth],
            Quarter,
        ),
        equation(
            7,
            format!("{} = {} + ?", s(DottedQuarter), s(Quarter)),
            [Quarter, Eighth, Half],
            Eighth,
        ),
        equation(
            8,
            format!("{} = ? + {}", s(Whole), s(Half)),
            [Half, Quarter, Whole],
            Half,
        ),
        equation(
            9,
            format!("{} + {} = ?", s(Half), s(Half)),
            [Whole, DottedHalf, Quarter],
            Whole,
        ),
        equation(
            10,
            format!("{} + {} + {} = ?", s(Quarter), s(Eighth), s(Eighth)),
            [Whole, Half, Quarter],
            Half,
        ),
    ]
}

pub const ROUND2_SEQUENCE: [NoteType; QUESTIONS_PER_ROUND] = [
    NoteType::Whole,
    NoteType::Half,
    NoteType::Quarter,
    NoteType::Eighth,
    NoteType::DottedHalf,
    NoteType::DottedQuarter,
    NoteType::Whole,
    NoteType::Quarter,
    NoteType::Eighth,
    NoteType::Half,
];

pub fn round2_questions(rng: &mut GameRng) -> Vec<Question> {
    ROUND2_SEQUENCE
        .iter()
        .enumerate()
        .map(|(index, note)| {
            let correct = note.rhythm_pattern();
            let mut distractors: Vec<&'static str> = NoteType::ALL
                .iter()
                .map(|other| other.rhythm_pattern())
                .filter(|pattern| *pattern != correct)
                .collect();
            distractors.shuffle(rng);
            distractors.truncate(2);

            let mut patterns = vec![correct];
            patterns.extend(distractors);
            patterns.shuffle(rng);

            Question {
                id: format!("r2_q{index}"),
                prompt: format!(
                    "Pick the rhythm pattern for this note: {} ({})",
                    note.symbol(),
                    note.label()
                ),
                options: patterns
                    .into_iter()
                    .map(|pattern| AnswerOption {
                        label: pattern.to_string(),
                        value: Answer::Pattern(pattern.to_string()),
                    })
                    .collect(),
                correct: Answer::Pattern(correct.to_string()),
            }
        })
        .collect()
}

/// Points for a correct answer given the streak before it.
pub fn streak_points(streak: u32, base_points: f64, streak_rate: f64) -> f64 {
    if streak == 0 {
        return base_points;
    }
    base_points * streak_rate.powi(streak as i32)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissHit {
    pub base: u32,
    pub message: Option<&'static str>,
    pub critical: bool,
}

pub fn roll_miss(rng: &mut GameRng) -> MissHit {
    let roll: f64 = rng.gen();
    if roll < 0.333 {
        MissHit {
            base: 35,
            message: Some("It's not very effective..."),
            critical: false,
        }
    } else if roll < 0.666 {
        MissHit {
            base: 40,
            message: None,
            critical: false,
        }
    } else {
        MissHit {
            base: 45,
            message: Some("A critical hit!"),
            critical: true,
        }
    }
}

pub fn scaled_damage(base: u32, damage_taken_modifier: f64) -> u32 {
    (base as f64 * damage_taken_modifier).ceil() as u32
}
