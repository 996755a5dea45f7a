//! Rhythmon - a note-duration quiz with an evolving partner and a boss fight.
//!
//! The binary wires these modules into a tui-dispatch effect store; the
//! library exposes them for tests.

pub mod action;
pub mod audio;
pub mod battle;
pub mod config;
pub mod effect;
pub mod leaderboard;
pub mod logging;
pub mod quiz;
pub mod reducer;
pub mod rng;
pub mod share;
pub mod species;
pub mod state;
pub mod ui;
