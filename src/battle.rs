use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::quiz::scaled_damage;
use crate::rng::GameRng;
use crate::species::Species;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum MoveId {
    FireSpin,
    DragonBreath,
    BlastBurn,
    DragonClaw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    Normal,
    Special,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerMove {
    pub id: MoveId,
    pub name: &'static str,
    pub damage: u32,
    pub kind: MoveKind,
    /// `None` means unlimited.
    pub max_uses: Option<u8>,
}

pub const PLAYER_MOVES: [PlayerMove; 4] = [
    PlayerMove {
        id: MoveId::FireSpin,
        name: "Fire Spin",
        damage: 25,
        kind: MoveKind::Normal,
        max_uses: None,
    },
    PlayerMove {
        id: MoveId::DragonBreath,
        name: "Dragon Breath",
        damage: 47,
        kind: MoveKind::Special,
        max_uses: None,
    },
    PlayerMove {
        id: MoveId::BlastBurn,
        name: "Blast Burn",
        damage: 63,
        kind: MoveKind::Special,
        max_uses: Some(3),
    },
    PlayerMove {
        id: MoveId::DragonClaw,
        name: "Dragon Claw",
        damage: 82,
        kind: MoveKind::Normal,
        max_uses: Some(3),
    },
];

impl MoveId {
    pub fn info(self) -> &'static PlayerMove {
        match self {
            MoveId::FireSpin => &PLAYER_MOVES[0],
            MoveId::DragonBreath => &PLAYER_MOVES[1],
            MoveId::BlastBurn => &PLAYER_MOVES[2],
            MoveId::DragonClaw => &PLAYER_MOVES[3],
        }
    }

    pub fn from_index(index: usize) -> Option<MoveId> {
        PLAYER_MOVES.get(index).map(|mv| mv.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossMove {
    pub name: &'static str,
    pub damage: u32,
    pub weight: u32,
}

pub const BOSS_MOVES: [BossMove; 4] = [
    BossMove {
        name: "Dragon Breath",
        damage: 10,
        weight: 10,
    },
    BossMove {
        name: "Metal Claw",
        damage: 20,
        weight: 20,
    },
    BossMove {
        name: "Draco Meteor",
        damage: 30,
        weight: 30,
    },
    BossMove {
        name: "Iron Head",
        damage: 40,
        weight: 40,
    },
];

/// Uses spent per move during the boss fight.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MoveUsage {
    uses: [u8; 4],
}

impl MoveUsage {
    fn slot(id: MoveId) -> usize {
        PLAYER_MOVES
            .iter()
            .position(|mv| mv.id == id)
            .unwrap_or(0)
    }

    pub fn used(&self, id: MoveId) -> u8 {
        self.uses[Self::slot(id)]
    }

    /// Remaining uses, `None` for unlimited moves.
    pub fn remaining(&self, id: MoveId) -> Option<u8> {
        id.info()
            .max_uses
            .map(|max| max.saturating_sub(self.used(id)))
    }

    pub fn can_use(&self, id: MoveId) -> bool {
        self.remaining(id) != Some(0)
    }

    pub fn record(&mut self, id: MoveId) {
        let slot = Self::slot(id);
        self.uses[slot] = self.uses[slot].saturating_add(1);
    }
}

pub fn player_damage(id: MoveId, species: Species) -> u32 {
    (id.info().damage as f64 * species.profile().attack_modifier).floor() as u32
}

pub fn roll_boss_move(rng: &mut GameRng) -> usize {
    let dist = match WeightedIndex::new(BOSS_MOVES.iter().map(|mv| mv.weight)) {
        Ok(dist) => dist,
        Err(_) => return BOSS_MOVES.len() - 1,
    };
    dist.sample(rng)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BossStrike {
    pub move_index: usize,
    pub critical: bool,
    pub damage: u32,
}

impl BossStrike {
    pub fn boss_move(&self) -> &'static BossMove {
        &BOSS_MOVES[self.move_index.min(BOSS_MOVES.len() - 1)]
    }
}

pub fn boss_strike_damage(base: u32, critical: bool, crit_multiplier: f64, species: Species) -> u32 {
    let raw = if critical {
        (base as f64 * crit_multiplier).floor() as u32
    } else {
        base
    };
    scaled_damage(raw, species.profile().damage_taken_modifier)
}

pub fn roll_boss_strike(rng: &mut GameRng, config: &GameConfig, species: Species) -> BossStrike {
    let move_index = roll_boss_move(rng);
    let critical = rng.gen::<f64>() < config.boss_crit_chance;
    let damage = boss_strike_damage(
        BOSS_MOVES[move_index].damage,
        critical,
        config.boss_crit_multiplier,
        species,
    );
    BossStrike {
        move_index,
        critical,
        damage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn capped_moves_run_out_after_three_uses() {
        let mut usage = MoveUsage::default();
        for _ in 0..3 {
            assert!(usage.can_use(MoveId::BlastBurn));
            usage.record(MoveId::BlastBurn);
        }
        assert!(!usage.can_use(MoveId::BlastBurn));
        assert_eq!(usage.remaining(MoveId::BlastBurn), Some(0));
        assert_eq!(usage.remaining(MoveId::DragonClaw), Some(3));
    }

    #[test]
    fn unlimited_moves_never_run_out() {
        let mut usage = MoveUsage::default();
        for _ in 0..300 {
            usage.record(MoveId::FireSpin);
        }
        assert!(usage.can_use(MoveId::FireSpin));
        assert_eq!(usage.remaining(MoveId::FireSpin), None);
    }

    #[test]
    fn player_damage_is_floored() {
        // 25 * 1.12 = 28.0, 82 * 1.18 = 96.76, 47 * 1.10 = 51.7
        assert_eq!(player_damage(MoveId::FireSpin, Species::Charmander), 28);
        assert_eq!(player_damage(MoveId::DragonClaw, Species::Chimchar), 96);
        assert_eq!(player_damage(MoveId::DragonBreath, Species::Piplup), 51);
    }

    #[test]
    fn boss_critical_multiplies_then_scales() {
        // floor(30 * 1.5) = 45, ceil(45 * 1.06) = 48
        assert_eq!(boss_strike_damage(30, true, 1.5, Species::Charmander), 48);
        // ceil(10 * 1.07) = 11
        assert_eq!(boss_strike_damage(10, false, 1.5, Species::Piplup), 11);
    }

    #[test]
    fn boss_move_frequencies_follow_weights() {
        let mut rng = create_rng(2024);
        let samples = 40_000;
        let mut counts = [0u32; 4];
        for _ in 0..samples {
            counts[roll_boss_move(&mut rng)] += 1;
        }
        for (count, expected) in counts.iter().zip([0.1, 0.2, 0.3, 0.4]) {
            let freq = *count as f64 / samples as f64;
            assert!((freq - expected).abs() < 0.015, "freq {freq} vs {expected}");
        }
    }

    #[test]
    fn boss_crit_rate_tracks_config() {
        let mut rng = create_rng(77);
        let config = GameConfig::default();
        let samples = 20_000;
        let crits = (0..samples)
            .filter(|_| roll_boss_strike(&mut rng, &config, Species::Piplup).critical)
            .count();
        let rate = crits as f64 / samples as f64;
        assert!((rate - 0.3).abs() < 0.02, "crit rate {rate}");
    }
}
