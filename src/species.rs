use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const FINAL_STAGE: u8 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Species {
    Charmander,
    Chimchar,
    Piplup,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageProfile {
    pub name: &'static str,
    pub max_hp: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeciesProfile {
    pub name: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
    /// Multiplier on outgoing move damage, floored.
    pub attack_modifier: f64,
    /// Multiplier on incoming damage, rounded up.
    pub damage_taken_modifier: f64,
    pub stages: [StageProfile; 3],
}

const CHARMANDER: SpeciesProfile = SpeciesProfile {
    name: "Charmander",
    kind: "Fire",
    description: "Attack +12%, defense -6%",
    attack_modifier: 1.12,
    damage_taken_modifier: 1.06,
    stages: [
        StageProfile {
            name: "Charmander",
            max_hp: 80,
        },
        StageProfile {
            name: "Charmeleon",
            max_hp: 100,
        },
        StageProfile {
            name: "Charizard",
            max_hp: 200,
        },
    ],
};

const CHIMCHAR: SpeciesProfile = SpeciesProfile {
    name: "Chimchar",
    kind: "Fire/Fighting",
    description: "Attack +18%, defense -10%",
    attack_modifier: 1.18,
    damage_taken_modifier: 1.10,
    stages: [
        StageProfile {
            name: "Chimchar",
            max_hp: 80,
        },
        StageProfile {
            name: "Monferno",
            max_hp: 100,
        },
        StageProfile {
            name: "Infernape",
            max_hp: 200,
        },
    ],
};

const PIPLUP: SpeciesProfile = SpeciesProfile {
    name: "Piplup",
    kind: "Water",
    description: "Attack +10%, defense -7%",
    attack_modifier: 1.10,
    damage_taken_modifier: 1.07,
    stages: [
        StageProfile {
            name: "Piplup",
            max_hp: 80,
        },
        StageProfile {
            name: "Prinplup",
            max_hp: 100,
        },
        StageProfile {
            name: "Empoleon",
            max_hp: 200,
        },
    ],
};

impl Species {
    pub const ALL: [Species; 3] = [Species::Charmander, Species::Chimchar, Species::Piplup];

    pub fn profile(self) -> &'static SpeciesProfile {
        match self {
            Species::Charmander => &CHARMANDER,
            Species::Chimchar => &CHIMCHAR,
            Species::Piplup => &PIPLUP,
        }
    }

    /// Stage lookup clamps to the final stage.
    pub fn stage(self, stage: u8) -> &'static StageProfile {
        let index = stage.min(FINAL_STAGE) as usize;
        &self.profile().stages[index]
    }

    pub fn from_index(index: usize) -> Option<Species> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|species| *species == self)
            .unwrap_or(0)
    }
}

pub const BOSS_NAME: &str = "Dialga";
pub const BOSS_MAX_HP: u32 = 610;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_hp_grows_with_evolution() {
        for species in Species::ALL {
            let hp: Vec<u32> = (0..=FINAL_STAGE)
                .map(|stage| species.stage(stage).max_hp)
                .collect();
            assert_eq!(hp, vec![80, 100, 200]);
        }
    }

    #[test]
    fn stage_lookup_clamps_past_final() {
        assert_eq!(Species::Piplup.stage(7).name, "Empoleon");
    }

    #[test]
    fn damage_taken_modifiers_stay_in_range() {
        for species in Species::ALL {
            let modifier = species.profile().damage_taken_modifier;
            assert!((1.06..=1.10).contains(&modifier), "{species:?}");
        }
    }

    #[test]
    fn index_round_trips_through_roster() {
        for (idx, species) in Species::ALL.iter().enumerate() {
            assert_eq!(species.index(), idx);
            assert_eq!(Species::from_index(idx), Some(*species));
        }
        assert_eq!(Species::from_index(3), None);
    }
}
