use serde::Serialize;

pub const SKILL_COUNT: usize = 3;

/// One payload of a skill. A skill may carry several of these.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkillEffect {
    /// Hits the opponent for `attack * percent / 100`, floored.
    Damage { percent: u32 },
    /// Restores hp to the user.
    Heal { amount: u32 },
    /// Grants energy to the user.
    EnergyGain { amount: u32 },
}

impl SkillEffect {
    /// Resolution order within a single skill use.
    fn phase(&self) -> u8 {
        match self {
            SkillEffect::Damage { .. } => 0,
            SkillEffect::Heal { .. } => 1,
            SkillEffect::EnergyGain { .. } => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Skill {
    pub name: &'static str,
    pub cost: u32,
    pub description: &'static str,
    pub effects: &'static [SkillEffect],
}

impl Skill {
    /// Effects in resolution order: damage, then heal, then energy.
    pub fn ordered_effects(&self) -> Vec<SkillEffect> {
        let mut effects = self.effects.to_vec();
        effects.sort_by_key(SkillEffect::phase);
        effects
    }

    pub fn damage_percent(&self) -> Option<u32> {
        self.effects.iter().find_map(|effect| match effect {
            SkillEffect::Damage { percent } => Some(*percent),
            _ => None,
        })
    }
}

/// Raw damage for a multiplier stored as a percentage.
pub fn scaled_damage(attack: u32, percent: u32) -> u32 {
    let raw = u64::from(attack) * u64::from(percent) / 100;
    u32::try_from(raw).unwrap_or(u32::MAX)
}

/// The skill list every robot carries.
pub const SKILL_BOOK: [Skill; SKILL_COUNT] = [
    Skill {
        name: "Heavy Strike",
        cost: 30,
        description: "Deals 1.5x attack damage",
        effects: &[SkillEffect::Damage { percent: 150 }],
    },
    Skill {
        name: "Repair",
        cost: 40,
        description: "Restores 30 hp",
        effects: &[SkillEffect::Heal { amount: 30 }],
    },
    Skill {
        name: "Charged Strike",
        cost: 50,
        description: "Deals 2x attack damage and refunds 20 energy",
        effects: &[
            SkillEffect::EnergyGain { amount: 20 },
            SkillEffect::Damage { percent: 200 },
        ],
    },
];
