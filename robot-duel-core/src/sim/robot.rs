use crate::data::presets::{normalize_id, PRESETS};
use crate::sim::skill::{Skill, SKILL_BOOK};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Energy ceiling shared by every robot.
pub const MAX_ENERGY: u32 = 100;

/// Base combat stats. Fixed once a [`Robot`] is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RobotStats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
}

impl Default for RobotStats {
    fn default() -> Self {
        Self {
            hp: 100,
            attack: 20,
            defense: 5,
            speed: 10,
        }
    }
}

impl RobotStats {
    /// Looks up a named preset. Names ignore case and punctuation.
    pub fn preset(name: &str) -> Result<Self> {
        let id = normalize_id(name);
        PRESETS
            .get(id.as_str())
            .map(|preset| preset.stats)
            .ok_or_else(|| anyhow!("Preset '{}' not found", name))
    }

    pub fn with_overrides(self, overrides: StatOverrides) -> Self {
        Self {
            hp: overrides.hp.unwrap_or(self.hp),
            attack: overrides.attack.unwrap_or(self.attack),
            defense: overrides.defense.unwrap_or(self.defense),
            speed: overrides.speed.unwrap_or(self.speed),
        }
    }
}

/// Per-field stat overrides. Unset fields keep the base value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StatOverrides {
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub attack: Option<u32>,
    #[serde(default)]
    pub defense: Option<u32>,
    #[serde(default)]
    pub speed: Option<u32>,
}

/// Placeholder for lasting effects. No variant exists yet, so a robot's
/// effect list is always empty.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum StatusEffect {}

#[derive(Clone, Debug)]
pub struct Robot {
    name: String,
    owner_id: String,
    max_hp: u32,
    attack: u32,
    defense: u32,
    speed: u32,
    current_hp: u32,
    energy: u32,
    defending: bool,
    status_effects: Vec<StatusEffect>,
}

impl Robot {
    pub fn new(name: impl Into<String>, owner_id: impl Into<String>, stats: RobotStats) -> Self {
        Self {
            name: name.into(),
            owner_id: owner_id.into(),
            max_hp: stats.hp,
            attack: stats.attack,
            defense: stats.defense,
            speed: stats.speed,
            current_hp: stats.hp,
            energy: 0,
            defending: false,
            status_effects: Vec::new(),
        }
    }

    /// Builds a robot from the default stats with optional per-field overrides.
    pub fn with_overrides(
        name: impl Into<String>,
        owner_id: impl Into<String>,
        overrides: StatOverrides,
    ) -> Self {
        Self::new(name, owner_id, RobotStats::default().with_overrides(overrides))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    /// Base stats the robot was built from.
    pub fn stats(&self) -> RobotStats {
        RobotStats {
            hp: self.max_hp,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
        }
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn is_defending(&self) -> bool {
        self.defending
    }

    pub fn status_effects(&self) -> &[StatusEffect] {
        &self.status_effects
    }

    pub fn skills(&self) -> &'static [Skill] {
        &SKILL_BOOK
    }

    pub fn skill(&self, index: usize) -> Option<&'static Skill> {
        SKILL_BOOK.get(index)
    }

    pub fn is_alive(&self) -> bool {
        self.current_hp > 0
    }

    /// Applies an incoming hit and returns the damage dealt.
    ///
    /// A defending robot halves the raw amount first (floor, minimum 1), then
    /// defense is subtracted. Every hit deals at least 1.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let incoming = if self.defending {
            (amount / 2).max(1)
        } else {
            amount
        };
        let dealt = incoming.saturating_sub(self.defense).max(1);
        self.current_hp = self.current_hp.saturating_sub(dealt);
        dealt
    }

    /// Restores hp up to `max_hp` and returns the amount actually restored.
    /// A robot at 0 hp stays down.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.current_hp;
        self.current_hp = self.current_hp.saturating_add(amount).min(self.max_hp);
        self.current_hp - before
    }

    pub fn gain_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_add(amount).min(MAX_ENERGY);
    }

    /// Spends `amount` energy if the robot has it. Never spends partially.
    pub fn use_energy(&mut self, amount: u32) -> bool {
        if self.energy < amount {
            return false;
        }
        self.energy -= amount;
        true
    }

    pub fn can_afford(&self, skill: &Skill) -> bool {
        self.energy >= skill.cost
    }

    pub fn set_defending(&mut self, defending: bool) {
        self.defending = defending;
    }

    pub fn status(&self) -> RobotStatus {
        RobotStatus {
            name: self.name.clone(),
            owner_id: self.owner_id.clone(),
            hp: self.current_hp,
            max_hp: self.max_hp,
            energy: self.energy,
            max_energy: MAX_ENERGY,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
            is_defending: self.defending,
            is_alive: self.is_alive(),
        }
    }
}

/// Read-only projection of a robot for observers.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RobotStatus {
    pub name: String,
    pub owner_id: String,
    pub hp: u32,
    pub max_hp: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub is_defending: bool,
    pub is_alive: bool,
}
