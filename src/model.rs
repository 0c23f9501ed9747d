use robot_duel_core::sim::{Robot, RobotStats, StatOverrides};
use serde::Deserialize;
use std::collections::HashMap;

/// One roster entry. Stat fields override the named preset, or the
/// default stats when no preset is given.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotConfig {
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub attack: Option<u32>,
    #[serde(default)]
    pub defense: Option<u32>,
    #[serde(default)]
    pub speed: Option<u32>,
}

impl RobotConfig {
    pub fn stats(&self) -> anyhow::Result<RobotStats> {
        let base = match &self.preset {
            Some(preset) => RobotStats::preset(preset)?,
            None => RobotStats::default(),
        };
        Ok(base.with_overrides(StatOverrides {
            hp: self.hp,
            attack: self.attack,
            defense: self.defense,
            speed: self.speed,
        }))
    }

    /// Builds a fresh robot. `owner_fallback` is used when the entry names no owner.
    pub fn build(&self, owner_fallback: &str) -> anyhow::Result<Robot> {
        let owner = self.owner_id.as_deref().unwrap_or(owner_fallback);
        Ok(Robot::new(self.name.clone(), owner, self.stats()?))
    }
}

#[derive(Debug, Deserialize)]
pub struct RosterFile {
    pub robots: Vec<RobotConfig>,
    #[serde(flatten, default)]
    pub extras: HashMap<String, serde_json::Value>,
}

impl RosterFile {
    pub fn names(&self) -> Vec<&str> {
        self.robots.iter().map(|robot| robot.name.as_str()).collect()
    }
}
