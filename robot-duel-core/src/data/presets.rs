//! Named stat presets, keyed by normalized id.

use crate::sim::robot::RobotStats;
use phf::phf_map;

#[derive(Clone, Copy, Debug)]
pub struct PresetInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub stats: RobotStats,
}

pub static PRESETS: phf::Map<&'static str, PresetInfo> = phf_map! {
    "default" => PresetInfo {
        name: "Default",
        description: "Balanced frame",
        stats: RobotStats { hp: 100, attack: 20, defense: 5, speed: 10 },
    },
    "steelwarrior" => PresetInfo {
        name: "Steel Warrior",
        description: "Heavy plating, steady output",
        stats: RobotStats { hp: 120, attack: 25, defense: 8, speed: 12 },
    },
    "lightningraider" => PresetInfo {
        name: "Lightning Raider",
        description: "Fast striker with thin armor",
        stats: RobotStats { hp: 100, attack: 30, defense: 5, speed: 15 },
    },
    "bulwark" => PresetInfo {
        name: "Bulwark",
        description: "Slow wall that outlasts",
        stats: RobotStats { hp: 150, attack: 15, defense: 12, speed: 6 },
    },
    "glasscannon" => PresetInfo {
        name: "Glass Cannon",
        description: "Hits hard, folds fast",
        stats: RobotStats { hp: 70, attack: 35, defense: 2, speed: 18 },
    },
};

pub fn normalize_id(name: &str) -> String {
    name.to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Presets sorted by id, for listings.
pub fn sorted_presets() -> Vec<(&'static str, &'static PresetInfo)> {
    let mut entries: Vec<_> = PRESETS.entries().map(|(id, info)| (*id, info)).collect();
    entries.sort_by_key(|(id, _)| *id);
    entries
}
