use serde::Serialize;
use serde_json::json;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LogEntry {
    pub round: u32,
    pub timestamp: SystemTime,
    pub message: String,
}

impl LogEntry {
    pub fn unix_millis(&self) -> u64 {
        self.timestamp
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

/// Append-only battle narrative. Every line is mirrored to `tracing`.
#[derive(Clone, Debug, Default)]
pub struct BattleLog {
    entries: Vec<LogEntry>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, round: u32, message: impl Into<String>) -> String {
        let message = message.into();
        tracing::info!(round, "{message}");
        self.entries.push(LogEntry {
            round,
            timestamp: SystemTime::now(),
            message: message.clone(),
        });
        message
    }

    pub fn log_start(&mut self, round: u32) {
        self.push(round, "Battle start!");
    }

    pub fn log_matchup(&mut self, round: u32, a: &str, b: &str) {
        self.push(round, format!("{a} VS {b}"));
    }

    pub fn log_attack(&mut self, round: u32, attacker: &str, target: &str, damage: u32) -> String {
        self.push(round, format!("{attacker} attacks {target} for {damage} damage"))
    }

    pub fn log_defend(&mut self, round: u32, robot: &str) -> String {
        self.push(round, format!("{robot} takes a defensive stance"))
    }

    pub fn log_charge(&mut self, round: u32, robot: &str, energy: u32) -> String {
        self.push(round, format!("{robot} charges up, gaining {energy} energy"))
    }

    pub fn log_skill_damage(
        &mut self,
        round: u32,
        robot: &str,
        skill: &str,
        target: &str,
        damage: u32,
    ) -> String {
        self.push(
            round,
            format!("{robot} uses {skill} on {target} for {damage} damage"),
        )
    }

    pub fn log_skill_heal(&mut self, round: u32, robot: &str, skill: &str, healed: u32) -> String {
        self.push(round, format!("{robot} uses {skill} and restores {healed} hp"))
    }

    pub fn log_skill_energy(&mut self, round: u32, robot: &str, skill: &str, energy: u32) -> String {
        self.push(round, format!("{robot} uses {skill} and gains {energy} energy"))
    }

    pub fn log_skill_failed(&mut self, round: u32, robot: &str, skill: &str) -> String {
        self.push(round, format!("{robot} lacks the energy to use {skill}"))
    }

    pub fn log_win(&mut self, round: u32, winner: &str) {
        self.push(round, format!("{winner} wins!"));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let log: Vec<_> = self
            .entries
            .iter()
            .map(|entry| {
                json!({
                    "round": entry.round,
                    "timestamp_ms": entry.unix_millis(),
                    "message": entry.message,
                })
            })
            .collect();
        json!({ "log": log })
    }
}
