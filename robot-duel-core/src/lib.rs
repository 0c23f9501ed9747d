//! Rules engine for two-robot, round-based duels.
//!
//! The main entry point is [`engine::BattleEngine`]: build two [`sim::Robot`]s,
//! start the battle, submit one action per owner and resolve the round.

pub mod battle_logger;
pub mod data;
pub mod engine;
pub mod error;
pub mod sim;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::battle_logger::{BattleLog, LogEntry};
    pub use crate::engine::{
        BattleEngine, BattleStatus, EngineOptions, RoundOutcome, Seat, StatusSnapshot, TieBreak,
    };
    pub use crate::error::{EngineError, ProcessError, StartError, SubmitError};
    pub use crate::sim::{
        Action, ActionKind, ActionResult, BattleAI, DamageRoll, FixedRoll, RandomAI, Robot,
        RobotStats, RobotStatus, Skill, SkillEffect, StatOverrides,
    };
}
