pub mod action;
pub mod ai;
pub mod robot;
pub mod roll;
pub mod skill;

pub use action::{Action, ActionKind, ActionResult};
pub use ai::{BattleAI, RandomAI};
pub use robot::{Robot, RobotStats, RobotStatus, StatOverrides, StatusEffect, MAX_ENERGY};
pub use roll::{DamageRoll, FixedRoll};
pub use skill::{Skill, SkillEffect, SKILL_BOOK, SKILL_COUNT};
