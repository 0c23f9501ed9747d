use crate::error::{ParseError, SubmitError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Attack,
    Defend,
    Skill,
    Charge,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Attack => "attack",
            ActionKind::Defend => "defend",
            ActionKind::Skill => "skill",
            ActionKind::Charge => "charge",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attack" => Ok(ActionKind::Attack),
            "defend" => Ok(ActionKind::Defend),
            "skill" => Ok(ActionKind::Skill),
            "charge" => Ok(ActionKind::Charge),
            _ => Err(ParseError::new("action", s)),
        }
    }
}

/// A fully specified choice for one round.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    Attack,
    Defend,
    Skill { index: usize },
    Charge,
}

impl Action {
    /// Combines a kind with the optional skill index of the submission call.
    /// The index is required for `Skill` and ignored otherwise.
    pub fn from_parts(kind: ActionKind, skill_index: Option<usize>) -> Result<Self, SubmitError> {
        match kind {
            ActionKind::Attack => Ok(Action::Attack),
            ActionKind::Defend => Ok(Action::Defend),
            ActionKind::Charge => Ok(Action::Charge),
            ActionKind::Skill => skill_index
                .map(|index| Action::Skill { index })
                .ok_or(SubmitError::InvalidSkill(None)),
        }
    }

    pub fn kind(self) -> ActionKind {
        match self {
            Action::Attack => ActionKind::Attack,
            Action::Defend => ActionKind::Defend,
            Action::Skill { .. } => ActionKind::Skill,
            Action::Charge => ActionKind::Charge,
        }
    }

    pub fn skill_index(self) -> Option<usize> {
        match self {
            Action::Skill { index } => Some(index),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Skill { index } => f.pad(&format!("skill {index}")),
            other => f.pad(other.kind().as_str()),
        }
    }
}

/// Parses `attack`, `defend`, `charge` or `skill <n>`.
impl FromStr for Action {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let kind: ActionKind = parts.next().unwrap_or_default().parse()?;
        let index = match parts.next() {
            Some(raw) => Some(
                raw.parse::<usize>()
                    .map_err(|_| ParseError::new("skill index", raw))?,
            ),
            None => None,
        };
        if parts.next().is_some() {
            return Err(ParseError::new("action", s));
        }
        Action::from_parts(kind, index).map_err(|_| ParseError::new("action", s))
    }
}

/// What one executed action did.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub robot: String,
    pub action: ActionKind,
    pub success: bool,
    pub message: String,
    pub damage: u32,
    pub heal: u32,
}

impl ActionResult {
    pub(crate) fn new(robot: &str, action: ActionKind, message: String) -> Self {
        Self {
            robot: robot.to_string(),
            action,
            success: true,
            message,
            damage: 0,
            heal: 0,
        }
    }

    pub(crate) fn failed(mut self) -> Self {
        self.success = false;
        self
    }
}
