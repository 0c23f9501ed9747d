//! Rejection reasons for engine calls. A rejected call never changes state.

use thiserror::Error;

/// Why an action submission was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Battle is not in progress")]
    NotInProgress,

    #[error("Unknown owner '{0}'")]
    UnknownOwner(String),

    #[error("Robot is defeated")]
    ActorDead,

    #[error("Invalid skill index {0:?}")]
    InvalidSkill(Option<usize>),

    #[error("Not enough energy: {available} of {required}")]
    InsufficientEnergy { required: u32, available: u32 },
}

/// Why a round could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("Battle has not started")]
    NotStarted,

    #[error("Battle is already finished")]
    Finished,

    #[error("Waiting on players")]
    WaitingOnPlayers,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StartError {
    #[error("Battle has already started")]
    AlreadyStarted,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Both robots belong to owner '{0}'")]
    DuplicateOwner(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Unknown {what} '{value}'")]
pub struct ParseError {
    pub what: &'static str,
    pub value: String,
}

impl ParseError {
    pub(crate) fn new(what: &'static str, value: &str) -> Self {
        Self {
            what,
            value: value.to_string(),
        }
    }
}
