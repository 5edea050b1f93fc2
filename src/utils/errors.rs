use std::error::Error;
use std::fmt;

use crate::ID;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// C, D or T is zero.
    InvalidTask { id: ID, field: &'static str },
    DuplicateTaskId(ID),
    EmptyTaskSet,
    InvalidHorizon,
    /// The engine already reached a terminal state.
    EngineFinished,
}

impl fmt::Display for SchedulingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulingError::InvalidTask { id, field } => {
                write!(f, "invalid task {}: {} must be strictly positive", id, field)
            }
            SchedulingError::DuplicateTaskId(id) => write!(f, "task id {} is used more than once", id),
            SchedulingError::EmptyTaskSet => write!(f, "the task set is empty"),
            SchedulingError::InvalidHorizon => write!(f, "the simulation horizon must be strictly positive"),
            SchedulingError::EngineFinished => write!(f, "the simulation already reached a verdict"),
        }
    }
}

impl Error for SchedulingError {}
