use std::fmt;

use super::{TimeStep, ID};

/// Something observable that happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Activated { task_id: ID, instance: u32, absolute_deadline: TimeStep },
    Completed { task_id: ID, instance: u32 },
    DeadlineMissed { task_id: ID, instance: u32, remaining: TimeStep },
    Preempted { from_task_id: ID, to_task_id: ID },
    Executed { task_id: ID, remaining_after: TimeStep },
    Idle,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Activated { task_id, instance, absolute_deadline } => write!(
                f,
                "ACTIVATION: task {} (instance {}), absolute deadline {}",
                task_id, instance, absolute_deadline
            ),
            Event::Completed { task_id, instance } => {
                write!(f, "COMPLETED: task {} (instance {})", task_id, instance)
            }
            Event::DeadlineMissed { task_id, instance, remaining } => write!(
                f,
                "DEADLINE MISSED: task {} (instance {}, remaining {})",
                task_id, instance, remaining
            ),
            Event::Preempted { from_task_id, to_task_id } => {
                write!(f, "PREEMPTION: task {} preempted by task {}", from_task_id, to_task_id)
            }
            Event::Executed { task_id, remaining_after } => {
                write!(f, "EXECUTION: task {} (remaining {})", task_id, remaining_after)
            }
            Event::Idle => write!(f, "PROCESSOR IDLE"),
        }
    }
}

/// A job still waiting for the processor at the end of a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingJob {
    pub task_id: ID,
    pub absolute_deadline: TimeStep,
    pub remaining: TimeStep,
}

/// The batch of events produced by one tick, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub time: TimeStep,
    pub events: Vec<Event>,
    pub pending: Vec<PendingJob>,
}

impl Tick {
    pub fn executed(&self) -> Option<ID> {
        self.events.iter().find_map(|event| match event {
            Event::Executed { task_id, .. } => Some(*task_id),
            _ => None,
        })
    }

    pub fn misses(&self) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::DeadlineMissed { .. }))
    }
}
