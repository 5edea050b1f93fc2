use std::collections::HashSet;

use crate::constants::PRIORITY_BASE;
use crate::{multiple_lcm, Policy, SchedulingError, TimeStep};

use super::{Job, Task};

#[derive(Debug, Clone)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    /// Builds an ordered task set. Order is kept and used for tie-breaks.
    pub fn new(tasks: Vec<Task>) -> Result<Self, SchedulingError> {
        let mut seen = HashSet::new();
        for task in tasks.iter() {
            if !seen.insert(task.id()) {
                return Err(SchedulingError::DuplicateTaskId(task.id()));
            }
        }
        Ok(Self { tasks })
    }

    pub fn get_tasks(&self) -> &Vec<Task> {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Sum of C_i / T_i. Informational only.
    pub fn utilisation(&self) -> f64 {
        self.tasks.iter().map(|t| t.utilisation()).sum()
    }

    /// The single-processor EDF condition U <= 1.
    pub fn utilisation_respected(&self) -> bool {
        self.utilisation() <= 1.0
    }

    /// LCM of all periods, `None` if it does not fit in a `TimeStep`.
    pub fn hyperperiod(&self) -> Option<TimeStep> {
        multiple_lcm(&self.tasks.iter().map(|task| task.period()).collect::<Vec<_>>())
    }

    /// Returns the task set with the priorities `policy` runs with.
    ///
    /// Static keeps the supplied priorities and EDF ignores them. RM and DM rank
    /// every task by how many others have a strictly smaller period (resp.
    /// relative deadline), so equal keys share a priority.
    pub fn with_policy_priorities(&self, policy: Policy) -> TaskSet {
        let key: fn(&Task) -> TimeStep = match policy {
            Policy::RateMonotonic => Task::period,
            Policy::DeadlineMonotonic => Task::deadline,
            Policy::Static | Policy::EarliestDeadlineFirst => return self.clone(),
        };

        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                let ahead = self.tasks.iter().filter(|other| key(other) < key(task)).count();
                task.with_priority(PRIORITY_BASE - ahead as i32)
            })
            .collect();

        TaskSet { tasks }
    }

    /// Fresh simulation state, one job per task, in task order.
    pub fn jobs(&self) -> Vec<Job> {
        self.tasks.iter().cloned().map(Job::new).collect()
    }
}
