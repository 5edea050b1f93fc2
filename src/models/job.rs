use crate::TimeStep;

use super::{Task, ID};

/// Simulation state of one task: the instance currently released for it and
/// when the next one arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    task: Task,
    instance: u32,               // Number of instances activated so far
    remaining_time: TimeStep,    // Remaining execution time of the current instance
    next_activation: TimeStep,   // Absolute time of the next release
    absolute_deadline: TimeStep, // Release time of the current instance + D
    active: bool,                // Released and not yet completed
}

impl Job {
    /// Fresh state for a synchronous start: first release at t = 0.
    pub fn new(task: Task) -> Self {
        Self {
            absolute_deadline: task.deadline(),
            task,
            instance: 0,
            remaining_time: 0,
            next_activation: 0,
            active: false,
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn task_id(&self) -> ID {
        self.task.id()
    }

    pub fn instance(&self) -> u32 {
        self.instance
    }

    pub fn remaining_time(&self) -> TimeStep {
        self.remaining_time
    }

    pub fn next_activation(&self) -> TimeStep {
        self.next_activation
    }

    pub fn absolute_deadline(&self) -> TimeStep {
        self.absolute_deadline
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_time == 0
    }

    pub fn is_due(&self, t: TimeStep) -> bool {
        self.next_activation == t
    }

    /// An instance is overrun when its successor is due while it still has work left.
    pub fn deadline_missed(&self, t: TimeStep) -> bool {
        self.is_due(t) && self.remaining_time > 0
    }

    /// Releases the next instance at `t` and schedules the one after it.
    ///
    /// Times past `TimeStep::MAX` saturate: such a deadline or release lies
    /// beyond any horizon the engine can simulate.
    pub fn activate(&mut self, t: TimeStep) {
        self.instance += 1;
        self.remaining_time = self.task.wcet();
        self.active = true;
        self.absolute_deadline = t.saturating_add(self.task.deadline());
        self.next_activation = self.next_activation.saturating_add(self.task.period());
    }

    /// Runs the current instance for one unit. Returns true when this completes it.
    pub fn schedule(&mut self) -> bool {
        if self.remaining_time == 0 {
            return false;
        }
        self.remaining_time -= 1;
        if self.remaining_time == 0 {
            self.active = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(wcet: TimeStep, deadline: TimeStep, period: TimeStep) -> Job {
        Job::new(Task::new(1, wcet, deadline, period, 0).unwrap())
    }

    #[test]
    fn test_new_job_is_idle_and_due_at_zero() {
        let job = job(2, 5, 5);
        assert!(!job.is_active());
        assert!(job.is_complete());
        assert!(job.is_due(0));
        assert!(!job.deadline_missed(0));
    }

    #[test]
    fn test_activate_resets_instance() {
        let mut job = job(2, 3, 6);
        job.activate(0);

        assert_eq!(job.instance(), 1);
        assert_eq!(job.remaining_time(), 2);
        assert_eq!(job.absolute_deadline(), 3);
        assert_eq!(job.next_activation(), 6);
        assert!(job.is_active());
    }

    #[test]
    fn test_schedule_completes_and_never_underflows() {
        let mut job = job(2, 5, 5);
        job.activate(0);

        assert!(!job.schedule());
        assert!(job.schedule());
        assert!(!job.is_active());
        assert!(!job.schedule());
        assert_eq!(job.remaining_time(), 0);
    }

    #[test]
    fn test_activate_saturates_far_deadlines() {
        let mut job = Job::new(Task::new(1, 1, TimeStep::MAX, TimeStep::MAX, 0).unwrap());
        job.activate(0);
        job.schedule();
        job.activate(5);

        assert_eq!(job.absolute_deadline(), TimeStep::MAX);
        assert_eq!(job.next_activation(), TimeStep::MAX);
        assert_eq!(job.instance(), 2);
    }

    #[test]
    fn test_deadline_missed_only_at_next_activation() {
        let mut job = job(3, 4, 4);
        job.activate(0);
        job.schedule();

        assert!(!job.deadline_missed(3));
        assert!(job.deadline_missed(4));
    }
}
