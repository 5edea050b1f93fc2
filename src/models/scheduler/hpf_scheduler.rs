use super::scheduler::Scheduler;
use crate::Job;

/// Highest Priority First over fixed priorities. Serves Static, RM and DM once
/// the task set carries the policy's priorities.
pub struct HighestPriorityFirst;

impl Scheduler for HighestPriorityFirst {
    fn schedule(&self, jobs: &[Job]) -> Option<usize> {
        let mut elected: Option<(usize, i32)> = None;

        for (i, job) in jobs.iter().enumerate() {
            if job.remaining_time() == 0 {
                continue;
            }
            let priority = job.task().priority();
            // Strict comparison keeps the first job on equal priority.
            if elected.map_or(true, |(_, best)| priority > best) {
                elected = Some((i, priority));
            }
        }

        elected.map(|(i, _)| i)
    }
}
