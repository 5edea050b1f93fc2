use super::scheduler::Scheduler;
use crate::{Job, TimeStep};

pub struct EarliestDeadlineFirst;

impl Scheduler for EarliestDeadlineFirst {
    fn schedule(&self, jobs: &[Job]) -> Option<usize> {
        let mut elected: Option<(usize, TimeStep)> = None;

        for (i, job) in jobs.iter().enumerate() {
            // Only released instances compete, a zero remaining time is not enough.
            if !job.is_active() || job.remaining_time() == 0 {
                continue;
            }
            let deadline = job.absolute_deadline();
            if elected.map_or(true, |(_, smallest)| deadline < smallest) {
                elected = Some((i, deadline));
            }
        }

        elected.map(|(i, _)| i)
    }

    fn reports_preemptions(&self) -> bool {
        true
    }
}
