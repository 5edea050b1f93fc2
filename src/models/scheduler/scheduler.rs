use crate::Job;

/// Ranking strategy applied to the ready jobs at every tick.
pub trait Scheduler {
    /// Index of the job to run for this tick, or `None` for an idle tick.
    ///
    /// Ties go to the lowest index.
    fn schedule(&self, jobs: &[Job]) -> Option<usize>;

    /// Whether switching away from an unfinished job is reported as a preemption.
    fn reports_preemptions(&self) -> bool {
        false
    }
}
