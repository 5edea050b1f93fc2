pub mod edf_scheduler;
pub mod hpf_scheduler;
pub mod scheduler;

pub use edf_scheduler::EarliestDeadlineFirst;
pub use hpf_scheduler::HighestPriorityFirst;
pub use scheduler::Scheduler;

use crate::Policy;

/// The ranking strategy a policy runs with.
pub fn for_policy(policy: Policy) -> Box<dyn Scheduler> {
    match policy {
        Policy::Static | Policy::RateMonotonic | Policy::DeadlineMonotonic => Box::new(HighestPriorityFirst),
        Policy::EarliestDeadlineFirst => Box::new(EarliestDeadlineFirst),
    }
}
