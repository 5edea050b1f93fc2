pub mod event;
mod job;
pub mod scheduler;
pub mod task;
pub mod taskset;

pub use event::{Event, PendingJob, Tick};
pub use job::Job;
pub use task::Task;
pub use taskset::TaskSet;

pub type TimeStep = usize;

pub type ID = u32;
