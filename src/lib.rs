//! Simulation-based feasibility checking of periodic real-time task sets on
//! a single processor, under HPF, RM, DM or EDF.

pub mod core;
pub mod models;
pub mod utils;

pub use crate::core::{simulation, Engine, EngineState, Simulation};
pub use models::{scheduler, Event, Job, PendingJob, Task, TaskSet, Tick, TimeStep, ID};
pub use utils::{constants, errors, lcm, multiple_lcm, Feasibility, MissHandling, Policy, SchedulingError};
