pub mod constants;
pub mod errors;
pub mod lcm;

pub use constants::{Feasibility, MissHandling, Policy};
pub use errors::SchedulingError;
pub use lcm::multiple_lcm;
