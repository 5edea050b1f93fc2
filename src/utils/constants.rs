use std::fmt;

use crate::{TimeStep, ID};

/// Base priority from which RM/DM ranks are subtracted.
pub const PRIORITY_BASE: i32 = 1000;

/// Tick bound used by the fixed-priority policies when none is given.
pub const DEFAULT_HORIZON: TimeStep = 100;

/// Tick bound recommended for the EDF demo task set.
pub const EDF_RECOMMENDED_HORIZON: TimeStep = 24;

/// Exit status used by the binary for input or configuration errors.
pub const CONFIGURATION_ERROR_CODE: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Static,
    RateMonotonic,
    DeadlineMonotonic,
    EarliestDeadlineFirst,
}

impl Policy {
    pub fn is_fixed_priority(&self) -> bool {
        !matches!(self, Policy::EarliestDeadlineFirst)
    }

    /// How the engine reacts to a deadline miss under this policy.
    pub fn miss_handling(&self) -> MissHandling {
        if self.is_fixed_priority() {
            MissHandling::AbortOnFirst
        } else {
            MissHandling::Accumulate
        }
    }

    pub fn default_horizon(&self) -> TimeStep {
        if self.is_fixed_priority() {
            DEFAULT_HORIZON
        } else {
            EDF_RECOMMENDED_HORIZON
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Static => "HPF (Highest Priority First)",
            Policy::RateMonotonic => "RM (Rate Monotonic)",
            Policy::DeadlineMonotonic => "DM (Deadline Monotonic)",
            Policy::EarliestDeadlineFirst => "EDF (Earliest Deadline First)",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissHandling {
    /// Stop the run at the tick of the first miss (fixed-priority policies).
    AbortOnFirst,
    /// Keep simulating and report infeasibility at the end (EDF).
    Accumulate,
}

/// Terminal outcome of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feasibility {
    /// Every job reached zero remaining work at the end of `at_tick`.
    Feasible { at_tick: TimeStep },
    /// First recorded deadline miss.
    Infeasible { at_tick: TimeStep, task_id: ID },
    /// The horizon ran out before either outcome.
    Inconclusive { horizon_reached: TimeStep },
}

impl Feasibility {
    /// Process exit status for this verdict.
    pub fn code(&self) -> i32 {
        match self {
            Feasibility::Feasible { .. } => 0,
            Feasibility::Infeasible { .. } => 1,
            Feasibility::Inconclusive { .. } => 2,
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible { .. })
    }
}

impl fmt::Display for Feasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feasibility::Feasible { at_tick } => {
                write!(f, "FEASIBLE: all tasks completed simultaneously at t={}", at_tick)
            }
            Feasibility::Infeasible { at_tick, task_id } => {
                write!(f, "NOT FEASIBLE: task {} missed its deadline at t={}", task_id, at_tick)
            }
            Feasibility::Inconclusive { horizon_reached } => {
                write!(f, "INCONCLUSIVE: simulation stopped after {} units", horizon_reached)
            }
        }
    }
}
