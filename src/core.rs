//! Discrete-time scheduling engine.
//!
//! One engine instance simulates one run of a task set under one policy,
//! starting from a synchronous release at t = 0. Each tick is processed in
//! a fixed order: activations (and the misses they reveal), selection,
//! execution, then the synchronous-completion check.
//!
//! Synchronous completion is only a proof of long-run feasibility when the
//! simulated window covers a full hyperperiod. The engine warns about shorter
//! horizons but does not change its verdict.

use tracing::{debug, info, instrument, warn};

use crate::scheduler::{self, Scheduler};
use crate::{Event, Feasibility, Job, MissHandling, PendingJob, Policy, SchedulingError, TaskSet, Tick, TimeStep, ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
    Finished(Feasibility),
}

/// Events of a whole run plus its verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    pub ticks: Vec<Tick>,
    pub result: Feasibility,
}

impl Simulation {
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.ticks.iter().flat_map(|tick| tick.events.iter())
    }

    pub fn deadline_misses(&self) -> usize {
        self.ticks.iter().map(|tick| tick.misses().count()).sum()
    }
}

pub struct Engine {
    policy: Policy,
    taskset: TaskSet,
    jobs: Vec<Job>,
    scheduler: Box<dyn Scheduler>,
    current_time: TimeStep,
    previous: Option<usize>, // Job interrupted mid-instance at the end of the last tick
    first_miss: Option<(TimeStep, ID)>,
    state: EngineState,
}

impl Engine {
    /// Validates the configuration and assigns the policy's priorities.
    pub fn new(taskset: TaskSet, policy: Policy) -> Result<Self, SchedulingError> {
        if taskset.is_empty() {
            return Err(SchedulingError::EmptyTaskSet);
        }

        let taskset = taskset.with_policy_priorities(policy);
        Ok(Self {
            policy,
            jobs: taskset.jobs(),
            taskset,
            scheduler: scheduler::for_policy(policy),
            current_time: 0,
            previous: None,
            first_miss: None,
            state: EngineState::Idle,
        })
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// The task set with the priorities actually used for this run.
    pub fn taskset(&self) -> &TaskSet {
        &self.taskset
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn current_time(&self) -> TimeStep {
        self.current_time
    }

    /// Whether `horizon` spans a full hyperperiod. False when the hyperperiod overflows.
    pub fn covers_hyperperiod(&self, horizon: TimeStep) -> bool {
        self.taskset.hyperperiod().is_some_and(|hyperperiod| hyperperiod <= horizon)
    }

    /// Simulates ticks `0..horizon` at most and returns every tick's events with
    /// the verdict.
    #[instrument(skip(self), fields(policy = ?self.policy))]
    pub fn run(&mut self, horizon: TimeStep) -> Result<Simulation, SchedulingError> {
        if horizon == 0 {
            return Err(SchedulingError::InvalidHorizon);
        }
        if let EngineState::Finished(_) = self.state {
            return Err(SchedulingError::EngineFinished);
        }

        if !self.covers_hyperperiod(horizon) {
            warn!(
                horizon,
                hyperperiod = ?self.taskset.hyperperiod(),
                "horizon shorter than the hyperperiod, synchronous completion is not a feasibility proof"
            );
        }

        let mut ticks = Vec::new();
        while self.current_time < horizon {
            let (tick, verdict) = self.step()?;
            ticks.push(tick);
            if let Some(result) = verdict {
                return Ok(Simulation { ticks, result });
            }
        }

        let result = match self.first_miss {
            Some((at_tick, task_id)) => Feasibility::Infeasible { at_tick, task_id },
            None => Feasibility::Inconclusive { horizon_reached: horizon },
        };
        self.finish(result);
        Ok(Simulation { ticks, result })
    }

    /// Processes one tick. Returns its events and, if the run ended on this
    /// tick, the verdict.
    pub fn step(&mut self) -> Result<(Tick, Option<Feasibility>), SchedulingError> {
        if let EngineState::Finished(_) = self.state {
            return Err(SchedulingError::EngineFinished);
        }
        self.state = EngineState::Running;

        let t = self.current_time;
        let mut events = Vec::new();

        let missed = self.release_jobs(t, &mut events);
        if missed && self.policy.miss_handling() == MissHandling::AbortOnFirst {
            let verdict = self.first_miss.map(|(at_tick, task_id)| Feasibility::Infeasible { at_tick, task_id });
            return Ok(self.end_tick(t, events, verdict));
        }

        let elected = self.scheduler.schedule(&self.jobs);
        self.execute(elected, &mut events);

        let verdict = if self.jobs.iter().all(Job::is_complete) {
            Some(match self.first_miss {
                Some((at_tick, task_id)) => Feasibility::Infeasible { at_tick, task_id },
                None => Feasibility::Feasible { at_tick: t },
            })
        } else {
            None
        };

        Ok(self.end_tick(t, events, verdict))
    }

    /// Activates every job due at `t`. Returns true if one of them overran.
    fn release_jobs(&mut self, t: TimeStep, events: &mut Vec<Event>) -> bool {
        let mut missed = false;

        for job in self.jobs.iter_mut().filter(|job| job.is_due(t)) {
            if job.deadline_missed(t) {
                events.push(Event::DeadlineMissed {
                    task_id: job.task_id(),
                    instance: job.instance(),
                    remaining: job.remaining_time(),
                });
                self.first_miss.get_or_insert((t, job.task_id()));
                missed = true;
            }

            job.activate(t);
            events.push(Event::Activated {
                task_id: job.task_id(),
                instance: job.instance(),
                absolute_deadline: job.absolute_deadline(),
            });
        }

        missed
    }

    fn execute(&mut self, elected: Option<usize>, events: &mut Vec<Event>) {
        let Some(index) = elected else {
            events.push(Event::Idle);
            self.previous = None;
            return;
        };

        // `previous` only survives a tick that left its job unfinished.
        if let Some(previous) = self.previous {
            if self.scheduler.reports_preemptions() && previous != index {
                events.push(Event::Preempted {
                    from_task_id: self.jobs[previous].task_id(),
                    to_task_id: self.jobs[index].task_id(),
                });
            }
        }

        let job = &mut self.jobs[index];
        let completed = job.schedule();
        events.push(Event::Executed {
            task_id: job.task_id(),
            remaining_after: job.remaining_time(),
        });
        if completed {
            events.push(Event::Completed {
                task_id: job.task_id(),
                instance: job.instance(),
            });
        }

        self.previous = if completed { None } else { Some(index) };
    }

    fn end_tick(&mut self, t: TimeStep, events: Vec<Event>, verdict: Option<Feasibility>) -> (Tick, Option<Feasibility>) {
        let pending = self
            .jobs
            .iter()
            .filter(|job| job.is_active() && job.remaining_time() > 0)
            .map(|job| PendingJob {
                task_id: job.task_id(),
                absolute_deadline: job.absolute_deadline(),
                remaining: job.remaining_time(),
            })
            .collect();
        debug!(t, ?events, "tick");

        self.current_time += 1;
        if let Some(result) = verdict {
            self.finish(result);
        }

        (Tick { time: t, events, pending }, verdict)
    }

    fn finish(&mut self, result: Feasibility) {
        info!(%result, "simulation finished");
        self.state = EngineState::Finished(result);
    }
}

/// Builds a fresh engine and runs it once.
pub fn simulation(taskset: TaskSet, policy: Policy, horizon: TimeStep) -> Result<Simulation, SchedulingError> {
    Engine::new(taskset, policy)?.run(horizon)
}
