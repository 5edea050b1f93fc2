use crate::SchedulingError;

use super::{TimeStep, ID};

#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    id: ID,
    wcet: TimeStep,     // C_i : Worst-case execution time.
    deadline: TimeStep, // D_i : Relative deadline.
    period: TimeStep,   // T_i : Period.
    priority: i32,      // P_i : Higher value runs first (fixed-priority policies only).
}

impl Task {
    pub fn new(
        id: ID,
        wcet: TimeStep,
        deadline: TimeStep,
        period: TimeStep,
        priority: i32,
    ) -> Result<Self, SchedulingError> {
        let checks = [("computation time", wcet), ("relative deadline", deadline), ("period", period)];
        if let Some(&(field, _)) = checks.iter().find(|(_, value)| *value == 0) {
            return Err(SchedulingError::InvalidTask { id, field });
        }

        Ok(Self {
            id,
            wcet,
            deadline,
            period,
            priority,
        })
    }

    pub fn id(&self) -> ID {
        self.id
    }

    pub fn wcet(&self) -> TimeStep {
        self.wcet
    }

    pub fn deadline(&self) -> TimeStep {
        self.deadline
    }

    pub fn period(&self) -> TimeStep {
        self.period
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Same task, different priority. Used once, before a run starts.
    pub fn with_priority(&self, priority: i32) -> Self {
        Self { priority, ..self.clone() }
    }

    pub fn utilisation(&self) -> f64 {
        self.wcet as f64 / self.period as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_parameters() {
        assert_eq!(
            Task::new(1, 0, 5, 5, 0),
            Err(SchedulingError::InvalidTask { id: 1, field: "computation time" })
        );
        assert_eq!(
            Task::new(2, 1, 0, 5, 0),
            Err(SchedulingError::InvalidTask { id: 2, field: "relative deadline" })
        );
        assert_eq!(
            Task::new(3, 1, 5, 0, 0),
            Err(SchedulingError::InvalidTask { id: 3, field: "period" })
        );
    }

    #[test]
    fn test_utilisation() {
        let task = Task::new(1, 2, 5, 5, 0).unwrap();
        assert!((task.utilisation() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_with_priority_keeps_timing() {
        let task = Task::new(4, 3, 11, 11, 15).unwrap();
        let reprioritised = task.with_priority(999);

        assert_eq!(reprioritised.priority(), 999);
        assert_eq!(reprioritised.wcet(), 3);
        assert_eq!(reprioritised.deadline(), 11);
        assert_eq!(reprioritised.period(), 11);
        assert_eq!(task.priority(), 15);
    }
}
