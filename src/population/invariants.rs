//! Population sanity checks that detect bugs.
//!
//! These should NEVER trigger in a correctly implemented engine. A violation
//! means name assignment or counter bookkeeping has a bug, not that the
//! population is merely in an unusual state.

use crate::population::store::Population;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all population invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(population: &Population) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for robot in population {
        let Some(name) = robot.name() else {
            violations.push(InvariantViolation {
                message: "stored robot has no name".to_string(),
            });
            continue;
        };

        if name.value() >= population.next_name() {
            violations.push(InvariantViolation {
                message: format!(
                    "robot {} carries a name this population never issued (next is {})",
                    name,
                    population.next_name()
                ),
            });
        }

        if robot.correct_predictions() > robot.total_outcomes() {
            violations.push(InvariantViolation {
                message: format!(
                    "robot {} has {} correct predictions but only {} outcomes",
                    name,
                    robot.correct_predictions(),
                    robot.total_outcomes()
                ),
            });
        }

        if robot.outcomes_at_last_child() > robot.total_outcomes() {
            violations.push(InvariantViolation {
                message: format!(
                    "robot {} snapshotted {} outcomes at last child but has only {}",
                    name,
                    robot.outcomes_at_last_child(),
                    robot.total_outcomes()
                ),
            });
        }

        if robot.bias().unsigned_abs() > robot.total_predictions() {
            violations.push(InvariantViolation {
                message: format!(
                    "robot {} has bias {} exceeding its {} predictions",
                    name,
                    robot.bias(),
                    robot.total_predictions()
                ),
            });
        }
    }

    violations
}

/// Assert all population invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(population: &Population) {
    let violations = check_invariants(population);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Population invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_population: &Population) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::robot::{Robot, RobotName};
    use crate::processor::Prediction;
    use std::collections::BTreeSet;

    #[test]
    fn test_empty_population_passes() {
        let population = Population::new(10);
        assert!(check_invariants(&population).is_empty());
    }

    #[test]
    fn test_lived_in_population_passes() {
        let mut population = Population::new(10);
        for _ in 0..3 {
            let name = population.save(Robot::create_empty(255, &BTreeSet::new()));
            if let Some(robot) = population.lookup_mut(name) {
                robot.record_prediction(Prediction::Up);
                robot.record_outcome(true);
                robot.record_child();
            }
        }
        assert!(check_invariants(&population).is_empty());
    }

    #[test]
    fn test_foreign_name_detected() {
        let mut population = Population::new(10);
        let mut robot = Robot::create_empty(255, &BTreeSet::new());
        robot.assign_name(RobotName::new(99));
        population.save(robot);

        let violations = check_invariants(&population);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("never issued"));
    }
}
