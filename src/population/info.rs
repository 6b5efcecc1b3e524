//! Per-robot facts consumed by parent selection and culling.

use crate::population::robot::{Robot, RobotName};

/// Snapshot of the facts selection and culling need about one robot.
///
/// Copied out of the population before a pass starts, so the pass can reorder
/// and shrink its working list freely without touching stored robots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobotInfo {
    /// Name of the robot this info describes.
    pub name: RobotName,
    /// Fitness as last written by the external scorer.
    pub weight: f64,
    /// Total predictions ever produced.
    pub total_predictions: u64,
    /// Outcomes observed so far.
    pub total_outcomes: u64,
    /// Outcome count at the robot's most recent breeding episode.
    pub outcomes_at_last_child: u64,
    /// Signed sum of prediction directions.
    pub bias: i64,
    /// Whether the robot has ever produced a directional prediction.
    pub is_predicting: bool,
}

impl RobotInfo {
    /// Build the info view for a robot, or `None` if it was never saved.
    #[must_use]
    pub fn new(robot: &Robot) -> Option<Self> {
        Some(Self {
            name: robot.name()?,
            weight: robot.weight(),
            total_predictions: robot.total_predictions(),
            total_outcomes: robot.total_outcomes(),
            outcomes_at_last_child: robot.outcomes_at_last_child(),
            bias: robot.bias(),
            is_predicting: robot.is_predicting(),
        })
    }

    /// Eligibility to serve as a parent this cycle.
    ///
    /// Requires `min_outcomes` lifetime outcomes and at least `spacing`
    /// outcomes since the robot last parented a child. Pure; consumes no
    /// draws.
    #[must_use]
    pub fn can_be_parent(&self, min_outcomes: u64, spacing: u64) -> bool {
        self.total_outcomes >= min_outcomes
            && self.total_outcomes.saturating_sub(self.outcomes_at_last_child) >= spacing
    }
}
