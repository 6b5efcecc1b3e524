//! The evolved program plus its fitness and lineage bookkeeping.

use crate::instructions::InstructionList;
use crate::processor::Prediction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Unique identifier assigned by the population on first save.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RobotName(u64);

impl RobotName {
    pub(crate) const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw numeric identity.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RobotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One evolved program and everything the engine tracks about it.
///
/// The main program is the only executable part. `weight` is written by an
/// external scorer between generations and read (never written) by the
/// breeder; `inherited_weight` is fixed at creation from the parents'
/// weights. The prediction and outcome counters feed parent eligibility and
/// the culling rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Robot {
    name: Option<RobotName>,
    main_program: InstructionList,
    inherited_weight: f64,
    weight: f64,
    children: u64,
    total_predictions: u64,
    correct_predictions: u64,
    total_outcomes: u64,
    outcomes_at_last_child: u64,
    bias: i64,
    is_predicting: bool,
    data_maximum_offset: i32,
    ignore_columns: BTreeSet<u32>,
}

impl Robot {
    /// New robot with an empty program and zeroed counters.
    ///
    /// The creation parameters are stored verbatim and forwarded to the
    /// processor when the robot runs; the breeder treats them as opaque.
    #[must_use]
    pub fn create_empty(data_maximum_offset: i32, ignore_columns: &BTreeSet<u32>) -> Self {
        Self {
            name: None,
            main_program: InstructionList::new(),
            inherited_weight: 0.0,
            weight: 0.0,
            children: 0,
            total_predictions: 0,
            correct_predictions: 0,
            total_outcomes: 0,
            outcomes_at_last_child: 0,
            bias: 0,
            is_predicting: false,
            data_maximum_offset,
            ignore_columns: ignore_columns.clone(),
        }
    }

    /// Name assigned by the population, `None` before the first save.
    #[must_use]
    pub fn name(&self) -> Option<RobotName> {
        self.name
    }

    pub(crate) fn assign_name(&mut self, name: RobotName) {
        self.name = Some(name);
    }

    /// The executable instruction sequence.
    #[must_use]
    pub fn main_program(&self) -> &InstructionList {
        &self.main_program
    }

    /// Mutable access to the instruction sequence.
    pub fn main_program_mut(&mut self) -> &mut InstructionList {
        &mut self.main_program
    }

    /// Replace the instruction sequence wholesale.
    pub fn set_main_program(&mut self, program: InstructionList) {
        self.main_program = program;
    }

    /// Starting fitness granted at creation, never touched afterwards.
    #[must_use]
    pub fn inherited_weight(&self) -> f64 {
        self.inherited_weight
    }

    /// Set the starting fitness. Called once, at creation time.
    pub fn set_inherited_weight(&mut self, weight: f64) {
        self.inherited_weight = weight;
    }

    /// Current fitness as written by the external scorer. May be negative.
    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Overwrite the fitness. The breeder only ever reads this.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// How many breeding episodes this robot has parented.
    #[must_use]
    pub fn children(&self) -> u64 {
        self.children
    }

    /// Total predictions ever produced, including `Out`.
    #[must_use]
    pub fn total_predictions(&self) -> u64 {
        self.total_predictions
    }

    /// Predictions later confirmed correct.
    #[must_use]
    pub fn correct_predictions(&self) -> u64 {
        self.correct_predictions
    }

    /// Outcomes observed so far.
    #[must_use]
    pub fn total_outcomes(&self) -> u64 {
        self.total_outcomes
    }

    /// Value of `total_outcomes` when this robot last parented a child.
    #[must_use]
    pub fn outcomes_at_last_child(&self) -> u64 {
        self.outcomes_at_last_child
    }

    /// Signed sum of prediction directions: `Up` counts +1, `Down` -1.
    #[must_use]
    pub fn bias(&self) -> i64 {
        self.bias
    }

    /// Whether this robot has ever produced a directional prediction.
    #[must_use]
    pub fn is_predicting(&self) -> bool {
        self.is_predicting
    }

    /// Furthest-back data offset this robot's program may read.
    #[must_use]
    pub fn data_maximum_offset(&self) -> i32 {
        self.data_maximum_offset
    }

    /// Data columns this robot's program must read as zero.
    #[must_use]
    pub fn ignore_columns(&self) -> &BTreeSet<u32> {
        &self.ignore_columns
    }

    /// Record one breeding episode in which this robot served as a parent.
    ///
    /// Also snapshots the current outcome count, which is what the
    /// `outcomes_between_breeding` spacing threshold measures against.
    pub fn record_child(&mut self) {
        self.children += 1;
        self.outcomes_at_last_child = self.total_outcomes;
    }

    /// Record a prediction this robot produced.
    pub fn record_prediction(&mut self, prediction: Prediction) {
        self.total_predictions += 1;
        self.bias += i64::from(prediction.signum());
        if prediction != Prediction::Out {
            self.is_predicting = true;
        }
    }

    /// Record one observed outcome, correct or not.
    pub fn record_outcome(&mut self, correct: bool) {
        self.total_outcomes += 1;
        if correct {
            self.correct_predictions += 1;
        }
    }
}
