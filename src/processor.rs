//! A minimal virtual processor for running robot programs.
//!
//! Execution is linear: instructions run in order until the first
//! `ReturnRegister` (halt with a result), the first Terminator (halt with
//! none), or the end of the program. All reads are protected: a selector
//! that lands on an ignored column, a missing cell, or an empty table reads
//! 0.0 rather than failing, mirroring protected division.

// Selector mapping works in the unsigned domain of the raw draws.
#![allow(clippy::cast_possible_truncation)]

use crate::instructions::{Instruction, InstructionList};
use crate::population::{Population, Robot, RobotName};
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Number of f64 registers in the register file.
pub const REGISTER_COUNT: usize = 16;

/// What an instruction tells the run loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Proceed to the next instruction.
    Continue,
    /// Stop the run immediately.
    Halt,
}

/// The sign-classified outcome of running a robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    /// Positive result.
    Up,
    /// Negative result.
    Down,
    /// No result, zero, or NaN.
    Out,
}

impl Prediction {
    /// Direction as a signed unit: `Up` is +1, `Down` is -1, `Out` is 0.
    #[must_use]
    pub fn signum(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
            Self::Out => 0,
        }
    }

    /// Classify a run result by its sign.
    #[must_use]
    pub fn from_result(result: Option<f64>) -> Self {
        match result {
            Some(value) if value > 0.0 => Self::Up,
            Some(value) if value < 0.0 => Self::Down,
            _ => Self::Out,
        }
    }
}

/// Input table robots read from: columns of values, newest row first.
///
/// `columns[c][o]` is column `c` at `o` rows back from the newest row.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotData {
    columns: Vec<Vec<f64>>,
}

impl RobotData {
    /// Wrap a column-major table.
    #[must_use]
    pub fn new(columns: Vec<Vec<f64>>) -> Self {
        Self { columns }
    }

    /// Number of columns available.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    fn get(&self, column: usize, offset: usize) -> Option<f64> {
        self.columns.get(column)?.get(offset).copied()
    }
}

/// The execution surface instructions dispatch into.
///
/// Selectors are raw `i32` draws; implementations map them into their own
/// valid ranges, so instructions never carry range knowledge.
pub trait Processor {
    /// Read the register a selector maps to.
    fn register(&self, selector: i32) -> f64;

    /// Write the register a selector maps to.
    fn set_register(&mut self, selector: i32, value: f64);

    /// Protected read of one data cell.
    fn data(&self, column_selector: i32, offset_selector: i32) -> f64;

    /// Report the run result.
    fn finish(&mut self, result: f64);
}

/// Register-file processor over a borrowed data table.
#[derive(Debug, Clone, Copy)]
pub struct SimpleProcessor<'a> {
    data: &'a RobotData,
    data_maximum_offset: i32,
    ignore_columns: &'a BTreeSet<u32>,
    registers: [f64; REGISTER_COUNT],
    result: Option<f64>,
}

impl<'a> SimpleProcessor<'a> {
    /// Processor over `data`, reading at most `data_maximum_offset` rows
    /// back and treating `ignore_columns` as all-zero.
    #[must_use]
    pub fn new(
        data: &'a RobotData,
        data_maximum_offset: i32,
        ignore_columns: &'a BTreeSet<u32>,
    ) -> Self {
        Self {
            data,
            data_maximum_offset,
            ignore_columns,
            registers: [0.0; REGISTER_COUNT],
            result: None,
        }
    }

    /// Run a program from a zeroed register file.
    ///
    /// Returns the reported result, or `None` if the program halted at a
    /// Terminator or fell off the end.
    pub fn run(&mut self, program: &InstructionList) -> Option<f64> {
        self.registers = [0.0; REGISTER_COUNT];
        self.result = None;
        for instruction in program {
            if instruction.execute(self) == Step::Halt {
                break;
            }
        }
        self.result
    }
}

fn register_index(selector: i32) -> usize {
    selector.unsigned_abs() as usize % REGISTER_COUNT
}

impl Processor for SimpleProcessor<'_> {
    fn register(&self, selector: i32) -> f64 {
        self.registers[register_index(selector)]
    }

    fn set_register(&mut self, selector: i32, value: f64) {
        self.registers[register_index(selector)] = value;
    }

    fn data(&self, column_selector: i32, offset_selector: i32) -> f64 {
        let count = self.data.column_count();
        if count == 0 {
            return 0.0;
        }
        let column = column_selector.unsigned_abs() as usize % count;
        if self.ignore_columns.contains(&(column as u32)) {
            return 0.0;
        }
        let offset_range = self.data_maximum_offset.unsigned_abs() as usize + 1;
        let offset = offset_selector.unsigned_abs() as usize % offset_range;
        self.data.get(column, offset).unwrap_or(0.0)
    }

    fn finish(&mut self, result: f64) {
        self.result = Some(result);
    }
}

/// Run one robot's program over the data and classify the result.
#[must_use]
pub fn predict(robot: &Robot, data: &RobotData) -> Prediction {
    let mut processor =
        SimpleProcessor::new(data, robot.data_maximum_offset(), robot.ignore_columns());
    Prediction::from_result(processor.run(robot.main_program()))
}

/// Run every robot in the population and collect its prediction.
///
/// Robots run in parallel; results come back in population order. Robot
/// execution consumes no entropy draws, so parallelism cannot perturb
/// breeding determinism.
#[must_use]
pub fn predict_population(
    population: &Population,
    data: &RobotData,
) -> Vec<(RobotName, Prediction)> {
    let robots: Vec<&Robot> = population.iter().collect();
    robots
        .par_iter()
        .filter_map(|robot| Some((robot.name()?, predict(robot, data))))
        .collect()
}

/// Build an instruction list that returns the given immediate value.
///
/// Handy for wiring deterministic probes into tests and benchmarks.
#[must_use]
pub fn returning_program(value: f64) -> InstructionList {
    [
        Instruction::MoveDoubleToRegister { value, register: 0 },
        Instruction::ReturnRegister { register: 0 },
    ]
    .into_iter()
    .collect()
}
