//! The generation-refresh pass.
//!
//! One call to [`breed_population`] runs three phases: mandatory random
//! seeding, breeding from eligible parents until capacity or parent
//! exhaustion, and a random top-off that closes any remaining gap. The pass
//! is synchronous and consumes entropy draws in a fixed, observable order.

// Population sizes stay far below 2^52, so the f64 rounding trips are exact.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use crate::breeder::blend::blend_instruction_lists;
use crate::breeder::selection::select_parent_info;
use crate::error::ConfigError;
use crate::mutator::Mutator;
use crate::population::{Population, Robot, RobotInfo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Exclusive upper bound on a fresh random robot's instruction count.
pub const MAX_RANDOM_INSTRUCTIONS: u32 = 1024;

/// Parameters for the breeding pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreederSettings {
    /// Share of desired capacity seeded as pure-random robots each cycle.
    pub random_robots_fraction: f64,
    /// Furthest-back data offset new robots may read. Forwarded verbatim.
    pub data_maximum_offset: i32,
    /// Data columns new robots must read as zero. Forwarded verbatim.
    pub ignore_columns: BTreeSet<u32>,
    /// Lifetime outcomes a robot needs before it may parent.
    pub minimum_outcomes_to_allow_breeding: u64,
    /// Outcomes a robot must sit out after parenting before parenting again.
    pub outcomes_between_breeding: u64,
    /// Scale applied to the averaged parent weight for a child's start.
    pub inherited_weight_percent: f64,
}

impl Default for BreederSettings {
    fn default() -> Self {
        Self {
            random_robots_fraction: 0.25,
            data_maximum_offset: 255,
            ignore_columns: BTreeSet::new(),
            minimum_outcomes_to_allow_breeding: 50,
            outcomes_between_breeding: 50,
            inherited_weight_percent: 0.5,
        }
    }
}

impl BreederSettings {
    /// Check that the probabilistic and range-bound fields are usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::error::ensure_fraction("random_robots_fraction", self.random_robots_fraction)?;
        crate::error::ensure_finite("inherited_weight_percent", self.inherited_weight_percent)?;
        if self.data_maximum_offset < 0 {
            return Err(ConfigError::NegativeDataOffset {
                value: self.data_maximum_offset,
            });
        }
        Ok(())
    }
}

/// Refresh a population toward its desired capacity.
///
/// No-op when the population has no breeding space. Otherwise: seed
/// `round(random_robots_fraction × desired_size)` random robots
/// unconditionally (midpoint counts round to even), breed children from
/// eligible parents while space and parents last, then top off with random
/// robots until the population reaches its desired size. The caller's
/// `robot_infos` slice is never mutated; the pass works on a private
/// filtered copy.
pub fn breed_population<M: Mutator>(
    population: &mut Population,
    robot_infos: &[RobotInfo],
    settings: &BreederSettings,
    mutator: &mut M,
) {
    if !population.has_breeding_space() {
        return;
    }
    add_required_random_robots(population, settings, mutator);
    breed_from_parents(population, robot_infos, settings, mutator);
    top_up_with_random_robots(population, settings, mutator);
}

/// Phase 1: the mandatory random share, added before any capacity re-check.
fn add_required_random_robots<M: Mutator>(
    population: &mut Population,
    settings: &BreederSettings,
    mutator: &mut M,
) {
    let count = (settings.random_robots_fraction * population.desired_size() as f64)
        .round_ties_even() as usize;
    if count > 0 {
        log::debug!("seeding {count} mandatory random robots");
        add_random_robots(population, settings, mutator, count);
    }
}

/// Phase 2: pair eligible parents until capacity or the pool runs dry.
fn breed_from_parents<M: Mutator>(
    population: &mut Population,
    robot_infos: &[RobotInfo],
    settings: &BreederSettings,
    mutator: &mut M,
) {
    let mut pool: Vec<RobotInfo> = robot_infos
        .iter()
        .filter(|info| {
            info.can_be_parent(
                settings.minimum_outcomes_to_allow_breeding,
                settings.outcomes_between_breeding,
            )
        })
        .copied()
        .collect();
    let eligible = pool.len();
    let mut children = 0usize;

    while population.has_breeding_space() {
        let Some(first) = select_parent_info(&mut pool, mutator) else {
            break;
        };
        let Some(second) = select_parent_info(&mut pool, mutator) else {
            break;
        };
        let Some(mut parent1) = population.lookup(first.name).cloned() else {
            break;
        };
        let Some(mut parent2) = population.lookup(second.name).cloned() else {
            break;
        };

        let child = breed_child(&parent1, &parent2, settings, mutator);
        population.save(child);
        children += 1;

        parent1.record_child();
        population.save(parent1);
        parent2.record_child();
        population.save(parent2);
    }

    log::debug!("bred {children} children from {eligible} eligible parents");
}

/// Phase 3: close any remaining capacity gap with random robots.
fn top_up_with_random_robots<M: Mutator>(
    population: &mut Population,
    settings: &BreederSettings,
    mutator: &mut M,
) {
    let missing = population
        .desired_size()
        .saturating_sub(population.current_size());
    if missing > 0 {
        log::debug!("topping up with {missing} random robots");
        add_random_robots(population, settings, mutator, missing);
    }
}

fn add_random_robots<M: Mutator>(
    population: &mut Population,
    settings: &BreederSettings,
    mutator: &mut M,
    count: usize,
) {
    for _ in 0..count {
        let robot = create_random_robot(settings, mutator);
        population.save(robot);
    }
}

/// Synthesize one robot with a random program.
///
/// Instruction count is `|next_int()| mod 1024`; every synthesized
/// instruction is additionally mutated once, unconditionally.
fn create_random_robot<M: Mutator>(settings: &BreederSettings, mutator: &mut M) -> Robot {
    let mut robot = Robot::create_empty(settings.data_maximum_offset, &settings.ignore_columns);
    let count = mutator.next_int().unsigned_abs() % MAX_RANDOM_INSTRUCTIONS;
    for _ in 0..count {
        let mut instruction = mutator.random_instruction();
        instruction.mutate(mutator);
        robot.main_program_mut().push(instruction);
    }
    robot
}

/// Build one child from two parents: inherited weight, then blended program.
fn breed_child<M: Mutator>(
    parent1: &Robot,
    parent2: &Robot,
    settings: &BreederSettings,
    mutator: &mut M,
) -> Robot {
    let mut child = Robot::create_empty(settings.data_maximum_offset, &settings.ignore_columns);
    child.set_inherited_weight(
        settings.inherited_weight_percent * (parent1.weight() + parent2.weight()) / 2.0,
    );
    child.set_main_program(blend_instruction_lists(
        parent1.main_program(),
        parent2.main_program(),
        mutator,
    ));
    child
}
