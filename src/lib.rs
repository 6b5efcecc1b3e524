// Allow unwrap and exact float checks in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Gens: a deterministic breeding engine for instruction-list prediction
//! robots.
//!
//! A population of robots, each a small linear program over a 16-register
//! virtual processor, is refreshed each generation by fitness-proportionate
//! parent selection, program crossover with probabilistic gate mutation, and
//! random-program synthesis. Every probabilistic decision flows through one
//! sequential entropy source, so a seed fully determines a run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │          Breeding Engine            │
//! ├─────────────────────────────────────┤
//! │ Selection │ Blend │ Random synth    │
//! ├─────────────────────────────────────┤
//! │   Population / Robot bookkeeping    │
//! ├─────────────────────────────────────┤
//! │   Virtual processor → Predictions   │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use gens::{breed_population, BreederSettings, MutatorConfig, Population, RandomMutator};
//!
//! let mut population = Population::new(100);
//! let settings = BreederSettings::default();
//! settings.validate()?;
//! let mut mutator = RandomMutator::seeded(42, MutatorConfig::default());
//!
//! let infos = population.robot_infos();
//! breed_population(&mut population, &infos, &settings, &mut mutator);
//! ```

pub mod breeder;
pub mod error;
pub mod instructions;
pub mod killer;
pub mod mutator;
pub mod population;
pub mod processor;

pub use breeder::{blend_instruction_lists, breed_population, BreederSettings};
pub use error::ConfigError;
pub use instructions::{Instruction, InstructionList};
pub use killer::{kill_robots, RobotKillerSettings};
pub use mutator::{Mutator, MutatorConfig, RandomMutator};
pub use population::{Population, Robot, RobotInfo, RobotName};
pub use processor::{predict, predict_population, Prediction, RobotData, SimpleProcessor};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breed_then_predict_smoke() {
        let mut population = Population::new(20);
        let mut mutator = RandomMutator::seeded(1, MutatorConfig::default());
        let infos = population.robot_infos();

        breed_population(&mut population, &infos, &BreederSettings::default(), &mut mutator);
        population::assert_invariants(&population);

        let data = RobotData::new(vec![vec![0.5, -0.25], vec![1.0, 2.0]]);
        let predictions = predict_population(&population, &data);
        assert_eq!(predictions.len(), 20);
    }
}
