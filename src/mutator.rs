//! The entropy source behind every probabilistic breeding decision.
//!
//! All randomness flows through a single [`Mutator`] handle held mutably for
//! the duration of a breeding or culling pass. The draw order is therefore
//! part of observable behavior: two runs over the same population with the
//! same draw sequence produce the same robots.

use crate::error::ConfigError;
use crate::instructions::Instruction;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

/// Sequential, stateful supplier of randomness and gated decisions.
///
/// Every method is a side-effecting draw, never idempotent. Integer draws
/// cover the full signed range; double draws lie in `[0, 1)`.
pub trait Mutator {
    /// Draw the next integer from the stream.
    fn next_int(&mut self) -> i32;

    /// Draw the next double in `[0, 1)`.
    fn next_double(&mut self) -> f64;

    /// Gate draw: drop the instruction currently being copied?
    fn skip_instruction(&mut self) -> bool;

    /// Gate draw: mutate the instruction currently being copied in place?
    fn allow_mutation(&mut self) -> bool;

    /// Gate draw: splice a brand-new instruction in before the current one?
    fn allow_new_instruction(&mut self) -> bool;

    /// Synthesize one fully randomized instruction.
    fn random_instruction(&mut self) -> Instruction
    where
        Self: Sized,
    {
        Instruction::random(self)
    }
}

/// Gate probabilities for [`RandomMutator`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MutatorConfig {
    /// Probability of dropping an instruction during a list copy.
    pub skip_instruction_rate: f64,
    /// Probability of mutating a copied instruction's operands.
    pub mutation_rate: f64,
    /// Probability of splicing a new random instruction into a copy.
    pub new_instruction_rate: f64,
}

impl Default for MutatorConfig {
    fn default() -> Self {
        Self {
            skip_instruction_rate: 0.1,
            mutation_rate: 0.05,
            new_instruction_rate: 0.1,
        }
    }
}

impl MutatorConfig {
    /// Check that every rate is a valid probability.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first rate outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::error::ensure_fraction("skip_instruction_rate", self.skip_instruction_rate)?;
        crate::error::ensure_fraction("mutation_rate", self.mutation_rate)?;
        crate::error::ensure_fraction("new_instruction_rate", self.new_instruction_rate)
    }
}

/// Production [`Mutator`] over any [`Rng`].
///
/// Gate draws use `gen_bool` against the configured rates, so the rates must
/// be valid probabilities; [`MutatorConfig::validate`] checks them up front.
#[derive(Debug, Clone)]
pub struct RandomMutator<R> {
    rng: R,
    config: MutatorConfig,
}

impl<R: Rng> RandomMutator<R> {
    /// Wrap an RNG with the given gate configuration.
    #[must_use]
    pub fn new(rng: R, config: MutatorConfig) -> Self {
        Self { rng, config }
    }
}

impl RandomMutator<SmallRng> {
    /// Deterministic mutator from a seed, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64, config: MutatorConfig) -> Self {
        Self::new(SmallRng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> Mutator for RandomMutator<R> {
    fn next_int(&mut self) -> i32 {
        self.rng.r#gen()
    }

    fn next_double(&mut self) -> f64 {
        self.rng.r#gen()
    }

    fn skip_instruction(&mut self) -> bool {
        self.rng.gen_bool(self.config.skip_instruction_rate)
    }

    fn allow_mutation(&mut self) -> bool {
        self.rng.gen_bool(self.config.mutation_rate)
    }

    fn allow_new_instruction(&mut self) -> bool {
        self.rng.gen_bool(self.config.new_instruction_rate)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted draws for exact-behavior tests.

    use super::Mutator;
    use crate::instructions::Instruction;
    use std::collections::VecDeque;

    /// Mutator whose every draw is scripted.
    ///
    /// Exhausted queues fall back to fixed defaults (0, 0.0, `false`,
    /// `TerminateList`), keeping tests deterministic without scripting
    /// every draw.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedMutator {
        pub(crate) ints: VecDeque<i32>,
        pub(crate) doubles: VecDeque<f64>,
        pub(crate) skips: VecDeque<bool>,
        pub(crate) mutations: VecDeque<bool>,
        pub(crate) insertions: VecDeque<bool>,
        pub(crate) instructions: VecDeque<Instruction>,
    }

    impl ScriptedMutator {
        pub(crate) fn with_ints(ints: Vec<i32>) -> Self {
            Self {
                ints: ints.into(),
                ..Self::default()
            }
        }

        pub(crate) fn with_doubles(doubles: Vec<f64>) -> Self {
            Self {
                doubles: doubles.into(),
                ..Self::default()
            }
        }
    }

    impl Mutator for ScriptedMutator {
        fn next_int(&mut self) -> i32 {
            self.ints.pop_front().unwrap_or(0)
        }

        fn next_double(&mut self) -> f64 {
            self.doubles.pop_front().unwrap_or(0.0)
        }

        fn skip_instruction(&mut self) -> bool {
            self.skips.pop_front().unwrap_or(false)
        }

        fn allow_mutation(&mut self) -> bool {
            self.mutations.pop_front().unwrap_or(false)
        }

        fn allow_new_instruction(&mut self) -> bool {
            self.insertions.pop_front().unwrap_or(false)
        }

        fn random_instruction(&mut self) -> Instruction {
            self.instructions
                .pop_front()
                .unwrap_or(Instruction::TerminateList)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_double_in_unit_interval() {
        let mut mutator = RandomMutator::seeded(7, MutatorConfig::default());
        for _ in 0..1000 {
            let value = mutator.next_double();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_gates_honor_extreme_rates() {
        let always = MutatorConfig {
            skip_instruction_rate: 1.0,
            mutation_rate: 1.0,
            new_instruction_rate: 1.0,
        };
        let mut mutator = RandomMutator::seeded(1, always);
        for _ in 0..100 {
            assert!(mutator.skip_instruction());
            assert!(mutator.allow_mutation());
            assert!(mutator.allow_new_instruction());
        }

        let never = MutatorConfig {
            skip_instruction_rate: 0.0,
            mutation_rate: 0.0,
            new_instruction_rate: 0.0,
        };
        let mut mutator = RandomMutator::seeded(1, never);
        for _ in 0..100 {
            assert!(!mutator.skip_instruction());
            assert!(!mutator.allow_mutation());
            assert!(!mutator.allow_new_instruction());
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = RandomMutator::seeded(99, MutatorConfig::default());
        let mut b = RandomMutator::seeded(99, MutatorConfig::default());
        for _ in 0..100 {
            assert_eq!(a.next_int(), b.next_int());
        }
        assert!((a.next_double() - b.next_double()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_config_validation() {
        assert!(MutatorConfig::default().validate().is_ok());

        let bad = MutatorConfig {
            skip_instruction_rate: 1.5,
            ..MutatorConfig::default()
        };
        assert!(bad.validate().is_err());

        let nan = MutatorConfig {
            mutation_rate: f64::NAN,
            ..MutatorConfig::default()
        };
        assert!(nan.validate().is_err());
    }
}
