//! Property-based tests for the breeding pipeline.
//!
//! These tests verify capacity arithmetic, determinism, and culling bounds
//! across randomized settings and seeds.
//! Run with: cargo test --release prop_breeding

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

use std::collections::BTreeSet;

use proptest::prelude::*;

use gens::population::check_invariants;
use gens::{
    breed_population, kill_robots, BreederSettings, MutatorConfig, Population, RandomMutator,
    Robot, RobotKillerSettings,
};

/// Settings with no minimum track record, so any scored robot can parent.
fn open_settings(fraction: f64) -> BreederSettings {
    BreederSettings {
        random_robots_fraction: fraction,
        minimum_outcomes_to_allow_breeding: 1,
        outcomes_between_breeding: 0,
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// An empty population fills to exactly its desired size, whatever the
    /// mandatory random share is.
    #[test]
    fn prop_empty_start_fills_to_capacity(
        desired in 1usize..32,
        fraction in 0.0f64..=1.0,
        seed in any::<u64>()
    ) {
        let settings = open_settings(fraction);
        prop_assert!(settings.validate().is_ok());

        let mut population = Population::new(desired);
        let mut mutator = RandomMutator::seeded(seed, MutatorConfig::default());
        breed_population(&mut population, &[], &settings, &mut mutator);

        prop_assert_eq!(population.current_size(), desired);
        prop_assert!(check_invariants(&population).is_empty());
    }

    /// Freshly drawn robots never exceed the random program length cap.
    #[test]
    fn prop_random_programs_bounded(
        desired in 1usize..24,
        seed in any::<u64>()
    ) {
        let mut population = Population::new(desired);
        let mut mutator = RandomMutator::seeded(seed, MutatorConfig::default());
        breed_population(&mut population, &[], &open_settings(1.0), &mut mutator);

        for robot in &population {
            prop_assert!(
                robot.main_program().len() < 1024,
                "robot {:?} drew {} instructions",
                robot.name(),
                robot.main_program().len()
            );
        }
    }

    /// The same seed reproduces the same population, robot for robot.
    #[test]
    fn prop_breeding_deterministic(
        desired in 1usize..24,
        fraction in 0.0f64..=1.0,
        seed in any::<u64>()
    ) {
        let run = || {
            let mut population = Population::new(desired);
            let mut mutator = RandomMutator::seeded(seed, MutatorConfig::default());
            breed_population(&mut population, &[], &open_settings(fraction), &mut mutator);
            population
        };

        prop_assert_eq!(run(), run());
    }

    /// With no eligible parents the final size is an exact function of the
    /// starting size, the capacity, and the mandatory share.
    #[test]
    fn prop_breed_size_exact_without_parents(
        desired in 1usize..24,
        preexisting in 0usize..32,
        fraction in 0.0f64..=1.0,
        seed in any::<u64>()
    ) {
        let ignore = BTreeSet::new();
        let mut population = Population::new(desired);
        for _ in 0..preexisting {
            population.save(Robot::create_empty(255, &ignore));
        }

        let mut mutator = RandomMutator::seeded(seed, MutatorConfig::default());
        breed_population(&mut population, &[], &open_settings(fraction), &mut mutator);

        let mandatory = (fraction * desired as f64).round_ties_even() as usize;
        let expected = if preexisting >= desired {
            // No breeding space: the pass is a no-op.
            preexisting
        } else {
            desired.max(preexisting + mandatory)
        };
        prop_assert_eq!(population.current_size(), expected);
    }

    /// A robot parents at most once per breeding pass.
    #[test]
    fn prop_parent_at_most_once_per_pass(
        extra_capacity in 1usize..8,
        parents in 2usize..8,
        seed in any::<u64>(),
        weights in prop::collection::vec(0.5f64..10.0, 8)
    ) {
        let ignore = BTreeSet::new();
        let mut population = Population::new(parents + extra_capacity);
        let mut names = Vec::new();
        for weight in weights.iter().take(parents) {
            let mut robot = Robot::create_empty(255, &ignore);
            robot.set_weight(*weight);
            robot.record_outcome(true);
            names.push(population.save(robot));
        }

        let infos = population.robot_infos();
        let mut mutator = RandomMutator::seeded(seed, MutatorConfig::default());
        breed_population(&mut population, &infos, &open_settings(0.0), &mut mutator);

        for name in names {
            let robot = population.lookup(name).unwrap();
            prop_assert!(
                robot.children() <= 1,
                "robot {} recorded {} children in one pass",
                name,
                robot.children()
            );
        }
        prop_assert!(check_invariants(&population).is_empty());
    }

    /// Culling can only shrink a population, and age deaths respect their
    /// quota.
    #[test]
    fn prop_culling_never_grows_population(
        desired in 4usize..24,
        seed in any::<u64>(),
        death_fraction in 0.0f64..=1.0,
        death_probability in 0.0f64..=1.0
    ) {
        let mut population = Population::new(desired);
        let mut mutator = RandomMutator::seeded(seed, MutatorConfig::default());
        breed_population(&mut population, &[], &open_settings(0.5), &mut mutator);

        let settings = RobotKillerSettings {
            maximum_death_by_age: death_fraction,
            probability_of_death_by_age: death_probability,
            maximum_death_by_weight: 0.0,
            protect_best_robots: 0.0,
            kill_non_predicting_robots: false,
            require_symmetrical_robots: false,
            ..Default::default()
        };
        prop_assert!(settings.validate().is_ok());

        let before = population.current_size();
        let infos = population.robot_infos();
        kill_robots(&mut population, &infos, &settings, &mut mutator);
        let after = population.current_size();

        let quota = (death_fraction * before as f64) as usize;
        prop_assert!(after <= before, "culling grew the population");
        prop_assert!(
            before - after <= quota,
            "age deaths {} exceeded quota {}",
            before - after,
            quota
        );
        prop_assert!(check_invariants(&population).is_empty());
    }
}
