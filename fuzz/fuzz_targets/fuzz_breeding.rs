#![no_main]

use arbitrary::Arbitrary;
use gens::population::check_invariants;
use gens::{
    breed_population, kill_robots, BreederSettings, MutatorConfig, Population, RandomMutator,
    RobotKillerSettings,
};
use libfuzzer_sys::fuzz_target;

/// Structured input for whole-cycle fuzzing.
#[derive(Arbitrary, Debug)]
struct BreedingInput {
    /// Seed for every random draw in the cycle.
    seed: u64,
    /// Desired population size (capped).
    desired: u8,
    /// Breeding and culling rounds to run (capped).
    rounds: u8,
    /// Mandatory random share, in percent.
    random_share: u8,
    /// Age culling quota, in percent.
    death_by_age: u8,
    /// Weight culling quota, in percent.
    death_by_weight: u8,
    /// Scoring stream: per-robot outcome flags.
    outcomes: Vec<bool>,
}

fuzz_target!(|input: BreedingInput| {
    let desired = usize::from(input.desired % 48).max(1);
    let rounds = usize::from(input.rounds % 4) + 1;
    let random_share = f64::from(input.random_share % 101) / 100.0;

    let settings = BreederSettings {
        random_robots_fraction: random_share,
        minimum_outcomes_to_allow_breeding: 1,
        outcomes_between_breeding: 0,
        ..Default::default()
    };
    let killer = RobotKillerSettings {
        maximum_death_by_age: f64::from(input.death_by_age % 101) / 100.0,
        maximum_death_by_weight: f64::from(input.death_by_weight % 101) / 100.0,
        protect_robots_until_outcomes: 0,
        kill_non_predicting_robots: false,
        require_symmetrical_robots: false,
        ..Default::default()
    };
    assert!(settings.validate().is_ok());
    assert!(killer.validate().is_ok());

    let mandatory = (random_share * desired as f64).round_ties_even() as usize;
    let mut population = Population::new(desired);
    let mut mutator = RandomMutator::seeded(input.seed, MutatorConfig::default());
    let mut outcomes = input.outcomes.iter().copied().cycle();

    for _ in 0..rounds {
        let infos = population.robot_infos();
        breed_population(&mut population, &infos, &settings, &mut mutator);
        assert!(
            population.current_size() <= desired + mandatory,
            "population {} grew past the overfill bound {}",
            population.current_size(),
            desired + mandatory
        );

        // Score every robot from the arbitrary outcome stream
        let names: Vec<_> = population
            .robot_infos()
            .iter()
            .map(|info| info.name)
            .collect();
        for name in names {
            let outcome = outcomes.next().unwrap_or(true);
            if let Some(robot) = population.lookup_mut(name) {
                robot.set_weight(if outcome { 1.0 } else { -1.0 });
                robot.record_outcome(outcome);
            }
        }

        let infos = population.robot_infos();
        kill_robots(&mut population, &infos, &killer, &mut mutator);

        let violations = check_invariants(&population);
        assert!(violations.is_empty(), "invariants violated: {violations:?}");
        population.advance_generation();
    }
});
