//! Culling rules that thin a population between generations.
//!
//! A [`kill_robots`] pass walks a private copy of the selection infos and
//! removes robots from the population in a fixed rule order: the best
//! robots are detached first and survive everything, then the unconditional
//! rules run, then the probabilistic weight and age rules draw one double
//! per quota candidate. Like breeding, the pass is deterministic given the
//! draw sequence.

// Kill quotas are truncating shares of small candidate counts.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use crate::error::ConfigError;
use crate::mutator::Mutator;
use crate::population::{Population, RobotInfo, RobotName};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Parameters for the culling pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotKillerSettings {
    /// Largest share of candidates the age rule may kill per pass.
    pub maximum_death_by_age: f64,
    /// Largest share of candidates the weight rule may kill per pass.
    pub maximum_death_by_weight: f64,
    /// Chance each age-rule candidate actually dies.
    pub probability_of_death_by_age: f64,
    /// Chance each weight-rule candidate actually dies.
    pub probability_of_death_by_weight: f64,
    /// Outcomes a robot must exceed before the weight rule may touch it.
    pub protect_robots_until_outcomes: u64,
    /// Share of desired capacity, by best `|weight|`, exempt from every rule.
    pub protect_best_robots: f64,
    /// Remove robots that have never produced a directional prediction.
    pub kill_non_predicting_robots: bool,
    /// Remove robots that only ever predict one direction.
    pub require_symmetrical_robots: bool,
}

impl Default for RobotKillerSettings {
    fn default() -> Self {
        Self {
            maximum_death_by_age: 0.1,
            maximum_death_by_weight: 0.2,
            probability_of_death_by_age: 0.5,
            probability_of_death_by_weight: 0.5,
            protect_robots_until_outcomes: 100,
            protect_best_robots: 0.02,
            kill_non_predicting_robots: true,
            require_symmetrical_robots: false,
        }
    }
}

impl RobotKillerSettings {
    /// Check that every fraction and probability is usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first field outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::error::ensure_fraction("maximum_death_by_age", self.maximum_death_by_age)?;
        crate::error::ensure_fraction("maximum_death_by_weight", self.maximum_death_by_weight)?;
        crate::error::ensure_fraction(
            "probability_of_death_by_age",
            self.probability_of_death_by_age,
        )?;
        crate::error::ensure_fraction(
            "probability_of_death_by_weight",
            self.probability_of_death_by_weight,
        )?;
        crate::error::ensure_fraction("protect_best_robots", self.protect_best_robots)
    }
}

/// Remove robots from the population according to the culling rules.
///
/// Rule order: detach the protected best, kill non-predicting robots, kill
/// one-sided robots, probabilistic death by worst weight, probabilistic
/// death by age. The caller's `robot_infos` slice is never mutated.
pub fn kill_robots<M: Mutator>(
    population: &mut Population,
    robot_infos: &[RobotInfo],
    settings: &RobotKillerSettings,
    mutator: &mut M,
) {
    let before = population.current_size();
    let mut candidates: Vec<RobotInfo> = robot_infos.to_vec();

    detach_protected_best(population, settings, &mut candidates);

    if settings.kill_non_predicting_robots {
        kill_matching(population, &mut candidates, |info| !info.is_predicting);
    }

    if settings.require_symmetrical_robots {
        kill_matching(population, &mut candidates, |info| {
            info.total_predictions > 0 && info.bias.unsigned_abs() == info.total_predictions
        });
    }

    kill_by_weight(population, settings, &mut candidates, mutator);
    kill_by_age(population, settings, &mut candidates, mutator);

    let removed = before - population.current_size();
    log::debug!("culling pass removed {removed} of {before} robots");
}

/// Drop the top share of candidates by `|weight|` out of the working list,
/// exempting them from every rule that follows.
fn detach_protected_best(
    population: &Population,
    settings: &RobotKillerSettings,
    candidates: &mut Vec<RobotInfo>,
) {
    let count = (settings.protect_best_robots * population.desired_size() as f64) as usize;
    if count == 0 {
        return;
    }
    candidates.sort_by(|a, b| {
        b.weight
            .abs()
            .partial_cmp(&a.weight.abs())
            .unwrap_or(Ordering::Equal)
    });
    candidates.drain(..count.min(candidates.len()));
}

/// Unconditionally remove every candidate matching the predicate.
fn kill_matching<F: Fn(&RobotInfo) -> bool>(
    population: &mut Population,
    candidates: &mut Vec<RobotInfo>,
    predicate: F,
) {
    candidates.retain(|info| {
        if predicate(info) {
            population.remove(info.name);
            false
        } else {
            true
        }
    });
}

/// Probabilistic death for the worst-weighted mature candidates.
fn kill_by_weight<M: Mutator>(
    population: &mut Population,
    settings: &RobotKillerSettings,
    candidates: &mut Vec<RobotInfo>,
    mutator: &mut M,
) {
    let mut mature: Vec<RobotInfo> = candidates
        .iter()
        .filter(|info| info.total_outcomes > settings.protect_robots_until_outcomes)
        .copied()
        .collect();
    mature.sort_by(|a, b| {
        a.weight
            .abs()
            .partial_cmp(&b.weight.abs())
            .unwrap_or(Ordering::Equal)
    });

    let quota = (settings.maximum_death_by_weight * mature.len() as f64) as usize;
    let mut killed: Vec<RobotName> = Vec::new();
    for info in mature.iter().take(quota) {
        if mutator.next_double() < settings.probability_of_death_by_weight {
            population.remove(info.name);
            killed.push(info.name);
        }
    }
    candidates.retain(|info| !killed.contains(&info.name));
}

/// Probabilistic death for the oldest candidates, counted by predictions.
fn kill_by_age<M: Mutator>(
    population: &mut Population,
    settings: &RobotKillerSettings,
    candidates: &mut Vec<RobotInfo>,
    mutator: &mut M,
) {
    candidates.sort_by(|a, b| b.total_predictions.cmp(&a.total_predictions));

    let quota = (settings.maximum_death_by_age * candidates.len() as f64) as usize;
    let mut killed: Vec<RobotName> = Vec::new();
    for info in candidates.iter().take(quota) {
        if mutator.next_double() < settings.probability_of_death_by_age {
            population.remove(info.name);
            killed.push(info.name);
        }
    }
    candidates.retain(|info| !killed.contains(&info.name));
}
