//! The capacity-bounded container of live robots.

use crate::population::info::RobotInfo;
use crate::population::robot::{Robot, RobotName};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Live robot set for one generation, keyed by name.
///
/// Names are handed out sequentially on first save and never reused, so a
/// name uniquely identifies a robot across the population's whole history,
/// including robots long since removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Population {
    generation: u64,
    desired_size: usize,
    next_name: u64,
    robots: BTreeMap<RobotName, Robot>,
}

impl Population {
    /// Empty population with the given target capacity.
    #[must_use]
    pub fn new(desired_size: usize) -> Self {
        Self {
            generation: 0,
            desired_size,
            next_name: 0,
            robots: BTreeMap::new(),
        }
    }

    /// How many breeding cycles this population has been through.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mark the start of the next breeding cycle.
    pub fn advance_generation(&mut self) {
        self.generation += 1;
    }

    /// Target capacity the breeder refills toward.
    #[must_use]
    pub fn desired_size(&self) -> usize {
        self.desired_size
    }

    /// Number of robots currently stored.
    #[must_use]
    pub fn current_size(&self) -> usize {
        self.robots.len()
    }

    /// True if no robots are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    /// True while the population is below its target capacity.
    #[must_use]
    pub fn has_breeding_space(&self) -> bool {
        self.current_size() < self.desired_size
    }

    /// Store a robot, assigning it a fresh name if it has none.
    ///
    /// Saving an already-named robot overwrites the stored copy under that
    /// name; this is how parent bookkeeping updates are persisted.
    pub fn save(&mut self, mut robot: Robot) -> RobotName {
        let name = match robot.name() {
            Some(name) => name,
            None => {
                let name = RobotName::new(self.next_name);
                self.next_name += 1;
                robot.assign_name(name);
                name
            }
        };
        self.robots.insert(name, robot);
        name
    }

    /// The stored robot with this name, if alive.
    #[must_use]
    pub fn lookup(&self, name: RobotName) -> Option<&Robot> {
        self.robots.get(&name)
    }

    /// Mutable access to a stored robot, for scoring and bookkeeping.
    pub fn lookup_mut(&mut self, name: RobotName) -> Option<&mut Robot> {
        self.robots.get_mut(&name)
    }

    /// Remove and return the robot with this name.
    pub fn remove(&mut self, name: RobotName) -> Option<Robot> {
        self.robots.remove(&name)
    }

    /// Selection views for every stored robot, in name order.
    #[must_use]
    pub fn robot_infos(&self) -> Vec<RobotInfo> {
        self.robots.values().filter_map(RobotInfo::new).collect()
    }

    pub(crate) fn next_name(&self) -> u64 {
        self.next_name
    }

    /// Iterate the stored robots in name order.
    pub fn iter(&self) -> btree_map::Values<'_, RobotName, Robot> {
        self.robots.values()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Robot;
    type IntoIter = btree_map::Values<'a, RobotName, Robot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
