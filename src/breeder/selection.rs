//! Fitness-proportionate parent sampling without replacement.

// Exact zero is the documented no-parent total, not a tolerance question.
#![allow(clippy::float_cmp)]

use crate::mutator::Mutator;
use crate::population::RobotInfo;

/// Draw one parent from the working pool, weighted by `|weight|`.
///
/// The winner is removed from the pool, shifting the remainder left, so a
/// second draw in the same breeding attempt cannot pick it again. Returns
/// `None` without consuming a draw when the pool is empty or every weight
/// is zero.
pub(crate) fn select_parent_info<M: Mutator>(
    pool: &mut Vec<RobotInfo>,
    mutator: &mut M,
) -> Option<RobotInfo> {
    if pool.is_empty() {
        return None;
    }
    let total: f64 = pool.iter().map(|info| info.weight.abs()).sum();
    if total == 0.0 {
        return None;
    }

    let target = (total * mutator.next_double()).abs();
    let mut cumulative = 0.0;
    for index in 0..pool.len() {
        cumulative += pool[index].weight.abs();
        if cumulative >= target {
            return Some(pool.remove(index));
        }
    }
    None
}
