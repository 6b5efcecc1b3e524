#![no_main]

use std::collections::BTreeSet;

use arbitrary::Arbitrary;
use gens::{
    blend_instruction_lists, predict, Instruction, InstructionList, Mutator, MutatorConfig,
    RandomMutator, Robot, RobotData,
};
use libfuzzer_sys::fuzz_target;

/// Structured input for program blending.
#[derive(Arbitrary, Debug)]
struct BlendInput {
    /// Seed for the drawing mutator.
    seed: u64,
    /// Length of the first parent program (capped).
    left_len: u16,
    /// Length of the second parent program (capped).
    right_len: u16,
    /// Data cells the child program may read.
    cells: Vec<f64>,
}

/// Draw `len` random instructions through the mutator.
fn random_program<M: Mutator>(len: usize, mutator: &mut M) -> InstructionList {
    (0..len).map(|_| Instruction::random(mutator)).collect()
}

fuzz_target!(|input: BlendInput| {
    // Cap program lengths to keep a single run cheap
    let left_len = usize::from(input.left_len).min(2048);
    let right_len = usize::from(input.right_len).min(2048);

    let mut mutator = RandomMutator::seeded(input.seed, MutatorConfig::default());
    let left = random_program(left_len, &mut mutator);
    let right = random_program(right_len, &mut mutator);

    // Blending must not panic, and a replay from the same draw state must
    // agree with the first run
    let mut replay = mutator.clone();
    let child = blend_instruction_lists(&left, &right, &mut mutator);
    let again = blend_instruction_lists(&left, &right, &mut replay);
    assert_eq!(
        child, again,
        "blend must be a pure function of the draw stream"
    );

    // Each copied slot can gain at most one inserted instruction
    assert!(
        child.len() <= 2 * (left.len() + right.len()),
        "child length {} exceeds the blend bound",
        child.len()
    );

    // The child must execute cleanly, whatever the data looks like
    let mut cells = input.cells;
    cells.truncate(64);
    let data = RobotData::new(vec![cells]);
    let ignore = BTreeSet::new();
    let mut robot = Robot::create_empty(16, &ignore);
    robot.set_main_program(child);
    let _ = predict(&robot, &data);
});
