//! Instruction-list crossover.
//!
//! A child program is a prefix of one parent followed by a suffix of the
//! other, with per-instruction skip/insert/mutate gates applied along the
//! way. Each breakpoint is drawn against its own parent's length, which
//! biases child length downward over generations; only the insertion gate
//! pushes back.

// Breakpoint arithmetic intentionally works in the i32 domain of the draws.
#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

use crate::instructions::{Instruction, InstructionList};
use crate::mutator::Mutator;

/// Cross two parent programs into a fresh child program.
///
/// Both breakpoints are drawn up front, before any instruction is copied;
/// the draw order is observable behavior. A breakpoint is `0` for an empty
/// parent (no draw consumed), otherwise `|next_int() mod len|`.
#[must_use]
pub fn blend_instruction_lists<M: Mutator>(
    list1: &InstructionList,
    list2: &InstructionList,
    mutator: &mut M,
) -> InstructionList {
    let break1 = break_point(list1, mutator);
    let break2 = break_point(list2, mutator);

    let mut child = InstructionList::new();
    if !list1.is_empty() {
        copy_block(&mut child, list1, 0, break1, mutator);
    }
    if !list2.is_empty() {
        copy_block(&mut child, list2, break2, list2.len() - 1, mutator);
    }
    child
}

/// Draw a copy boundary within the list's own index range.
///
/// Truncated remainder first, absolute value second; the two commute here,
/// and `unsigned_abs` keeps `i32::MIN` draws defined.
fn break_point<M: Mutator>(list: &InstructionList, mutator: &mut M) -> usize {
    if list.is_empty() {
        return 0;
    }
    let len = list.len() as i32;
    (mutator.next_int() % len).unsigned_abs() as usize
}

/// Copy `source[start..=stop]` into `destination` through the gates.
///
/// A copied Terminator ends the whole block immediately, even if `stop`
/// implies more instructions remain.
fn copy_block<M: Mutator>(
    destination: &mut InstructionList,
    source: &InstructionList,
    start: usize,
    stop: usize,
    mutator: &mut M,
) {
    debug_assert!(start <= stop, "inverted block range {start}..={stop}");
    for index in start..=stop {
        let Some(&instruction) = source.get(index) else {
            break;
        };
        if instruction.is_terminator() {
            break;
        }
        append_with_gates(destination, instruction, mutator);
    }
}

/// Run one copied instruction through the skip, insert, and mutate gates.
///
/// Gate order is fixed: a skipped instruction consumes no further draws; an
/// inserted instruction lands before the copied one; mutation happens last,
/// in place.
fn append_with_gates<M: Mutator>(
    destination: &mut InstructionList,
    mut instruction: Instruction,
    mutator: &mut M,
) {
    if mutator.skip_instruction() {
        return;
    }
    if mutator.allow_new_instruction() {
        destination.push(mutator.random_instruction());
    }
    if mutator.allow_mutation() {
        instruction.mutate(mutator);
    }
    destination.push(instruction);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutator::testing::ScriptedMutator;

    fn list_of(instructions: Vec<Instruction>) -> InstructionList {
        instructions.into_iter().collect()
    }

    #[test]
    fn test_terminator_stops_block_copy() {
        let source = list_of(vec![
            Instruction::IncrementRegister { register: 1 },
            Instruction::TerminateList,
            Instruction::DecrementRegister { register: 2 },
        ]);
        let mut child = InstructionList::new();
        let mut mutator = ScriptedMutator::default();

        copy_block(&mut child, &source, 0, 2, &mut mutator);

        assert_eq!(child.len(), 1);
        assert_eq!(
            child.get(0),
            Some(&Instruction::IncrementRegister { register: 1 })
        );
    }

    #[test]
    fn test_blend_concatenates_prefix_and_suffix() {
        let list1 = list_of(vec![
            Instruction::IncrementRegister { register: 0 },
            Instruction::IncrementRegister { register: 1 },
            Instruction::IncrementRegister { register: 2 },
            Instruction::IncrementRegister { register: 3 },
        ]);
        let list2 = list_of(vec![
            Instruction::DecrementRegister { register: 0 },
            Instruction::DecrementRegister { register: 1 },
        ]);
        // Breakpoints 3 and 1: prefix list1[0..=3], suffix list2[1..=1].
        let mut mutator = ScriptedMutator::with_ints(vec![3, 1]);

        let child = blend_instruction_lists(&list1, &list2, &mut mutator);

        assert_eq!(child.len(), 5);
        for index in 0..4usize {
            assert_eq!(
                child.get(index),
                Some(&Instruction::IncrementRegister {
                    register: index as i32
                })
            );
        }
        assert_eq!(
            child.get(4),
            Some(&Instruction::DecrementRegister { register: 1 })
        );
    }

    #[test]
    fn test_break_point_uses_truncated_remainder() {
        let list = list_of(vec![
            Instruction::IncrementRegister { register: 0 },
            Instruction::IncrementRegister { register: 1 },
            Instruction::IncrementRegister { register: 2 },
        ]);

        let mut mutator = ScriptedMutator::with_ints(vec![-5]);
        assert_eq!(break_point(&list, &mut mutator), 2);

        let mut mutator = ScriptedMutator::with_ints(vec![i32::MIN]);
        assert_eq!(break_point(&list, &mut mutator), 2);

        let mut mutator = ScriptedMutator::with_ints(vec![7]);
        assert_eq!(break_point(&list, &mut mutator), 1);
    }

    #[test]
    fn test_empty_parent_consumes_no_draw() {
        let empty = InstructionList::new();
        let full = list_of(vec![
            Instruction::IncrementRegister { register: 0 },
            Instruction::IncrementRegister { register: 1 },
        ]);
        // One draw scripted: only the non-empty parent's breakpoint uses it.
        let mut mutator = ScriptedMutator::with_ints(vec![1]);

        let child = blend_instruction_lists(&empty, &full, &mut mutator);

        assert!(mutator.ints.is_empty());
        assert_eq!(child.len(), 1);
        assert_eq!(
            child.get(0),
            Some(&Instruction::IncrementRegister { register: 1 })
        );
    }

    #[test]
    fn test_blend_of_two_empty_lists_is_empty() {
        let mut mutator = ScriptedMutator::default();
        let child =
            blend_instruction_lists(&InstructionList::new(), &InstructionList::new(), &mut mutator);
        assert!(child.is_empty());
        assert!(mutator.ints.is_empty());
    }

    #[test]
    fn test_skip_gate_drops_instruction() {
        let source = list_of(vec![
            Instruction::IncrementRegister { register: 0 },
            Instruction::IncrementRegister { register: 1 },
        ]);
        let mut child = InstructionList::new();
        let mut mutator = ScriptedMutator {
            skips: vec![true, false].into(),
            ..ScriptedMutator::default()
        };

        copy_block(&mut child, &source, 0, 1, &mut mutator);

        assert_eq!(child.len(), 1);
        assert_eq!(
            child.get(0),
            Some(&Instruction::IncrementRegister { register: 1 })
        );
    }

    #[test]
    fn test_skipped_instruction_draws_no_other_gates() {
        let source = list_of(vec![Instruction::IncrementRegister { register: 0 }]);
        let mut child = InstructionList::new();
        let mut mutator = ScriptedMutator {
            skips: vec![true].into(),
            insertions: vec![true].into(),
            mutations: vec![true].into(),
            ..ScriptedMutator::default()
        };

        copy_block(&mut child, &source, 0, 0, &mut mutator);

        assert!(child.is_empty());
        // The insert and mutate gates were never consulted.
        assert_eq!(mutator.insertions.len(), 1);
        assert_eq!(mutator.mutations.len(), 1);
    }

    #[test]
    fn test_insertion_gate_prepends_new_instruction() {
        let source = list_of(vec![Instruction::IncrementRegister { register: 0 }]);
        let mut child = InstructionList::new();
        let mut mutator = ScriptedMutator {
            insertions: vec![true].into(),
            instructions: vec![Instruction::ReturnRegister { register: 5 }].into(),
            ..ScriptedMutator::default()
        };

        copy_block(&mut child, &source, 0, 0, &mut mutator);

        assert_eq!(child.len(), 2);
        assert_eq!(
            child.get(0),
            Some(&Instruction::ReturnRegister { register: 5 })
        );
        assert_eq!(
            child.get(1),
            Some(&Instruction::IncrementRegister { register: 0 })
        );
    }

    #[test]
    fn test_mutation_gate_redraws_operands_in_place() {
        let source = list_of(vec![Instruction::IncrementRegister { register: 0 }]);
        let mut child = InstructionList::new();
        let mut mutator = ScriptedMutator {
            mutations: vec![true].into(),
            ints: vec![9].into(),
            ..ScriptedMutator::default()
        };

        copy_block(&mut child, &source, 0, 0, &mut mutator);

        assert_eq!(child.len(), 1);
        assert_eq!(
            child.get(0),
            Some(&Instruction::IncrementRegister { register: 9 })
        );
    }

    #[test]
    fn test_terminator_in_suffix_stops_second_block() {
        let list1 = list_of(vec![Instruction::IncrementRegister { register: 0 }]);
        let list2 = list_of(vec![
            Instruction::DecrementRegister { register: 0 },
            Instruction::TerminateList,
            Instruction::DecrementRegister { register: 1 },
        ]);
        // Breakpoints 0 and 0: the suffix copy runs into the Terminator.
        let mut mutator = ScriptedMutator::with_ints(vec![0, 0]);

        let child = blend_instruction_lists(&list1, &list2, &mut mutator);

        assert_eq!(child.len(), 2);
        assert_eq!(
            child.get(1),
            Some(&Instruction::DecrementRegister { register: 0 })
        );
    }
}
