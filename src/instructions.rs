//! Program representation for evolved robots.
//!
//! A robot's executable logic is an [`InstructionList`]: an ordered sequence
//! of [`Instruction`] values interpreted top to bottom by a
//! [`Processor`](crate::processor::Processor). Instructions are plain value
//! types, so copying one never shares state with the original, and every
//! probabilistic decision about them (synthesis, operand mutation) flows
//! through the [`Mutator`](crate::mutator::Mutator) draw stream so that
//! breeding stays reproducible.

mod instruction;
mod list;

pub use instruction::Instruction;
pub use list::InstructionList;
