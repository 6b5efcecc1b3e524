//! The closed instruction set for robot programs.
//!
//! Operands are raw entropy draws: `i32` selectors and `f64` immediates in
//! `[0, 1)`. Selectors are mapped onto concrete register/column/offset
//! ranges by the processor at execution time, so mutation can redraw them
//! without any range knowledge.

// Division tests for exactly zero to implement protected division
#![allow(clippy::float_cmp)]

use crate::mutator::Mutator;
use crate::processor::{Processor, Step};
use serde::{Deserialize, Serialize};

/// Number of instruction variants `random` chooses between.
const VARIANT_COUNT: u32 = 12;

/// A single program step.
///
/// Every variant supports in-place operand mutation, deep copy (`Copy`; no
/// variant holds shared state), and execution against a [`Processor`].
/// [`Instruction::TerminateList`] is the sentinel that halts both execution
/// and any list-copy traversal that encounters it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    // === Immediate and register moves ===
    /// Write an immediate value into a register.
    MoveDoubleToRegister {
        /// Immediate value, drawn from `[0, 1)`.
        value: f64,
        /// Destination register selector.
        register: i32,
    },
    /// Copy one register's value into another.
    MoveRegisterToRegister {
        /// Source register selector.
        source: i32,
        /// Destination register selector.
        destination: i32,
    },
    /// Exchange the values of two registers.
    SwapRegisters {
        /// First register selector.
        first: i32,
        /// Second register selector.
        second: i32,
    },

    // === Register arithmetic ===
    /// Add 1.0 to a register.
    IncrementRegister {
        /// Register selector.
        register: i32,
    },
    /// Subtract 1.0 from a register.
    DecrementRegister {
        /// Register selector.
        register: i32,
    },
    /// Add the source register into the destination register.
    AddRegisters {
        /// Source register selector.
        source: i32,
        /// Destination register selector.
        destination: i32,
    },
    /// Subtract the source register from the destination register.
    SubtractRegisters {
        /// Source register selector.
        source: i32,
        /// Destination register selector.
        destination: i32,
    },
    /// Multiply the destination register by the source register.
    MultiplyRegisters {
        /// Source register selector.
        source: i32,
        /// Destination register selector.
        destination: i32,
    },
    /// Divide the destination register by the source register
    /// (protected: division by 0 writes 0).
    DivideRegisters {
        /// Source register selector (divisor).
        source: i32,
        /// Destination register selector (dividend and result).
        destination: i32,
    },

    // === Data access ===
    /// Read one cell of the input data table into a register.
    MoveDataToRegister {
        /// Column selector.
        column: i32,
        /// Offset selector (rows back from the newest row).
        offset: i32,
        /// Destination register selector.
        register: i32,
    },

    // === Control ===
    /// Halt execution and report a register's value as the result.
    ReturnRegister {
        /// Register selector.
        register: i32,
    },
    /// Sentinel: halt execution with no result, and stop any list-copy
    /// traversal that reaches it.
    TerminateList,
}

impl Instruction {
    /// Synthesize a uniformly chosen variant with freshly drawn operands.
    ///
    /// The Terminator is one of the choices; that is how sentinels enter
    /// evolved programs.
    #[must_use]
    pub fn random<M: Mutator>(mutator: &mut M) -> Self {
        match mutator.next_int().unsigned_abs() % VARIANT_COUNT {
            0 => Self::MoveDoubleToRegister {
                value: mutator.next_double(),
                register: mutator.next_int(),
            },
            1 => Self::MoveRegisterToRegister {
                source: mutator.next_int(),
                destination: mutator.next_int(),
            },
            2 => Self::SwapRegisters {
                first: mutator.next_int(),
                second: mutator.next_int(),
            },
            3 => Self::IncrementRegister {
                register: mutator.next_int(),
            },
            4 => Self::DecrementRegister {
                register: mutator.next_int(),
            },
            5 => Self::AddRegisters {
                source: mutator.next_int(),
                destination: mutator.next_int(),
            },
            6 => Self::SubtractRegisters {
                source: mutator.next_int(),
                destination: mutator.next_int(),
            },
            7 => Self::MultiplyRegisters {
                source: mutator.next_int(),
                destination: mutator.next_int(),
            },
            8 => Self::DivideRegisters {
                source: mutator.next_int(),
                destination: mutator.next_int(),
            },
            9 => Self::MoveDataToRegister {
                column: mutator.next_int(),
                offset: mutator.next_int(),
                register: mutator.next_int(),
            },
            10 => Self::ReturnRegister {
                register: mutator.next_int(),
            },
            _ => Self::TerminateList,
        }
    }

    /// Redraw this instruction's operands in place.
    ///
    /// The variant identity never changes; the Terminator has no operands
    /// and consumes no draws.
    pub fn mutate<M: Mutator>(&mut self, mutator: &mut M) {
        match self {
            Self::MoveDoubleToRegister { value, register } => {
                *value = mutator.next_double();
                *register = mutator.next_int();
            }
            Self::MoveRegisterToRegister {
                source,
                destination,
            }
            | Self::AddRegisters {
                source,
                destination,
            }
            | Self::SubtractRegisters {
                source,
                destination,
            }
            | Self::MultiplyRegisters {
                source,
                destination,
            }
            | Self::DivideRegisters {
                source,
                destination,
            } => {
                *source = mutator.next_int();
                *destination = mutator.next_int();
            }
            Self::SwapRegisters { first, second } => {
                *first = mutator.next_int();
                *second = mutator.next_int();
            }
            Self::IncrementRegister { register }
            | Self::DecrementRegister { register }
            | Self::ReturnRegister { register } => {
                *register = mutator.next_int();
            }
            Self::MoveDataToRegister {
                column,
                offset,
                register,
            } => {
                *column = mutator.next_int();
                *offset = mutator.next_int();
                *register = mutator.next_int();
            }
            Self::TerminateList => {}
        }
    }

    /// Execute this instruction against a processor.
    ///
    /// Returns [`Step::Halt`] for the Terminator and for `ReturnRegister`
    /// (after reporting the result), [`Step::Continue`] otherwise.
    pub fn execute<P: Processor>(&self, processor: &mut P) -> Step {
        match *self {
            Self::MoveDoubleToRegister { value, register } => {
                processor.set_register(register, value);
                Step::Continue
            }
            Self::MoveRegisterToRegister {
                source,
                destination,
            } => {
                let value = processor.register(source);
                processor.set_register(destination, value);
                Step::Continue
            }
            Self::SwapRegisters { first, second } => {
                let a = processor.register(first);
                let b = processor.register(second);
                processor.set_register(first, b);
                processor.set_register(second, a);
                Step::Continue
            }
            Self::IncrementRegister { register } => {
                let value = processor.register(register);
                processor.set_register(register, value + 1.0);
                Step::Continue
            }
            Self::DecrementRegister { register } => {
                let value = processor.register(register);
                processor.set_register(register, value - 1.0);
                Step::Continue
            }
            Self::AddRegisters {
                source,
                destination,
            } => {
                let value = processor.register(destination) + processor.register(source);
                processor.set_register(destination, value);
                Step::Continue
            }
            Self::SubtractRegisters {
                source,
                destination,
            } => {
                let value = processor.register(destination) - processor.register(source);
                processor.set_register(destination, value);
                Step::Continue
            }
            Self::MultiplyRegisters {
                source,
                destination,
            } => {
                let value = processor.register(destination) * processor.register(source);
                processor.set_register(destination, value);
                Step::Continue
            }
            Self::DivideRegisters {
                source,
                destination,
            } => {
                let divisor = processor.register(source);
                let value = if divisor == 0.0 {
                    0.0
                } else {
                    processor.register(destination) / divisor
                };
                processor.set_register(destination, value);
                Step::Continue
            }
            Self::MoveDataToRegister {
                column,
                offset,
                register,
            } => {
                let value = processor.data(column, offset);
                processor.set_register(register, value);
                Step::Continue
            }
            Self::ReturnRegister { register } => {
                let value = processor.register(register);
                processor.finish(value);
                Step::Halt
            }
            Self::TerminateList => Step::Halt,
        }
    }

    /// Whether this instruction is the list-terminating sentinel.
    #[must_use]
    pub fn is_terminator(&self) -> bool {
        matches!(self, Self::TerminateList)
    }
}
