//! The breeding engine that refreshes a population each generation.
//!
//! One [`breed_population`] call runs the whole cycle:
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Mandatory random seed        │
//! ├─────────────────────────────────────┤
//! │  Selection │ Blend │ Gate mutation  │
//! ├─────────────────────────────────────┤
//! │         Random top-off              │
//! └─────────────────────────────────────┘
//! ```
//!
//! Parents are sampled fitness-proportionately without replacement, children
//! are built by [`blend_instruction_lists`], and any capacity still open at
//! the end is filled with fresh random robots.

mod blend;
mod engine;
mod selection;

pub use blend::blend_instruction_lists;
pub use engine::{breed_population, BreederSettings, MAX_RANDOM_INSTRUCTIONS};
