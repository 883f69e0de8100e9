//! Forward-chaining solver.
//!
//! Repeatedly applies the first applicable relation from the imported
//! families, falling back to implicit defaults, until nothing changes. The
//! ordered step trace is the only output.

pub mod step;
pub mod engine;

#[cfg(test)]
mod tests;

pub use step::{GivenValue, Hint, SolvedStep, Step};
pub use engine::{round_result, solve, SolveError, SolveResult, Solver, NO_IMPLICIT};
