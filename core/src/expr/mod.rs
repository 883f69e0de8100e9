//! Symbolic expression engine.
//!
//! Provides the tree that relations are written in, plus:
//! - Variable substitution
//! - Numeric evaluation (trigonometry in degrees)
//! - Minimal parenthesization for display

pub mod types;
pub mod evaluator;
pub mod render;

#[cfg(test)]
mod tests;

pub use types::*;
pub use evaluator::{evaluate, substitute, EvalError, EvalResult};
pub use render::{render, Precedence};
