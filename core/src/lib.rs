pub mod expr;
pub mod families;
pub mod session;
pub mod solver;

pub use session::{rewrite_script, Bindings, QuickButton, Session};
pub use solver::{solve, SolveError, Solver, Step};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
