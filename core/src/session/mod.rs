//! Session state and its single-line text encoding.
//!
//! A session is the set of imported catalogs, active solver hints and known
//! variable bindings. It travels between the UI and the solver as text like
//! `!kinematics @no-implicit ax=0 t=2`.

pub mod types;
pub mod codec;


pub use types::{Bindings, QuickButton, Session};
pub use codec::{parse_script, rewrite_script, ParsedScript, ScriptError};
