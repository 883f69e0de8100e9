//! Relation catalogs ("families").
//!
//! A family is read-only data: relations that derive one variable from
//! others, implicit default values, and warning generators that inspect the
//! user's bindings before solving.

pub mod types;
pub mod registry;
pub mod kinematics;
pub mod slopes;
pub mod unit_circle;


pub use types::{CatalogError, Family, PredicateWarning, Relation, Warning, WarningGenerator};
pub use registry::{builtin_registry, FamilyRegistry};
