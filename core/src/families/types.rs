//! Core catalog types.

use crate::expr::{Expr, Variable};
use crate::session::{Bindings, QuickButton};
use thiserror::Error;

/// Catalog construction errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Family '{0}' already exists")]
    DuplicateFamily(String),

    #[error("Relation \"{relation}\" in '{family}' takes its own output {variable}")]
    OutputAmongInputs {
        family: String,
        relation: String,
        variable: String,
    },

    #[error("Relation \"{relation}\" in '{family}' references undeclared input {variable}")]
    UndeclaredInput {
        family: String,
        relation: String,
        variable: String,
    },
}

/// One directed rule: compute `gives` from `takes` via `formula`
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub title: String,
    pub description: String,
    pub takes: Vec<Variable>,
    pub gives: Variable,
    pub formula: Expr,
    /// Current values required before this relation may fire
    pub presumes: Bindings,
}

impl Relation {
    pub fn new(title: &str, description: &str, takes: &[&Variable], gives: &Variable, formula: Expr) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            takes: takes.iter().map(|&v| v.clone()).collect(),
            gives: gives.clone(),
            formula,
            presumes: Bindings::new(),
        }
    }

    pub fn presuming(mut self, name: &str, value: f64) -> Self {
        self.presumes.insert(name.to_string(), value);
        self
    }

    /// Output unknown, every input known, every presumption met
    pub fn is_applicable(&self, variables: &Bindings) -> bool {
        !variables.contains_key(&self.gives.name)
            && self.takes.iter().all(|v| variables.contains_key(&v.name))
            && self
                .presumes
                .iter()
                .all(|(name, required)| variables.get(name) == Some(required))
    }
}

/// Message plus suggested fixes produced by a warning generator
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub text: String,
    pub actions: Vec<QuickButton>,
}

/// A check over the user's bindings, run once before solving.
pub trait WarningGenerator: Send + Sync {
    /// Stable identifier; `ignore-<id>` bypasses the check
    fn id(&self) -> &str;

    fn check(&self, variables: &Bindings) -> Option<Warning>;

    fn bypass_hint(&self) -> String {
        format!("ignore-{}", self.id())
    }
}

/// Warning generator backed by a plain function
pub struct PredicateWarning {
    id: &'static str,
    predicate: fn(&Bindings) -> Option<Warning>,
}

impl PredicateWarning {
    pub fn new(id: &'static str, predicate: fn(&Bindings) -> Option<Warning>) -> Self {
        Self { id, predicate }
    }
}

impl WarningGenerator for PredicateWarning {
    fn id(&self) -> &str {
        self.id
    }

    fn check(&self, variables: &Bindings) -> Option<Warning> {
        (self.predicate)(variables)
    }
}

impl std::fmt::Debug for dyn WarningGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WarningGenerator({})", self.id())
    }
}

/// A named catalog
#[derive(Debug)]
pub struct Family {
    pub name: String,
    pub relations: Vec<Relation>,
    /// Default values, in declaration order
    pub implicits: Vec<(String, f64)>,
    pub warnings: Vec<Box<dyn WarningGenerator>>,
}

impl Family {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            relations: Vec::new(),
            implicits: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn with_relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn with_implicit(mut self, name: &str, value: f64) -> Self {
        self.implicits.push((name.to_string(), value));
        self
    }

    pub fn with_warning(mut self, warning: impl WarningGenerator + 'static) -> Self {
        self.warnings.push(Box::new(warning));
        self
    }

    /// Hint tokens that bypass this family's warnings
    pub fn bypass_hints(&self) -> impl Iterator<Item = String> + '_ {
        self.warnings.iter().map(|w| w.bypass_hint())
    }

    /// Check that no relation takes its own output and that every formula
    /// only references declared inputs.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for relation in &self.relations {
            if relation.takes.iter().any(|v| v.name == relation.gives.name) {
                return Err(CatalogError::OutputAmongInputs {
                    family: self.name.clone(),
                    relation: relation.title.clone(),
                    variable: relation.gives.name.clone(),
                });
            }

            for name in relation.formula.variables() {
                if !relation.takes.iter().any(|v| v.name == name) {
                    return Err(CatalogError::UndeclaredInput {
                        family: self.name.clone(),
                        relation: relation.title.clone(),
                        variable: name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
