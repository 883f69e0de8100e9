use crate::expr::{Expr, Variable};
use crate::session::{Bindings, QuickButton};
use serde::{Deserialize, Serialize};

/// An input of an applied relation and the value it had
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GivenValue {
    pub variable: Variable,
    pub value: f64,
}

/// A relation that fired
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedStep {
    pub title: String,
    pub description: String,
    pub given: Vec<GivenValue>,
    pub unknown: Variable,
    /// Formula as written in the catalog
    pub equation: Expr,
    /// Rounded value bound to `unknown`
    pub result: f64,
    /// Formula with the given values substituted
    pub substituted: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    pub message: String,
    pub quick_buttons: Vec<QuickButton>,
}

/// One entry of the solve trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Error { message: String },
    Solved(SolvedStep),
    Hint(Hint),
    Summary { variables: Bindings },
}

impl Step {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn hint(message: impl Into<String>, quick_buttons: Vec<QuickButton>) -> Self {
        Self::Hint(Hint {
            message: message.into(),
            quick_buttons,
        })
    }

    pub fn as_solved(&self) -> Option<&SolvedStep> {
        match self {
            Self::Solved(solved) => Some(solved),
            _ => None,
        }
    }

    pub fn as_hint(&self) -> Option<&Hint> {
        match self {
            Self::Hint(hint) => Some(hint),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error { message } => write!(f, "error: {}", message),
            Self::Solved(s) => write!(
                f,
                "{}: {} = {} = {} = {}",
                s.title, s.unknown.name, s.equation, s.substituted, s.result
            ),
            Self::Hint(hint) => write!(f, "hint: {}", hint.message),
            Self::Summary { variables } => {
                write!(f, "summary:")?;
                for (name, value) in variables {
                    write!(f, " {}={}", name, value)?;
                }
                Ok(())
            }
        }
    }
}
