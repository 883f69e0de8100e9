//! Expression tree and the builders catalogs are written with.

use serde::{Deserialize, Serialize};

/// A named quantity with an optional display unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Variable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: None,
        }
    }

    pub fn with_unit(name: &str, unit: &str) -> Self {
        Self {
            name: name.to_string(),
            unit: Some(unit.to_string()),
        }
    }

    /// Leaf expression referencing this variable
    pub fn expr(&self) -> Expr {
        Expr::Variable(self.clone())
    }
}

/// Single-argument functions. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Atan,
    /// Acute angle to the nearest axis
    Reference,
}

impl Function {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Atan => "atan",
            Self::Reference => "ref",
        }
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Expr {
    /// Numeric literal, optionally labelled with a unit
    Literal {
        value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
    /// Reference to a named quantity
    Variable(Variable),
    Sum { terms: Vec<Expr> },
    Product { factors: Vec<Expr> },
    Sub { left: Box<Expr>, right: Box<Expr> },
    Divide { left: Box<Expr>, right: Box<Expr> },
    Sqrt { operand: Box<Expr> },
    /// Integer power; the exponent is part of the tree, not an expression
    Pow { base: Box<Expr>, exponent: i32 },
    /// Explicit grouping, transparent to evaluation
    Paren { inner: Box<Expr> },
    Call { function: Function, arg: Box<Expr> },
}

impl Expr {
    /// Names of all variables referenced, in first-occurrence order
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Literal { .. } => {}
            Expr::Variable(var) => {
                if !names.contains(&var.name.as_str()) {
                    names.push(&var.name);
                }
            }
            Expr::Sum { terms: children } | Expr::Product { factors: children } => {
                for child in children {
                    child.collect_variables(names);
                }
            }
            Expr::Sub { left, right } | Expr::Divide { left, right } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
            Expr::Sqrt { operand: inner }
            | Expr::Pow { base: inner, .. }
            | Expr::Paren { inner }
            | Expr::Call { arg: inner, .. } => inner.collect_variables(names),
        }
    }

    /// True when no variable leaves remain
    pub fn is_ground(&self) -> bool {
        self.variables().is_empty()
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Expr::Variable(var)
    }
}

impl From<&Variable> for Expr {
    fn from(var: &Variable) -> Self {
        Expr::Variable(var.clone())
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        literal(value)
    }
}

pub fn literal(value: f64) -> Expr {
    Expr::Literal { value, unit: None }
}

pub fn literal_with_unit(value: f64, unit: &str) -> Expr {
    Expr::Literal {
        value,
        unit: Some(unit.to_string()),
    }
}

pub fn variable(name: &str) -> Expr {
    Expr::Variable(Variable::new(name))
}

pub fn variable_with_unit(name: &str, unit: &str) -> Expr {
    Expr::Variable(Variable::with_unit(name, unit))
}

pub fn sum<I>(terms: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Expr::Sum {
        terms: terms.into_iter().map(Into::into).collect(),
    }
}

pub fn product<I>(factors: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Expr::Product {
        factors: factors.into_iter().map(Into::into).collect(),
    }
}

pub fn sub(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::Sub {
        left: Box::new(left.into()),
        right: Box::new(right.into()),
    }
}

pub fn divide(left: impl Into<Expr>, right: impl Into<Expr>) -> Expr {
    Expr::Divide {
        left: Box::new(left.into()),
        right: Box::new(right.into()),
    }
}

pub fn sqrt(operand: impl Into<Expr>) -> Expr {
    Expr::Sqrt {
        operand: Box::new(operand.into()),
    }
}

pub fn pow(base: impl Into<Expr>, exponent: i32) -> Expr {
    Expr::Pow {
        base: Box::new(base.into()),
        exponent,
    }
}

pub fn paren(inner: impl Into<Expr>) -> Expr {
    Expr::Paren {
        inner: Box::new(inner.into()),
    }
}

fn call(function: Function, arg: impl Into<Expr>) -> Expr {
    Expr::Call {
        function,
        arg: Box::new(arg.into()),
    }
}

pub fn sin(arg: impl Into<Expr>) -> Expr {
    call(Function::Sin, arg)
}

pub fn cos(arg: impl Into<Expr>) -> Expr {
    call(Function::Cos, arg)
}

pub fn tan(arg: impl Into<Expr>) -> Expr {
    call(Function::Tan, arg)
}

pub fn atan(arg: impl Into<Expr>) -> Expr {
    call(Function::Atan, arg)
}

pub fn reference_angle(arg: impl Into<Expr>) -> Expr {
    call(Function::Reference, arg)
}
