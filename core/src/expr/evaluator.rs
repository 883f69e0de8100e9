//! Substitution and numeric evaluation.

use super::types::{Expr, Function};
use std::collections::BTreeMap;
use thiserror::Error;

/// Evaluation error
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    /// Substitution hit a name with no binding
    #[error("variable {0} not found when substituting")]
    UnboundVariable(String),
    /// Evaluation reached a variable leaf
    #[error("attempted to evaluate variable {0}, substitution must be done first")]
    UnsubstitutedVariable(String),
    /// Reference angle of an angle lying on an axis
    #[error("reference angle is undefined for {0} degrees")]
    AxisAngle(f64),
}

pub type EvalResult<T> = Result<T, EvalError>;

/// Replace every variable leaf with a literal of its bound value.
///
/// The literal keeps the variable's unit label. The result is variable-free.
pub fn substitute(expr: &Expr, bindings: &BTreeMap<String, f64>) -> EvalResult<Expr> {
    let rebuild = |child: &Expr| substitute(child, bindings).map(Box::new);

    Ok(match expr {
        Expr::Literal { .. } => expr.clone(),
        Expr::Variable(var) => {
            let value = bindings
                .get(&var.name)
                .copied()
                .ok_or_else(|| EvalError::UnboundVariable(var.name.clone()))?;
            Expr::Literal {
                value,
                unit: var.unit.clone(),
            }
        }
        Expr::Sum { terms } => Expr::Sum {
            terms: terms
                .iter()
                .map(|e| substitute(e, bindings))
                .collect::<EvalResult<_>>()?,
        },
        Expr::Product { factors } => Expr::Product {
            factors: factors
                .iter()
                .map(|e| substitute(e, bindings))
                .collect::<EvalResult<_>>()?,
        },
        Expr::Sub { left, right } => Expr::Sub {
            left: rebuild(left)?,
            right: rebuild(right)?,
        },
        Expr::Divide { left, right } => Expr::Divide {
            left: rebuild(left)?,
            right: rebuild(right)?,
        },
        Expr::Sqrt { operand } => Expr::Sqrt {
            operand: rebuild(operand)?,
        },
        Expr::Pow { base, exponent } => Expr::Pow {
            base: rebuild(base)?,
            exponent: *exponent,
        },
        Expr::Paren { inner } => Expr::Paren {
            inner: rebuild(inner)?,
        },
        Expr::Call { function, arg } => Expr::Call {
            function: *function,
            arg: rebuild(arg)?,
        },
    })
}

/// Reduce a variable-free expression to a number.
pub fn evaluate(expr: &Expr) -> EvalResult<f64> {
    match expr {
        Expr::Literal { value, .. } => Ok(*value),
        Expr::Variable(var) => Err(EvalError::UnsubstitutedVariable(var.name.clone())),
        Expr::Sum { terms } => terms
            .iter()
            .try_fold(0.0, |acc, e| -> EvalResult<f64> { Ok(acc + evaluate(e)?) }),
        Expr::Product { factors } => factors
            .iter()
            .try_fold(1.0, |acc, e| -> EvalResult<f64> { Ok(acc * evaluate(e)?) }),
        Expr::Sub { left, right } => {
            let l = evaluate(left)?;
            let r = evaluate(right)?;
            Ok(l - r)
        }
        Expr::Divide { left, right } => {
            let l = evaluate(left)?;
            let r = evaluate(right)?;
            Ok(l / r)
        }
        Expr::Sqrt { operand } => Ok(evaluate(operand)?.sqrt()),
        Expr::Pow { base, exponent } => Ok(evaluate(base)?.powi(*exponent)),
        Expr::Paren { inner } => evaluate(inner),
        Expr::Call { function, arg } => {
            let val = evaluate(arg)?;
            match function {
                Function::Sin => Ok(val.to_radians().sin()),
                Function::Cos => Ok(val.to_radians().cos()),
                Function::Tan => Ok(val.to_radians().tan()),
                Function::Atan => Ok(val.atan().to_degrees()),
                Function::Reference => reference_angle(val),
            }
        }
    }
}

/// Wrap an angle in degrees into [0, 360)
pub fn wrap_angle(degrees: f64) -> f64 {
    degrees.rem_euclid(360.0)
}

/// Acute angle between `degrees` and the next axis.
///
/// Angles landing exactly on an axis belong to no quadrant and are rejected.
pub fn reference_angle(degrees: f64) -> EvalResult<f64> {
    let inner = wrap_angle(degrees);

    let axis = if inner > 0.0 && inner < 90.0 {
        90.0
    } else if inner > 90.0 && inner < 180.0 {
        180.0
    } else if inner > 180.0 && inner < 270.0 {
        270.0
    } else if inner > 270.0 && inner < 360.0 {
        360.0
    } else {
        return Err(EvalError::AxisAngle(degrees));
    };

    Ok(wrap_angle(axis - inner))
}
