//! Minimal parenthesization and text rendering.
//!
//! `render` returns a copy of the tree with `Paren` nodes inserted exactly
//! where the text form would otherwise regroup the operands. `Display` prints
//! the rendered tree.

use super::types::{paren, Expr};
use std::fmt;

/// Operator rank. Lower binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Literal,
    Multiply,
    Divide,
    Sum,
    Subtraction,
    Sqrt,
    Power,
    Function,
    Paren,
}

impl Precedence {
    pub fn of(expr: &Expr) -> Self {
        match expr {
            // A negative literal prints with a leading minus
            Expr::Literal { value, .. } if *value < 0.0 => Self::Subtraction,
            Expr::Literal { .. } | Expr::Variable(_) => Self::Literal,
            Expr::Product { .. } => Self::Multiply,
            Expr::Divide { .. } => Self::Divide,
            Expr::Sum { .. } => Self::Sum,
            Expr::Sub { .. } => Self::Subtraction,
            Expr::Sqrt { .. } => Self::Sqrt,
            Expr::Pow { .. } => Self::Power,
            Expr::Call { .. } => Self::Function,
            Expr::Paren { .. } => Self::Paren,
        }
    }
}

/// Operand slot inside a parent node
#[derive(Debug, Clone, Copy)]
enum Slot {
    /// Loosest rank the slot accepts without grouping
    Operand(Precedence),
    /// Sum term after the first; a leading minus would read as subtraction
    LaterTerm,
    /// Base of a power; only atoms fit
    PowerBase,
}

fn needs_parens(child: &Expr, slot: Slot) -> bool {
    match (child, slot) {
        // These carry their own delimiters
        (Expr::Paren { .. } | Expr::Sqrt { .. } | Expr::Call { .. }, _) => false,
        (Expr::Pow { .. }, Slot::Operand(_) | Slot::LaterTerm) => false,
        (Expr::Literal { value, .. }, Slot::LaterTerm) => *value < 0.0,
        (_, Slot::LaterTerm) => Precedence::of(child) > Precedence::Subtraction,
        (_, Slot::PowerBase) => Precedence::of(child) > Precedence::Literal,
        (_, Slot::Operand(allowed)) => Precedence::of(child) > allowed,
    }
}

fn fit(child: &Expr, slot: Slot) -> Expr {
    let rendered = render(child);
    if needs_parens(&rendered, slot) {
        paren(rendered)
    } else {
        rendered
    }
}

fn fit_boxed(child: &Expr, slot: Slot) -> Box<Expr> {
    Box::new(fit(child, slot))
}

/// Insert the minimal set of explicit parentheses, recursively.
pub fn render(expr: &Expr) -> Expr {
    use Precedence::*;

    match expr {
        Expr::Literal { .. } | Expr::Variable(_) => expr.clone(),
        Expr::Paren { inner } => paren(render(inner)),
        Expr::Sum { terms } => Expr::Sum {
            terms: terms
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let slot = if i == 0 { Slot::Operand(Subtraction) } else { Slot::LaterTerm };
                    fit(t, slot)
                })
                .collect(),
        },
        Expr::Product { factors } => Expr::Product {
            factors: factors.iter().map(|f| fit(f, Slot::Operand(Multiply))).collect(),
        },
        Expr::Sub { left, right } => Expr::Sub {
            left: fit_boxed(left, Slot::Operand(Subtraction)),
            right: fit_boxed(right, Slot::Operand(Divide)),
        },
        Expr::Divide { left, right } => Expr::Divide {
            left: fit_boxed(left, Slot::Operand(Divide)),
            right: fit_boxed(right, Slot::Operand(Literal)),
        },
        Expr::Sqrt { operand } => Expr::Sqrt {
            operand: Box::new(render(operand)),
        },
        Expr::Pow { base, exponent } => Expr::Pow {
            base: fit_boxed(base, Slot::PowerBase),
            exponent: *exponent,
        },
        Expr::Call { function, arg } => Expr::Call {
            function: *function,
            arg: Box::new(render(arg)),
        },
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Expr], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write_raw(f, item)?;
    }
    Ok(())
}

/// Print without adding any grouping of its own
fn write_raw(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::Literal { value, .. } => write!(f, "{}", value),
        Expr::Variable(var) => f.write_str(&var.name),
        Expr::Sum { terms } => write_joined(f, terms, " + "),
        Expr::Product { factors } => write_joined(f, factors, " * "),
        Expr::Sub { left, right } => {
            write_raw(f, left)?;
            f.write_str(" - ")?;
            write_raw(f, right)
        }
        Expr::Divide { left, right } => {
            write_raw(f, left)?;
            f.write_str(" / ")?;
            write_raw(f, right)
        }
        Expr::Sqrt { operand } => {
            f.write_str("sqrt(")?;
            write_raw(f, operand)?;
            f.write_str(")")
        }
        Expr::Pow { base, exponent } => {
            write_raw(f, base)?;
            write!(f, "^{}", exponent)
        }
        Expr::Paren { inner } => {
            f.write_str("(")?;
            write_raw(f, inner)?;
            f.write_str(")")
        }
        Expr::Call { function, arg } => {
            write!(f, "{}(", function)?;
            write_raw(f, arg)?;
            f.write_str(")")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_raw(f, &render(self))
    }
}
