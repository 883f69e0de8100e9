//! Points on the unit circle from an angle in degrees.

use super::types::{Family, Relation};
use crate::expr::{cos, sin, tan, Variable};

pub const NAME: &str = "unit-circle";

pub fn family() -> Family {
    let a = Variable::with_unit("a", "deg");
    let x = Variable::new("x");
    let y = Variable::new("y");
    let t = Variable::new("t");

    Family::new(NAME)
        .with_relation(Relation::new(
            "Compute x from angle",
            "Using the formula for x, we can find the x position.",
            &[&a],
            &x,
            cos(&a),
        ))
        .with_relation(Relation::new(
            "Compute y from angle",
            "Using the formula for y, we can find the y position.",
            &[&a],
            &y,
            sin(&a),
        ))
        .with_relation(Relation::new(
            "Compute y/x from angle",
            "Using the formula for y/x, we can find the slope of the radius.",
            &[&a],
            &t,
            tan(&a),
        ))
        .with_implicit("a", 0.0)
        .with_implicit("b", 0.0)
}
