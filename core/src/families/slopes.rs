//! Straight lines through two points.

use super::types::{Family, Relation};
use crate::expr::{atan, divide, pow, product, sqrt, sub, sum, tan, Variable};

pub const NAME: &str = "slopes";

pub fn family() -> Family {
    let dx = Variable::new("Dx");
    let dy = Variable::new("Dy");
    let xi = Variable::new("xi");
    let yi = Variable::new("yi");
    let xf = Variable::new("xf");
    let yf = Variable::new("yf");
    let m = Variable::new("m");
    let b = Variable::new("b");
    let c = Variable::new("c");
    let a = Variable::with_unit("a", "deg");

    Family::new(NAME)
        .with_relation(Relation::new(
            "Compute delta-x",
            "Using the formula for delta-x, we can find the change in x.",
            &[&xf, &xi],
            &dx,
            sub(&xf, &xi),
        ))
        .with_relation(Relation::new(
            "Compute x-initial",
            "Using the formula for x-initial, we can find the initial x position.",
            &[&xf, &dx],
            &xi,
            sub(&xf, &dx),
        ))
        .with_relation(Relation::new(
            "Compute x-final",
            "Using the formula for x-final, we can find the final x position.",
            &[&xi, &dx],
            &xf,
            sum([&xi, &dx]),
        ))
        .with_relation(Relation::new(
            "Compute delta-y",
            "Using the formula for delta-y, we can find the change in y.",
            &[&yf, &yi],
            &dy,
            sub(&yf, &yi),
        ))
        .with_relation(Relation::new(
            "Compute y-initial",
            "Using the formula for y-initial, we can find the initial y position.",
            &[&yf, &dy],
            &yi,
            sub(&yf, &dy),
        ))
        .with_relation(Relation::new(
            "Compute y-final",
            "Using the formula for y-final, we can find the final y position.",
            &[&yi, &dy],
            &yf,
            sum([&yi, &dy]),
        ))
        .with_relation(Relation::new(
            "Compute slope",
            "Using the formula for slope, we can find the slope of the line.",
            &[&dy, &dx],
            &m,
            divide(&dy, &dx),
        ))
        .with_relation(Relation::new(
            "Compute y-intercept",
            "Using the formula for y-intercept, we can find the y-intercept of the line.",
            &[&yi, &m, &xi],
            &b,
            sub(&yi, product([&m, &xi])),
        ))
        .with_relation(Relation::new(
            "Compute y-intercept",
            "Using the formula for y-intercept, we can find the y-intercept of the line.",
            &[&yf, &m, &xf],
            &b,
            sub(&yf, product([&m, &xf])),
        ))
        .with_relation(Relation::new(
            "Compute delta-x from slope",
            "Using the formula for delta-x, we can find the change in x.",
            &[&m, &dy],
            &dx,
            divide(&dy, &m),
        ))
        .with_relation(Relation::new(
            "Compute delta-y from slope",
            "Using the formula for delta-y, we can find the change in y.",
            &[&m, &dx],
            &dy,
            product([&m, &dx]),
        ))
        .with_relation(Relation::new(
            "Compute y-initial from x-initial",
            "Using the formula for y-initial, we can find the initial y position.",
            &[&m, &xi, &b],
            &yi,
            sum([product([&m, &xi]), b.expr()]),
        ))
        .with_relation(Relation::new(
            "Compute x-initial from y-initial",
            "Using the formula for x-initial, we can find the initial x position.",
            &[&m, &yi, &b],
            &xi,
            divide(sub(&yi, &b), &m),
        ))
        .with_relation(Relation::new(
            "Compute y-final from x-final",
            "Using the formula for y-final, we can find the final y position.",
            &[&m, &xf, &b],
            &yf,
            sum([product([&m, &xf]), b.expr()]),
        ))
        .with_relation(Relation::new(
            "Compute x-final from y-final",
            "Using the formula for x-final, we can find the final x position.",
            &[&m, &yf, &b],
            &xf,
            divide(sub(&yf, &b), &m),
        ))
        .with_relation(Relation::new(
            "Compute length of hypotenuse",
            "Using the Pythagorean theorem, we can find the length of the hypotenuse.",
            &[&dx, &dy],
            &c,
            sqrt(sum([pow(&dx, 2), pow(&dy, 2)])),
        ))
        .with_relation(Relation::new(
            "Angle to slope",
            "Using the formula for slope, we can get the slope from the angle",
            &[&a],
            &m,
            tan(&a),
        ))
        .with_relation(Relation::new(
            "Slope to angle",
            "Using the formula for slope, we can get the angle from the slope",
            &[&m],
            &a,
            atan(&m),
        ))
        .with_implicit("b", 0.0)
}
