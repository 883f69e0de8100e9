//! Constant-acceleration motion in two axes, plus Newton's second law.

use super::types::{Family, PredicateWarning, Relation, Warning};
use crate::expr::{cos, divide, literal, pow, product, sin, sqrt, sub, sum, Variable};
use crate::session::{Bindings, QuickButton};

pub const NAME: &str = "kinematics";

/// Standard gravity used by textbook problems, m/s²
pub const GRAVITY: f64 = -10.0;

/// Relations for one axis; `axis` is `x` or `y`
fn axis_relations(axis: &str, t: &Variable) -> Vec<Relation> {
    let vi = Variable::with_unit(&format!("vi{}", axis), "m/s");
    let vf = Variable::with_unit(&format!("vf{}", axis), "m/s");
    let a = Variable::with_unit(&format!("a{}", axis), "m/s²");
    let d = Variable::with_unit(&format!("d{}", axis), "m");

    vec![
        Relation::new(
            "Compute displacement",
            "Since we have velocity-initial and acceleration, we can use the formula for displacement to find the final position.",
            &[&vi, &a, t],
            &d,
            sum([
                product([vi.expr(), t.expr()]),
                product([divide(literal(1.0), literal(2.0)), a.expr(), pow(t, 2)]),
            ]),
        ),
        Relation::new(
            "Compute final velocity",
            "Since we have velocity-initial and acceleration, we can use the formula for final velocity to find the final velocity.",
            &[&vi, &a, t],
            &vf,
            sum([vi.expr(), product([&a, t])]),
        ),
        Relation::new(
            "Compute initial velocity",
            "Since we have final velocity and acceleration, we can use the formula for initial velocity to find the initial velocity.",
            &[&vf, &a, t],
            &vi,
            sub(&vf, product([&a, t])),
        ),
        Relation::new(
            "Compute time from velocity change",
            "Since we have final velocity and initial velocity, we can use the formula for time to find the time.",
            &[&vi, &vf, &a],
            t,
            divide(sub(&vf, &vi), &a),
        ),
        Relation::new(
            "Compute time from displacement",
            "Since we have displacement and acceleration, we can use the formula for time to find the time.",
            &[&d, &a],
            t,
            sqrt(divide(product([literal(2.0), d.expr()]), &a)),
        )
        .presuming(&vi.name, 0.0),
        Relation::new(
            "Compute time from displacement",
            "Since we have displacement and initial velocity, we can use the formula for time to find the time.",
            &[&d, &vi],
            t,
            divide(&d, &vi),
        )
        .presuming(&a.name, 0.0),
    ]
}

fn positive_displacement(variables: &Bindings) -> Option<Warning> {
    let dy = variables.get("dy").copied().filter(|&dy| dy > 0.0)?;
    Some(Warning {
        text: "The displacement is positive".to_string(),
        actions: vec![QuickButton::new("Flip the direction").setting("dy", -dy).primary()],
    })
}

fn positive_acceleration(variables: &Bindings) -> Option<Warning> {
    let ay = variables.get("ay").copied().filter(|&ay| ay > 0.0)?;
    Some(Warning {
        text: "The acceleration is positive".to_string(),
        actions: vec![QuickButton::new("Flip the direction").setting("ay", -ay).primary()],
    })
}

fn unrealistic_gravity(variables: &Bindings) -> Option<Warning> {
    variables.get("ay").filter(|&&ay| ay != GRAVITY)?;
    Some(Warning {
        text: "The acceleration is not -10 m/s², which is the acceleration used in physics problems".to_string(),
        actions: vec![QuickButton::new("Set acceleration to -10 m/s²")
            .setting("ay", GRAVITY)
            .primary()],
    })
}

pub fn family() -> Family {
    let t = Variable::with_unit("t", "s");
    let m = Variable::with_unit("m", "kg");

    let si = Variable::with_unit("si", "m/s");
    let ai = Variable::with_unit("ai", "deg");
    let sf = Variable::with_unit("sf", "m/s");
    let af = Variable::with_unit("af", "deg");

    let vix = Variable::with_unit("vix", "m/s");
    let viy = Variable::with_unit("viy", "m/s");
    let vfx = Variable::with_unit("vfx", "m/s");
    let vfy = Variable::with_unit("vfy", "m/s");
    let ax = Variable::with_unit("ax", "m/s²");
    let ay = Variable::with_unit("ay", "m/s²");
    let fx = Variable::with_unit("fx", "N");
    let fy = Variable::with_unit("fy", "N");

    let mut family = Family::new(NAME);
    family.relations.extend(axis_relations("x", &t));
    family.relations.extend(axis_relations("y", &t));

    family
        .with_relation(Relation::new(
            "Angle initial + Speed initial -> Vix",
            "Since we have the angle and the speed, we can use cos to derive Vix",
            &[&si, &ai],
            &vix,
            product([si.expr(), cos(&ai)]),
        ))
        .with_relation(Relation::new(
            "Angle initial + Speed initial -> Viy",
            "Since we have the angle and the speed, we can use sin to derive Viy",
            &[&si, &ai],
            &viy,
            product([si.expr(), sin(&ai)]),
        ))
        .with_relation(Relation::new(
            "Angle final + Speed final -> Vfx",
            "Since we have the angle and the speed, we can use cos to derive Vfx",
            &[&sf, &af],
            &vfx,
            product([sf.expr(), cos(&af)]),
        ))
        .with_relation(Relation::new(
            "Angle final + Speed final -> Vfy",
            "Since we have the angle and the speed, we can use sin to derive Vfy",
            &[&sf, &af],
            &vfy,
            product([sf.expr(), sin(&af)]),
        ))
        .with_relation(Relation::new(
            "Mass + Acceleration -> Force (X)",
            "Since we have the mass and acceleration, we can use the formula for force to find the force in the x direction.",
            &[&m, &ax],
            &fx,
            product([&m, &ax]),
        ))
        .with_relation(Relation::new(
            "Mass + Acceleration -> Force (Y)",
            "Since we have the mass and acceleration, we can use the formula for force to find the force in the y direction.",
            &[&m, &ay],
            &fy,
            product([&m, &ay]),
        ))
        .with_relation(Relation::new(
            "Force + Acceleration -> Mass (X)",
            "Since we have the force and acceleration, we can use the formula for mass to find the mass.",
            &[&fx, &ax],
            &m,
            divide(&fx, &ax),
        ))
        .with_relation(Relation::new(
            "Force + Acceleration -> Mass (Y)",
            "Since we have the force and acceleration, we can use the formula for mass to find the mass.",
            &[&fy, &ay],
            &m,
            divide(&fy, &ay),
        ))
        .with_relation(Relation::new(
            "Force + Mass -> Acceleration (X)",
            "Since we have the force and mass, we can use the formula for acceleration to find the acceleration in the x direction.",
            &[&fx, &m],
            &ax,
            divide(&fx, &m),
        ))
        .with_relation(Relation::new(
            "Force + Mass -> Acceleration (Y)",
            "Since we have the force and mass, we can use the formula for acceleration to find the acceleration in the y direction.",
            &[&fy, &m],
            &ay,
            divide(&fy, &m),
        ))
        .with_implicit("ax", 0.0)
        .with_implicit("ay", GRAVITY)
        .with_implicit("viy", 0.0)
        .with_implicit("vix", 0.0)
        .with_warning(PredicateWarning::new("negative-displacement", positive_displacement))
        .with_warning(PredicateWarning::new("negative-accel", positive_acceleration))
        .with_warning(PredicateWarning::new("realistic-gravity", unrealistic_gravity))
}
