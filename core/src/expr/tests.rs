//! Tests for the expression engine.

use super::*;
use std::collections::BTreeMap;

fn bindings(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_substitute_removes_all_variables() {
    let expr = sum([
        product([variable("vix"), variable("t")]),
        product([divide(literal(1.0), literal(2.0)), variable("ax"), pow(variable("t"), 2)]),
    ]);
    assert_eq!(expr.variables(), vec!["vix", "t", "ax"]);

    let ground = substitute(&expr, &bindings(&[("vix", 0.0), ("ax", -10.0), ("t", 2.0)])).unwrap();
    assert!(ground.is_ground());
    assert!(approx(evaluate(&ground).unwrap(), -20.0));
}

#[test]
fn test_substitute_leaves_literals_alone() {
    let expr = literal_with_unit(3.5, "kg");
    assert_eq!(substitute(&expr, &BTreeMap::new()).unwrap(), expr);
}

#[test]
fn test_evaluate_is_deterministic() {
    let expr = sqrt(sum([pow(literal(3.0), 2), pow(literal(4.0), 2)]));
    let first = evaluate(&expr).unwrap();
    let _ = evaluate(&sin(literal(30.0))).unwrap();
    assert_eq!(evaluate(&expr).unwrap(), first);
    assert!(approx(first, 5.0));
}

#[test]
fn test_trig_uses_degrees() {
    assert!(approx(evaluate(&sin(literal(30.0))).unwrap(), 0.5));
    assert!(approx(evaluate(&cos(literal(60.0))).unwrap(), 0.5));
    assert!(approx(evaluate(&tan(literal(45.0))).unwrap(), 1.0));
    assert!(approx(evaluate(&atan(literal(1.0))).unwrap(), 45.0));
}

#[test]
fn test_paren_is_transparent() {
    let expr = product([paren(sum([literal(1.0), literal(2.0)])), literal(4.0)]);
    assert!(approx(evaluate(&expr).unwrap(), 12.0));
}

#[test]
fn test_reference_angle_node() {
    let expr = reference_angle(variable("a"));
    let ground = substitute(&expr, &bindings(&[("a", 135.0)])).unwrap();
    assert!(approx(evaluate(&ground).unwrap(), 45.0));

    let axis = substitute(&expr, &bindings(&[("a", 90.0)])).unwrap();
    assert_eq!(evaluate(&axis), Err(EvalError::AxisAngle(90.0)));
}

#[test]
fn test_render_wraps_sum_inside_product() {
    let expr = product([sum([variable("a"), variable("b")]), variable("c")]);
    let rendered = render(&expr);
    assert_eq!(
        rendered,
        product([paren(sum([variable("a"), variable("b")])), variable("c")])
    );
    assert_eq!(expr.to_string(), "(a + b) * c");
}

#[test]
fn test_render_leaves_product_inside_sum() {
    let expr = sum([product([variable("a"), variable("b")]), variable("c")]);
    assert_eq!(render(&expr), expr);
    assert_eq!(expr.to_string(), "a * b + c");
}

#[test]
fn test_render_right_operand_of_sub() {
    let expr = sub(variable("a"), sum([variable("b"), variable("c")]));
    assert_eq!(expr.to_string(), "a - (b + c)");

    let expr = sub(sum([variable("a"), variable("b")]), variable("c"));
    assert_eq!(expr.to_string(), "a + b - c");

    let expr = sub(variable("yi"), product([variable("m"), variable("xi")]));
    assert_eq!(expr.to_string(), "yi - m * xi");
}

#[test]
fn test_render_divide_operands() {
    let expr = divide(sub(variable("vfx"), variable("vix")), variable("ax"));
    assert_eq!(expr.to_string(), "(vfx - vix) / ax");

    let expr = divide(variable("a"), product([variable("b"), variable("c")]));
    assert_eq!(expr.to_string(), "a / (b * c)");
}

#[test]
fn test_render_power_base() {
    assert_eq!(pow(variable("t"), 2).to_string(), "t^2");
    assert_eq!(pow(sum([variable("a"), variable("b")]), 2).to_string(), "(a + b)^2");
    assert_eq!(pow(literal(-4.0), 2).to_string(), "(-4)^2");
}

#[test]
fn test_render_functions_are_self_delimited() {
    let expr = product([variable("si"), cos(variable("ai"))]);
    assert_eq!(expr.to_string(), "si * cos(ai)");

    let expr = sqrt(sum([pow(variable("Dx"), 2), pow(variable("Dy"), 2)]));
    assert_eq!(expr.to_string(), "sqrt(Dx^2 + Dy^2)");
}

#[test]
fn test_render_does_not_double_wrap() {
    let expr = product([paren(sum([variable("a"), variable("b")])), variable("c")]);
    assert_eq!(render(&expr), expr);
    assert_eq!(render(&render(&expr)), render(&expr));
}

#[test]
fn test_render_displacement_formula() {
    let expr = sum([
        product([variable("vix"), variable("t")]),
        product([divide(literal(1.0), literal(2.0)), variable("ax"), pow(variable("t"), 2)]),
    ]);
    assert_eq!(expr.to_string(), "vix * t + (1 / 2) * ax * t^2");
}

#[test]
fn test_render_negative_literal_in_sum() {
    assert_eq!(sum([variable("xi"), literal(-3.0)]).to_string(), "xi + (-3)");
    assert_eq!(sum([literal(-3.0), variable("x")]).to_string(), "-3 + x");
}

#[test]
fn test_precedence_ordering() {
    assert!(Precedence::Literal < Precedence::Multiply);
    assert!(Precedence::Sum < Precedence::Subtraction);
    assert!(Precedence::Function < Precedence::Paren);
    assert_eq!(Precedence::of(&literal(-1.0)), Precedence::Subtraction);
    assert_eq!(Precedence::of(&variable("x")), Precedence::Literal);
}
