//! Engine-level tests against small hand-built registries.

use super::*;
use crate::expr::{literal, product, reference_angle, sum, variable, EvalError, Variable};
use crate::families::{Family, FamilyRegistry, PredicateWarning, Relation, Warning};
use crate::session::{Bindings, QuickButton};

fn chain_family() -> Family {
    let a = Variable::new("a");
    let b = Variable::new("b");
    let c = Variable::new("c");

    Family::new("chain")
        .with_relation(Relation::new("b from a", "", &[&a], &b, product([variable("a"), literal(2.0)])))
        .with_relation(Relation::new("c from b", "", &[&b], &c, sum([variable("b"), literal(1.0)])))
        .with_relation(Relation::new("c from a", "", &[&a], &c, literal(99.0)))
        .with_implicit("a", 1.0)
}

fn big_a(variables: &Bindings) -> Option<Warning> {
    variables.get("a").filter(|&&a| a > 100.0)?;
    Some(Warning {
        text: "a is large".to_string(),
        actions: vec![QuickButton::new("Shrink").setting("a", 1.0)],
    })
}

fn registry() -> FamilyRegistry {
    let mut registry = FamilyRegistry::new();
    registry
        .register(chain_family().with_warning(PredicateWarning::new("big-a", big_a)))
        .unwrap();

    let x = Variable::new("x");
    let r = Variable::new("r");
    registry
        .register(Family::new("angles").with_relation(Relation::new(
            "Reference",
            "",
            &[&x],
            &r,
            reference_angle(variable("x")),
        )))
        .unwrap();
    registry
}

fn solved_outputs(steps: &[Step]) -> Vec<String> {
    steps
        .iter()
        .filter_map(Step::as_solved)
        .map(|s| s.unknown.name.clone())
        .collect()
}

#[test]
fn test_rounding() {
    assert_eq!(round_result(1.234), 1.23);
    assert_eq!(round_result(1.235000001), 1.24);
    assert_eq!(round_result(-20.0), -20.0);
    assert_eq!(round_result(63.434948), 63.43);
}

#[test]
fn test_first_applicable_relation_wins() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!chain a=3").unwrap();

    // "c from a" is applicable after "b from a" but "c from b" comes first
    assert_eq!(solved_outputs(&steps), vec!["b", "c"]);
    let c = steps[1].as_solved().unwrap();
    assert_eq!(c.result, 7.0);
    assert_eq!(c.given[0].value, 6.0);

    match steps.last().unwrap() {
        Step::Summary { variables } => {
            assert_eq!(variables.get("c"), Some(&7.0));
            assert_eq!(variables.len(), 3);
        }
        other => panic!("expected summary, got {:?}", other),
    }
}

#[test]
fn test_implicit_injected_when_stuck() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!chain").unwrap();

    let hint = steps[0].as_hint().unwrap();
    assert_eq!(hint.message, "a is implicitly 1");
    assert_eq!(hint.quick_buttons[0].set.get("a"), Some(&1.0));
    assert!(hint.quick_buttons[0].primary);
    assert_eq!(hint.quick_buttons[1].hints, vec![NO_IMPLICIT]);
    assert_eq!(solved_outputs(&steps), vec!["b", "c"]);
}

#[test]
fn test_no_implicit_disables_defaults() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!chain @no-implicit").unwrap();
    assert_eq!(steps.len(), 1);
    assert!(matches!(&steps[0], Step::Summary { variables } if variables.is_empty()));
}

#[test]
fn test_warning_pass_runs_once_with_bypass_button() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!chain a=500").unwrap();

    let warnings: Vec<&Hint> = steps.iter().filter_map(Step::as_hint).collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "a is large");
    let ignore = warnings[0].quick_buttons.last().unwrap();
    assert_eq!(ignore.text, "Ignore this warning");
    assert_eq!(ignore.hints, vec!["ignore-big-a"]);

    // The warning precedes every solved step
    assert!(steps[0].as_hint().is_some());
}

#[test]
fn test_warning_bypass_token() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!chain @ignore-big-a a=500").unwrap();
    assert!(steps.iter().all(|s| s.as_hint().is_none()));
    assert!(steps.iter().all(|s| !s.is_error()));
}

#[test]
fn test_unknown_hint_is_reported_but_solving_continues() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!angles @ignore-big-a x=30").unwrap();

    assert_eq!(steps[0], Step::error("Unknown hint \"ignore-big-a\""));
    assert_eq!(solved_outputs(&steps), vec!["r"]);
}

#[test]
fn test_decode_errors_come_first() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!chain a 3 b=-").unwrap();
    assert!(steps[0].is_error());
    assert!(steps[1].is_error());
    assert!(matches!(steps.last(), Some(Step::Summary { .. })));
}

#[test]
fn test_unknown_library_is_fatal() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!chain !missing a=1").unwrap();
    assert_eq!(steps, vec![Step::error("Unknown library \"missing\"")]);
}

#[test]
fn test_no_libraries_gives_onboarding_hint() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("x=1").unwrap();

    assert_eq!(steps.len(), 1);
    let hint = steps[0].as_hint().unwrap();
    assert_eq!(hint.quick_buttons[0].libraries, vec!["kinematics"]);
    assert!(hint.quick_buttons[0].primary);
    assert_eq!(hint.quick_buttons[1].libraries, vec!["slopes"]);
}

#[test]
fn test_evaluator_fault_propagates() {
    let registry = registry();
    let result = Solver::new(&registry).solve("!angles x=180");

    assert_eq!(
        result,
        Err(SolveError::Relation {
            family: "angles".to_string(),
            relation: "Reference".to_string(),
            source: EvalError::AxisAngle(180.0),
        })
    );
}

#[test]
fn test_reference_angle_through_solver() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!angles x=200").unwrap();
    assert_eq!(steps[0].as_solved().unwrap().result, 70.0);
}

#[test]
fn test_step_json_shape() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!chain a=3").unwrap();
    let json = serde_json::to_value(&steps).unwrap();

    assert_eq!(json[0]["kind"], "solved");
    assert_eq!(json[0]["unknown"]["name"], "b");
    assert_eq!(json[0]["result"], 6.0);
    assert_eq!(json[0]["substituted"]["op"], "product");
    assert_eq!(json[2]["kind"], "summary");
    assert_eq!(json[2]["variables"]["c"], 7.0);
}

#[test]
fn test_step_display() {
    let registry = registry();
    let steps = Solver::new(&registry).solve("!chain a=3").unwrap();
    assert_eq!(steps[0].to_string(), "b from a: b = a * 2 = 3 * 2 = 6");
    assert_eq!(steps[2].to_string(), "summary: a=3 b=6 c=7");
}
