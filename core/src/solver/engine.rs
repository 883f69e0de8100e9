//! The solving loop.
//!
//! Relation selection is "first applicable, then rescan from the top":
//! families in import order, relations in declaration order. This keeps
//! traces reproducible. When two relations could produce the same variable
//! the earlier one wins and the other never fires.

use super::step::{GivenValue, SolvedStep, Step};
use crate::expr::{evaluate, substitute, EvalError};
use crate::families::{builtin_registry, Family, FamilyRegistry, Relation};
use crate::session::{parse_script, Bindings, QuickButton};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Hint token that turns off implicit defaults
pub const NO_IMPLICIT: &str = "no-implicit";

/// Solve failure. These are catalog faults, not user errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    #[error("Relation \"{relation}\" in '{family}' failed: {source}")]
    Relation {
        family: String,
        relation: String,
        #[source]
        source: EvalError,
    },
}

pub type SolveResult<T> = Result<T, SolveError>;

/// Round to two decimals, halves upward
pub fn round_result(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

/// Solve a session line against the built-in families.
pub fn solve(script: &str) -> SolveResult<Vec<Step>> {
    Solver::new(builtin_registry()).solve(script)
}

fn onboarding_hint() -> Step {
    Step::hint(
        "You haven't imported any libraries yet.",
        vec![
            QuickButton::new("I'm doing a kinematics (physics) problem")
                .importing("kinematics")
                .primary(),
            QuickButton::new("I'm doing a slopes (geometry) problem").importing("slopes"),
        ],
    )
}

/// Solver bound to a family registry
pub struct Solver<'r> {
    registry: &'r FamilyRegistry,
}

impl<'r> Solver<'r> {
    pub fn new(registry: &'r FamilyRegistry) -> Self {
        Self { registry }
    }

    pub fn solve(&self, script: &str) -> SolveResult<Vec<Step>> {
        let parsed = parse_script(script);
        let session = parsed.session;
        let mut steps: Vec<Step> = parsed.errors.iter().map(|e| Step::error(e.to_string())).collect();

        let mut families = Vec::with_capacity(session.libraries.len());
        for library in &session.libraries {
            match self.registry.get(library) {
                Some(family) => families.push(family),
                None => {
                    warn!("Unknown library \"{}\"", library);
                    steps.push(Step::error(format!("Unknown library \"{}\"", library)));
                    return Ok(steps);
                }
            }
        }

        let valid_hints: HashSet<String> = std::iter::once(NO_IMPLICIT.to_string())
            .chain(families.iter().flat_map(|f| f.bypass_hints()))
            .collect();

        for hint in &session.hints {
            if !valid_hints.contains(hint) {
                steps.push(Step::error(format!("Unknown hint \"{}\"", hint)));
            }
        }

        if families.is_empty() {
            steps.push(onboarding_hint());
            return Ok(steps);
        }

        let mut run = SolveRun {
            families,
            no_implicit: session.has_hint(NO_IMPLICIT),
            variables: session.variables,
            steps,
        };

        run.emit_warnings(&session.hints);
        run.run_to_fixpoint()?;
        Ok(run.finish())
    }
}

/// State of one solve. Owned by the call, never shared.
struct SolveRun<'a> {
    families: Vec<&'a Family>,
    no_implicit: bool,
    variables: Bindings,
    steps: Vec<Step>,
}

impl<'a> SolveRun<'a> {
    /// Run every warning generator once against the initial bindings
    fn emit_warnings(&mut self, active_hints: &[String]) {
        for family in &self.families {
            for generator in &family.warnings {
                let bypass = generator.bypass_hint();
                if active_hints.contains(&bypass) {
                    continue;
                }

                if let Some(warning) = generator.check(&self.variables) {
                    debug!("Warning {} fired: {}", generator.id(), warning.text);
                    let mut buttons = warning.actions;
                    buttons.push(QuickButton::new("Ignore this warning").with_hint(&bypass));
                    self.steps.push(Step::hint(warning.text, buttons));
                }
            }
        }
    }

    fn run_to_fixpoint(&mut self) -> SolveResult<()> {
        loop {
            if self.apply_next_relation()? {
                continue;
            }
            if self.inject_next_implicit() {
                continue;
            }
            return Ok(());
        }
    }

    fn next_relation(&self) -> Option<(&'a Family, &'a Relation)> {
        self.families
            .iter()
            .flat_map(|&family| family.relations.iter().map(move |relation| (family, relation)))
            .find(|(_, relation)| relation.is_applicable(&self.variables))
    }

    /// Apply the first applicable relation. Returns whether one fired.
    fn apply_next_relation(&mut self) -> SolveResult<bool> {
        let Some((family, relation)) = self.next_relation() else {
            return Ok(false);
        };

        let fault = |source: EvalError| SolveError::Relation {
            family: family.name.clone(),
            relation: relation.title.clone(),
            source,
        };

        let substituted = substitute(&relation.formula, &self.variables).map_err(fault)?;
        let result = round_result(evaluate(&substituted).map_err(fault)?);

        if !result.is_finite() {
            warn!("Relation \"{}\" produced {} for {}", relation.title, result, relation.gives.name);
        }

        let given = relation
            .takes
            .iter()
            .filter_map(|variable| {
                self.variables.get(&variable.name).map(|&value| GivenValue {
                    variable: variable.clone(),
                    value,
                })
            })
            .collect();

        debug!("{}: {} = {}", relation.title, relation.gives.name, result);
        self.variables.insert(relation.gives.name.clone(), result);
        self.steps.push(Step::Solved(SolvedStep {
            title: relation.title.clone(),
            description: relation.description.clone(),
            given,
            unknown: relation.gives.clone(),
            equation: relation.formula.clone(),
            result,
            substituted,
        }));

        Ok(true)
    }

    /// Bind the first unbound implicit default. Returns whether one was bound.
    fn inject_next_implicit(&mut self) -> bool {
        if self.no_implicit {
            return false;
        }

        let Some((name, value)) = self
            .families
            .iter()
            .flat_map(|family| family.implicits.iter())
            .find(|(name, _)| !self.variables.contains_key(name))
            .cloned()
        else {
            return false;
        };

        debug!("Implicit {} = {}", name, value);
        self.variables.insert(name.clone(), value);
        self.steps.push(Step::hint(
            format!("{} is implicitly {}", name, value),
            vec![
                QuickButton::new("Make explicit").setting(&name, value).primary(),
                QuickButton::new("Disable implicit variables").with_hint(NO_IMPLICIT),
            ],
        ));

        true
    }

    fn finish(mut self) -> Vec<Step> {
        info!(
            "Solve finished with {} steps and {} known variables",
            self.steps.len(),
            self.variables.len()
        );
        self.steps.push(Step::Summary {
            variables: self.variables,
        });
        self.steps
    }
}
