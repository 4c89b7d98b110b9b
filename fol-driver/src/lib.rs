//! Axiom sets and the two prover entry points (component D).

#[macro_use]
extern crate tracing;

use fol_engine::{Outcome, StepResult, Verdict};
use fol_ir::wf::{check_well_formed, MalformedInput};
use fol_ir::Formula;
use fol_solve::engine::sequent::Sequent;
use fol_solve::{Search, SearchConfig};
use rustc_hash::FxHashMap;

/// A validated collection of axioms available to a proof search: a bag of
/// formulae that have each individually passed well-formedness checking
/// before being admitted.
#[derive(Clone, Debug, Default)]
pub struct AxiomSet {
    axioms: Vec<Formula>,
}

impl AxiomSet {
    pub fn new() -> Self {
        AxiomSet { axioms: Vec::new() }
    }

    pub fn add_axiom(&mut self, axiom: Formula) -> Result<(), MalformedInput> {
        check_well_formed(&axiom)?;
        self.axioms.push(axiom);
        Ok(())
    }

    pub fn remove_axiom(&mut self, axiom: &Formula) -> bool {
        if let Some(index) = self.axioms.iter().position(|a| a == axiom) {
            self.axioms.remove(index);
            true
        } else {
            false
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formula> {
        self.axioms.iter()
    }
}

fn sequent_for(left: &[Formula], right: &[Formula]) -> Sequent {
    let mut left_map = FxHashMap::default();
    for f in left {
        left_map.insert(f.clone(), 0);
    }
    let mut right_map = FxHashMap::default();
    for f in right {
        right_map.insert(f.clone(), 0);
    }
    Sequent::new(left_map, right_map)
}

/// Attempts to prove `goal` from `axioms`, searching without a step bound.
/// Returns `Outcome::Stuck` both for a genuinely refuted goal and for a
/// search that bottoms out with nothing left to expand; callers that need
/// to distinguish refutation from independence should use
/// `prove_or_disprove` instead.
#[instrument(level = "debug", skip_all)]
pub fn prove(axioms: &AxiomSet, goal: &Formula) -> Outcome {
    let left: Vec<Formula> = axioms.iter().cloned().collect();
    let sequent = sequent_for(&left, std::slice::from_ref(goal));
    let mut search = Search::new(sequent);
    if search.run_to_completion() {
        debug!("goal proven");
        Outcome::Proven
    } else {
        debug!("goal not proven");
        Outcome::Stuck
    }
}

/// Interleaves a search for `goal` with a search for its negation, one
/// step each in turn, so that whichever side closes first determines the
/// verdict without committing to an unbounded search on either branch
/// first.
#[instrument(level = "debug", skip_all)]
pub fn prove_or_disprove(axioms: &AxiomSet, goal: &Formula, config: SearchConfig) -> Verdict {
    let left: Vec<Formula> = axioms.iter().cloned().collect();

    let proof_sequent = sequent_for(&left, std::slice::from_ref(goal));
    let mut refutation_left = left.clone();
    refutation_left.push(goal.clone());
    let refutation_sequent = sequent_for(&refutation_left, &[]);

    let mut proof_search = Search::with_config(proof_sequent, config.clone());
    let mut refutation_search = Search::with_config(refutation_sequent, config);

    let mut proof_done = false;
    let mut refutation_done = false;

    loop {
        if !proof_done {
            match proof_search.step() {
                StepResult::Closed(true) => {
                    debug!("goal search closed: proven");
                    return Verdict::Proven;
                }
                StepResult::Closed(false) | StepResult::Diverging | StepResult::Cancelled => {
                    proof_done = true;
                }
                StepResult::Running => {}
            }
        }
        if !refutation_done {
            match refutation_search.step() {
                StepResult::Closed(true) => {
                    debug!("negation search closed: refuted");
                    return Verdict::Refuted;
                }
                StepResult::Closed(false) | StepResult::Diverging | StepResult::Cancelled => {
                    refutation_done = true;
                }
                StepResult::Running => {}
            }
        }
        if proof_done && refutation_done {
            debug!("both searches exhausted: independent");
            return Verdict::Independent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ir::intern;
    use fol_ir::term::Term;

    fn predicate(name: &str, args: Vec<Term>) -> Formula {
        Formula::predicate(intern(name), args)
    }

    #[test]
    fn empty_axioms_prove_an_identical_goal() {
        let goal = predicate("P", vec![]);
        let mut axioms = AxiomSet::new();
        axioms.add_axiom(goal.clone()).unwrap();
        assert_eq!(prove(&axioms, &goal), Outcome::Proven);
    }

    #[test]
    fn unrelated_goal_is_stuck() {
        let axioms = AxiomSet::new();
        let goal = predicate("P", vec![]);
        assert_eq!(prove(&axioms, &goal), Outcome::Stuck);
    }

    #[test]
    fn malformed_axiom_is_rejected() {
        let mut axioms = AxiomSet::new();
        let bad = predicate("", vec![]);
        assert!(axioms.add_axiom(bad).is_err());
    }

    #[test]
    fn ex_falso_refutes_the_goal() {
        let p = predicate("P", vec![]);
        let not_p = Formula::not(p.clone());
        let mut axioms = AxiomSet::new();
        axioms.add_axiom(p).unwrap();
        axioms.add_axiom(not_p).unwrap();
        let q = predicate("Q", vec![]);
        let verdict = prove_or_disprove(&axioms, &q, SearchConfig { max_steps: Some(50), cancellation: None });
        assert_eq!(verdict, Verdict::Proven);
    }
}
