//! The quantified invariants from the testable-properties list, each
//! checked against a small but non-trivial family of formulae rather than
//! via a generate-and-shrink property framework.

use fol_driver::{prove, prove_or_disprove, AxiomSet};
use fol_engine::{NoSolution, Outcome, Verdict};
use fol_ir::intern;
use fol_ir::term::{Term, Var};
use fol_ir::Formula;
use fol_solve::{unify, unify_list, SearchConfig};

fn predicate(name: &str, args: Vec<Term>) -> Formula {
    Formula::predicate(intern(name), args)
}

fn sample_formulae() -> Vec<Formula> {
    let x = intern("x");
    let y = intern("y");
    vec![
        predicate("P", vec![Term::variable(x)]),
        Formula::not(predicate("Q", vec![])),
        Formula::and(predicate("P", vec![]), predicate("Q", vec![])),
        Formula::or(predicate("P", vec![]), predicate("Q", vec![])),
        Formula::implies(predicate("P", vec![]), predicate("Q", vec![])),
        Formula::forall(x, predicate("P", vec![Term::variable(x)])),
        Formula::exists(y, predicate("P", vec![Term::variable(y)])),
    ]
}

#[test]
fn substitution_identity_holds_across_a_family_of_formulae() {
    let t = Term::function(intern("a"), vec![]);
    for formula in sample_formulae() {
        assert_eq!(formula.replace(&t, &t), formula);
    }
}

#[test]
fn free_variable_correctness_respects_quantifier_shadowing() {
    let x = intern("x");
    let bound = Formula::forall(x, predicate("P", vec![Term::variable(x)]));
    assert!(!fol_ir::vars::free_vars(&bound).contains(&x));

    let free = predicate("P", vec![Term::variable(x)]);
    assert!(fol_ir::vars::free_vars(&free).contains(&x));

    let mixed = Formula::and(
        predicate("Q", vec![Term::variable(x)]),
        Formula::forall(x, predicate("P", vec![Term::variable(x)])),
    );
    assert!(fol_ir::vars::free_vars(&mixed).contains(&x));
}

#[test]
fn unifier_soundness_produces_structurally_equal_results() {
    let m = Term::metavariable(intern("t1"));
    let n = Term::metavariable(intern("t2"));
    let f = Term::function(intern("f"), vec![m.clone(), Term::function(intern("a"), vec![])]);
    let g = Term::function(intern("f"), vec![Term::function(intern("a"), vec![]), n.clone()]);
    let subst = unify(&f, &g).unwrap();
    assert_eq!(subst.apply_term(&f), subst.apply_term(&g));
}

#[test]
fn occurs_check_rejects_self_referential_binding() {
    let m = Term::metavariable(intern("t1"));
    let wrapped = Term::function(intern("f"), vec![m.clone(), m.clone()]);
    assert_eq!(unify(&m, &wrapped), Err(NoSolution));
}

#[test]
fn time_monotonicity_is_enforced_across_a_chain() {
    let early = Term::Metavariable(Var::new(intern("t1"), 1));
    let late_var = Term::Variable(Var::new(intern("v1"), 9));
    assert_eq!(unify(&early, &late_var), Err(NoSolution));

    let pairs = vec![(early.clone(), Term::function(intern("f"), vec![late_var]))];
    assert_eq!(unify_list(&pairs), Err(NoSolution));
}

#[test]
fn prover_soundness_smoke_on_known_true_and_known_false_schemata() {
    let p = predicate("P", vec![]);

    let law_of_excluded_middle = Formula::or(p.clone(), Formula::not(p.clone()));
    let axioms = AxiomSet::new();
    assert_eq!(prove(&axioms, &law_of_excluded_middle), Outcome::Proven);

    let unrelated = predicate("R", vec![]);
    assert_eq!(prove(&axioms, &unrelated), Outcome::Stuck);

    let config = SearchConfig { max_steps: Some(200), cancellation: None };
    let p_and_not_p = Formula::and(p.clone(), Formula::not(p));
    assert_eq!(
        prove_or_disprove(&axioms, &p_and_not_p, config),
        Verdict::Refuted
    );
}

#[test]
fn idempotence_proving_the_same_goal_twice_agrees() {
    let x = intern("x");
    let universal = Formula::forall(x, predicate("P", vec![Term::variable(x)]));
    let mut axioms = AxiomSet::new();
    axioms.add_axiom(universal).unwrap();
    let goal = predicate("P", vec![Term::function(intern("a"), vec![])]);

    assert_eq!(prove(&axioms, &goal), Outcome::Proven);
    assert_eq!(prove(&axioms, &goal), Outcome::Proven);
}
