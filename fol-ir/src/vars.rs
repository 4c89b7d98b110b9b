use rustc_hash::FxHashSet;

use crate::formula::Formula;
use crate::term::Term;
use crate::Identifier;

/// Free variable/metavariable names reachable from a term.
pub fn term_free_vars(t: &Term, out: &mut FxHashSet<Identifier>) {
    match t {
        Term::Variable(v) => {
            out.insert(v.name);
        }
        Term::Metavariable(_) => {}
        Term::Function(f) => {
            for arg in f.args.iter() {
                term_free_vars(arg, out);
            }
        }
    }
}

pub fn term_free_metavars(t: &Term, out: &mut FxHashSet<Identifier>) {
    match t {
        Term::Variable(_) => {}
        Term::Metavariable(v) => {
            out.insert(v.name);
        }
        Term::Function(f) => {
            for arg in f.args.iter() {
                term_free_metavars(arg, out);
            }
        }
    }
}

/// Free variables of a formula: every `Variable` occurrence not under a
/// binder of the same name. Quantifiers shadow their bound variable, so it
/// is simply excluded from the union of its body's set.
pub fn free_vars(f: &Formula) -> FxHashSet<Identifier> {
    let mut out = FxHashSet::default();
    collect_free_vars(f, &mut out);
    out
}

fn collect_free_vars(f: &Formula, out: &mut FxHashSet<Identifier>) {
    match f {
        Formula::Predicate(_, args) => {
            for a in args.iter() {
                term_free_vars(a, out);
            }
        }
        Formula::Not(g) => collect_free_vars(g, out),
        Formula::And(a, b) | Formula::Or(a, b) | Formula::Implies(a, b) => {
            collect_free_vars(a, out);
            collect_free_vars(b, out);
        }
        Formula::Forall(bound, body) | Formula::Exists(bound, body) => {
            let mut inner = FxHashSet::default();
            collect_free_vars(body, &mut inner);
            inner.remove(bound);
            out.extend(inner);
        }
    }
}

/// Free metavariables of a formula. Metavariables are never bound by a
/// quantifier, so this is simply the union over sub-formulae.
pub fn free_metavars(f: &Formula) -> FxHashSet<Identifier> {
    let mut out = FxHashSet::default();
    collect_free_metavars(f, &mut out);
    out
}

fn collect_free_metavars(f: &Formula, out: &mut FxHashSet<Identifier>) {
    match f {
        Formula::Predicate(_, args) => {
            for a in args.iter() {
                term_free_metavars(a, out);
            }
        }
        Formula::Not(g) => collect_free_metavars(g, out),
        Formula::And(a, b) | Formula::Or(a, b) | Formula::Implies(a, b) => {
            collect_free_metavars(a, out);
            collect_free_metavars(b, out);
        }
        Formula::Forall(_, body) | Formula::Exists(_, body) => collect_free_metavars(body, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern;

    #[test]
    fn forall_shadows_its_bound_variable() {
        let x = intern("x");
        let body = Formula::predicate(intern("P"), vec![Term::variable(x)]);
        let forall = Formula::forall(x, body);
        assert!(free_vars(&forall).is_empty());
    }

    #[test]
    fn free_occurrence_outside_a_binder_is_reported() {
        let x = intern("x");
        let y = intern("y");
        let body = Formula::predicate(intern("P"), vec![Term::variable(x), Term::variable(y)]);
        let forall = Formula::forall(x, body);
        let fv = free_vars(&forall);
        assert!(fv.contains(&y));
        assert!(!fv.contains(&x));
    }

    #[test]
    fn metavariables_are_not_variables() {
        let m = intern("t1");
        let body = Formula::predicate(intern("P"), vec![Term::metavariable(m)]);
        assert!(free_vars(&body).is_empty());
        assert!(free_metavars(&body).contains(&m));
    }
}
