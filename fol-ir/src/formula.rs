use std::sync::Arc;

use crate::term::Term;
use crate::{Identifier, Time};

/// The formula algebra. `Forall`/`Exists` bind a `Variable` by name; the
/// binder itself carries no instantiation time, since it is never a term
/// occurrence on its own.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
    Predicate(Identifier, Arc<Vec<Term>>),
    Not(Arc<Formula>),
    And(Arc<Formula>, Arc<Formula>),
    Or(Arc<Formula>, Arc<Formula>),
    Implies(Arc<Formula>, Arc<Formula>),
    Forall(Identifier, Arc<Formula>),
    Exists(Identifier, Arc<Formula>),
}

impl Formula {
    pub fn predicate(name: Identifier, args: Vec<Term>) -> Formula {
        Formula::Predicate(name, Arc::new(args))
    }

    pub fn not(f: Formula) -> Formula {
        Formula::Not(Arc::new(f))
    }

    pub fn and(a: Formula, b: Formula) -> Formula {
        Formula::And(Arc::new(a), Arc::new(b))
    }

    pub fn or(a: Formula, b: Formula) -> Formula {
        Formula::Or(Arc::new(a), Arc::new(b))
    }

    pub fn implies(a: Formula, b: Formula) -> Formula {
        Formula::Implies(Arc::new(a), Arc::new(b))
    }

    pub fn forall(var: Identifier, body: Formula) -> Formula {
        Formula::Forall(var, Arc::new(body))
    }

    pub fn exists(var: Identifier, body: Formula) -> Formula {
        Formula::Exists(var, Arc::new(body))
    }

    /// Is this formula an atom (terminal for expansion purposes)?
    pub fn is_atomic(&self) -> bool {
        matches!(self, Formula::Predicate(..))
    }

    /// Whole-subterm substitution of a term inside a formula: every
    /// occurrence of `old` is replaced by `new`, recursing into every
    /// `Predicate`'s arguments and every sub-formula, including quantifier
    /// bodies, unconditionally. This is not capture-avoiding — a `Forall`
    /// or `Exists` binder is never checked against `old`'s name — so
    /// capture is instead avoided at the call site, by always instantiating
    /// a quantifier with a freshly-chosen variable or metavariable before
    /// any substitution runs.
    pub fn replace(&self, old: &Term, new: &Term) -> Formula {
        match self {
            Formula::Predicate(name, args) => {
                let args = args.iter().map(|a| a.replace(old, new)).collect();
                Formula::predicate(*name, args)
            }
            Formula::Not(f) => Formula::not(f.replace(old, new)),
            Formula::And(a, b) => Formula::and(a.replace(old, new), b.replace(old, new)),
            Formula::Or(a, b) => Formula::or(a.replace(old, new), b.replace(old, new)),
            Formula::Implies(a, b) => Formula::implies(a.replace(old, new), b.replace(old, new)),
            Formula::Forall(v, body) => Formula::forall(*v, body.replace(old, new)),
            Formula::Exists(v, body) => Formula::exists(*v, body.replace(old, new)),
        }
    }

    /// Whole-formula substitution: every sub-formula structurally equal to
    /// `old` is replaced by `new`. Exposed alongside `replace` even though
    /// the engine itself only ever substitutes terms.
    pub fn replace_formula(&self, old: &Formula, new: &Formula) -> Formula {
        if self == old {
            return new.clone();
        }
        match self {
            Formula::Predicate(..) => self.clone(),
            Formula::Not(f) => Formula::not(f.replace_formula(old, new)),
            Formula::And(a, b) => {
                Formula::and(a.replace_formula(old, new), b.replace_formula(old, new))
            }
            Formula::Or(a, b) => {
                Formula::or(a.replace_formula(old, new), b.replace_formula(old, new))
            }
            Formula::Implies(a, b) => {
                Formula::implies(a.replace_formula(old, new), b.replace_formula(old, new))
            }
            Formula::Forall(v, body) => Formula::forall(*v, body.replace_formula(old, new)),
            Formula::Exists(v, body) => Formula::exists(*v, body.replace_formula(old, new)),
        }
    }

    pub fn occurs(&self, metavar: &Term) -> bool {
        match self {
            Formula::Predicate(_, args) => args.iter().any(|a| a.occurs(metavar)),
            Formula::Not(f) => f.occurs(metavar),
            Formula::And(a, b) | Formula::Or(a, b) | Formula::Implies(a, b) => {
                a.occurs(metavar) || b.occurs(metavar)
            }
            Formula::Forall(_, body) | Formula::Exists(_, body) => body.occurs(metavar),
        }
    }

    /// Tags every variable/metavariable leaf reachable from `self` with
    /// `n`. Used by the driver to reset an axiom or goal to time 0 before
    /// it enters a fresh proof search.
    pub fn set_instantiation_time(&self, n: Time) -> Formula {
        match self {
            Formula::Predicate(name, args) => {
                let args = args.iter().map(|a| a.set_instantiation_time(n)).collect();
                Formula::predicate(*name, args)
            }
            Formula::Not(f) => Formula::not(f.set_instantiation_time(n)),
            Formula::And(a, b) => Formula::and(
                a.set_instantiation_time(n),
                b.set_instantiation_time(n),
            ),
            Formula::Or(a, b) => {
                Formula::or(a.set_instantiation_time(n), b.set_instantiation_time(n))
            }
            Formula::Implies(a, b) => Formula::implies(
                a.set_instantiation_time(n),
                b.set_instantiation_time(n),
            ),
            Formula::Forall(v, body) => Formula::forall(*v, body.set_instantiation_time(n)),
            Formula::Exists(v, body) => Formula::exists(*v, body.set_instantiation_time(n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern;

    #[test]
    fn replace_with_identical_term_is_identity() {
        let x = Term::variable(intern("x"));
        let p = Formula::predicate(intern("P"), vec![x.clone()]);
        assert_eq!(p.replace(&x, &x), p);
    }

    #[test]
    fn replace_descends_into_quantifier_bodies() {
        let y = Term::variable(intern("y"));
        let a = Term::variable(intern("a"));
        let body = Formula::predicate(intern("P"), vec![y.clone()]);
        let forall = Formula::forall(intern("x"), body);
        let replaced = forall.replace(&y, &a);
        let expected = Formula::forall(
            intern("x"),
            Formula::predicate(intern("P"), vec![a]),
        );
        assert_eq!(replaced, expected);
    }

    #[test]
    fn predicate_is_atomic_connectives_are_not() {
        let p = Formula::predicate(intern("P"), vec![]);
        assert!(p.is_atomic());
        assert!(!Formula::not(p).is_atomic());
    }
}
