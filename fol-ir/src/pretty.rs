use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::formula::Formula;
use crate::term::Term;

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v.name),
            Term::Metavariable(v) => write!(f, "{}", v.name),
            Term::Function(app) if app.args.is_empty() => write!(f, "{}", app.name),
            Term::Function(app) => {
                write!(f, "{}(", app.name)?;
                for (i, arg) in app.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Predicate(name, args) if args.is_empty() => write!(f, "{}", name),
            Formula::Predicate(name, args) => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Formula::Not(g) => write!(f, "¬{}", g),
            Formula::And(a, b) => write!(f, "({} ∧ {})", a, b),
            Formula::Or(a, b) => write!(f, "({} ∨ {})", a, b),
            Formula::Implies(a, b) => write!(f, "({} → {})", a, b),
            Formula::Forall(v, body) => write!(f, "(∀{}. {})", v, body),
            Formula::Exists(v, body) => write!(f, "(∃{}. {})", v, body),
        }
    }
}

/// A hash that is invariant under the semantic identity of a constructor
/// tree, computed from the canonical pretty-printed form. `Term`/`Formula`
/// already derive a structural `Hash` that ignores instantiation time and
/// is cheaper to compute; this is exposed separately for cross-checking in
/// tests and for callers that only have a renderable form on hand.
pub fn stable_hash(display: &impl fmt::Display) -> u64 {
    let mut hasher = FxHasher::default();
    display.to_string().hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intern;

    #[test]
    fn stable_hash_ignores_instantiation_time() {
        let a = Term::variable(intern("x"));
        let b = a.set_instantiation_time(9);
        assert_eq!(stable_hash(&a), stable_hash(&b));
    }

    #[test]
    fn pretty_print_matches_convention() {
        let x = Term::variable(intern("x"));
        let p = Formula::predicate(intern("P"), vec![x]);
        let forall = Formula::forall(intern("x"), p);
        assert_eq!(forall.to_string(), "(∀x. P(x))");
    }
}
