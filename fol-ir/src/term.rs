use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::{Identifier, Time};

/// A variable or metavariable occurrence: a name plus the instantiation
/// time it was tagged with.
///
/// Equality and hashing compare only `name` — time is bookkeeping for the
/// unifier, not part of a term's semantic identity.
#[derive(Clone, Copy, Debug)]
pub struct Var {
    pub name: Identifier,
    pub time: Time,
}

impl Var {
    pub fn new(name: Identifier, time: Time) -> Self {
        Var { name, time }
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Var) -> bool {
        self.name == other.name
    }
}

impl Eq for Var {}

impl Hash for Var {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// An *n*-ary functor applied to an ordered sequence of terms. Nullary
/// functions (empty `args`) serve as constants.
#[derive(Clone, Debug)]
pub struct FnApp {
    pub name: Identifier,
    pub args: Arc<Vec<Term>>,
    pub time: Time,
}

impl PartialEq for FnApp {
    fn eq(&self, other: &FnApp) -> bool {
        self.name == other.name && self.args == other.args
    }
}

impl Eq for FnApp {}

impl Hash for FnApp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.args.hash(state);
    }
}

/// The term algebra: a variable, a unification metavariable, or a functor
/// application.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(Var),
    Metavariable(Var),
    Function(FnApp),
}

impl Term {
    pub fn variable(name: Identifier) -> Term {
        Term::Variable(Var::new(name, 0))
    }

    pub fn metavariable(name: Identifier) -> Term {
        Term::Metavariable(Var::new(name, 0))
    }

    pub fn function(name: Identifier, args: Vec<Term>) -> Term {
        let time = args.iter().map(Term::time).max().unwrap_or(0);
        Term::Function(FnApp {
            name,
            args: Arc::new(args),
            time,
        })
    }

    pub fn name(&self) -> Identifier {
        match self {
            Term::Variable(v) | Term::Metavariable(v) => v.name,
            Term::Function(f) => f.name,
        }
    }

    pub fn time(&self) -> Time {
        match self {
            Term::Variable(v) | Term::Metavariable(v) => v.time,
            Term::Function(f) => f.time,
        }
    }

    pub fn is_metavariable(&self) -> bool {
        matches!(self, Term::Metavariable(_))
    }

    /// `true` iff `metavar` occurs anywhere inside `self`. Used by the
    /// unifier's occurs check.
    pub fn occurs(&self, metavar: &Term) -> bool {
        debug_assert!(metavar.is_metavariable());
        match self {
            Term::Variable(_) => false,
            Term::Metavariable(_) => self == metavar,
            Term::Function(f) => f.args.iter().any(|a| a.occurs(metavar)),
        }
    }

    /// Whole-subterm substitution: every occurrence of `old` is replaced by
    /// `new`. Not capture-avoiding — callers are expected to only ever
    /// substitute freshly-named variables and metavariables.
    pub fn replace(&self, old: &Term, new: &Term) -> Term {
        if self == old {
            return new.clone();
        }
        match self {
            Term::Variable(_) | Term::Metavariable(_) => self.clone(),
            Term::Function(f) => {
                let args = f.args.iter().map(|a| a.replace(old, new)).collect();
                Term::function(f.name, args)
            }
        }
    }

    /// Tags every variable/metavariable leaf in `self` with `n`, and
    /// recomputes each functor's own cached time as the max of its
    /// (now-retagged) arguments.
    ///
    /// Terms are immutable in this crate, so this returns a fresh tree
    /// rather than mutating in place.
    pub fn set_instantiation_time(&self, n: Time) -> Term {
        match self {
            Term::Variable(v) => Term::Variable(Var::new(v.name, n)),
            Term::Metavariable(v) => Term::Metavariable(Var::new(v.name, n)),
            Term::Function(f) => {
                let args: Vec<Term> = f
                    .args
                    .iter()
                    .map(|a| a.set_instantiation_time(n))
                    .collect();
                let time = args.iter().map(Term::time).max().unwrap_or(n);
                Term::Function(FnApp {
                    name: f.name,
                    args: Arc::new(args),
                    time,
                })
            }
        }
    }
}
