use fol_engine::{Fallible, NoSolution};
use fol_ir::term::{Term, Var};
use fol_ir::{Formula, Identifier};
use tracing::instrument;

/// A finite mapping from metavariable to term, built left-to-right.
///
/// Composition is deliberately *not* idempotent at insertion time: adding
/// `{k ↦ v}` never rewrites entries already present. Every application
/// instead walks the bindings in insertion order, which is exactly what
/// `unify_list`'s left-to-right fold needs.
#[derive(Clone, Debug, Default)]
pub struct Substitution {
    bindings: Vec<(Identifier, Term)>,
}

impl Substitution {
    pub fn empty() -> Self {
        Substitution {
            bindings: Vec::new(),
        }
    }

    pub fn single(name: Identifier, term: Term) -> Self {
        Substitution {
            bindings: vec![(name, term)],
        }
    }

    pub fn extend(&mut self, other: Substitution) {
        self.bindings.extend(other.bindings);
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn bindings(&self) -> &[(Identifier, Term)] {
        &self.bindings
    }

    pub fn apply_term(&self, t: &Term) -> Term {
        let mut result = t.clone();
        for (name, value) in &self.bindings {
            let placeholder = Term::metavariable(*name);
            result = result.replace(&placeholder, value);
        }
        result
    }

    pub fn apply_formula(&self, f: &Formula) -> Formula {
        let mut result = f.clone();
        for (name, value) in &self.bindings {
            let placeholder = Term::metavariable(*name);
            result = result.replace(&placeholder, value);
        }
        result
    }
}

fn bind(m: &Var, t: &Term) -> Fallible<Substitution> {
    let placeholder = Term::Metavariable(*m);
    if t.occurs(&placeholder) {
        return Err(NoSolution);
    }
    if t.time() > m.time {
        return Err(NoSolution);
    }
    Ok(Substitution::single(m.name, t.clone()))
}

/// Robinson-style unification of two terms, constrained by an
/// instantiation-time ordering. This is the soundness heart of the
/// prover: a metavariable can never be bound to a term mentioning a
/// variable introduced after it, which is the eigenvariable condition
/// recast as a total order on introduction times.
#[instrument(level = "debug", skip_all, fields(a = %a, b = %b))]
pub fn unify(a: &Term, b: &Term) -> Fallible<Substitution> {
    let result = match (a, b) {
        (Term::Metavariable(ma), _) => bind(ma, b),
        (_, Term::Metavariable(mb)) => bind(mb, a),
        (Term::Variable(va), Term::Variable(vb)) => {
            if va.name == vb.name {
                Ok(Substitution::empty())
            } else {
                Err(NoSolution)
            }
        }
        (Term::Function(fa), Term::Function(fb))
            if fa.name == fb.name && fa.args.len() == fb.args.len() =>
        {
            let pairs: Vec<(Term, Term)> = fa
                .args
                .iter()
                .cloned()
                .zip(fb.args.iter().cloned())
                .collect();
            unify_list(&pairs)
        }
        _ => Err(NoSolution),
    };
    debug!(ok = result.is_ok(), "unify");
    result
}

/// Left-to-right fold over a sequence of term pairs, applying the
/// accumulated substitution to both sides of each pair before recursing.
pub fn unify_list(pairs: &[(Term, Term)]) -> Fallible<Substitution> {
    let mut subst = Substitution::empty();
    for (a, b) in pairs {
        let a = subst.apply_term(a);
        let b = subst.apply_term(b);
        let step = unify(&a, &b)?;
        subst.extend(step);
    }
    Ok(subst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fol_ir::intern;

    #[test]
    fn unifies_metavariable_with_constant() {
        let m = Term::metavariable(intern("t1"));
        let a = Term::function(intern("a"), vec![]);
        let subst = unify(&m, &a).unwrap();
        assert_eq!(subst.apply_term(&m), a);
    }

    #[test]
    fn occurs_check_rejects_self_reference() {
        let m = Term::metavariable(intern("t1"));
        let f = Term::function(intern("f"), vec![m.clone()]);
        assert_eq!(unify(&m, &f), Err(NoSolution));
    }

    #[test]
    fn time_check_rejects_binding_to_a_later_variable() {
        let m = Term::Metavariable(Var::new(intern("t1"), 0));
        let v = Term::Variable(Var::new(intern("v1"), 5));
        assert_eq!(unify(&m, &v), Err(NoSolution));
    }

    #[test]
    fn time_check_allows_binding_to_an_earlier_variable() {
        let m = Term::Metavariable(Var::new(intern("t1"), 5));
        let v = Term::Variable(Var::new(intern("v1"), 2));
        assert!(unify(&m, &v).is_ok());
    }

    #[test]
    fn distinct_variables_do_not_unify() {
        let a = Term::variable(intern("a"));
        let b = Term::variable(intern("b"));
        assert_eq!(unify(&a, &b), Err(NoSolution));
    }

    #[test]
    fn function_unification_composes_left_to_right() {
        let m = Term::metavariable(intern("t1"));
        let n = Term::metavariable(intern("t2"));
        let a = Term::function(intern("a"), vec![]);
        let f1 = Term::function(intern("f"), vec![m.clone(), n.clone()]);
        let f2 = Term::function(intern("f"), vec![a.clone(), m.clone()]);
        let subst = unify(&f1, &f2).unwrap();
        assert_eq!(subst.apply_term(&m), a);
        assert_eq!(subst.apply_term(&n), a);
    }

    #[test]
    fn unify_soundness_applies_to_structurally_equal_results() {
        let m = Term::metavariable(intern("t1"));
        let f = Term::function(intern("f"), vec![Term::variable(intern("x"))]);
        let subst = unify(&m, &f).unwrap();
        assert_eq!(subst.apply_term(&m), subst.apply_term(&f));
    }
}
