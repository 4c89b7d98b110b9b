use std::collections::VecDeque;

use fol_engine::{Cancellation, StepResult};
use fol_ir::term::Term;
use fol_ir::Formula;
use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, instrument};

use crate::engine::sequent::{
    fresh_name, insert_min, pick_expansion_candidate, Depth, Sequent, Side, SiblingGroup,
    SiblingGroupId, SequentId,
};
use crate::infer::unify::unify_list;

/// Optional resource bounds on a `Search`, modelled on a CLI-level
/// `--overflow-depth` knob.
#[derive(Clone, Debug, Default)]
pub struct SearchConfig {
    pub max_steps: Option<usize>,
    pub cancellation: Option<Cancellation>,
}

/// Breadth-first search over open sequents.
///
/// A `Search` owns an arena of sequents and sibling groups addressed by
/// integer id rather than sharing sequents by pointer, since the siblings
/// set must be mutable from every member and Rust forbids aliased mutable
/// references.
pub struct Search {
    arena: Vec<Sequent>,
    sibling_groups: Vec<SiblingGroup>,
    frontier: VecDeque<SequentId>,
    closed: FxHashSet<SequentId>,
    steps_remaining: Option<usize>,
    cancellation: Cancellation,
}

impl Search {
    pub fn new(initial: Sequent) -> Self {
        Self::with_config(initial, SearchConfig::default())
    }

    pub fn with_config(initial: Sequent, config: SearchConfig) -> Self {
        let mut search = Search {
            arena: Vec::new(),
            sibling_groups: Vec::new(),
            frontier: VecDeque::new(),
            closed: FxHashSet::default(),
            steps_remaining: config.max_steps,
            cancellation: config.cancellation.unwrap_or_default(),
        };
        search.push_sequent(initial);
        search
    }

    pub fn cancellation(&self) -> Cancellation {
        self.cancellation.clone()
    }

    /// One step: dequeue a sequent, attempt axiomatic or unification
    /// closure, otherwise apply exactly one expansion rule. Closed
    /// sequents that are still sitting in the frontier (because a sibling
    /// group closed them out from under a different dequeue) are skipped.
    #[instrument(level = "debug", skip(self))]
    pub fn step(&mut self) -> StepResult {
        if self.cancellation.is_cancelled() {
            return StepResult::Cancelled;
        }
        if let Some(remaining) = &mut self.steps_remaining {
            if *remaining == 0 {
                return StepResult::Diverging;
            }
            *remaining -= 1;
        }
        loop {
            let id = match self.frontier.pop_front() {
                Some(id) => id,
                None => return StepResult::Closed(true),
            };
            if self.closed.contains(&id) {
                continue;
            }
            return self.process(id);
        }
    }

    /// Runs `step` to completion, ignoring cancellation and step budgets.
    /// This is what `prove`/`prove_or_disprove` use for their unbounded
    /// semantics; `fol-tests` uses `with_config` with a budget so a
    /// non-theorem scenario cannot hang the test suite.
    pub fn run_to_completion(&mut self) -> bool {
        loop {
            match self.step() {
                StepResult::Running => continue,
                StepResult::Closed(verdict) => return verdict,
                StepResult::Diverging | StepResult::Cancelled => return false,
            }
        }
    }

    fn process(&mut self, id: SequentId) -> StepResult {
        if self.is_axiomatically_closed(id) {
            debug!(sequent = %self.arena[id.0], "axiomatically closed");
            self.closed.insert(id);
            return StepResult::Running;
        }
        if let Some(group) = self.arena[id.0].siblings {
            if self.try_close_sibling_group(group) {
                return StepResult::Running;
            }
        }
        if self.select_and_expand(id) {
            StepResult::Running
        } else {
            debug!(sequent = %self.arena[id.0], "stuck");
            StepResult::Closed(false)
        }
    }

    fn is_axiomatically_closed(&self, id: SequentId) -> bool {
        let seq = &self.arena[id.0];
        seq.left.keys().any(|f| seq.right.contains_key(f))
    }

    fn try_close_sibling_group(&mut self, group: SiblingGroupId) -> bool {
        let members: Vec<SequentId> = self.sibling_groups[group.0]
            .members
            .iter()
            .copied()
            .filter(|id| !self.closed.contains(id))
            .collect();
        if members.is_empty() {
            return false;
        }

        let mut per_member_candidates: Vec<Vec<Vec<(Term, Term)>>> = Vec::with_capacity(members.len());
        for &id in &members {
            let seq = &self.arena[id.0];
            let mut candidates = Vec::new();
            for (lf, _) in seq.left.iter() {
                let (lname, largs) = match lf {
                    Formula::Predicate(name, args) => (name, args),
                    _ => continue,
                };
                for (rf, _) in seq.right.iter() {
                    let (rname, rargs) = match rf {
                        Formula::Predicate(name, args) => (name, args),
                        _ => continue,
                    };
                    if lname == rname && largs.len() == rargs.len() {
                        let pairs: Vec<(Term, Term)> =
                            largs.iter().cloned().zip(rargs.iter().cloned()).collect();
                        candidates.push(pairs);
                    }
                }
            }
            if candidates.is_empty() {
                return false;
            }
            per_member_candidates.push(candidates);
        }

        for combo in per_member_candidates.into_iter().multi_cartesian_product() {
            let all_pairs: Vec<(Term, Term)> = combo.into_iter().flatten().collect();
            if unify_list(&all_pairs).is_ok() {
                for &id in &members {
                    self.closed.insert(id);
                }
                debug!(count = members.len(), "sibling group closed simultaneously");
                return true;
            }
        }
        false
    }

    fn select_and_expand(&mut self, id: SequentId) -> bool {
        let seq = self.arena[id.0].clone();
        let (side, formula) = match pick_expansion_candidate(&seq) {
            Some(x) => x,
            None => return false,
        };
        let child_depth: Depth = seq.depth + 1;
        let base_left = seq.left.clone();
        let base_right = seq.right.clone();
        let siblings = seq.siblings;

        let mut children = Vec::new();

        match (side, &formula) {
            (Side::Left, Formula::Not(g)) => {
                let mut left = base_left;
                left.remove(&formula);
                let mut right = base_right;
                insert_min(&mut right, (**g).clone(), child_depth);
                children.push(Sequent { left, right, siblings, depth: child_depth });
            }
            (Side::Left, Formula::And(a, b)) => {
                let mut left = base_left;
                left.remove(&formula);
                insert_min(&mut left, (**a).clone(), child_depth);
                insert_min(&mut left, (**b).clone(), child_depth);
                children.push(Sequent { left, right: base_right, siblings, depth: child_depth });
            }
            (Side::Left, Formula::Or(a, b)) => {
                let mut left_a = base_left.clone();
                left_a.remove(&formula);
                insert_min(&mut left_a, (**a).clone(), child_depth);
                let mut left_b = base_left;
                left_b.remove(&formula);
                insert_min(&mut left_b, (**b).clone(), child_depth);
                children.push(Sequent { left: left_a, right: base_right.clone(), siblings, depth: child_depth });
                children.push(Sequent { left: left_b, right: base_right, siblings, depth: child_depth });
            }
            (Side::Left, Formula::Implies(a, b)) => {
                let mut left_a = base_left.clone();
                left_a.remove(&formula);
                let mut right_a = base_right.clone();
                insert_min(&mut right_a, (**a).clone(), child_depth);
                let mut left_b = base_left;
                left_b.remove(&formula);
                insert_min(&mut left_b, (**b).clone(), child_depth);
                children.push(Sequent { left: left_a, right: right_a, siblings, depth: child_depth });
                children.push(Sequent { left: left_b, right: base_right, siblings, depth: child_depth });
            }
            (Side::Left, Formula::Forall(var, body)) => {
                let group = siblings.unwrap_or_else(|| self.new_sibling_group());
                let retained_depth = base_left[&formula] + 1;
                let meta_name = fresh_name(&seq, "t");
                let metavar = Term::metavariable(meta_name).set_instantiation_time(retained_depth);
                let instantiated = body.replace(&Term::variable(*var), &metavar);
                let mut left = base_left;
                left.insert(formula.clone(), retained_depth);
                insert_min(&mut left, instantiated, retained_depth);
                children.push(Sequent { left, right: base_right, siblings: Some(group), depth: child_depth });
            }
            (Side::Left, Formula::Exists(var, body)) => {
                let var_name = fresh_name(&seq, "v");
                let fresh_var = Term::variable(var_name).set_instantiation_time(child_depth);
                let instantiated = body.replace(&Term::variable(*var), &fresh_var);
                let mut left = base_left;
                left.remove(&formula);
                insert_min(&mut left, instantiated, child_depth);
                children.push(Sequent { left, right: base_right, siblings, depth: child_depth });
            }
            (Side::Right, Formula::Not(g)) => {
                let mut right = base_right;
                right.remove(&formula);
                let mut left = base_left;
                insert_min(&mut left, (**g).clone(), child_depth);
                children.push(Sequent { left, right, siblings, depth: child_depth });
            }
            (Side::Right, Formula::And(a, b)) => {
                let mut right_a = base_right.clone();
                right_a.remove(&formula);
                insert_min(&mut right_a, (**a).clone(), child_depth);
                let mut right_b = base_right;
                right_b.remove(&formula);
                insert_min(&mut right_b, (**b).clone(), child_depth);
                children.push(Sequent { left: base_left.clone(), right: right_a, siblings, depth: child_depth });
                children.push(Sequent { left: base_left, right: right_b, siblings, depth: child_depth });
            }
            (Side::Right, Formula::Or(a, b)) => {
                let mut right = base_right;
                right.remove(&formula);
                insert_min(&mut right, (**a).clone(), child_depth);
                insert_min(&mut right, (**b).clone(), child_depth);
                children.push(Sequent { left: base_left, right, siblings, depth: child_depth });
            }
            (Side::Right, Formula::Implies(a, b)) => {
                let mut right = base_right;
                right.remove(&formula);
                insert_min(&mut right, (**b).clone(), child_depth);
                let mut left = base_left;
                insert_min(&mut left, (**a).clone(), child_depth);
                children.push(Sequent { left, right, siblings, depth: child_depth });
            }
            (Side::Right, Formula::Forall(var, body)) => {
                let var_name = fresh_name(&seq, "v");
                let fresh_var = Term::variable(var_name).set_instantiation_time(child_depth);
                let instantiated = body.replace(&Term::variable(*var), &fresh_var);
                let mut right = base_right;
                right.remove(&formula);
                insert_min(&mut right, instantiated, child_depth);
                children.push(Sequent { left: base_left, right, siblings, depth: child_depth });
            }
            (Side::Right, Formula::Exists(var, body)) => {
                let group = siblings.unwrap_or_else(|| self.new_sibling_group());
                let retained_depth = base_right[&formula] + 1;
                let meta_name = fresh_name(&seq, "t");
                let metavar = Term::metavariable(meta_name).set_instantiation_time(retained_depth);
                let instantiated = body.replace(&Term::variable(*var), &metavar);
                let mut right = base_right;
                right.insert(formula.clone(), retained_depth);
                insert_min(&mut right, instantiated, retained_depth);
                children.push(Sequent { left: base_left, right, siblings: Some(group), depth: child_depth });
            }
            (_, Formula::Predicate(..)) => unreachable!("selection policy never picks an atom"),
        }

        for child in children {
            self.push_sequent(child);
        }
        true
    }

    fn new_sibling_group(&mut self) -> SiblingGroupId {
        let id = SiblingGroupId(self.sibling_groups.len());
        self.sibling_groups.push(SiblingGroup::default());
        id
    }

    fn push_sequent(&mut self, seq: Sequent) -> SequentId {
        let id = SequentId(self.arena.len());
        if let Some(group) = seq.siblings {
            self.sibling_groups[group.0].members.insert(id);
        }
        self.arena.push(seq);
        self.frontier.push_back(id);
        id
    }
}
