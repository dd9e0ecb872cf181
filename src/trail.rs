use crate::assignment::Assignment;
use crate::clause::ClauseIdx;
use crate::data::VarVec;
use crate::var::{Lit, Var};

/// Why a literal ended up on the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrailReason {
    /// Chosen by the branching heuristic.
    Decision,
    /// Forced by unit propagation under `clause`.
    Propagated { clause: ClauseIdx },
    /// Forced at level 0 by top-level simplification, with no clause to
    /// point to (e.g. a bare unit clause).
    Axiom,
}

/// The assignment trail: a chronological record of every assigned literal,
/// its decision level, and why it was assigned. Non-chronological backjump
/// unwinds it past whole decision levels at once.
#[derive(Default)]
pub(crate) struct Trail {
    trail: Vec<Lit>,
    trail_lim: Vec<usize>,
    assignment: Assignment,
    reason: VarVec<Option<TrailReason>>,
}

impl Trail {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn expand(&mut self, v: Var) {
        self.assignment.expand(v);
        self.reason.expand(v, None);
    }

    pub fn total_vars(&self) -> usize {
        self.assignment.total_vars()
    }

    pub fn assigned_vars(&self) -> usize {
        self.trail.len()
    }

    pub fn current_level(&self) -> u32 {
        self.trail_lim.len() as u32
    }

    pub fn is_lit_satisfied(&self, lit: Lit) -> bool {
        self.assignment.is_lit_satisfied(lit)
    }

    pub fn is_lit_unsatisfied(&self, lit: Lit) -> bool {
        self.assignment.is_lit_unsatisfied(lit)
    }

    pub fn is_lit_assigned(&self, lit: Lit) -> bool {
        self.assignment.is_lit_assigned(lit)
    }

    pub fn is_var_assigned(&self, v: Var) -> bool {
        self.assignment.value_of_var(v).is_some()
    }

    pub fn value_of_var(&self, v: Var) -> Option<bool> {
        self.assignment.value_of_var(v)
    }

    pub fn get_decision_level(&self, lit: Lit) -> Option<u32> {
        self.assignment.level_of_var(lit.var())
    }

    pub fn get_reason(&self, v: Var) -> Option<TrailReason> {
        self.reason[v]
    }

    pub fn push_decision_level(&mut self) {
        self.trail_lim.push(self.trail.len());
    }

    /// Assign `lit` at the current decision level, recording `reason`.
    pub fn append(&mut self, lit: Lit, reason: TrailReason) {
        let level = self.current_level();
        self.assignment.assign_lit(lit, level);
        self.reason[lit.var()] = Some(reason);
        self.trail.push(lit);
    }

    /// Pop the most recent trail entry and unassign it, returning the
    /// literal and the reason it had carried. Does not touch decision-level
    /// bookkeeping — conflict analysis uses this directly to walk the trail
    /// backward while searching for the first UIP.
    pub fn undo_one(&mut self) -> (Lit, TrailReason) {
        let lit = self.trail.pop().expect("undo_one called on an empty trail");
        let reason = self.reason[lit.var()].take().expect("assigned variable must carry a reason");
        self.assignment.unassign_var(lit.var());
        (lit, reason)
    }

    /// Non-chronologically unwind the trail back to (and including) decision
    /// level `level + 1`, leaving the solver at decision level `level`.
    pub fn backjump_to(&mut self, level: u32) {
        while self.current_level() > level {
            let boundary = self.trail_lim.pop().expect("current_level > level implies a limit entry");
            while self.trail.len() > boundary {
                self.undo_one();
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Lit> + '_ {
        self.trail.iter().copied()
    }
}
