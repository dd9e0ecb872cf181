use std::collections::VecDeque;

use crate::activity::{ActivityParams, ClauseActivity, VarActivity};
use crate::analyze::analyze_conflict;
use crate::branching::{ActivityHeuristic, BranchingHeuristic};
use crate::clause::ClauseDB;
use crate::data::{LitVec, VarVec};
use crate::propagate::{enqueue, propagate, PropagateResult};
use crate::reduce::reduce_db;
use crate::simplify::simplify_db;
use crate::trail::{Trail, TrailReason};
use crate::var::{Lit, Literal, SymbolTable, Var};
use crate::watch::Watch;

/// Callback invoked for every literal forced by unit propagation (not
/// decisions). Rust has no subclassing, so where `pyminsat`'s
/// `Solver._handleliteralactivityinpropagation` was an overridable method,
/// this is a plain field a caller can set instead.
type PropagateHook = Box<dyn FnMut(Lit)>;

/// Search-tuning limits, independent of the activity decay constants.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Reduce-DB runs once the learnt-clause count exceeds
    /// `original_clause_count / reduce_db_divisor`.
    pub reduce_db_divisor: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits { reduce_db_divisor: 3 }
    }
}

/// Running search counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stats {
    pub decisions: u64,
    pub conflicts: u64,
    pub reduce_db_runs: u64,
}

/// A satisfying assignment, keyed by the symbols the caller originally used
/// in [`Solver::add_clause`].
pub struct Model<'a> {
    vars: &'a SymbolTable,
    trail: &'a Trail,
}

impl<'a> Model<'a> {
    /// The truth value assigned to `symbol`.
    ///
    /// Panics if `symbol` was never mentioned in any added clause.
    pub fn value(&self, symbol: &str) -> bool {
        let v = self.vars.get(symbol).unwrap_or_else(|| panic!("unknown symbol: {symbol}"));
        self.trail.value_of_var(v).expect("every variable is assigned in a satisfying model")
    }

    /// Every `(symbol, value)` pair in the model.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, bool)> + 'a {
        let vars = self.vars;
        let trail = self.trail;
        (1..=vars.len() as u32).map(move |i| {
            let v = Var::from_index(i);
            (vars.symbol(v), trail.value_of_var(v).expect("every variable is assigned"))
        })
    }
}

/// The result of a completed search.
pub enum SolveOutcome<'a> {
    Sat(Model<'a>),
    Unsat,
}

/// A from-scratch CDCL core: two-watched-literal propagation, first-UIP
/// conflict analysis with non-chronological backjumping, an activity-ranked
/// learnt clause database, and activity-driven branching.
pub struct Solver {
    vars: SymbolTable,
    clause_db: ClauseDB,
    watches: LitVec<Vec<Watch>>,
    trail: Trail,
    queue: VecDeque<Lit>,
    var_activity: VarActivity,
    clause_activity: ClauseActivity,
    seen: VarVec<bool>,
    branching: Box<dyn BranchingHeuristic>,
    trivially_unsat: bool,
    limits: Limits,
    stats: Stats,
    on_propagate_hook: Option<PropagateHook>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        let params = ActivityParams::default();
        Solver {
            vars: SymbolTable::new(),
            clause_db: ClauseDB::new(),
            watches: LitVec::new(),
            trail: Trail::new(),
            queue: VecDeque::new(),
            var_activity: VarActivity::new(&params),
            clause_activity: ClauseActivity::new(&params),
            seen: VarVec::new(),
            branching: Box::new(ActivityHeuristic),
            trivially_unsat: false,
            limits: Limits::default(),
            stats: Stats::default(),
            on_propagate_hook: None,
        }
    }

    /// Replace the default activity-based branching heuristic.
    pub(crate) fn with_branching_heuristic(mut self, heuristic: impl BranchingHeuristic + 'static) -> Self {
        self.branching = Box::new(heuristic);
        self
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Run `hook` on every literal forced by unit propagation during the
    /// remainder of the search (decisions and axioms from simplification are
    /// not included).
    pub fn with_propagate_hook(mut self, hook: impl FnMut(Lit) + 'static) -> Self {
        self.on_propagate_hook = Some(Box::new(hook));
        self
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    fn intern(&mut self, symbol: &str) -> Var {
        let (v, is_new) = self.vars.intern(symbol);
        if is_new {
            self.trail.expand(v);
            self.var_activity.expand(v);
            self.seen.expand(v, false);
        }
        v
    }

    fn to_internal(&mut self, lit: Literal) -> Lit {
        let v = self.intern(&lit.symbol);
        Lit::from_var(v, lit.negated)
    }

    /// Add a clause. A structurally tautological clause (a variable and its
    /// negation both present) or one reduced to empty by this check alone
    /// is handled immediately; everything else is recorded with watch
    /// registration deferred to the one-shot simplification pass `solve`
    /// runs before searching.
    pub fn add_clause<I>(&mut self, literals: I)
    where
        I: IntoIterator,
        I::Item: Into<Literal>,
    {
        if self.trivially_unsat {
            return;
        }

        let mut lits: Vec<Lit> = literals.into_iter().map(|l| self.to_internal(l.into())).collect();
        lits.sort_by_key(|l| l.bits());
        lits.dedup();

        if lits.windows(2).any(|w| w[0].var() == w[1].var()) {
            return; // tautology: always true, contributes nothing
        }

        if lits.is_empty() {
            self.trivially_unsat = true;
            return;
        }

        for &l in &lits {
            self.var_activity.bump(l.var());
        }

        self.clause_db.insert_clause(lits, false);
    }

    fn record_learnt_clause(&mut self, lits: Vec<Lit>) {
        for &l in &lits {
            self.var_activity.bump(l.var());
        }

        if lits.len() == 1 {
            enqueue(&mut self.trail, &mut self.queue, lits[0], TrailReason::Axiom);
            return;
        }

        let (w0, w1) = (lits[0], lits[1]);
        let idx = self.clause_db.insert_clause(lits, true);
        self.clause_activity.bump(&mut self.clause_db, idx);

        self.watches.expand(w0, Vec::new());
        self.watches.expand(w1, Vec::new());
        self.watches[w0].push(Watch { clause: idx });
        self.watches[w1].push(Watch { clause: idx });

        enqueue(&mut self.trail, &mut self.queue, w0, TrailReason::Propagated { clause: idx });
    }

    fn all_assigned(&self) -> bool {
        self.trail.assigned_vars() == self.trail.total_vars()
    }

    fn decide(&mut self) -> Option<Lit> {
        let num_vars = self.trail.total_vars() as u32;
        self.branching.pick(&self.var_activity, &self.trail, num_vars)
    }

    fn maybe_reduce_db(&mut self) {
        let limit = (self.clause_db.original_count() / self.limits.reduce_db_divisor.max(1)).max(1);
        if self.clause_db.learnt_count() > limit {
            tracing::debug!(learnt = self.clause_db.learnt_count(), limit, "reduce_db");
            reduce_db(&mut self.clause_db, &mut self.watches, &self.trail, self.clause_activity.inc());
            self.stats.reduce_db_runs += 1;
        }
    }

    /// Run `propagate`, then report every newly forced (non-decision) literal
    /// to `on_propagate_hook`, if one is set.
    fn run_propagate(&mut self) -> PropagateResult {
        let before = self.trail.assigned_vars();
        let result = propagate(&mut self.clause_db, &mut self.watches, &mut self.trail, &mut self.queue);
        if let Some(hook) = &mut self.on_propagate_hook {
            for lit in self.trail.iter().skip(before) {
                hook(lit);
            }
        }
        result
    }

    /// Run the search to completion.
    #[tracing::instrument(skip_all)]
    pub fn solve(&mut self) -> SolveOutcome<'_> {
        if self.trivially_unsat {
            return SolveOutcome::Unsat;
        }

        if !simplify_db(&mut self.clause_db, &mut self.watches, &mut self.trail, &mut self.queue) {
            self.trivially_unsat = true;
            tracing::debug!("trivially unsat after top-level simplification");
            return SolveOutcome::Unsat;
        }

        loop {
            match self.run_propagate() {
                PropagateResult::Conflict(conflict) => {
                    self.stats.conflicts += 1;
                    tracing::trace!(level = self.trail.current_level(), "conflict");

                    if self.trail.current_level() == 0 {
                        return SolveOutcome::Unsat;
                    }

                    let result = analyze_conflict(
                        &mut self.clause_db,
                        &mut self.trail,
                        &mut self.var_activity,
                        &mut self.clause_activity,
                        &mut self.seen,
                        conflict,
                    );

                    tracing::debug!(
                        backjump_level = result.backjump_level,
                        learnt_size = result.learnt.len(),
                        "learnt clause"
                    );

                    self.trail.backjump_to(result.backjump_level);
                    self.record_learnt_clause(result.learnt);

                    self.var_activity.decay_activities();
                    self.clause_activity.decay_activities();
                }
                PropagateResult::NoConflict => {
                    if self.all_assigned() {
                        return SolveOutcome::Sat(Model { vars: &self.vars, trail: &self.trail });
                    }

                    self.maybe_reduce_db();

                    let lit = self.decide().expect("an unassigned variable must exist here");
                    tracing::trace!(?lit, level = self.trail.current_level() + 1, "decide");
                    self.trail.push_decision_level();
                    self.stats.decisions += 1;
                    enqueue(&mut self.trail, &mut self.queue, lit, TrailReason::Decision);
                }
            }
        }
    }

    /// Checks the invariants `spec.md` §8 names: every propagation reason's
    /// clause has the propagated literal in its first slot, and decision
    /// levels are non-decreasing along the trail. Debug-only — this walks
    /// the whole trail and is too expensive to run unconditionally.
    #[cfg(debug_assertions)]
    pub(crate) fn check_integrity(&self) -> bool {
        let mut last_level = 0;
        for lit in self.trail.iter() {
            let level = self.trail.get_decision_level(lit).expect("trail literal must be assigned");
            if level < last_level {
                return false;
            }
            last_level = level;

            if let Some(TrailReason::Propagated { clause }) = self.trail.get_reason(lit.var()) {
                if self.clause_db.get(clause)[0] != lit {
                    return false;
                }
            }
        }
        true
    }
}
