use crate::clause::{ClauseDB, ClauseIdx};
use crate::data::VarVec;
use crate::var::Var;

/// Tunable decay/bump constants for both variable and clause activity.
/// Mirrors MiniSat-family defaults.
#[derive(Debug, Clone, Copy)]
pub struct ActivityParams {
    pub var_inc: f64,
    pub var_decay: f64,
    pub clause_inc: f64,
    pub clause_decay: f64,
}

impl Default for ActivityParams {
    fn default() -> Self {
        ActivityParams { var_inc: 100.0, var_decay: 0.95, clause_inc: 1000.0, clause_decay: 0.999 }
    }
}

const VAR_ACTIVITY_RESCALE_THRESHOLD: f64 = 1e100;
const CLAUSE_ACTIVITY_RESCALE_THRESHOLD: f64 = 1e20;

/// Per-variable activity score, bumped on every literal seen during conflict
/// analysis and decayed once per conflict. `inc` shrinks geometrically
/// (`inc *= decay`) rather than growing, so a fixed additive bump of `inc`
/// counts recent conflicts more than old ones without ever touching the
/// scores of variables not involved in the current conflict.
pub(crate) struct VarActivity {
    scores: VarVec<f64>,
    inc: f64,
    decay: f64,
}

impl VarActivity {
    pub fn new(params: &ActivityParams) -> Self {
        VarActivity { scores: VarVec::new(), inc: params.var_inc, decay: params.var_decay }
    }

    pub fn expand(&mut self, v: Var) {
        self.scores.expand(v, 0.0);
    }

    pub fn score(&self, v: Var) -> f64 {
        self.scores[v]
    }

    pub fn bump(&mut self, v: Var) {
        self.scores[v] += self.inc;
        if self.scores[v] > VAR_ACTIVITY_RESCALE_THRESHOLD {
            for slot in &mut self.scores {
                *slot *= 1.0 / VAR_ACTIVITY_RESCALE_THRESHOLD;
            }
            self.inc *= 1.0 / VAR_ACTIVITY_RESCALE_THRESHOLD;
        }
    }

    pub fn decay_activities(&mut self) {
        self.inc *= self.decay;
    }
}

/// Per-clause activity, used by Reduce-DB to decide which learnt clauses are
/// least useful. Bumped on every learnt clause involved in a conflict
/// resolution, decayed once per conflict.
pub(crate) struct ClauseActivity {
    inc: f64,
    decay: f64,
}

impl ClauseActivity {
    pub fn new(params: &ActivityParams) -> Self {
        ClauseActivity { inc: params.clause_inc, decay: params.clause_decay }
    }

    pub fn inc(&self) -> f64 {
        self.inc
    }

    pub fn bump(&mut self, clause_db: &mut ClauseDB, idx: ClauseIdx) {
        clause_db.bump_activity(idx, self.inc);
        if clause_db.activity(idx) > CLAUSE_ACTIVITY_RESCALE_THRESHOLD {
            clause_db.rescale_activities(1.0 / CLAUSE_ACTIVITY_RESCALE_THRESHOLD);
            self.inc *= 1.0 / CLAUSE_ACTIVITY_RESCALE_THRESHOLD;
        }
    }

    pub fn decay_activities(&mut self) {
        self.inc *= self.decay;
    }
}
