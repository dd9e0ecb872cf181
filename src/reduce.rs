use crate::clause::{ClauseDB, ClauseIdx};
use crate::data::LitVec;
use crate::trail::{Trail, TrailReason};
use crate::watch::Watch;

/// A learnt clause is locked if it is currently the reason some assigned
/// variable is on the trail. Locked clauses survive Reduce-DB regardless of
/// activity, since discarding one would leave that assignment unexplained.
fn is_locked(clause_db: &ClauseDB, trail: &Trail, idx: ClauseIdx) -> bool {
    let lits = clause_db.get(idx);
    let first = lits[0];
    matches!(trail.get_reason(first.var()), Some(TrailReason::Propagated { clause }) if clause == idx)
}

fn remove_learnt_clause(clause_db: &mut ClauseDB, watches: &mut LitVec<Vec<Watch>>, idx: ClauseIdx) {
    let lits = clause_db.get(idx);
    let (w0, w1) = (lits[0], lits[1]);
    watches[w0].retain(|w| w.clause != idx);
    watches[w1].retain(|w| w.clause != idx);
    clause_db.mark_removed(idx);
}

/// Thin out the learnt-clause database, discarding the least active half
/// outright and, of the more active half, any clause whose activity has
/// fallen below the running average. Locked clauses are always kept.
pub(crate) fn reduce_db(clause_db: &mut ClauseDB, watches: &mut LitVec<Vec<Watch>>, trail: &Trail, clause_inc: f64) {
    let mut learnt = clause_db.learnt_indices();
    if learnt.is_empty() {
        return;
    }
    learnt.sort_by(|&a, &b| clause_db.activity(a).partial_cmp(&clause_db.activity(b)).unwrap());

    let cla_lim = clause_inc / learnt.len() as f64;
    let half = learnt.len() / 2;

    let mut removed = 0;
    for (i, &idx) in learnt.iter().enumerate() {
        if is_locked(clause_db, trail, idx) {
            continue;
        }
        if i < half || clause_db.activity(idx) < cla_lim {
            remove_learnt_clause(clause_db, watches, idx);
            removed += 1;
        }
    }
    tracing::debug!(removed, kept = learnt.len() - removed, "reduce_db finished");
}
