use std::collections::VecDeque;

use crate::clause::{ClauseDB, ClauseIdx};
use crate::data::LitVec;
use crate::trail::{Trail, TrailReason};
use crate::var::Lit;
use crate::watch::Watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropagateResult {
    Conflict(ClauseIdx),
    NoConflict,
}

/// Assign `lit` (if unassigned) recording `reason`. Returns whether the
/// literal holds afterward — `false` means it was already false, i.e. a
/// conflict.
pub(crate) fn enqueue(trail: &mut Trail, queue: &mut VecDeque<Lit>, lit: Lit, reason: TrailReason) -> bool {
    if trail.is_lit_assigned(lit) {
        trail.is_lit_satisfied(lit)
    } else {
        trail.append(lit, reason);
        queue.push_back(lit);
        true
    }
}

/// Drain the propagation queue, running unit propagation under the
/// two-watched-literal scheme until either the queue empties or a clause
/// becomes fully false.
///
/// Per dequeued literal `v_lit`, only clauses watching `-v_lit` (the literal
/// that just became false) are examined. A clause is re-homed to a new
/// watched literal when one is found among its unwatched literals;
/// otherwise it is kept on the same watch list and, if its other watched
/// literal is unassigned, that literal is enqueued — or, if it is already
/// false, a conflict is reported.
pub(crate) fn propagate(
    clause_db: &mut ClauseDB,
    watches: &mut LitVec<Vec<Watch>>,
    trail: &mut Trail,
    queue: &mut VecDeque<Lit>,
) -> PropagateResult {
    while let Some(true_lit) = queue.pop_front() {
        debug_assert!(trail.is_lit_satisfied(true_lit));
        let false_lit = -true_lit;

        let mut conflict: Option<ClauseIdx> = None;
        let (watch_list, mut remaining) = watches.remaining(false_lit);

        watch_list.retain(|watch| {
            if conflict.is_some() {
                return true;
            }

            let cls_idx = watch.clause;
            let cls = clause_db.get_mut(cls_idx);

            if trail.is_lit_satisfied(cls[0]) {
                return true;
            }

            if cls.len() == 1 {
                // The clause's sole literal is exactly the one that just went false.
                conflict = Some(cls_idx);
                return true;
            }

            if cls[0] == false_lit {
                cls.swap(0, 1);
            }
            debug_assert_eq!(cls[1], false_lit);

            if trail.is_lit_satisfied(cls[0]) {
                return true;
            }

            for i in 2..cls.len() {
                if !trail.is_lit_unsatisfied(cls[i]) {
                    cls.swap(1, i);
                    let new_watch_lit = cls[1];
                    remaining[new_watch_lit].push(Watch { clause: cls_idx });
                    return false;
                }
            }

            let unit_lit = cls[0];
            if !enqueue(trail, queue, unit_lit, TrailReason::Propagated { clause: cls_idx }) {
                conflict = Some(cls_idx);
            }
            true
        });

        if let Some(c) = conflict {
            queue.clear();
            return PropagateResult::Conflict(c);
        }
    }

    PropagateResult::NoConflict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::var::Var;

    fn lit(i: u32, neg: bool) -> Lit {
        Lit::from_var(Var::from_index(i), neg)
    }

    fn setup(n_vars: u32) -> (ClauseDB, LitVec<Vec<Watch>>, Trail, VecDeque<Lit>) {
        let db = ClauseDB::new();
        let watches = LitVec::new();
        let mut trail = Trail::new();
        for i in 1..=n_vars {
            trail.expand(Var::from_index(i));
        }
        (db, watches, trail, VecDeque::new())
    }

    fn watch(watches: &mut LitVec<Vec<Watch>>, l: Lit, idx: ClauseIdx) {
        watches.expand(l, Vec::new());
        watches[l].push(Watch { clause: idx });
    }

    #[test]
    fn unit_propagation_chains() {
        let (mut db, mut watches, mut trail, mut queue) = setup(3);

        // (-1 or 2) and (-2 or 3): asserting 1 should force 2 then 3.
        let c1 = db.insert_clause(vec![lit(1, true), lit(2, false)], false);
        watch(&mut watches, lit(1, true), c1);
        watch(&mut watches, lit(2, false), c1);

        let c2 = db.insert_clause(vec![lit(2, true), lit(3, false)], false);
        watch(&mut watches, lit(2, true), c2);
        watch(&mut watches, lit(3, false), c2);

        trail.push_decision_level();
        enqueue(&mut trail, &mut queue, lit(1, false), TrailReason::Decision);

        let result = propagate(&mut db, &mut watches, &mut trail, &mut queue);
        assert_eq!(result, PropagateResult::NoConflict);
        assert!(trail.is_lit_satisfied(lit(2, false)));
        assert!(trail.is_lit_satisfied(lit(3, false)));
    }

    #[test]
    fn detects_conflict() {
        let (mut db, mut watches, mut trail, mut queue) = setup(2);

        // (-1 or 2) and (-1 or -2): asserting 1 forces 2 and -2, a conflict.
        let c1 = db.insert_clause(vec![lit(1, true), lit(2, false)], false);
        watch(&mut watches, lit(1, true), c1);
        watch(&mut watches, lit(2, false), c1);

        let c2 = db.insert_clause(vec![lit(1, true), lit(2, true)], false);
        watch(&mut watches, lit(1, true), c2);
        watch(&mut watches, lit(2, true), c2);

        trail.push_decision_level();
        enqueue(&mut trail, &mut queue, lit(1, false), TrailReason::Decision);

        let result = propagate(&mut db, &mut watches, &mut trail, &mut queue);
        assert!(matches!(result, PropagateResult::Conflict(_)));
    }
}
