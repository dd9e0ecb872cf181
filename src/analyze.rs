use crate::activity::{ClauseActivity, VarActivity};
use crate::clause::{ClauseDB, ClauseIdx};
use crate::data::VarVec;
use crate::trail::{Trail, TrailReason};
use crate::var::Lit;

/// The clause learnt from a conflict, plus the level to backjump to before
/// asserting its first literal.
pub(crate) struct AnalyzeResult {
    pub learnt: Vec<Lit>,
    pub backjump_level: u32,
}

/// First-UIP conflict analysis: resolve the conflicting clause against
/// propagation reasons, walking the trail backward, until exactly one
/// literal of the current decision level remains. That literal's negation
/// becomes the asserting literal of the learnt clause.
///
/// `seen` must be all-`false` on entry and is restored to all-`false` on
/// return (it is a solver-owned scratch buffer reused across conflicts to
/// avoid reallocating a `VarVec` per conflict).
pub(crate) fn analyze_conflict(
    clause_db: &mut ClauseDB,
    trail: &mut Trail,
    var_activity: &mut VarActivity,
    clause_activity: &mut ClauseActivity,
    seen: &mut VarVec<bool>,
    conflict: ClauseIdx,
) -> AnalyzeResult {
    let current_level = trail.current_level();
    let mut learnt: Vec<Lit> = Vec::new();
    let mut counter: u32 = 0;
    let mut p: Option<Lit> = None;
    let mut current_reason = Some(conflict);

    loop {
        if let Some(reason_idx) = current_reason {
            if clause_db.is_learnt(reason_idx) {
                clause_activity.bump(clause_db, reason_idx);
            }
            for &q in clause_db.get(reason_idx) {
                if Some(q) == p {
                    continue;
                }
                let qv = q.var();
                if seen[qv] {
                    continue;
                }
                let level = trail.get_decision_level(q).expect("literal in reason clause must be assigned");
                if level == 0 {
                    continue;
                }
                seen[qv] = true;
                var_activity.bump(qv);
                if level >= current_level {
                    counter += 1;
                } else {
                    learnt.push(q);
                }
            }
        }

        let (lit, reason) = loop {
            let (popped_lit, popped_reason) = trail.undo_one();
            if seen[popped_lit.var()] {
                break (popped_lit, popped_reason);
            }
        };
        seen[lit.var()] = false;
        counter -= 1;
        p = Some(lit);

        if counter == 0 {
            break;
        }

        debug_assert!(
            matches!(reason, TrailReason::Propagated { .. }),
            "a non-propagated literal can only be the final UIP"
        );
        current_reason = match reason {
            TrailReason::Propagated { clause } => Some(clause),
            _ => None,
        };
    }

    let uip = p.expect("conflict analysis must find a UIP");
    learnt.push(-uip);
    let last = learnt.len() - 1;
    learnt.swap(0, last);

    for &l in &learnt {
        seen[l.var()] = false;
    }

    let mut backjump_level = 0;
    if learnt.len() > 1 {
        let mut max_idx = 1;
        let mut max_level = trail.get_decision_level(learnt[1]).expect("learnt literal must be assigned");
        for i in 2..learnt.len() {
            let level = trail.get_decision_level(learnt[i]).expect("learnt literal must be assigned");
            if level > max_level {
                max_level = level;
                max_idx = i;
            }
        }
        learnt.swap(1, max_idx);
        backjump_level = max_level;
    }

    AnalyzeResult { learnt, backjump_level }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityParams;
    use crate::var::Var;

    fn lit(i: u32, neg: bool) -> Lit {
        Lit::from_var(Var::from_index(i), neg)
    }

    /// x1 is decided true at level 1. At level 2, x2 is decided true and
    /// propagates a chain (x3, then x4 and x6 off x3, then x5 off x4) until
    /// (-x5 -x6) conflicts. Resolving the conflict walks back through x5, x6,
    /// x4 and pulls in x1's negation (level 1) before reaching x3, which
    /// turns out to be the first UIP. The learnt clause should be exactly
    /// {-x1, -x3}, backjumping to level 1.
    #[test]
    fn first_uip_resolves_to_single_asserting_literal() {
        let mut db = ClauseDB::new();
        let mut trail = Trail::new();
        let params = ActivityParams::default();
        let mut var_activity = VarActivity::new(&params);
        let mut clause_activity = ClauseActivity::new(&params);
        let mut seen = VarVec::new();
        for i in 1..=6 {
            let v = Var::from_index(i);
            trail.expand(v);
            var_activity.expand(v);
            seen.expand(v, false);
        }

        let a = db.insert_clause(vec![lit(2, true), lit(3, false)], false);
        let b = db.insert_clause(vec![lit(1, true), lit(3, true), lit(4, false)], false);
        let e = db.insert_clause(vec![lit(3, true), lit(6, false)], false);
        let c = db.insert_clause(vec![lit(4, true), lit(5, false)], false);
        let d = db.insert_clause(vec![lit(5, true), lit(6, true)], false);

        trail.push_decision_level();
        trail.append(lit(1, false), TrailReason::Decision);

        trail.push_decision_level();
        trail.append(lit(2, false), TrailReason::Decision);
        trail.append(lit(3, false), TrailReason::Propagated { clause: a });
        trail.append(lit(4, false), TrailReason::Propagated { clause: b });
        trail.append(lit(6, false), TrailReason::Propagated { clause: e });
        trail.append(lit(5, false), TrailReason::Propagated { clause: c });

        let result = analyze_conflict(&mut db, &mut trail, &mut var_activity, &mut clause_activity, &mut seen, d);

        assert_eq!(result.backjump_level, 1);
        assert_eq!(result.learnt.len(), 2);
        assert!(result.learnt.contains(&lit(1, true)));
        assert!(result.learnt.contains(&lit(3, true)));
        for i in 1..=6 {
            assert!(!seen[Var::from_index(i)]);
        }
    }
}
