use std::collections::VecDeque;

use crate::clause::ClauseDB;
use crate::data::LitVec;
use crate::propagate::{enqueue, propagate, PropagateResult};
use crate::trail::{Trail, TrailReason};
use crate::watch::Watch;

/// One-shot top-level simplification, run once before the main search loop
/// starts. For every original clause: drop it from consideration if it is
/// already satisfied by a level-0 fact (permanently true, so simply never
/// watched again); otherwise strip any literal already falsified at level 0.
/// A clause that shrinks to empty means the formula is trivially
/// unsatisfiable; one that shrinks to a single literal is asserted directly
/// rather than watched. Everything else gets its first two literals
/// registered as watches.
///
/// Runs as a single forward pass over a snapshot of the original clauses
/// taken up front, so clauses discovered to be unit mid-pass affect clauses
/// processed later in the same pass without the snapshot itself being
/// mutated underfoot.
pub(crate) fn simplify_db(
    clause_db: &mut ClauseDB,
    watches: &mut LitVec<Vec<Watch>>,
    trail: &mut Trail,
    queue: &mut VecDeque<crate::var::Lit>,
) -> bool {
    debug_assert_eq!(trail.current_level(), 0, "simplification only runs before any decision is made");

    for idx in clause_db.original_iter().collect::<Vec<_>>() {
        if clause_db.get(idx).iter().any(|&l| trail.is_lit_satisfied(l)) {
            continue;
        }

        clause_db.lits_mut(idx).retain(|&l| !trail.is_lit_unsatisfied(l));
        let len = clause_db.get(idx).len();

        match len {
            0 => return false,
            1 => {
                let unit = clause_db.get(idx)[0];
                if !enqueue(trail, queue, unit, TrailReason::Axiom) {
                    return false;
                }
            }
            _ => {
                let lits = clause_db.get(idx);
                let (w0, w1) = (lits[0], lits[1]);
                watches.expand(w0, Vec::new());
                watches.expand(w1, Vec::new());
                watches[w0].push(Watch { clause: idx });
                watches[w1].push(Watch { clause: idx });
            }
        }
    }

    matches!(propagate(clause_db, watches, trail, queue), PropagateResult::NoConflict)
}
