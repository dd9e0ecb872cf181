use crate::activity::VarActivity;
use crate::trail::Trail;
use crate::var::{Lit, Var};

/// Chooses the next literal to decide on. Injectable so alternative search
/// orders can be swapped in without touching the solver loop.
///
/// Not part of the crate's public surface: `VarActivity`/`Trail` are
/// internal types, so this stays `pub(crate)` and is only swappable from
/// within the crate (e.g. by tests exercising a fixed decision order).
pub(crate) trait BranchingHeuristic {
    /// Returns `None` once every variable is assigned.
    fn pick(&mut self, activity: &VarActivity, trail: &Trail, num_vars: u32) -> Option<Lit>;
}

/// Picks the unassigned variable with the highest activity score, proposing
/// its positive literal.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ActivityHeuristic;

impl BranchingHeuristic for ActivityHeuristic {
    fn pick(&mut self, activity: &VarActivity, trail: &Trail, num_vars: u32) -> Option<Lit> {
        let mut best: Option<(Var, f64)> = None;
        for i in 1..=num_vars {
            let v = Var::from_index(i);
            if trail.is_var_assigned(v) {
                continue;
            }
            let score = activity.score(v);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((v, score));
            }
        }
        best.map(|(v, _)| Lit::from_var(v, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::ActivityParams;
    use crate::trail::TrailReason;

    #[test]
    fn picks_highest_activity_unassigned_var() {
        let params = ActivityParams::default();
        let mut act = VarActivity::new(&params);
        let mut trail = Trail::new();
        for i in 1..=3 {
            let v = Var::from_index(i);
            trail.expand(v);
            act.expand(v);
        }
        act.bump(Var::from_index(2));
        act.bump(Var::from_index(2));
        act.bump(Var::from_index(3));

        let mut heuristic = ActivityHeuristic;
        let pick = heuristic.pick(&act, &trail, 3).unwrap();
        assert_eq!(pick.var(), Var::from_index(2));
        assert!(pick.is_pos());

        trail.push_decision_level();
        trail.append(pick, TrailReason::Decision);
        let next = heuristic.pick(&act, &trail, 3).unwrap();
        assert_eq!(next.var(), Var::from_index(3));
    }

    #[test]
    fn none_when_fully_assigned() {
        let params = ActivityParams::default();
        let act = VarActivity::new(&params);
        let mut trail = Trail::new();
        let v = Var::from_index(1);
        trail.expand(v);
        trail.push_decision_level();
        trail.append(Lit::from_var(v, false), TrailReason::Decision);

        let mut heuristic = ActivityHeuristic;
        assert!(heuristic.pick(&act, &trail, 1).is_none());
    }
}
