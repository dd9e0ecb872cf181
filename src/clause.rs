use crate::var::Lit;

/// A stable handle into the [`ClauseDB`] arena. Watch lists and trail
/// reasons hold this, never a reference, so clauses can be retired without
/// chasing pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ClauseIdx(u32);

struct ClauseRecord {
    lits: Vec<Lit>,
    learnt: bool,
    activity: f64,
    removed: bool,
}

/// The clause arena. Original clauses are appended once by `add_clause` and
/// live for the solver's lifetime; learnt clauses are appended once by
/// `record_learnt_clause` and may later be retired by Reduce-DB.
///
/// Retirement is a tombstone (`removed = true`, literals dropped), not a
/// packed-array compaction: this keeps every `ClauseIdx` stable for the
/// solver's lifetime without needing to rewrite watch-list or trail-reason
/// indices on every reduction pass.
#[derive(Default)]
pub(crate) struct ClauseDB {
    clauses: Vec<ClauseRecord>,
}

impl ClauseDB {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn insert_clause(&mut self, lits: Vec<Lit>, learnt: bool) -> ClauseIdx {
        assert!(!lits.is_empty(), "cannot insert an empty clause");
        let idx = ClauseIdx(self.clauses.len() as u32);
        self.clauses.push(ClauseRecord { lits, learnt, activity: 1.0, removed: false });
        idx
    }

    pub fn get(&self, idx: ClauseIdx) -> &[Lit] {
        let rec = &self.clauses[idx.0 as usize];
        debug_assert!(!rec.removed, "accessing a retired clause");
        &rec.lits
    }

    pub fn get_mut(&mut self, idx: ClauseIdx) -> &mut [Lit] {
        let rec = &mut self.clauses[idx.0 as usize];
        debug_assert!(!rec.removed, "accessing a retired clause");
        &mut rec.lits
    }

    /// Mutable access to the literal vector itself (not just a fixed-length
    /// slice), for the one-shot top-level simplification pass, which may
    /// shrink a clause.
    pub fn lits_mut(&mut self, idx: ClauseIdx) -> &mut Vec<Lit> {
        &mut self.clauses[idx.0 as usize].lits
    }

    pub fn is_learnt(&self, idx: ClauseIdx) -> bool {
        self.clauses[idx.0 as usize].learnt
    }

    pub fn activity(&self, idx: ClauseIdx) -> f64 {
        self.clauses[idx.0 as usize].activity
    }

    pub fn bump_activity(&mut self, idx: ClauseIdx, amount: f64) {
        self.clauses[idx.0 as usize].activity += amount;
    }

    pub fn rescale_activities(&mut self, factor: f64) {
        for c in &mut self.clauses {
            c.activity *= factor;
        }
    }

    pub fn mark_removed(&mut self, idx: ClauseIdx) {
        let rec = &mut self.clauses[idx.0 as usize];
        debug_assert!(rec.learnt, "only learnt clauses may be retired by Reduce-DB");
        rec.removed = true;
        rec.lits = Vec::new();
    }

    pub fn is_removed(&self, idx: ClauseIdx) -> bool {
        self.clauses[idx.0 as usize].removed
    }

    pub fn original_indices(&self) -> Vec<ClauseIdx> {
        self.indices_where(|c| !c.learnt && !c.removed)
    }

    pub fn original_iter(&self) -> impl Iterator<Item = ClauseIdx> + '_ {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.learnt && !c.removed)
            .map(|(i, _)| ClauseIdx(i as u32))
    }

    pub fn learnt_indices(&self) -> Vec<ClauseIdx> {
        self.indices_where(|c| c.learnt && !c.removed)
    }

    pub fn original_count(&self) -> usize {
        self.clauses.iter().filter(|c| !c.learnt && !c.removed).count()
    }

    pub fn learnt_count(&self) -> usize {
        self.clauses.iter().filter(|c| c.learnt && !c.removed).count()
    }

    fn indices_where(&self, pred: impl Fn(&ClauseRecord) -> bool) -> Vec<ClauseIdx> {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, c)| pred(c))
            .map(|(i, _)| ClauseIdx(i as u32))
            .collect()
    }
}
