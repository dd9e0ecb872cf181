use crate::data::VarVec;
use crate::var::{Lit, Var};

#[derive(Clone, Copy)]
struct AssignData {
    value: bool,
    level: u32,
}

/// The tri-valued assignment: unassigned, or assigned true/false at a
/// decision level.
#[derive(Default)]
pub(crate) struct Assignment {
    data: VarVec<Option<AssignData>>,
}

impl Assignment {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn expand(&mut self, v: Var) {
        self.data.expand(v, None);
    }

    pub fn total_vars(&self) -> usize {
        self.data.len()
    }

    pub fn value_of_var(&self, v: Var) -> Option<bool> {
        self.data[v].map(|d| d.value)
    }

    pub fn level_of_var(&self, v: Var) -> Option<u32> {
        self.data[v].map(|d| d.level)
    }

    pub fn get(&self, lit: Lit) -> Option<bool> {
        self.data[lit.var()].map(|d| d.value == lit.is_pos())
    }

    pub fn is_lit_satisfied(&self, lit: Lit) -> bool {
        matches!(self.get(lit), Some(true))
    }

    pub fn is_lit_unsatisfied(&self, lit: Lit) -> bool {
        matches!(self.get(lit), Some(false))
    }

    pub fn is_lit_assigned(&self, lit: Lit) -> bool {
        self.data[lit.var()].is_some()
    }

    pub fn is_lit_unassigned(&self, lit: Lit) -> bool {
        self.data[lit.var()].is_none()
    }

    pub fn assign_lit(&mut self, lit: Lit, level: u32) {
        debug_assert!(self.is_lit_unassigned(lit));
        self.data[lit.var()] = Some(AssignData { value: lit.is_pos(), level });
    }

    pub fn unassign_var(&mut self, v: Var) {
        debug_assert!(self.data[v].is_some());
        self.data[v] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_and_query() {
        let mut a = Assignment::new();
        let v = Var::from_index(1);
        a.expand(v);
        let pos = Lit::from_var(v, false);
        let neg = Lit::from_var(v, true);

        assert!(a.is_lit_unassigned(pos));
        a.assign_lit(pos, 0);
        assert!(a.is_lit_satisfied(pos));
        assert!(a.is_lit_unsatisfied(neg));
        assert_eq!(a.level_of_var(v), Some(0));

        a.unassign_var(v);
        assert!(a.is_lit_unassigned(pos));
        assert!(a.is_lit_unassigned(neg));
    }
}
