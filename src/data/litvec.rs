use crate::util;
use crate::var::Lit;

/// A `Vec` indexed by [`Lit`] rather than `usize`; positive and negative
/// literals of the same variable live in adjacent slots.
#[derive(Debug, Clone)]
pub(crate) struct LitVec<T>(Vec<T>);

impl<T> LitVec<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Get the slot for `l`, plus a handle giving indexed access to every
    /// other literal's slot. Lets a watch-list scan move a clause to a
    /// different literal's list while still iterating the current one.
    pub fn remaining(&mut self, l: Lit) -> (&mut T, Remaining<'_, T>) {
        let (val, remaining) =
            util::remaining(&mut self.0, lit_to_idx(l)).expect("litvec too small for lit");
        (val, Remaining(remaining))
    }
}

impl<T: Clone> LitVec<T> {
    /// Resize so that `l` is a valid index.
    pub fn expand(&mut self, l: Lit, val: T) {
        let len = lit_to_idx(l) + 1;
        if len > self.0.len() {
            self.0.resize(len, val)
        }
    }
}

impl<T> Default for LitVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) struct Remaining<'a, T>(util::Remaining<'a, T>);

impl<'a, T> std::ops::Index<Lit> for Remaining<'a, T> {
    type Output = T;

    fn index(&self, index: Lit) -> &Self::Output {
        self.0.get(lit_to_idx(index)).expect("index out of bounds or already used")
    }
}

impl<'a, T> std::ops::IndexMut<Lit> for Remaining<'a, T> {
    fn index_mut(&mut self, index: Lit) -> &mut Self::Output {
        self.0.get_mut(lit_to_idx(index)).expect("index out of bounds or already used")
    }
}

fn lit_to_idx(lit: Lit) -> usize {
    // var ids are 1-based, so the smallest bit pattern is 2 (var 1, positive).
    (lit.bits() - 2) as usize
}

impl<T> std::ops::Index<Lit> for LitVec<T> {
    type Output = T;

    fn index(&self, index: Lit) -> &Self::Output {
        &self.0[lit_to_idx(index)]
    }
}

impl<T> std::ops::IndexMut<Lit> for LitVec<T> {
    fn index_mut(&mut self, index: Lit) -> &mut Self::Output {
        &mut self.0[lit_to_idx(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::var::Var;

    #[test]
    fn test_lit_to_idx() {
        let v1 = Var::from_index(1);
        let v2 = Var::from_index(2);
        assert_eq!(lit_to_idx(Lit::from_var(v1, false)), 0);
        assert_eq!(lit_to_idx(Lit::from_var(v1, true)), 1);
        assert_eq!(lit_to_idx(Lit::from_var(v2, false)), 2);
        assert_eq!(lit_to_idx(Lit::from_var(v2, true)), 3);
    }

    #[test]
    fn expand_and_index() {
        let v1 = Var::from_index(1);
        let v2 = Var::from_index(2);
        let mut lv: LitVec<i32> = LitVec::new();
        lv.expand(Lit::from_var(v2, true), 0);

        lv[Lit::from_var(v1, false)] = 1;
        lv[Lit::from_var(v1, true)] = -1;

        assert_eq!(lv[Lit::from_var(v1, false)], 1);
        assert_eq!(lv[Lit::from_var(v1, true)], -1);
        assert_eq!(lv[Lit::from_var(v2, false)], 0);
    }

    #[test]
    fn remaining_excludes_used_index() {
        let v1 = Var::from_index(1);
        let v2 = Var::from_index(2);
        let mut lv: LitVec<i32> = LitVec::new();
        lv.expand(Lit::from_var(v2, true), 0);
        lv[Lit::from_var(v2, false)] = 7;

        let (val, mut rest) = lv.remaining(Lit::from_var(v1, false));
        *val = 42;
        rest[Lit::from_var(v2, false)] = 8;
        drop(rest);

        assert_eq!(lv[Lit::from_var(v1, false)], 42);
        assert_eq!(lv[Lit::from_var(v2, false)], 8);
    }
}
