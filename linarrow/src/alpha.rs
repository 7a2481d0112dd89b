//! Equality of formulas up to renaming of bound variables.

use crate::{Formula, FormulaC, Var};
use fnv::FnvBuildHasher;

/// Immutable map for cheap extension when entering binders.
type Renaming = im::hashmap::HashMap<Var, Var, FnvBuildHasher>;

/// Correspondence between the bound variables of two formulas.
#[derive(Clone, Default)]
struct Binders {
    left: Renaming,
    right: Renaming,
}

impl Binders {
    fn bind(&self, l: Var, r: Var) -> Self {
        Self {
            left: self.left.update(l, r),
            right: self.right.update(r, l),
        }
    }

    fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Determine whether two variable occurrences denote the same variable.
    fn same(&self, l: Var, r: Var) -> bool {
        match (self.left.get(&l), self.right.get(&r)) {
            (Some(l2), Some(r2)) => *l2 == r && *r2 == l,
            (None, None) => l == r,
            _ => false,
        }
    }
}

impl Formula {
    /// Return true if the formulas are equal up to renaming of bound variables.
    ///
    /// This is the equality used by `==` on formulas.
    ///
    /// ~~~
    /// # use linarrow::{Formula, Var};
    /// let (x, y, a) = (Var::fresh(), Var::fresh(), Var::fresh());
    /// let fx = Formula::exists(x, Formula::holds(x, a));
    /// let fy = Formula::exists(y, Formula::holds(y, a));
    /// assert!(fx.alpha_eq(&fy));
    /// assert!(!fx.alpha_eq(&Formula::exists(y, Formula::holds(a, y))));
    /// ~~~
    pub fn alpha_eq(&self, other: &Self) -> bool {
        self.alpha_eq_in(other, &Binders::default())
    }

    fn alpha_eq_in(&self, other: &Self, bnd: &Binders) -> bool {
        if bnd.is_empty() && self.ptr_eq(other) {
            return true;
        }
        use FormulaC::*;
        match (&**self, &**other) {
            (Holds(a1, b1), Holds(a2, b2)) | (Identical(a1, b1), Identical(a2, b2)) => {
                bnd.same(*a1, *a2) && bnd.same(*b1, *b2)
            }
            (Not(x), Not(y)) | (Always(x), Always(y)) => x.alpha_eq_in(y, bnd),
            (Conj(k1, l1, r1), Conj(k2, l2, r2)) => {
                k1 == k2 && l1.alpha_eq_in(l2, bnd) && r1.alpha_eq_in(r2, bnd)
            }
            (Quant(k1, v1, x), Quant(k2, v2, y)) => {
                trace!("alpha: binding {} to {}", v1, v2);
                k1 == k2 && x.alpha_eq_in(y, &bnd.bind(*v1, *v2))
            }
            (Unit(u1), Unit(u2)) => u1 == u2,
            _ => false,
        }
    }

    /// Return true if the formulas are equal including the identities of bound variables.
    pub fn syntactic_eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        use FormulaC::*;
        match (&**self, &**other) {
            (Holds(a1, b1), Holds(a2, b2)) | (Identical(a1, b1), Identical(a2, b2)) => {
                a1 == a2 && b1 == b2
            }
            (Not(x), Not(y)) | (Always(x), Always(y)) => x.syntactic_eq(y),
            (Conj(k1, l1, r1), Conj(k2, l2, r2)) => {
                k1 == k2 && l1.syntactic_eq(l2) && r1.syntactic_eq(r2)
            }
            (Quant(k1, v1, x), Quant(k2, v2, y)) => k1 == k2 && v1 == v2 && x.syntactic_eq(y),
            (Unit(u1), Unit(u2)) => u1 == u2,
            _ => false,
        }
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.alpha_eq(other)
    }
}

impl Eq for Formula {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_variables_are_compared_by_identity() {
        let (a, b) = (Var::fresh(), Var::fresh());
        assert_eq!(Formula::holds(a, b), Formula::holds(a, b));
        assert_ne!(Formula::holds(a, b), Formula::holds(b, a));
    }

    #[test]
    fn bound_variable_must_not_meet_free_variable() {
        let (x, y) = (Var::fresh(), Var::fresh());
        // ∃x. x ∈ y  vs  ∃y. y ∈ y
        let l = Formula::exists(x, Formula::holds(x, y));
        let r = Formula::exists(y, Formula::holds(y, y));
        assert_ne!(l, r);
    }

    #[test]
    fn shadowing() {
        let (x, y, a) = (Var::fresh(), Var::fresh(), Var::fresh());
        // ∀x. ∃x. x ∈ a  vs  ∀x. ∃y. x ∈ a
        let inner = |v, w| Formula::exists(v, Formula::holds(w, a));
        let l = Formula::forall(x, inner(x, x));
        let r = Formula::forall(x, inner(y, x));
        assert_ne!(l, r);
        // ∀x. ∃x. x ∈ a  vs  ∀y. ∃x. x ∈ a
        let r = Formula::forall(y, inner(x, x));
        assert_eq!(l, r);
    }

    #[test]
    fn kinds_matter() {
        let (x, a) = (Var::fresh(), Var::fresh());
        let body = Formula::holds(x, a);
        assert_ne!(Formula::forall(x, body.clone()), Formula::exists(x, body.clone()));
        assert_ne!(
            Formula::and(body.clone(), body.clone()),
            Formula::or(body.clone(), body)
        );
    }

    #[test]
    fn syntactic_equality_distinguishes_binders() {
        let (x, y, a) = (Var::fresh(), Var::fresh(), Var::fresh());
        let fx = Formula::forall(x, Formula::holds(x, a));
        let fy = Formula::forall(y, Formula::holds(y, a));
        assert!(fx.alpha_eq(&fy));
        assert!(!fx.syntactic_eq(&fy));
        assert!(fx.syntactic_eq(&fx.clone()));
    }
}
