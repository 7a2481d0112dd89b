//! Substitution and renaming of variables in formulas.
//!
//! These are the only operations that enforce variable hygiene;
//! all other parts of the calculus rely on them.

use crate::error::HygieneError as Error;
use crate::stack::Stack;
use crate::{Formula, FormulaC, Var};
use fnv::{FnvBuildHasher, FnvHashSet};

/// Map from bound variables to their fresh replacements.
type Renaming = im::hashmap::HashMap<Var, Var, FnvBuildHasher>;

impl Formula {
    /// Return the variables that occur free in the formula.
    pub fn free_vars(&self) -> FnvHashSet<Var> {
        let mut free = FnvHashSet::default();
        self.collect_free(&mut Stack::new(), &mut free);
        free
    }

    fn collect_free(&self, bound: &mut Stack<Var>, free: &mut FnvHashSet<Var>) {
        use FormulaC::*;
        match &**self {
            Holds(a, b) | Identical(a, b) => {
                free.extend([a, b].into_iter().filter(|v| !bound.contains(v)).copied())
            }
            Not(f) | Always(f) => f.collect_free(bound, free),
            Conj(_, l, r) => {
                l.collect_free(bound, free);
                r.collect_free(bound, free)
            }
            Quant(_, v, body) => bound.with_pushed(*v, |bound| body.collect_free(bound, free)),
            Unit(_) => (),
        }
    }

    /// Return true if the variable occurs free in the formula.
    pub fn is_free(&self, v: Var) -> bool {
        use FormulaC::*;
        match &**self {
            Holds(a, b) | Identical(a, b) => *a == v || *b == v,
            Not(f) | Always(f) => f.is_free(v),
            Conj(_, l, r) => l.is_free(v) || r.is_free(v),
            Quant(_, w, body) => *w != v && body.is_free(v),
            Unit(_) => false,
        }
    }

    /// Return the variables bound by quantifiers in the formula.
    pub fn bound_vars(&self) -> FnvHashSet<Var> {
        use FormulaC::*;
        match &**self {
            Holds(..) | Identical(..) | Unit(_) => FnvHashSet::default(),
            Not(f) | Always(f) => f.bound_vars(),
            Conj(_, l, r) => {
                let mut vars = l.bound_vars();
                vars.extend(r.bound_vars());
                vars
            }
            Quant(_, v, body) => {
                let mut vars = body.bound_vars();
                vars.insert(*v);
                vars
            }
        }
    }

    /// Replace all occurrences of `old` by `new`.
    ///
    /// This fails if `old` is bound somewhere inside the formula or
    /// if an occurrence of `old` lies below a quantifier binding `new`.
    ///
    /// ~~~
    /// # use linarrow::{Formula, Var, error::HygieneError};
    /// let (x, a, b) = (Var::fresh(), Var::fresh(), Var::fresh());
    /// let f = Formula::exists(x, Formula::holds(x, a));
    /// assert_eq!(f.substitute(a, b), Ok(Formula::exists(x, Formula::holds(x, b))));
    /// assert_eq!(f.substitute(x, b), Err(HygieneError::Rebound(x)));
    /// assert_eq!(f.substitute(a, x), Err(HygieneError::Captured(x)));
    /// ~~~
    pub fn substitute(&self, old: Var, new: Var) -> Result<Self, Error> {
        if old == new {
            return Ok(self.clone());
        }
        self.subst(old, new, false)
    }

    /// Substitute, knowing whether we are below a quantifier binding `new`.
    fn subst(&self, old: Var, new: Var, below_new: bool) -> Result<Self, Error> {
        let var = |v: Var| {
            if v != old {
                Ok(v)
            } else if below_new {
                Err(Error::Captured(new))
            } else {
                Ok(new)
            }
        };
        use FormulaC::*;
        Ok(match &**self {
            Holds(a, b) => Self::holds(var(*a)?, var(*b)?),
            Identical(a, b) => Self::identical(var(*a)?, var(*b)?),
            Not(f) => Self::not(f.subst(old, new, below_new)?),
            Always(f) => Self::always(f.subst(old, new, below_new)?),
            Conj(k, l, r) => Self::conj(
                *k,
                l.subst(old, new, below_new)?,
                r.subst(old, new, below_new)?,
            ),
            Quant(_, v, _) if *v == old => return Err(Error::Rebound(old)),
            Quant(k, v, body) => Self::quant(*k, *v, body.subst(old, new, below_new || *v == new)?),
            Unit(_) => self.clone(),
        })
    }

    /// Return an equal formula whose bound variables are all fresh.
    ///
    /// This is required before putting two copies of a formula side by side.
    ///
    /// ~~~
    /// # use linarrow::{Formula, Var};
    /// let (x, a) = (Var::fresh(), Var::fresh());
    /// let f = Formula::forall(x, Formula::holds(x, a));
    /// let g = f.rename_bound();
    /// assert_eq!(f, g);
    /// assert!(f.bound_vars().is_disjoint(&g.bound_vars()));
    /// assert_eq!(f.free_vars(), g.free_vars());
    /// ~~~
    pub fn rename_bound(&self) -> Self {
        self.rename(&Renaming::default())
    }

    fn rename(&self, ren: &Renaming) -> Self {
        let var = |v: Var| ren.get(&v).copied().unwrap_or(v);
        use FormulaC::*;
        match &**self {
            Holds(a, b) => Self::holds(var(*a), var(*b)),
            Identical(a, b) => Self::identical(var(*a), var(*b)),
            Not(f) => Self::not(f.rename(ren)),
            Always(f) => Self::always(f.rename(ren)),
            Conj(k, l, r) => Self::conj(*k, l.rename(ren), r.rename(ren)),
            Quant(k, v, body) => {
                let w = Var::fresh();
                Self::quant(*k, w, body.rename(&ren.update(*v, w)))
            }
            Unit(_) => self.clone(),
        }
    }
}
