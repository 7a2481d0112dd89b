//! Inversion of isomorphisms.

use super::{Arrow, Rule};
use crate::error::NotInvertible;

impl Arrow {
    /// Return the inverse of an arrow if it is known to be an isomorphism.
    ///
    /// ~~~
    /// # use linarrow::{Arrow, Conj, Formula, Var};
    /// let (a, b) = (Var::fresh(), Var::fresh());
    /// let (x, y) = (Formula::holds(a, b), Formula::holds(b, a));
    /// let f = Arrow::on_not(Arrow::commute(Conj::And, x.clone(), y.clone()));
    /// let g = f.reverse().unwrap();
    /// assert_eq!(g.source(), f.target());
    /// assert!(f.clone().compose(g)?.compress().is_identity());
    /// assert!(Arrow::forget(x, y).reverse().is_err());
    /// # Ok::<_, linarrow::error::ShapeError>(())
    /// ~~~
    pub fn reverse(&self) -> Result<Self, NotInvertible> {
        use Rule::*;
        let swap = |rule| Self::from_parts(rule, self.target().clone(), self.source().clone());
        Ok(match self.rule() {
            Identity(_) => self.clone(),
            Composite(f, g) => Self::composite_unchecked(g.reverse()?, f.reverse()?),
            OnLeft(k, f, r) => Self::on_left(*k, f.reverse()?, r.clone()),
            OnRight(k, l, f) => Self::on_right(*k, l.clone(), f.reverse()?),
            OnConj(k, f, g) => Self::on_conj(*k, f.reverse()?, g.reverse()?),
            OnNot(f) => Self::on_not(f.reverse()?),
            OnAlways(f) => Self::on_always(f.reverse()?),
            OnBody(q, v, f) => Self::on_body(*q, *v, f.reverse()?),
            Commute(k, a, b) => Self::commute(*k, b.clone(), a.clone()),
            AssociateA(k, a, b, c) => swap(AssociateB(*k, a.clone(), b.clone(), c.clone())),
            AssociateB(k, a, b, c) => swap(AssociateA(*k, a.clone(), b.clone(), c.clone())),
            IntroUnit(k, a) => swap(RemoveUnit(*k, a.clone())),
            RemoveUnit(k, a) => swap(IntroUnit(*k, a.clone())),
            IntroDoubleDual(a) => swap(RemoveDoubleDual(a.clone())),
            RemoveDoubleDual(a) => swap(IntroDoubleDual(a.clone())),
            AndPastExists(a, x, b) => swap(ExistsPastAnd(a.clone(), *x, b.clone())),
            ExistsPastAnd(a, x, b) => swap(AndPastExists(a.clone(), *x, b.clone())),
            rule => return Err(NotInvertible(rule.name())),
        })
    }

    /// Return true if [`Arrow::reverse`] succeeds on the arrow.
    pub fn is_invertible(&self) -> bool {
        use Rule::*;
        match self.rule() {
            Identity(_) | Commute(..) | AssociateA(..) | AssociateB(..) | IntroUnit(..)
            | RemoveUnit(..) | IntroDoubleDual(_) | RemoveDoubleDual(_) | AndPastExists(..)
            | ExistsPastAnd(..) => true,
            Composite(f, g) | OnConj(_, f, g) => f.is_invertible() && g.is_invertible(),
            OnLeft(_, f, _) | OnRight(_, _, f) | OnNot(f) | OnAlways(f) | OnBody(_, _, f) => {
                f.is_invertible()
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Conj, Formula, Var};

    #[test]
    fn double_reversal() {
        let (a, b, x) = (Var::fresh(), Var::fresh(), Var::fresh());
        let (p, q) = (Formula::holds(a, b), Formula::holds(x, a));
        let f = Arrow::associate_a(Conj::Or, p.clone(), q.clone(), p.clone());
        let g = Arrow::and_past_exists(p.clone(), x, q.clone()).unwrap();
        let h = Arrow::on_body(crate::Quant::Forall, x, Arrow::intro_double_dual(q));
        for arrow in [f, g, h] {
            let rev = arrow.reverse().unwrap();
            assert_eq!(rev.source(), arrow.target());
            assert_eq!(rev.target(), arrow.source());
            assert_eq!(rev.reverse().unwrap(), arrow);
            assert!(arrow.is_invertible());
        }
    }

    #[test]
    fn composite_reversal() {
        let (a, b) = (Var::fresh(), Var::fresh());
        let (p, q) = (Formula::holds(a, b), Formula::holds(b, a));
        let f = Arrow::commute(Conj::And, p.clone(), q.clone());
        let g = Arrow::intro_unit(Conj::And, f.target().clone());
        let fg = f.clone().compose(g.clone()).unwrap();
        let rev = fg.reverse().unwrap();
        assert_eq!(rev.steps(), vec![g.reverse().unwrap(), f.reverse().unwrap()]);
        assert!(fg.clone().compose(rev).unwrap().compress().is_identity());
    }

    #[test]
    fn logical_rules_are_not_invertible() {
        let (a, b) = (Var::fresh(), Var::fresh());
        let p = Formula::holds(a, b);
        let lifted = Arrow::on_left(Conj::And, Arrow::derelict(p.clone()), p.clone());
        assert_eq!(lifted.reverse(), Err(NotInvertible("derelict")));
        assert!(!lifted.is_invertible());
        assert!(Arrow::cojoin(p).reverse().is_err());
    }
}
