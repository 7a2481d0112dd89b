//! Moving formulas across holes.
//!
//! For a formula `B` and hole contents `x`, we construct:
//!
//! * import: `F(B ⊗ x) → B ⊗ F(x)` for covariant `F`,
//! * lift: `B ⊗ F(x) → F(B ⊗ x)` for covariant `F`, the inverse of import,
//! * export: `B ⊗ F(B ⊗ x) → F(x)` for contravariant `F`.
//!
//! All arrows are built with checked composition,
//! so a wrong derivation fails instead of producing an ill-typed arrow.

use super::{Endofunctor, Shape, Side, Transformation, Variance};
use crate::error::TransportError as Error;
use crate::{Arrow, Conj, Formula, Quant, Var};

type Result<T> = core::result::Result<T, Error>;

/// Compose a sequence of arrows.
fn chain(first: Arrow, rest: impl IntoIterator<Item = Arrow>) -> Result<Arrow> {
    rest.into_iter()
        .try_fold(first, |acc, f| acc.compose(f))
        .map_err(Error::from)
}

fn and(l: &Formula, r: &Formula) -> Formula {
    Formula::and(l.clone(), r.clone())
}

impl Endofunctor {
    fn untransportable(&self, side: &Formula) -> Error {
        Error::Untransportable {
            functor: self.clone(),
            side: side.clone(),
        }
    }

    /// Fail if the side formula mentions a variable bound by the quantifier.
    fn not_captured(v: Var, side: &Formula) -> Result<()> {
        if side.is_free(v) {
            Err(Error::Captured {
                var: v,
                side: side.clone(),
            })
        } else {
            Ok(())
        }
    }

    /// Split a contravariant-contravariant composite into
    /// `outer'(¬¬inner'(□))`, returning `outer'` and `inner'`.
    fn double_negation(inner: &Self, outer: &Self) -> Option<(Self, Self)> {
        let (outer2, last) = outer.split_inner()?;
        let (first, inner2) = inner.split_outer()?;
        match (&*last.shape, &*first.shape) {
            (Shape::Not, Shape::Not) => Some((outer2, inner2)),
            _ => None,
        }
    }

    /// `F(B ⊗ x) → B ⊗ F(x)`
    pub(crate) fn import_at(&self, b: &Formula, x: &Formula) -> Result<Arrow> {
        trace!("import {} across {}", b, self);
        match &*self.shape {
            Shape::Identity => Ok(Arrow::identity(and(b, x))),
            Shape::Always => {
                if b.get_always().is_none() {
                    return Err(self.untransportable(b));
                }
                // !(B ⊗ x) → !(B' ⊗ x') ⊗ !(B ⊗ x), where B' and x' are renamed
                let (b2, x2) = (b.rename_bound(), x.rename_bound());
                let copy = Arrow::copy_as(and(b, x), and(&b2, &x2))?;
                // !(B' ⊗ x') → !B' → B'
                let keep_b = chain(
                    Arrow::on_always(Arrow::forget(b2.clone(), x2)),
                    [Arrow::derelict(b2)],
                )?;
                // !(B ⊗ x) → !(x ⊗ B) → !x
                let keep_x = Arrow::on_always(chain(
                    Arrow::commute(Conj::And, b.clone(), x.clone()),
                    [Arrow::forget(x.clone(), b.clone())],
                )?);
                chain(copy, [Arrow::on_conj(Conj::And, keep_b, keep_x)])
            }
            Shape::Quant(Quant::Exists, v) => {
                Self::not_captured(*v, b)?;
                Ok(Arrow::exists_past_and(b.clone(), *v, x.clone())?)
            }
            Shape::Conj(Conj::And, Side::Left, r) => Ok(Arrow::associate_a(
                Conj::And,
                b.clone(),
                x.clone(),
                r.clone(),
            )),
            Shape::Conj(Conj::And, Side::Right, l) => chain(
                Arrow::associate_b(Conj::And, l.clone(), b.clone(), x.clone()),
                [
                    Arrow::on_left(Conj::And, Arrow::commute(Conj::And, l.clone(), b.clone()), x.clone()),
                    Arrow::associate_a(Conj::And, b.clone(), l.clone(), x.clone()),
                ],
            ),
            Shape::Composite(inner, outer) => match (inner.variance, outer.variance) {
                (Variance::Covariant, Variance::Covariant) => {
                    let first = outer.on_arrow(inner.import_at(b, x)?);
                    chain(first, [outer.import_at(b, &inner.on_object(x))?])
                }
                (Variance::Contravariant, Variance::Contravariant) => {
                    let (outer2, inner2) =
                        Self::double_negation(inner, outer).ok_or_else(|| self.untransportable(b))?;
                    let bx = inner2.on_object(&and(b, x));
                    let ix = inner2.on_object(x);
                    let through = inner2.clone().compose(outer2.clone());
                    chain(
                        outer2.on_arrow(Arrow::remove_double_dual(bx)),
                        [
                            through.import_at(b, x)?,
                            Arrow::on_right(
                                Conj::And,
                                b.clone(),
                                outer2.on_arrow(Arrow::intro_double_dual(ix)),
                            ),
                        ],
                    )
                }
                _ => Err(self.untransportable(b)),
            },
            Shape::Not | Shape::Quant(Quant::Forall, _) | Shape::Conj(Conj::Or, ..) => {
                Err(self.untransportable(b))
            }
        }
    }

    /// `B ⊗ F(x) → F(B ⊗ x)`, inverse to `import_at`
    pub(crate) fn lift_at(&self, b: &Formula, x: &Formula) -> Result<Arrow> {
        self.push_at(b, x, true)
    }

    /// `B ⊗ F(x) → F(B ⊗ x)`
    ///
    /// Unless `invertible` is set, this also moves an exponential `B`
    /// into an `Always` hole, and bridges non-adjacent negations
    /// by exporting `B` twice.
    pub(crate) fn push_at(&self, b: &Formula, x: &Formula, invertible: bool) -> Result<Arrow> {
        trace!("push {} across {}", b, self);
        match &*self.shape {
            Shape::Identity => Ok(Arrow::identity(and(b, x))),
            Shape::Always if invertible => Err(self.untransportable(b)),
            Shape::Always => {
                let b0 = b.get_always().ok_or_else(|| self.untransportable(b))?;
                // !B0 ⊗ !x → !!B0 ⊗ !x → !(!B0 ⊗ x)
                chain(
                    Arrow::on_left(Conj::And, Arrow::cojoin(b0.clone()), Formula::always(x.clone())),
                    [Arrow::zip(b.clone(), x.clone())],
                )
            }
            Shape::Quant(Quant::Exists, v) => {
                Self::not_captured(*v, b)?;
                Ok(Arrow::and_past_exists(b.clone(), *v, x.clone())?)
            }
            Shape::Conj(Conj::And, Side::Left, r) => Ok(Arrow::associate_b(
                Conj::And,
                b.clone(),
                x.clone(),
                r.clone(),
            )),
            Shape::Conj(Conj::And, Side::Right, l) => chain(
                Arrow::associate_b(Conj::And, b.clone(), l.clone(), x.clone()),
                [
                    Arrow::on_left(Conj::And, Arrow::commute(Conj::And, b.clone(), l.clone()), x.clone()),
                    Arrow::associate_a(Conj::And, l.clone(), b.clone(), x.clone()),
                ],
            ),
            Shape::Composite(inner, outer) => match (inner.variance, outer.variance) {
                (Variance::Covariant, Variance::Covariant) => {
                    let first = outer.push_at(b, &inner.on_object(x), invertible)?;
                    chain(first, [outer.on_arrow(inner.push_at(b, x, invertible)?)])
                }
                (Variance::Contravariant, Variance::Contravariant) => {
                    match Self::double_negation(inner, outer) {
                        Some((outer2, inner2)) => {
                            let bx = inner2.on_object(&and(b, x));
                            let ix = inner2.on_object(x);
                            let through = inner2.clone().compose(outer2.clone());
                            chain(
                                Arrow::on_right(
                                    Conj::And,
                                    b.clone(),
                                    outer2.on_arrow(Arrow::remove_double_dual(ix)),
                                ),
                                [
                                    through.push_at(b, x, invertible)?,
                                    outer2.on_arrow(Arrow::intro_double_dual(bx)),
                                ],
                            )
                        }
                        None if invertible => Err(self.untransportable(b)),
                        None => {
                            // B ⊗ O(I(x)) → B ⊗ O(B ⊗ I(B ⊗ x)) → O(I(B ⊗ x))
                            let demand = outer.on_arrow(inner.export_at(b, x)?);
                            let ibx = inner.on_object(&and(b, x));
                            chain(
                                Arrow::on_right(Conj::And, b.clone(), demand),
                                [outer.export_at(b, &ibx)?],
                            )
                        }
                    }
                }
                _ => Err(self.untransportable(b)),
            },
            Shape::Not | Shape::Quant(Quant::Forall, _) | Shape::Conj(Conj::Or, ..) => {
                Err(self.untransportable(b))
            }
        }
    }

    /// `B ⊗ F(B ⊗ x) → F(x)`
    pub(crate) fn export_at(&self, b: &Formula, x: &Formula) -> Result<Arrow> {
        trace!("export {} across {}", b, self);
        match &*self.shape {
            Shape::Not => {
                // B ⊗ ¬(B ⊗ x) → B ⊗ ¬(x ⊗ B) → ¬(x ⊗ B) ⊗ B → ¬x
                let swap = Arrow::on_not(Arrow::commute(Conj::And, x.clone(), b.clone()));
                let hyp = swap.target().clone();
                chain(
                    Arrow::on_right(Conj::And, b.clone(), swap),
                    [
                        Arrow::commute(Conj::And, b.clone(), hyp),
                        Arrow::apply(x.clone(), b.clone()),
                    ],
                )
            }
            Shape::Composite(inner, outer) => match (inner.variance, outer.variance) {
                (Variance::Contravariant, Variance::Covariant) => {
                    // B ⊗ O(I(B ⊗ x)) → O(B ⊗ I(B ⊗ x)) → O(I(x))
                    let ibx = inner.on_object(&and(b, x));
                    chain(
                        outer.push_at(b, &ibx, false)?,
                        [outer.on_arrow(inner.export_at(b, x)?)],
                    )
                }
                (Variance::Covariant, Variance::Contravariant) => {
                    // B ⊗ O(I(B ⊗ x)) → B ⊗ O(B ⊗ I(x)) → O(I(x))
                    let lifted = outer.on_arrow(inner.push_at(b, x, false)?);
                    chain(
                        Arrow::on_right(Conj::And, b.clone(), lifted),
                        [outer.export_at(b, &inner.on_object(x))?],
                    )
                }
                _ => Err(self.untransportable(b)),
            },
            _ => Err(self.untransportable(b)),
        }
    }

    fn expect(&self, operation: &'static str, expected: Variance) -> Result<()> {
        if self.variance == expected {
            Ok(())
        } else {
            Err(Error::Variance {
                operation,
                expected,
            })
        }
    }

    /// Return a probe to check whether a transformation exists for all hole contents.
    fn probe() -> Formula {
        Formula::holds(Var::fresh(), Var::fresh())
    }

    /// Pull `side` out of the hole: `F(B ⊗ x) → B ⊗ F(x)`.
    ///
    /// ~~~
    /// # use linarrow::functor::{Endofunctor, Side};
    /// # use linarrow::{Conj, Formula, Quant, Var};
    /// let (a, b, v) = (Var::fresh(), Var::fresh(), Var::fresh());
    /// let side = Formula::holds(a, b);
    /// // ∃v. (□ ⊗ v ∈ a)
    /// let f = Endofunctor::conj(Conj::And, Side::Left, Formula::holds(v, a))
    ///     .compose(Endofunctor::quant(Quant::Exists, v));
    /// let t = f.import(&side)?;
    /// let x = Formula::holds(b, v);
    /// let arrow = t.at(&x)?;
    /// assert_eq!(arrow.source(), &f.on_object(&Formula::and(side.clone(), x.clone())));
    /// assert_eq!(arrow.target(), &Formula::and(side.clone(), f.on_object(&x)));
    ///
    /// // importing a formula that mentions the bound variable would capture it
    /// assert!(f.import(&Formula::holds(v, b)).is_err());
    /// # Ok::<_, linarrow::Error>(())
    /// ~~~
    pub fn import(&self, side: &Formula) -> Result<Transformation> {
        debug!("import {} from {}", side, self);
        self.expect("import", Variance::Covariant)?;
        self.import_at(side, &Self::probe())?;
        Ok(Transformation::Import {
            functor: self.clone(),
            side: side.clone(),
        })
    }

    /// Push `side` into the hole: `B ⊗ F(x) → F(B ⊗ x)`.
    ///
    /// This is only defined where the result is inverse to [`Self::import`],
    /// so it fails for `Always` holes.
    pub fn lift(&self, side: &Formula) -> Result<Transformation> {
        debug!("lift {} into {}", side, self);
        self.expect("lift", Variance::Covariant)?;
        self.lift_at(side, &Self::probe())?;
        Ok(Transformation::Lift {
            functor: self.clone(),
            side: side.clone(),
        })
    }

    /// Satisfy a demand for `side` inside a contravariant hole:
    /// `B ⊗ F(B ⊗ x) → F(x)`.
    pub fn export(&self, side: &Formula) -> Result<Transformation> {
        debug!("export {} into {}", side, self);
        self.expect("export", Variance::Contravariant)?;
        self.export_at(side, &Self::probe())?;
        Ok(Transformation::Export {
            functor: self.clone(),
            side: side.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom() -> Formula {
        Formula::holds(Var::fresh(), Var::fresh())
    }

    /// Check that importing and lifting are defined and mutually inverse.
    fn roundtrip(f: &Endofunctor, b: &Formula) {
        let x = atom();
        let imp = f.import(b).unwrap().at(&x).unwrap();
        let lift = f.lift(b).unwrap().at(&x).unwrap();
        assert_eq!(imp.source(), &f.on_object(&and(b, &x)));
        assert_eq!(imp.target(), &and(b, &f.on_object(&x)));
        assert_eq!(lift.source(), imp.target());
        assert_eq!(lift.target(), imp.source());
        let round = imp.clone().compose(lift.clone()).unwrap().compress();
        assert!(round.is_identity(), "{} did not cancel", round);
        assert!(lift.compose(imp).unwrap().compress().is_identity());
    }

    #[test]
    fn conjunctions() {
        let (b, o) = (atom(), atom());
        roundtrip(&Endofunctor::conj(Conj::And, Side::Left, o.clone()), &b);
        roundtrip(&Endofunctor::conj(Conj::And, Side::Right, o.clone()), &b);
        roundtrip(&Endofunctor::identity(), &b);
        let or = Endofunctor::conj(Conj::Or, Side::Left, o);
        assert!(matches!(or.import(&b), Err(Error::Untransportable { .. })));
        assert!(or.lift(&b).is_err());
    }

    #[test]
    fn quantifiers() {
        let (v, a) = (Var::fresh(), Var::fresh());
        let ex = Endofunctor::quant(Quant::Exists, v);
        roundtrip(&ex, &Formula::holds(a, a));
        let captured = ex.import(&Formula::holds(v, a));
        assert!(matches!(captured, Err(Error::Captured { var, .. }) if var == v));
        let all = Endofunctor::quant(Quant::Forall, v);
        assert!(all.import(&Formula::holds(a, a)).is_err());
    }

    #[test]
    fn nested_covariant() {
        let (b, o, p) = (atom(), atom(), atom());
        let v = Var::fresh();
        let f = Endofunctor::conj(Conj::And, Side::Right, o)
            .compose(Endofunctor::quant(Quant::Exists, v))
            .compose(Endofunctor::conj(Conj::And, Side::Left, p));
        roundtrip(&f, &b);
    }

    #[test]
    fn double_negation() {
        let (b, o) = (atom(), atom());
        // ¬¬(o ⊗ □)
        let f = Endofunctor::conj(Conj::And, Side::Right, o)
            .compose(Endofunctor::not())
            .compose(Endofunctor::not());
        assert_eq!(f.variance(), Variance::Covariant);
        roundtrip(&f, &b);
        // a contravariant hole can only export
        let g = Endofunctor::not();
        assert!(matches!(g.import(&b), Err(Error::Variance { .. })));
        assert!(g.export(&b).is_ok());
    }

    #[test]
    fn always_needs_exponential() {
        let (b0, x) = (atom(), atom());
        let f = Endofunctor::always();
        assert!(f.import(&b0).is_err());
        let b = Formula::always(b0);
        let imp = f.import(&b).unwrap().at(&x).unwrap();
        assert_eq!(imp.target(), &and(&b, &Formula::always(x.clone())));
        assert!(matches!(f.lift(&b), Err(Error::Untransportable { .. })));
        let push = f.push_at(&b, &x, false).unwrap();
        assert_eq!(push.target(), imp.source());
        assert!(!imp.compose(push).unwrap().compress().is_identity());

        // an exponential demand below `Always` is still exported: !¬□
        let g = Endofunctor::not().compose(Endofunctor::always());
        let e = g.export(&b).unwrap().at(&x).unwrap();
        assert_eq!(e.source(), &and(&b, &g.on_object(&and(&b, &x))));
        assert_eq!(e.target(), &g.on_object(&x));
    }

    #[test]
    fn exports() {
        let (b, o, x) = (atom(), atom(), atom());
        // ¬(o ⊗ □): o ⊗ □ is covariant inside a negation
        let f = Endofunctor::conj(Conj::And, Side::Right, o.clone()).compose(Endofunctor::not());
        let e = f.export(&b).unwrap().at(&x).unwrap();
        assert_eq!(e.source(), &and(&b, &f.on_object(&and(&b, &x))));
        assert_eq!(e.target(), &f.on_object(&x));

        // (¬□ ⊗ o): contravariant hole below a covariant conjunction
        let g = Endofunctor::not().compose(Endofunctor::conj(Conj::And, Side::Left, o));
        let e = g.export(&b).unwrap().at(&x).unwrap();
        assert_eq!(e.target(), &g.on_object(&x));
        assert!(g.import(&b).is_err());
    }

    #[test]
    fn export_bridge() {
        // ¬(¬□ ⊗ o) has no adjacent pair of negations
        let (b, o, x) = (atom(), atom(), atom());
        let f = Endofunctor::not()
            .compose(Endofunctor::conj(Conj::And, Side::Left, o))
            .compose(Endofunctor::not());
        assert!(f.import(&b).is_err());
        assert!(f.lift(&b).is_err());
        let push = f.push_at(&b, &x, false).unwrap();
        assert_eq!(push.source(), &and(&b, &f.on_object(&x)));
        assert_eq!(push.target(), &f.on_object(&and(&b, &x)));
    }
}
