//! Natural transformations between endofunctors.

use super::{Endofunctor, Side};
use crate::{Arrow, Conj, Formula};

/// Family of arrows, one for every hole content `x`.
///
/// Every transformation was checked to exist when it was created,
/// so instantiating it at some `x` only fails if `x` itself
/// violates variable hygiene.
#[derive(Clone, Debug, PartialEq)]
pub enum Transformation {
    /// `F(B ⊗ x) → B ⊗ F(x)`
    Import { functor: Endofunctor, side: Formula },
    /// `B ⊗ F(x) → F(B ⊗ x)`
    Lift { functor: Endofunctor, side: Formula },
    /// `B ⊗ F(B ⊗ x) → F(x)`
    Export { functor: Endofunctor, side: Formula },
    /// `P(B % Q(x)) → B ⊗ P(Q(x))`, where `B % □` is an `And` on the given side
    Extract {
        outer: Endofunctor,
        side: Formula,
        hole: Side,
        inner: Endofunctor,
    },
    /// `P(Q(B ⊗ x)) → P(B % Q(x))`, where `P` is contravariant
    Insert {
        outer: Endofunctor,
        side: Formula,
        hole: Side,
        inner: Endofunctor,
    },
}

/// `B % y` where the hole `y` lies on the given side
fn around(hole: Side, b: &Formula, y: Formula) -> Formula {
    match hole {
        Side::Left => Formula::and(y, b.clone()),
        Side::Right => Formula::and(b.clone(), y),
    }
}

impl Transformation {
    /// Return the source of the arrow at `x`.
    pub fn source(&self, x: &Formula) -> Formula {
        let and = |l: &Formula, r: &Formula| Formula::and(l.clone(), r.clone());
        match self {
            Self::Import { functor, side } => functor.on_object(&and(side, x)),
            Self::Lift { functor, side } => and(side, &functor.on_object(x)),
            Self::Export { functor, side } => and(side, &functor.on_object(&and(side, x))),
            Self::Extract {
                outer,
                side,
                hole,
                inner,
            } => outer.on_object(&around(*hole, side, inner.on_object(x))),
            Self::Insert {
                outer, side, inner, ..
            } => outer.on_object(&inner.on_object(&and(side, x))),
        }
    }

    /// Return the target of the arrow at `x`.
    pub fn target(&self, x: &Formula) -> Formula {
        let and = |l: &Formula, r: &Formula| Formula::and(l.clone(), r.clone());
        match self {
            Self::Import { functor, side } => and(side, &functor.on_object(x)),
            Self::Lift { functor, side } => functor.on_object(&and(side, x)),
            Self::Export { functor, .. } => functor.on_object(x),
            Self::Extract {
                outer, side, inner, ..
            } => and(side, &outer.on_object(&inner.on_object(x))),
            Self::Insert {
                outer,
                side,
                hole,
                inner,
            } => outer.on_object(&around(*hole, side, inner.on_object(x))),
        }
    }

    /// Instantiate the transformation at `x`.
    pub fn at(&self, x: &Formula) -> Result<Arrow, crate::Error> {
        let arrow = match self {
            Self::Import { functor, side } => functor.import_at(side, x)?,
            Self::Lift { functor, side } => functor.lift_at(side, x)?,
            Self::Export { functor, side } => functor.export_at(side, x)?,
            Self::Extract {
                outer,
                side,
                hole,
                inner,
            } => {
                let qx = inner.on_object(x);
                let import = outer.import_at(side, &qx)?;
                match hole {
                    Side::Right => import,
                    Side::Left => {
                        let swap = Arrow::commute(Conj::And, qx, side.clone());
                        outer.on_arrow(swap).compose(import)?
                    }
                }
            }
            Self::Insert {
                outer,
                side,
                hole,
                inner,
            } => {
                let lift = inner.push_at(side, x, false)?;
                let fit = match hole {
                    Side::Right => lift,
                    Side::Left => {
                        let swap = Arrow::commute(Conj::And, inner.on_object(x), side.clone());
                        swap.compose(lift)?
                    }
                };
                outer.on_arrow(fit)
            }
        };
        Ok(arrow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quant, Var};

    fn atom() -> Formula {
        Formula::holds(Var::fresh(), Var::fresh())
    }

    #[test]
    fn endpoints_agree() {
        let (b, o, x) = (atom(), atom(), atom());
        let f = Endofunctor::conj(Conj::And, Side::Right, o.clone())
            .compose(Endofunctor::quant(Quant::Exists, Var::fresh()));
        let g = Endofunctor::not().compose(Endofunctor::conj(Conj::And, Side::Left, o.clone()));
        let ts = [
            f.import(&b).unwrap(),
            f.lift(&b).unwrap(),
            g.export(&b).unwrap(),
            Transformation::Extract {
                outer: f.clone(),
                side: b.clone(),
                hole: Side::Left,
                inner: Endofunctor::always(),
            },
            Transformation::Insert {
                outer: Endofunctor::not(),
                side: b.clone(),
                hole: Side::Left,
                inner: f.clone(),
            },
        ];
        for t in ts.iter() {
            let arrow = t.at(&x).unwrap();
            assert_eq!(arrow.source(), &t.source(&x));
            assert_eq!(arrow.target(), &t.target(&x));
        }
    }
}
