//! Formulas with two holes.

use super::{Endofunctor, Side, Variance};
use crate::error::TransportError as Error;
use crate::{Arrow, Conj, Formula};
use std::rc::Rc;

type Result<T> = core::result::Result<T, Error>;

/// Structure of a pair of holes.
#[derive(Clone, Debug, PartialEq)]
pub enum BiShape {
    /// `L(□) % R(□)`
    Conj(Conj, Endofunctor, Endofunctor),
    /// the bifunctor placed into the hole of the endofunctor
    Composite(Bifunctor, Endofunctor),
}

/// Formula with a left and a right hole.
#[derive(Clone, Debug, PartialEq)]
pub struct Bifunctor {
    shape: Rc<BiShape>,
    left: Variance,
    right: Variance,
}

/// Direction in which a formula is transported between the holes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// from the left hole to the right hole
    Rightward,
    /// from the right hole to the left hole
    Leftward,
}

impl Direction {
    pub fn flip(self) -> Self {
        match self {
            Self::Rightward => Self::Leftward,
            Self::Leftward => Self::Rightward,
        }
    }
}

/// Compose a sequence of arrows.
fn chain(first: Arrow, rest: impl IntoIterator<Item = Arrow>) -> Result<Arrow> {
    rest.into_iter()
        .try_fold(first, |acc, f| acc.compose(f))
        .map_err(Error::from)
}

fn and(l: &Formula, r: &Formula) -> Formula {
    Formula::and(l.clone(), r.clone())
}

impl Bifunctor {
    /// `L(□) % R(□)`
    pub fn conj(kind: Conj, left: Endofunctor, right: Endofunctor) -> Self {
        let (l, r) = (left.variance(), right.variance());
        Self {
            shape: Rc::new(BiShape::Conj(kind, left, right)),
            left: l,
            right: r,
        }
    }

    /// Place the bifunctor into the hole of `outer`.
    pub fn compose(self, outer: Endofunctor) -> Self {
        if outer.is_identity() {
            return self;
        }
        let v = outer.variance();
        let (left, right) = (v.compose(self.left), v.compose(self.right));
        Self {
            shape: Rc::new(BiShape::Composite(self, outer)),
            left,
            right,
        }
    }

    /// Insert two holes at the given positions into a list of values,
    /// and connect the list by a right-nested chain terminated by the unit.
    ///
    /// The positions refer to the list with the holes inserted,
    /// so `left < right < values.len() + 2` must hold.
    ///
    /// ~~~
    /// # use linarrow::functor::Bifunctor;
    /// # use linarrow::{Conj, Formula, Unit, Var};
    /// let (a, b) = (Var::fresh(), Var::fresh());
    /// let (p, x, y) = (Formula::holds(a, b), Formula::holds(b, a), Formula::holds(a, a));
    /// let f = Bifunctor::conjunction(Conj::Or, &[p.clone()], 0, 2)?;
    /// let one = Formula::unit(Unit::False);
    /// let expected = Formula::or(x.clone(), Formula::or(p, Formula::or(y.clone(), one)));
    /// assert_eq!(f.on_objects(&x, &y), expected);
    /// assert!(Bifunctor::conjunction(Conj::Or, &[], 1, 1).is_err());
    /// # Ok::<_, linarrow::error::TransportError>(())
    /// ~~~
    pub fn conjunction(kind: Conj, values: &[Formula], left: usize, right: usize) -> Result<Self> {
        let len = values.len() + 2;
        if !(left < right && right < len) {
            return Err(Error::Holes { left, right, len });
        }
        let right_in_values = right - 1;
        let prefix = values[..left]
            .iter()
            .map(|v| Endofunctor::conj(kind, Side::Right, v.clone()));
        let prefix = Endofunctor::from_atoms(prefix.collect::<Vec<_>>().iter());
        let between = values[left..right_in_values]
            .iter()
            .map(|v| Endofunctor::conj(kind, Side::Right, v.clone()));
        let tail = Formula::chain(kind, &values[right_in_values..]);
        let between: Vec<_> = between
            .chain(core::iter::once(Endofunctor::conj(kind, Side::Left, tail)))
            .collect();
        let r = Endofunctor::from_atoms(between.iter());
        Ok(Self::conj(kind, Endofunctor::identity(), r).compose(prefix))
    }

    pub fn shape(&self) -> &BiShape {
        &self.shape
    }

    pub fn left_variance(&self) -> Variance {
        self.left
    }

    pub fn right_variance(&self) -> Variance {
        self.right
    }

    /// Fill both holes with formulas.
    pub fn on_objects(&self, x: &Formula, y: &Formula) -> Formula {
        match &*self.shape {
            BiShape::Conj(k, l, r) => Formula::conj(*k, l.on_object(x), r.on_object(y)),
            BiShape::Composite(bi, outer) => outer.on_object(&bi.on_objects(x, y)),
        }
    }

    /// Fill both holes with arrows.
    pub fn on_arrows(&self, f: Arrow, g: Arrow) -> Arrow {
        match &*self.shape {
            BiShape::Conj(k, l, r) => Arrow::on_conj(*k, l.on_arrow(f), r.on_arrow(g)),
            BiShape::Composite(bi, outer) => outer.on_arrow(bi.on_arrows(f, g)),
        }
    }

    fn untransportable(functor: &Endofunctor, side: &Formula) -> Error {
        Error::Untransportable {
            functor: functor.clone(),
            side: side.clone(),
        }
    }

    /// Move `side` from one hole to the other.
    ///
    /// Rightward, this is `H(B ⊗ x, y) → H(x, B ⊗ y)`;
    /// leftward, this is `H(x, B ⊗ y) → H(B ⊗ x, y)`.
    pub fn transport(
        &self,
        side: &Formula,
        direction: Direction,
        x: &Formula,
        y: &Formula,
    ) -> Result<Arrow> {
        debug!("transport {} {:?} in {}", side, direction, self.on_objects(x, y));
        let b = side;
        match &*self.shape {
            BiShape::Conj(Conj::And, l, r) => {
                let (lx, ry) = (l.on_object(x), r.on_object(y));
                if !l.is_covariant() {
                    return Err(Self::untransportable(l, b));
                } else if !r.is_covariant() {
                    return Err(Self::untransportable(r, b));
                }
                match direction {
                    // L(B ⊗ x) ⊗ R(y) → (B ⊗ L(x)) ⊗ R(y) → (L(x) ⊗ B) ⊗ R(y)
                    // → L(x) ⊗ (B ⊗ R(y)) → L(x) ⊗ R(B ⊗ y)
                    Direction::Rightward => chain(
                        Arrow::on_left(Conj::And, l.import_at(b, x)?, ry.clone()),
                        [
                            Arrow::on_left(
                                Conj::And,
                                Arrow::commute(Conj::And, b.clone(), lx.clone()),
                                ry.clone(),
                            ),
                            Arrow::associate_a(Conj::And, lx.clone(), b.clone(), ry),
                            Arrow::on_right(Conj::And, lx, r.push_at(b, y, false)?),
                        ],
                    ),
                    // L(x) ⊗ R(B ⊗ y) → L(x) ⊗ (B ⊗ R(y)) → (L(x) ⊗ B) ⊗ R(y)
                    // → (B ⊗ L(x)) ⊗ R(y) → L(B ⊗ x) ⊗ R(y)
                    Direction::Leftward => chain(
                        Arrow::on_right(Conj::And, lx.clone(), r.import_at(b, y)?),
                        [
                            Arrow::associate_b(Conj::And, lx.clone(), b.clone(), ry.clone()),
                            Arrow::on_left(
                                Conj::And,
                                Arrow::commute(Conj::And, lx, b.clone()),
                                ry.clone(),
                            ),
                            Arrow::on_left(Conj::And, l.push_at(b, x, false)?, ry),
                        ],
                    ),
                }
            }
            BiShape::Conj(Conj::Or, l, r) => {
                let conj = Endofunctor::conj(Conj::Or, Side::Right, l.on_object(x));
                Err(Self::untransportable(&r.clone().compose(conj), b))
            }
            BiShape::Composite(bi, outer) => {
                let dir = match outer.variance() {
                    Variance::Covariant => direction,
                    Variance::Contravariant => direction.flip(),
                };
                Ok(outer.on_arrow(bi.transport(b, dir, x, y)?))
            }
        }
    }

    /// Copy the exponential `side` from the left hole to the right hole:
    /// `H(B ⊗ x, y) → H(B ⊗ x, B' ⊗ y)`, where `B'` is `B` renamed.
    ///
    /// Below a contravariant outer hole, no copy is made:
    /// the arrow forgets `B` next to the right hole, and `B'` is `B` itself.
    pub fn transport_duplicating(&self, side: &Formula, x: &Formula, y: &Formula) -> Result<Arrow> {
        debug!("transport copy of {} in {}", side, self.on_objects(x, y));
        let b = side;
        let b0 = b
            .get_always()
            .ok_or_else(|| Self::untransportable(&Endofunctor::always(), b))?;
        match &*self.shape {
            BiShape::Conj(Conj::And, l, r) => {
                if !l.is_covariant() {
                    return Err(Self::untransportable(l, b));
                } else if !r.is_covariant() {
                    return Err(Self::untransportable(r, b));
                }
                let (lx, ry) = (l.on_object(x), r.on_object(y));
                let copy = Arrow::copy(b0.clone());
                let b2 = match copy.target().get_conj(Conj::And) {
                    Some((b2, _)) => b2.clone(),
                    None => return Err(Self::untransportable(l, b)),
                };
                let lbx = l.on_object(&and(b, x));
                chain(
                    // L(B ⊗ x) ⊗ R(y) → (B ⊗ L(x)) ⊗ R(y)
                    Arrow::on_left(Conj::And, l.import_at(b, x)?, ry.clone()),
                    [
                        // → ((B' ⊗ B) ⊗ L(x)) ⊗ R(y)
                        Arrow::on_left(Conj::And, Arrow::on_left(Conj::And, copy, lx.clone()), ry.clone()),
                        // → (B' ⊗ (B ⊗ L(x))) ⊗ R(y)
                        Arrow::on_left(
                            Conj::And,
                            Arrow::associate_a(Conj::And, b2.clone(), b.clone(), lx.clone()),
                            ry.clone(),
                        ),
                        // → (B' ⊗ L(B ⊗ x)) ⊗ R(y)
                        Arrow::on_left(
                            Conj::And,
                            Arrow::on_right(Conj::And, b2.clone(), l.push_at(b, x, false)?),
                            ry.clone(),
                        ),
                        // → B' ⊗ (L(B ⊗ x) ⊗ R(y))
                        Arrow::associate_a(Conj::And, b2.clone(), lbx.clone(), ry.clone()),
                        // → B' ⊗ (R(y) ⊗ L(B ⊗ x))
                        Arrow::on_right(Conj::And, b2.clone(), Arrow::commute(Conj::And, lbx.clone(), ry.clone())),
                        // → (B' ⊗ R(y)) ⊗ L(B ⊗ x)
                        Arrow::associate_b(Conj::And, b2.clone(), ry.clone(), lbx.clone()),
                        // → R(B' ⊗ y) ⊗ L(B ⊗ x)
                        Arrow::on_left(Conj::And, r.push_at(&b2, y, false)?, lbx.clone()),
                        // → L(B ⊗ x) ⊗ R(B' ⊗ y)
                        Arrow::commute(Conj::And, r.on_object(&and(&b2, y)), lbx),
                    ],
                )
            }
            BiShape::Conj(Conj::Or, l, r) => {
                let conj = Endofunctor::conj(Conj::Or, Side::Right, l.on_object(x));
                Err(Self::untransportable(&r.clone().compose(conj), b))
            }
            BiShape::Composite(bi, outer) => match outer.variance() {
                Variance::Covariant => Ok(outer.on_arrow(bi.transport_duplicating(b, x, y)?)),
                // H(B ⊗ x, B ⊗ y) → H(B ⊗ x, y), which is reversed by the outer hole
                Variance::Contravariant if bi.right == Variance::Covariant => {
                    let discard = chain(
                        Arrow::commute(Conj::And, b.clone(), y.clone()),
                        [Arrow::forget(y.clone(), b.clone())],
                    )?;
                    let keep = Arrow::identity(and(b, x));
                    Ok(outer.on_arrow(bi.on_arrows(keep, discard)))
                }
                Variance::Contravariant => Err(Error::Variance {
                    operation: "transport_duplicating",
                    expected: Variance::Covariant,
                }),
            },
        }
    }
}

impl core::fmt::Display for Bifunctor {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &*self.shape {
            BiShape::Conj(k, l, r) => write!(f, "({} {} {})", l, k, r),
            BiShape::Composite(bi, outer) => {
                let s = outer.to_string();
                write!(f, "{}", s.replacen('□', &bi.to_string(), 1))
            }
        }
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
    fn conjunction_positions() {
        let (p, q, x, y) = (atom(), atom(), atom(), atom());
        let values = [p.clone(), q.clone()];
        let f = Bifunctor::conjunction(Conj::And, &values, 1, 2).unwrap();
        let expected = Formula::chain(Conj::And, &[p.clone(), x.clone(), y.clone(), q.clone()]);
        assert_eq!(f.on_objects(&x, &y), expected);
        let g = Bifunctor::conjunction(Conj::And, &values, 0, 3).unwrap();
        let expected = Formula::chain(Conj::And, &[x.clone(), p, q, y.clone()]);
        assert_eq!(g.on_objects(&x, &y), expected);
        assert!(Bifunctor::conjunction(Conj::And, &values, 2, 4).is_err());
    }

    #[test]
    fn transport_both_ways() {
        let (p, q, b, x, y) = (atom(), atom(), atom(), atom(), atom());
        let f = Bifunctor::conjunction(Conj::And, &[p, q], 1, 3).unwrap();
        let there = f.transport(&b, Direction::Rightward, &x, &y).unwrap();
        assert_eq!(there.source(), &f.on_objects(&and(&b, &x), &y));
        assert_eq!(there.target(), &f.on_objects(&x, &and(&b, &y)));
        let back = f.transport(&b, Direction::Leftward, &x, &y).unwrap();
        assert_eq!(back.source(), there.target());
        let round = there.compose(back).unwrap();
        assert_eq!(round.source(), round.target());
    }

    #[test]
    fn transport_below_negation() {
        let (b, x, y) = (atom(), atom(), atom());
        let f = Bifunctor::conj(Conj::And, Endofunctor::identity(), Endofunctor::identity())
            .compose(Endofunctor::not());
        let t = f.transport(&b, Direction::Rightward, &x, &y).unwrap();
        assert_eq!(t.source(), &f.on_objects(&and(&b, &x), &y));
        assert_eq!(t.target(), &f.on_objects(&x, &and(&b, &y)));

        let or = Bifunctor::conj(Conj::Or, Endofunctor::identity(), Endofunctor::identity());
        assert!(or.transport(&b, Direction::Rightward, &x, &y).is_err());
    }

    #[test]
    fn duplication() {
        let (b0, x, y, v) = (atom(), atom(), atom(), Var::fresh());
        let b = Formula::always(b0);
        let f = Bifunctor::conj(
            Conj::And,
            Endofunctor::quant(Quant::Exists, v),
            Endofunctor::identity(),
        );
        let d = f.transport_duplicating(&b, &x, &y).unwrap();
        assert_eq!(d.source(), &f.on_objects(&and(&b, &x), &y));
        assert_eq!(d.target(), &f.on_objects(&and(&b, &x), &and(&b, &y)));
        assert!(f.transport_duplicating(&x, &x, &y).is_err());

        let g = f.clone().compose(Endofunctor::not());
        let d = g.transport_duplicating(&b, &x, &y).unwrap();
        assert_eq!(d.source(), &g.on_objects(&and(&b, &x), &y));
        assert_eq!(d.target(), &g.on_objects(&and(&b, &x), &and(&b, &y)));
    }
}
