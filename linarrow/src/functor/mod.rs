//! Formulas with holes.
//!
//! An [`Endofunctor`] describes a formula with one hole.
//! It can be filled with a formula ([`Endofunctor::on_object`]) or
//! with an arrow ([`Endofunctor::on_arrow`]).
//! The hole is *covariant* if it lies below an even number of negations,
//! otherwise it is *contravariant*; filling a contravariant hole with
//! an arrow `A → B` yields an arrow from the formula filled with `B`
//! to the formula filled with `A`.
//!
//! Endofunctors are built from atomic holes by composition:
//!
//! ~~~
//! # use linarrow::functor::{Endofunctor, Side, Variance};
//! # use linarrow::{Conj, Formula, Var};
//! let (a, b) = (Var::fresh(), Var::fresh());
//! let other = Formula::holds(a, b);
//! // ¬(□ ⊗ a ∈ b)
//! let f = Endofunctor::conj(Conj::And, Side::Left, other.clone()).compose(Endofunctor::not());
//! assert_eq!(f.variance(), Variance::Contravariant);
//! let x = Formula::holds(b, a);
//! assert_eq!(f.on_object(&x), Formula::not(Formula::and(x, other)));
//! ~~~
//!
//! The [`transport`] module moves formulas across holes;
//! a [`Bifunctor`] describes a formula with two holes.

mod bifunctor;
mod filter;
mod transformation;
mod transport;

pub use bifunctor::{BiShape, Bifunctor, Direction};
pub use filter::{Candidate, Candidates};
pub use transformation::Transformation;

use crate::{Arrow, Conj, Formula, Quant, Var};
use core::fmt::{self, Display};
use std::rc::Rc;

/// Polarity of a hole.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variance {
    Covariant,
    Contravariant,
}

impl Variance {
    pub fn flip(self) -> Self {
        match self {
            Self::Covariant => Self::Contravariant,
            Self::Contravariant => Self::Covariant,
        }
    }

    /// Variance of a hole inside a hole.
    pub fn compose(self, other: Self) -> Self {
        match self {
            Self::Covariant => other,
            Self::Contravariant => other.flip(),
        }
    }
}

impl Display for Variance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Covariant => write!(f, "covariant"),
            Self::Contravariant => write!(f, "contravariant"),
        }
    }
}

/// Side of a conjunction on which a hole lies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Structure of a hole.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// `□`
    Identity,
    /// `¬□`
    Not,
    /// `!□`
    Always,
    /// `Qx. □`
    Quant(Quant, Var),
    /// `□ % A` if the hole is on the left, `A % □` otherwise
    Conj(Conj, Side, Formula),
    /// the first endofunctor placed into the hole of the second
    Composite(Endofunctor, Endofunctor),
}

/// Formula with one hole, together with the variance of the hole.
#[derive(Clone, Debug)]
pub struct Endofunctor {
    shape: Rc<Shape>,
    variance: Variance,
}

impl Endofunctor {
    fn new(shape: Shape, variance: Variance) -> Self {
        Self {
            shape: Rc::new(shape),
            variance,
        }
    }

    pub fn identity() -> Self {
        Self::new(Shape::Identity, Variance::Covariant)
    }

    pub fn not() -> Self {
        Self::new(Shape::Not, Variance::Contravariant)
    }

    pub fn always() -> Self {
        Self::new(Shape::Always, Variance::Covariant)
    }

    pub fn quant(kind: Quant, v: Var) -> Self {
        Self::new(Shape::Quant(kind, v), Variance::Covariant)
    }

    /// Conjunction with a hole on the given side and `other` on the opposite side.
    pub fn conj(kind: Conj, side: Side, other: Formula) -> Self {
        Self::new(Shape::Conj(kind, side, other), Variance::Covariant)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn variance(&self) -> Variance {
        self.variance
    }

    pub fn is_covariant(&self) -> bool {
        self.variance == Variance::Covariant
    }

    pub fn is_identity(&self) -> bool {
        matches!(*self.shape, Shape::Identity)
    }

    /// Place `self` into the hole of `outer`.
    pub fn compose(self, outer: Self) -> Self {
        if self.is_identity() {
            outer
        } else if outer.is_identity() {
            self
        } else {
            let variance = outer.variance.compose(self.variance);
            Self::new(Shape::Composite(self, outer), variance)
        }
    }

    /// Fill the hole with a formula.
    pub fn on_object(&self, x: &Formula) -> Formula {
        match &*self.shape {
            Shape::Identity => x.clone(),
            Shape::Not => Formula::not(x.clone()),
            Shape::Always => Formula::always(x.clone()),
            Shape::Quant(q, v) => Formula::quant(*q, *v, x.clone()),
            Shape::Conj(k, Side::Left, o) => Formula::conj(*k, x.clone(), o.clone()),
            Shape::Conj(k, Side::Right, o) => Formula::conj(*k, o.clone(), x.clone()),
            Shape::Composite(inner, outer) => outer.on_object(&inner.on_object(x)),
        }
    }

    /// Fill the hole with an arrow.
    ///
    /// For a contravariant hole, an arrow `A → B` yields
    /// an arrow from the formula with `B` to the formula with `A`.
    pub fn on_arrow(&self, f: Arrow) -> Arrow {
        match &*self.shape {
            Shape::Identity => f,
            Shape::Not => Arrow::on_not(f),
            Shape::Always => Arrow::on_always(f),
            Shape::Quant(q, v) => Arrow::on_body(*q, *v, f),
            Shape::Conj(k, Side::Left, o) => Arrow::on_left(*k, f, o.clone()),
            Shape::Conj(k, Side::Right, o) => Arrow::on_right(*k, o.clone(), f),
            Shape::Composite(inner, outer) => outer.on_arrow(inner.on_arrow(f)),
        }
    }

    /// Return the atomic holes of the endofunctor, outermost first.
    pub fn atoms(&self) -> Vec<Self> {
        let mut atoms = Vec::new();
        self.push_atoms(&mut atoms);
        atoms
    }

    fn push_atoms(&self, atoms: &mut Vec<Self>) {
        match &*self.shape {
            Shape::Identity => (),
            Shape::Composite(inner, outer) => {
                outer.push_atoms(atoms);
                inner.push_atoms(atoms)
            }
            _ => atoms.push(self.clone()),
        }
    }

    /// Compose atomic holes, given outermost first.
    pub fn from_atoms<'a>(atoms: impl DoubleEndedIterator<Item = &'a Self>) -> Self {
        atoms
            .rev()
            .fold(Self::identity(), |acc, atom| acc.compose(atom.clone()))
    }

    /// Split into the outermost atom and the rest.
    fn split_outer(&self) -> Option<(Self, Self)> {
        let atoms = self.atoms();
        let (first, rest) = atoms.split_first()?;
        Some((first.clone(), Self::from_atoms(rest.iter())))
    }

    /// Split into the rest and the innermost atom.
    fn split_inner(&self) -> Option<(Self, Self)> {
        let atoms = self.atoms();
        let (last, rest) = atoms.split_last()?;
        Some((Self::from_atoms(rest.iter()), last.clone()))
    }

    /// Return the variables bound by the endofunctor around its hole.
    pub fn binders(&self) -> Vec<Var> {
        let quant = |atom: &Self| match &*atom.shape {
            Shape::Quant(_, v) => Some(*v),
            _ => None,
        };
        self.atoms().iter().filter_map(quant).collect()
    }
}

impl PartialEq for Endofunctor {
    fn eq(&self, other: &Self) -> bool {
        let shapes = |f: &Self| f.atoms().into_iter().map(|a| a.shape);
        self.variance == other.variance && shapes(self).eq(shapes(other))
    }
}

impl Display for Endofunctor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut s = "□".to_string();
        for atom in self.atoms().iter().rev() {
            s = match &*atom.shape {
                Shape::Not => format!("¬{}", s),
                Shape::Always => format!("!{}", s),
                Shape::Quant(q, v) => format!("({}{}. {})", q, v, s),
                Shape::Conj(k, Side::Left, o) => format!("({} {} {})", s, k, o),
                Shape::Conj(k, Side::Right, o) => format!("({} {} {})", o, k, s),
                Shape::Identity | Shape::Composite(..) => s,
            }
        }
        s.fmt(f)
    }
}
