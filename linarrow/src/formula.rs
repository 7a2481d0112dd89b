//! Formulas of the linear calculus.

use crate::Var;
use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Binary connective.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conj {
    And,
    Or,
}

impl Conj {
    /// Return the neutral element of the connective.
    pub fn unit(self) -> Unit {
        match self {
            Self::And => Unit::True,
            Self::Or => Unit::False,
        }
    }
}

/// Quantifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quant {
    Forall,
    Exists,
}

/// Constant formula.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    True,
    False,
}

/// Formula whose immediate subformulas are shared.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum FormulaC {
    /// atomic relation between a held and a holding variable
    Holds(Var, Var),
    Not(Formula),
    Conj(Conj, Formula, Formula),
    /// exponential ("of course")
    Always(Formula),
    Quant(Quant, Var, Formula),
    Unit(Unit),
    /// equality of two witnesses, used by substitution
    Identical(Var, Var),
}

/// Pointer to a shared formula.
///
/// Formulas are immutable, so they can be aliased freely.
/// Equality of formulas is equality up to renaming of bound variables,
/// see [`Formula::alpha_eq`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Formula(Rc<FormulaC>);

impl Formula {
    pub fn new(f: FormulaC) -> Self {
        Self(Rc::new(f))
    }

    /// Compare the memory addresses of two formula pointers.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn holds(held: Var, holding: Var) -> Self {
        Self::new(FormulaC::Holds(held, holding))
    }

    pub fn not(f: Self) -> Self {
        Self::new(FormulaC::Not(f))
    }

    pub fn conj(kind: Conj, l: Self, r: Self) -> Self {
        Self::new(FormulaC::Conj(kind, l, r))
    }

    pub fn and(l: Self, r: Self) -> Self {
        Self::conj(Conj::And, l, r)
    }

    pub fn or(l: Self, r: Self) -> Self {
        Self::conj(Conj::Or, l, r)
    }

    pub fn always(f: Self) -> Self {
        Self::new(FormulaC::Always(f))
    }

    pub fn quant(kind: Quant, v: Var, body: Self) -> Self {
        Self::new(FormulaC::Quant(kind, v, body))
    }

    pub fn forall(v: Var, body: Self) -> Self {
        Self::quant(Quant::Forall, v, body)
    }

    pub fn exists(v: Var, body: Self) -> Self {
        Self::quant(Quant::Exists, v, body)
    }

    pub fn unit(u: Unit) -> Self {
        Self::new(FormulaC::Unit(u))
    }

    pub fn identical(l: Var, r: Var) -> Self {
        Self::new(FormulaC::Identical(l, r))
    }

    /// Linear implication `A ⊸ B`, encoded as `¬(A ⊗ ¬B)`.
    pub fn implies(a: Self, b: Self) -> Self {
        Self::not(Self::and(a, Self::not(b)))
    }

    /// Right-nested chain of values terminated by the unit of the connective.
    pub fn chain(kind: Conj, values: &[Self]) -> Self {
        let unit = Self::unit(kind.unit());
        values
            .iter()
            .rev()
            .fold(unit, |acc, v| Self::conj(kind, v.clone(), acc))
    }

    /// Return the identity arrow on the formula.
    pub fn identity(&self) -> crate::Arrow {
        crate::Arrow::identity(self.clone())
    }

    /// Return the subformulas of a binary connective of the given kind.
    pub fn get_conj(&self, kind: Conj) -> Option<(&Self, &Self)> {
        match &**self {
            FormulaC::Conj(k, l, r) if *k == kind => Some((l, r)),
            _ => None,
        }
    }

    pub fn get_not(&self) -> Option<&Self> {
        match &**self {
            FormulaC::Not(f) => Some(f),
            _ => None,
        }
    }

    pub fn get_always(&self) -> Option<&Self> {
        match &**self {
            FormulaC::Always(f) => Some(f),
            _ => None,
        }
    }

    pub fn get_quant(&self, kind: Quant) -> Option<(Var, &Self)> {
        match &**self {
            FormulaC::Quant(k, v, body) if *k == kind => Some((*v, body)),
            _ => None,
        }
    }

    /// Return the number of connectives and atoms in the formula.
    pub fn size(&self) -> usize {
        use FormulaC::*;
        match &**self {
            Holds(..) | Unit(_) | Identical(..) => 1,
            Not(f) | Always(f) | Quant(_, _, f) => 1 + f.size(),
            Conj(_, l, r) => 1 + l.size() + r.size(),
        }
    }
}

impl core::ops::Deref for Formula {
    type Target = FormulaC;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<FormulaC> for Formula {
    fn from(f: FormulaC) -> Self {
        Self::new(f)
    }
}

impl Display for Conj {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::And => write!(f, "⊗"),
            Self::Or => write!(f, "⊕"),
        }
    }
}

impl Display for Quant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Forall => write!(f, "∀"),
            Self::Exists => write!(f, "∃"),
        }
    }
}

impl Display for FormulaC {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Holds(held, holding) => write!(f, "{} ∈ {}", held, holding),
            Self::Not(x) => write!(f, "¬{}", Atomic(x)),
            Self::Conj(k, l, r) => write!(f, "({} {} {})", l, k, r),
            Self::Always(x) => write!(f, "!{}", Atomic(x)),
            Self::Quant(k, v, body) => write!(f, "({}{}. {})", k, v, body),
            Self::Unit(Unit::True) => write!(f, "1"),
            Self::Unit(Unit::False) => write!(f, "0"),
            Self::Identical(l, r) => write!(f, "{} = {}", l, r),
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        (**self).fmt(f)
    }
}

/// Formula that is put into parentheses if it is an infix relation.
struct Atomic<'a>(&'a Formula);

impl Display for Atomic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &**self.0 {
            FormulaC::Holds(..) | FormulaC::Identical(..) => write!(f, "({})", self.0),
            _ => self.0.fmt(f),
        }
    }
}
