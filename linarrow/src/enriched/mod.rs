//! Surface calculus with n-ary connectives and named binders.
//!
//! Surface formulas and arrows are translated to the primitive calculus
//! by a [`Compiler`]. The translation is functorial:
//! it maps surface identities to identities, composites to composites,
//! and the endpoints of a surface arrow to the endpoints of its translation.
//!
//! ~~~
//! # use linarrow::enriched::{Arrow, Compiler, Formula};
//! # use linarrow::{Conj, Var};
//! let (a, b) = (Var::fresh(), Var::fresh());
//! let (p, q) = (Formula::Holds(a, b), Formula::Holds(b, a));
//! let list = vec![p.clone(), q.clone(), p];
//! let shift = Arrow::shift(Conj::And, list, 0, 2)?;
//! let mut compiler = Compiler::default();
//! let arrow = compiler.arrow(&shift)?;
//! assert_eq!(arrow.source(), &compiler.formula(shift.source()));
//! assert_eq!(arrow.target(), &compiler.formula(shift.target()));
//! # Ok::<_, linarrow::Error>(())
//! ~~~

mod arrow;
mod translate;

pub use arrow::{Arrow, Step};
pub use translate::Compiler;

use crate::{Conj, Quant, Var};
use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};

/// Surface formula.
///
/// Equality of surface formulas is structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Formula {
    Holds(Var, Var),
    Identical(Var, Var),
    Not(Box<Formula>),
    /// n-ary connective; the empty connective is its unit
    Conj(Conj, Vec<Formula>),
    Always(Box<Formula>),
    /// quantification over several variables, the first one outermost
    Quant(Quant, Vec<Var>, Box<Formula>),
    /// `!(A ⊸ B)`, which translates to `!¬(A ⊗ ¬B)`
    Implies(Box<Formula>, Box<Formula>),
    /// two implications, one in each direction
    Iff(Box<Formula>, Box<Formula>),
    /// formula collapsed under a name
    Hidden(String, Box<Formula>),
}

impl Formula {
    pub fn not(f: Self) -> Self {
        Self::Not(Box::new(f))
    }

    pub fn always(f: Self) -> Self {
        Self::Always(Box::new(f))
    }

    pub fn quant(kind: Quant, vars: Vec<Var>, body: Self) -> Self {
        Self::Quant(kind, vars, Box::new(body))
    }

    pub fn iff(l: Self, r: Self) -> Self {
        Self::Iff(Box::new(l), Box::new(r))
    }

    pub fn hidden(name: impl Into<String>, f: Self) -> Self {
        Self::Hidden(name.into(), Box::new(f))
    }

    pub fn implies(a: Self, b: Self) -> Self {
        Self::Implies(Box::new(a), Box::new(b))
    }

    /// Expand `A ⇔ B` into the conjunction of both implications.
    pub fn expand_iff(a: &Self, b: &Self) -> Self {
        Self::Conj(
            Conj::And,
            vec![
                Self::implies(a.clone(), b.clone()),
                Self::implies(b.clone(), a.clone()),
            ],
        )
    }

    /// Return the elements of a connective of the given kind.
    pub fn get_conj(&self, kind: Conj) -> Option<&[Self]> {
        match self {
            Self::Conj(k, values) if *k == kind => Some(values.as_slice()),
            _ => None,
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Holds(held, holding) => write!(f, "{} ∈ {}", held, holding),
            Self::Identical(l, r) => write!(f, "{} = {}", l, r),
            Self::Not(x) => write!(f, "¬({})", x),
            Self::Conj(k, values) if values.is_empty() => match k.unit() {
                crate::Unit::True => write!(f, "1"),
                crate::Unit::False => write!(f, "0"),
            },
            Self::Conj(k, values) => {
                write!(f, "(")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", k)?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
            Self::Always(x) => write!(f, "!({})", x),
            Self::Quant(q, vars, body) => {
                write!(f, "({}", q)?;
                for (i, v) in vars.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ". {})", body)
            }
            Self::Implies(l, r) => write!(f, "({} ⇒ {})", l, r),
            Self::Iff(l, r) => write!(f, "({} ⇔ {})", l, r),
            Self::Hidden(name, _) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let (a, b) = (Var::fresh(), Var::fresh());
        let p = Formula::Holds(a, b);
        let f = Formula::Conj(Conj::Or, vec![p.clone(), Formula::not(p.clone())]);
        assert_eq!(f.to_string(), format!("({} ⊕ ¬({}))", p, p));
        assert_eq!(Formula::Conj(Conj::And, vec![]).to_string(), "1");
        assert_eq!(Formula::hidden("P", f).to_string(), "P");
    }
}
