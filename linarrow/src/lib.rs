#![forbid(unsafe_code)]

//! Proof construction for a linear-logic calculus.
//!
//! Formulas are objects, and proofs are arrows between them.
//! Every inference rule is an arrow constructor that
//! computes source and target of the arrow from its fields,
//! so an arrow can never claim to prove something it does not.
//!
//! # Usage
//!
//! Proofs are built by composing arrows.
//! Composition checks that the target of the first arrow
//! equals the source of the second one, up to renaming of bound variables.
//! The following example proves `¬(A ⊗ B) ⊗ (B ⊗ C) → ¬A ⊗ C`
//! from modus ponens and associativity.
//!
//! ~~~
//! # use linarrow::{Arrow, Conj, Formula, Var};
//! # use linarrow::arrow::rules;
//! let (a, b, c) = (Var::fresh(), Var::fresh(), Var::fresh());
//! let (pa, pb, pc) = (Formula::holds(a, b), Formula::holds(b, c), Formula::holds(c, a));
//! let hyp = Formula::not(Formula::and(pa.clone(), pb.clone()));
//! let src = Formula::and(hyp, Formula::and(pb, pc.clone()));
//!
//! let assoc = rules::associate_b(&src)?;
//! let (mp, _) = assoc.target().get_conj(Conj::And).unwrap();
//! let apply = Arrow::on_left(Conj::And, rules::apply(mp)?, pc.clone());
//! let proof = assoc.compose(apply)?;
//!
//! assert_eq!(proof.target(), &Formula::and(Formula::not(pa), pc));
//! assert_eq!(proof.compress().steps().len(), 2);
//! # Ok::<_, linarrow::error::ShapeError>(())
//! ~~~
//!
//! # Organisation
//!
//! * The [`Formula`] type and its substitution and renaming operations
//!   form the objects of the calculus.
//! * The [`arrow`] module contains the primitive rules,
//!   together with their inverses ([`Arrow::reverse`]) and
//!   the simplification of composite arrows ([`Arrow::compress`]).
//! * The [`functor`] module describes formulas with holes,
//!   and moves formulas into and out of them.
//! * The [`enriched`] module translates a surface calculus
//!   with n-ary connectives to the primitive calculus.

#[macro_use]
extern crate log;

mod alpha;
pub mod arrow;
mod compress;
pub mod enriched;
pub mod error;
mod formula;
pub mod functor;
#[cfg(test)]
mod proptests;
mod stack;
mod subst;
mod var;

pub use arrow::{Arrow, Rule};
pub use error::Error;
pub use formula::{Conj, Formula, FormulaC, Quant, Unit};
pub use var::Var;
