//! Enumeration of formulas that can be moved out of or into a hole.

use super::{Endofunctor, Shape, Side, Transformation, Variance};
use crate::{Conj, Formula, Var};

/// Formula found inside an endofunctor, together with
/// the transformation that moves it and the endofunctor that remains.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub side: Formula,
    pub transformation: Transformation,
    /// the endofunctor without the conjunction that held `side`
    pub remainder: Endofunctor,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Import,
    Export,
}

/// Lazy enumeration of candidates, outermost first.
///
/// The enumeration is finite, and it can be restarted by cloning it.
#[derive(Clone)]
pub struct Candidates<P> {
    atoms: Vec<Endofunctor>,
    index: usize,
    mode: Mode,
    predicate: P,
}

impl<P: FnMut(&Formula) -> bool> Candidates<P> {
    /// Try to move the formula at the given atom.
    fn candidate(&mut self, i: usize) -> Option<Candidate> {
        let (hole, side) = match &*self.atoms[i].shape {
            Shape::Conj(Conj::And, hole, side) => (*hole, side.clone()),
            _ => return None,
        };
        if !(self.predicate)(&side) {
            return None;
        }
        let outer = Endofunctor::from_atoms(self.atoms[..i].iter());
        let inner = Endofunctor::from_atoms(self.atoms[i + 1..].iter());
        let remainder = inner.clone().compose(outer.clone());
        let probe = Formula::holds(Var::fresh(), Var::fresh());
        let transformation = match self.mode {
            Mode::Import if outer.is_covariant() => {
                outer.import_at(&side, &inner.on_object(&probe)).ok()?;
                Transformation::Extract {
                    outer: outer.clone(),
                    side: side.clone(),
                    hole,
                    inner: inner.clone(),
                }
            }
            Mode::Export if !outer.is_covariant() && inner.is_covariant() => {
                inner.push_at(&side, &probe, false).ok()?;
                remainder.export_at(&side, &probe).ok()?;
                Transformation::Insert {
                    outer: outer.clone(),
                    side: side.clone(),
                    hole,
                    inner: inner.clone(),
                }
            }
            _ => return None,
        };
        trace!("candidate {} at depth {}", side, i);
        Some(Candidate {
            side,
            transformation,
            remainder,
        })
    }
}

impl<P: FnMut(&Formula) -> bool> Iterator for Candidates<P> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.atoms.len() {
            let i = self.index;
            self.index += 1;
            if let Some(c) = self.candidate(i) {
                return Some(c);
            }
        }
        None
    }
}

impl Endofunctor {
    /// Enumerate nothing unless the hole has the expected variance.
    fn filtered<P>(&self, mode: Mode, expected: Variance, predicate: P) -> Candidates<P> {
        let atoms = if self.variance == expected {
            self.atoms()
        } else {
            Vec::new()
        };
        Candidates {
            atoms,
            index: 0,
            mode,
            predicate,
        }
    }

    /// Enumerate the conjuncts inside a covariant endofunctor
    /// that satisfy the predicate and can be pulled out of it.
    ///
    /// For an endofunctor `F(x) = P(B ⊗ Q(x))`, every candidate
    /// yields an arrow `F(x) → B ⊗ P(Q(x))`.
    ///
    /// ~~~
    /// # use linarrow::functor::{Endofunctor, Side};
    /// # use linarrow::{Conj, Formula, Var};
    /// let (a, b) = (Var::fresh(), Var::fresh());
    /// let (p, q) = (Formula::holds(a, b), Formula::holds(b, a));
    /// // p ⊗ (□ ⊗ q)
    /// let f = Endofunctor::conj(Conj::And, Side::Left, q.clone())
    ///     .compose(Endofunctor::conj(Conj::And, Side::Right, p.clone()));
    /// let all: Vec<_> = f.import_filtered(|_| true).map(|c| c.side).collect();
    /// assert_eq!(all, vec![p.clone(), q.clone()]);
    /// let only_q = f.import_filtered(|b| *b == q).next().unwrap();
    /// let x = Formula::holds(a, a);
    /// let arrow = only_q.transformation.at(&x)?;
    /// assert_eq!(arrow.target(), &Formula::and(q, Formula::and(p, x)));
    /// # Ok::<_, linarrow::Error>(())
    /// ~~~
    pub fn import_filtered<P>(&self, predicate: P) -> Candidates<P>
    where
        P: FnMut(&Formula) -> bool,
    {
        debug!("import filtered from {}", self);
        self.filtered(Mode::Import, Variance::Covariant, predicate)
    }

    /// Enumerate the conjuncts inside a contravariant endofunctor
    /// that satisfy the predicate and can be moved down to its hole.
    ///
    /// For an endofunctor `E(x) = P(B ⊗ Q(x))` with contravariant `P`,
    /// every candidate yields an arrow `P(Q(B ⊗ x)) → E(x)`.
    /// Only candidates that can then be exported from `P ∘ Q` are enumerated.
    pub fn export_filtered<P>(&self, predicate: P) -> Candidates<P>
    where
        P: FnMut(&Formula) -> bool,
    {
        debug!("export filtered from {}", self);
        self.filtered(Mode::Export, Variance::Contravariant, predicate)
    }
}
