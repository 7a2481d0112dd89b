//! Surface arrows.

use super::Formula;
use crate::error::TranslateError as Error;
use crate::{Conj, Quant, Var};
use std::rc::Rc;

type Result<T> = core::result::Result<T, Error>;

/// Rule of a surface arrow.
///
/// Lists are given as they appear in the source of the arrow.
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Identity(Formula),
    Composite(Arrow, Arrow),
    /// arrow applied to the element at the index
    OnElement(Conj, Vec<Formula>, usize, Arrow),
    OnNot(Arrow),
    OnAlways(Arrow),
    OnBody(Quant, Vec<Var>, Arrow),
    /// move the element at the first index to the second index
    Shift(Conj, Vec<Formula>, usize, usize),
    /// collect the elements in the range into one nested element
    Group(Conj, Vec<Formula>, usize, usize),
    /// splice the nested element at the index into the list
    Ungroup(Conj, Vec<Formula>, usize),
    /// drop the element at the index from a conjunction
    Forget(Vec<Formula>, usize),
    /// insert a formula at the index into a disjunction
    Admit(Vec<Formula>, usize, Formula),
    Hide(String, Formula),
    Reveal(String, Formula),
    Unfold(Formula, Formula),
    Fold(Formula, Formula),
    /// primitive arrow between the translations of two surface formulas
    Lifted(crate::Arrow, Formula, Formula),
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity(_) => "identity",
            Self::Composite(..) => "composite",
            Self::OnElement(..) => "on_element",
            Self::OnNot(_) => "on_not",
            Self::OnAlways(_) => "on_always",
            Self::OnBody(..) => "on_body",
            Self::Shift(..) => "shift",
            Self::Group(..) => "group",
            Self::Ungroup(..) => "ungroup",
            Self::Forget(..) => "forget",
            Self::Admit(..) => "admit",
            Self::Hide(..) => "hide",
            Self::Reveal(..) => "reveal",
            Self::Unfold(..) => "unfold",
            Self::Fold(..) => "fold",
            Self::Lifted(..) => "lifted",
        }
    }
}

/// Surface arrow, whose endpoints are computed from its step.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    step: Rc<Step>,
    source: Formula,
    target: Formula,
}

fn in_bounds(step: &'static str, index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(Error::Index { step, index, len })
    }
}

fn same(step: &'static str, expected: &Formula, found: &Formula) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::Mismatch {
            step,
            expected: expected.clone(),
            found: found.clone(),
        })
    }
}

impl Arrow {
    fn from_parts(step: Step, source: Formula, target: Formula) -> Self {
        Self {
            step: Rc::new(step),
            source,
            target,
        }
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn source(&self) -> &Formula {
        &self.source
    }

    pub fn target(&self) -> &Formula {
        &self.target
    }

    pub fn identity(a: Formula) -> Self {
        Self::from_parts(Step::Identity(a.clone()), a.clone(), a)
    }

    /// Return `self` followed by `other`.
    pub fn compose(self, other: Self) -> Result<Self> {
        if self.target != other.source {
            return Err(Error::Uncomposable {
                target: self.target,
                source: other.source,
            });
        }
        let (source, target) = (self.source.clone(), other.target.clone());
        Ok(Self::from_parts(Step::Composite(self, other), source, target))
    }

    /// Apply an arrow to one element of a connective.
    pub fn on_element(kind: Conj, values: Vec<Formula>, index: usize, f: Self) -> Result<Self> {
        in_bounds("on_element", index, values.len())?;
        same("on_element", &values[index], f.source())?;
        let mut target = values.clone();
        target[index] = f.target.clone();
        let source = Formula::Conj(kind, values.clone());
        let step = Step::OnElement(kind, values, index, f);
        Ok(Self::from_parts(step, source, Formula::Conj(kind, target)))
    }

    /// Lift an arrow `A → B` to `¬B → ¬A`.
    pub fn on_not(f: Self) -> Self {
        let source = Formula::not(f.target.clone());
        let target = Formula::not(f.source.clone());
        Self::from_parts(Step::OnNot(f), source, target)
    }

    pub fn on_always(f: Self) -> Self {
        let source = Formula::always(f.source.clone());
        let target = Formula::always(f.target.clone());
        Self::from_parts(Step::OnAlways(f), source, target)
    }

    pub fn on_body(kind: Quant, vars: Vec<Var>, f: Self) -> Self {
        let source = Formula::quant(kind, vars.clone(), f.source.clone());
        let target = Formula::quant(kind, vars.clone(), f.target.clone());
        Self::from_parts(Step::OnBody(kind, vars, f), source, target)
    }

    /// Move the element at position `from` to position `to`.
    pub fn shift(kind: Conj, values: Vec<Formula>, from: usize, to: usize) -> Result<Self> {
        in_bounds("shift", from, values.len())?;
        in_bounds("shift", to, values.len())?;
        let mut target = values.clone();
        let moved = target.remove(from);
        target.insert(to, moved);
        let source = Formula::Conj(kind, values.clone());
        let step = Step::Shift(kind, values, from, to);
        Ok(Self::from_parts(step, source, Formula::Conj(kind, target)))
    }

    /// Collect the elements from `start` (inclusive) to `end` (exclusive)
    /// into a nested connective of the same kind.
    pub fn group(kind: Conj, values: Vec<Formula>, start: usize, end: usize) -> Result<Self> {
        in_bounds("group", end, values.len() + 1)?;
        in_bounds("group", start, end + 1)?;
        let mut target = values[..start].to_vec();
        target.push(Formula::Conj(kind, values[start..end].to_vec()));
        target.extend_from_slice(&values[end..]);
        let source = Formula::Conj(kind, values.clone());
        let step = Step::Group(kind, values, start, end);
        Ok(Self::from_parts(step, source, Formula::Conj(kind, target)))
    }

    /// Splice the nested connective at `index` into the list.
    pub fn ungroup(kind: Conj, values: Vec<Formula>, index: usize) -> Result<Self> {
        in_bounds("ungroup", index, values.len())?;
        let inner = values[index].get_conj(kind).ok_or_else(|| Error::Expected {
            step: "ungroup",
            expected: "nested connective",
            found: values[index].clone(),
        })?;
        let mut target = values[..index].to_vec();
        target.extend_from_slice(inner);
        target.extend_from_slice(&values[index + 1..]);
        let source = Formula::Conj(kind, values.clone());
        let step = Step::Ungroup(kind, values, index);
        Ok(Self::from_parts(step, source, Formula::Conj(kind, target)))
    }

    /// Drop an element from a conjunction.
    pub fn forget(values: Vec<Formula>, index: usize) -> Result<Self> {
        in_bounds("forget", index, values.len())?;
        let mut target = values.clone();
        target.remove(index);
        let source = Formula::Conj(Conj::And, values.clone());
        let step = Step::Forget(values, index);
        Ok(Self::from_parts(step, source, Formula::Conj(Conj::And, target)))
    }

    /// Insert a formula into a disjunction.
    pub fn admit(values: Vec<Formula>, index: usize, x: Formula) -> Result<Self> {
        in_bounds("admit", index, values.len() + 1)?;
        let mut target = values.clone();
        target.insert(index, x.clone());
        let source = Formula::Conj(Conj::Or, values.clone());
        let step = Step::Admit(values, index, x);
        Ok(Self::from_parts(step, source, Formula::Conj(Conj::Or, target)))
    }

    pub fn hide(name: String, a: Formula) -> Self {
        let target = Formula::hidden(name.clone(), a.clone());
        Self::from_parts(Step::Hide(name, a.clone()), a, target)
    }

    pub fn reveal(name: String, a: Formula) -> Self {
        let source = Formula::hidden(name.clone(), a.clone());
        Self::from_parts(Step::Reveal(name, a.clone()), source, a)
    }

    /// `(A ⇔ B) → (A ⇒ B) ⊗ (B ⇒ A)`
    pub fn unfold(a: Formula, b: Formula) -> Self {
        let source = Formula::iff(a.clone(), b.clone());
        let target = Formula::expand_iff(&a, &b);
        Self::from_parts(Step::Unfold(a, b), source, target)
    }

    pub fn fold(a: Formula, b: Formula) -> Self {
        let source = Formula::expand_iff(&a, &b);
        let target = Formula::iff(a.clone(), b.clone());
        Self::from_parts(Step::Fold(a, b), source, target)
    }

    /// Embed a primitive arrow, checking that it connects
    /// the translations of the given surface formulas.
    pub fn lifted(arrow: crate::Arrow, source: Formula, target: Formula) -> Result<Self> {
        for (expected, found) in [(&source, arrow.source()), (&target, arrow.target())] {
            let expected = expected.translate();
            if expected != *found {
                return Err(Error::Lifted {
                    expected,
                    found: found.clone(),
                });
            }
        }
        let step = Step::Lifted(arrow, source.clone(), target.clone());
        Ok(Self::from_parts(step, source, target))
    }
}
