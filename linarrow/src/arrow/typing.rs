//! Construction of arrows from the fields of their rules.

use super::{Arrow, Direction, Error, Result, Rule};
use crate::{Conj, Formula, Quant, Var};

impl Arrow {
    pub fn identity(a: Formula) -> Self {
        Self::from_parts(Rule::Identity(a.clone()), a.clone(), a)
    }

    pub fn on_left(kind: Conj, f: Self, r: Formula) -> Self {
        let source = Formula::conj(kind, f.source().clone(), r.clone());
        let target = Formula::conj(kind, f.target().clone(), r.clone());
        Self::from_parts(Rule::OnLeft(kind, f, r), source, target)
    }

    pub fn on_right(kind: Conj, l: Formula, f: Self) -> Self {
        let source = Formula::conj(kind, l.clone(), f.source().clone());
        let target = Formula::conj(kind, l.clone(), f.target().clone());
        Self::from_parts(Rule::OnRight(kind, l, f), source, target)
    }

    pub fn on_conj(kind: Conj, f: Self, g: Self) -> Self {
        let source = Formula::conj(kind, f.source().clone(), g.source().clone());
        let target = Formula::conj(kind, f.target().clone(), g.target().clone());
        Self::from_parts(Rule::OnConj(kind, f, g), source, target)
    }

    /// Lift an arrow `A → B` to `¬B → ¬A`.
    pub fn on_not(f: Self) -> Self {
        let source = Formula::not(f.target().clone());
        let target = Formula::not(f.source().clone());
        Self::from_parts(Rule::OnNot(f), source, target)
    }

    pub fn on_always(f: Self) -> Self {
        let source = Formula::always(f.source().clone());
        let target = Formula::always(f.target().clone());
        Self::from_parts(Rule::OnAlways(f), source, target)
    }

    pub fn on_body(kind: Quant, v: Var, f: Self) -> Self {
        let source = Formula::quant(kind, v, f.source().clone());
        let target = Formula::quant(kind, v, f.target().clone());
        Self::from_parts(Rule::OnBody(kind, v, f), source, target)
    }

    pub fn commute(kind: Conj, a: Formula, b: Formula) -> Self {
        let source = Formula::conj(kind, a.clone(), b.clone());
        let target = Formula::conj(kind, b.clone(), a.clone());
        Self::from_parts(Rule::Commute(kind, a, b), source, target)
    }

    pub fn associate_a(kind: Conj, a: Formula, b: Formula, c: Formula) -> Self {
        let conj = |l, r| Formula::conj(kind, l, r);
        let source = conj(conj(a.clone(), b.clone()), c.clone());
        let target = conj(a.clone(), conj(b.clone(), c.clone()));
        Self::from_parts(Rule::AssociateA(kind, a, b, c), source, target)
    }

    pub fn associate_b(kind: Conj, a: Formula, b: Formula, c: Formula) -> Self {
        let conj = |l, r| Formula::conj(kind, l, r);
        let source = conj(a.clone(), conj(b.clone(), c.clone()));
        let target = conj(conj(a.clone(), b.clone()), c.clone());
        Self::from_parts(Rule::AssociateB(kind, a, b, c), source, target)
    }

    pub fn intro_unit(kind: Conj, a: Formula) -> Self {
        let target = Formula::conj(kind, a.clone(), Formula::unit(kind.unit()));
        Self::from_parts(Rule::IntroUnit(kind, a.clone()), a, target)
    }

    pub fn remove_unit(kind: Conj, a: Formula) -> Self {
        let source = Formula::conj(kind, a.clone(), Formula::unit(kind.unit()));
        Self::from_parts(Rule::RemoveUnit(kind, a.clone()), source, a)
    }

    pub fn distribute(a: Formula, b: Formula, c: Formula) -> Self {
        let source = Formula::and(Formula::or(a.clone(), b.clone()), c.clone());
        let target = Formula::or(
            Formula::and(a.clone(), c.clone()),
            Formula::and(b.clone(), c.clone()),
        );
        Self::from_parts(Rule::Distribute(a, b, c), source, target)
    }

    pub fn forget(a: Formula, b: Formula) -> Self {
        let source = Formula::and(a.clone(), b.clone());
        Self::from_parts(Rule::Forget(a.clone(), b), source, a)
    }

    pub fn admit(a: Formula, b: Formula) -> Self {
        let target = Formula::or(a.clone(), b.clone());
        Self::from_parts(Rule::Admit(a.clone(), b), a, target)
    }

    /// Modus ponens: `¬(A ⊗ B) ⊗ B → ¬A`.
    pub fn apply(a: Formula, b: Formula) -> Self {
        let hyp = Formula::not(Formula::and(a.clone(), b.clone()));
        let source = Formula::and(hyp, b.clone());
        let target = Formula::not(a.clone());
        Self::from_parts(Rule::Apply(a, b), source, target)
    }

    pub fn intro_double_dual(a: Formula) -> Self {
        let target = Formula::not(Formula::not(a.clone()));
        Self::from_parts(Rule::IntroDoubleDual(a.clone()), a, target)
    }

    pub fn remove_double_dual(a: Formula) -> Self {
        let source = Formula::not(Formula::not(a.clone()));
        Self::from_parts(Rule::RemoveDoubleDual(a.clone()), source, a)
    }

    pub fn cojoin(a: Formula) -> Self {
        let source = Formula::always(a.clone());
        let target = Formula::always(source.clone());
        Self::from_parts(Rule::Cojoin(a), source, target)
    }

    pub fn derelict(a: Formula) -> Self {
        let source = Formula::always(a.clone());
        Self::from_parts(Rule::Derelict(a.clone()), source, a)
    }

    /// Duplicate `!A`, renaming the bound variables of the copy.
    pub fn copy(a: Formula) -> Self {
        let renamed = a.rename_bound();
        Self::copy_parts(a, renamed)
    }

    /// Duplicate `!A` into a given copy, which must equal `A`.
    pub fn copy_as(a: Formula, copy: Formula) -> Result<Self> {
        if a != copy {
            return Err(Error::Mismatch {
                rule: "copy",
                expected: a,
                found: copy,
            });
        }
        Ok(Self::copy_parts(a, copy))
    }

    fn copy_parts(a: Formula, copy: Formula) -> Self {
        let source = Formula::always(a.clone());
        let target = Formula::and(Formula::always(copy.clone()), source.clone());
        Self::from_parts(Rule::Copy(a, copy), source, target)
    }

    pub fn zip(a: Formula, b: Formula) -> Self {
        let source = Formula::and(Formula::always(a.clone()), Formula::always(b.clone()));
        let target = Formula::always(Formula::and(a.clone(), b.clone()));
        Self::from_parts(Rule::Zip(a, b), source, target)
    }

    /// Abstract the witness `x` of `A` into `∃y. A[x → y]`.
    ///
    /// If `x` and `y` are equal, this is `A → ∃x. A`.
    pub fn intro_exists(body: Formula, witness: Var, bound: Var) -> Result<Self> {
        let rule = "intro_exists";
        if witness != bound && body.is_free(bound) {
            return Err(free(rule, bound, &body));
        }
        let abstracted = body
            .substitute(witness, bound)
            .map_err(|e| Error::Hygiene(rule, e))?;
        let target = Formula::exists(bound, abstracted);
        let source = body.clone();
        Ok(Self::from_parts(
            Rule::IntroExists {
                body,
                witness,
                bound,
            },
            source,
            target,
        ))
    }

    pub fn remove_exists(x: Var, a: Formula) -> Result<Self> {
        not_free("remove_exists", x, &a)?;
        let source = Formula::exists(x, a.clone());
        Ok(Self::from_parts(Rule::RemoveExists(x, a.clone()), source, a))
    }

    pub fn intro_forall(x: Var, a: Formula) -> Result<Self> {
        not_free("intro_forall", x, &a)?;
        let target = Formula::forall(x, a.clone());
        Ok(Self::from_parts(Rule::IntroForall(x, a.clone()), a, target))
    }

    /// Instantiate `∀x. A` with a witness.
    pub fn remove_forall(bound: Var, body: Formula, witness: Var) -> Result<Self> {
        let target = body
            .substitute(bound, witness)
            .map_err(|e| Error::Hygiene("remove_forall", e))?;
        let source = Formula::forall(bound, body.clone());
        Ok(Self::from_parts(
            Rule::RemoveForall {
                bound,
                body,
                witness,
            },
            source,
            target,
        ))
    }

    pub fn and_past_exists(a: Formula, x: Var, b: Formula) -> Result<Self> {
        not_free("and_past_exists", x, &a)?;
        let source = Formula::and(a.clone(), Formula::exists(x, b.clone()));
        let target = Formula::exists(x, Formula::and(a.clone(), b.clone()));
        Ok(Self::from_parts(Rule::AndPastExists(a, x, b), source, target))
    }

    pub fn exists_past_and(a: Formula, x: Var, b: Formula) -> Result<Self> {
        not_free("exists_past_and", x, &a)?;
        let source = Formula::exists(x, Formula::and(a.clone(), b.clone()));
        let target = Formula::and(a.clone(), Formula::exists(x, b.clone()));
        Ok(Self::from_parts(Rule::ExistsPastAnd(a, x, b), source, target))
    }

    /// Rewrite `A` with the equality `left = right`.
    pub fn substitute(left: Var, right: Var, body: Formula, direction: Direction) -> Result<Self> {
        let (old, new) = match direction {
            Direction::Forward => (left, right),
            Direction::Backward => (right, left),
        };
        let target = body
            .substitute(old, new)
            .map_err(|e| Error::Hygiene("substitute", e))?;
        let source = Formula::and(Formula::identical(left, right), body.clone());
        let rule = Rule::Substitute {
            left,
            right,
            body,
            direction,
        };
        Ok(Self::from_parts(rule, source, target))
    }

    /// Return true if the formula is the unit of the given connective.
    pub(crate) fn is_unit_of(kind: Conj, a: &Formula) -> bool {
        matches!(**a, crate::FormulaC::Unit(u) if u == kind.unit())
    }
}

fn free(rule: &'static str, var: Var, formula: &Formula) -> Error {
    Error::Free {
        rule,
        var,
        formula: formula.clone(),
    }
}

fn not_free(rule: &'static str, var: Var, formula: &Formula) -> Result<()> {
    if formula.is_free(var) {
        Err(free(rule, var, formula))
    } else {
        Ok(())
    }
}
