//! Application of rules to given source formulas.
//!
//! Every function in this module takes the formula a rule should be applied to,
//! destructures it according to the source shape of the rule, and
//! fails with a shape error if the formula does not have that shape.
//! To apply a rule to a subformula, first navigate to it
//! by lifting the resulting arrow with a functorial arrow or an
//! [`Endofunctor`](crate::functor::Endofunctor).
//!
//! ~~~
//! # use linarrow::{arrow::rules, Formula, Var};
//! let (a, b) = (Var::fresh(), Var::fresh());
//! let (x, y) = (Formula::holds(a, b), Formula::holds(b, a));
//! let premise = Formula::and(Formula::implies(x.clone(), y.clone()), x.clone());
//! assert!(rules::apply(&premise).is_err());
//! let premise = Formula::and(Formula::not(Formula::and(x.clone(), y.clone())), y);
//! assert_eq!(rules::apply(&premise)?.target(), &Formula::not(x));
//! # Ok::<_, linarrow::error::ShapeError>(())
//! ~~~

use super::{Arrow, Direction, Error, Result};
use crate::{Conj, Formula, FormulaC, Quant, Var};

fn expected(rule: &'static str, expected: &'static str, found: &Formula) -> Error {
    Error::Expected {
        rule,
        expected,
        found: found.clone(),
    }
}

fn conj<'a>(rule: &'static str, f: &'a Formula) -> Result<(Conj, &'a Formula, &'a Formula)> {
    match &**f {
        FormulaC::Conj(k, l, r) => Ok((*k, l, r)),
        _ => Err(expected(rule, "A % B", f)),
    }
}

fn and<'a>(rule: &'static str, f: &'a Formula) -> Result<(&'a Formula, &'a Formula)> {
    f.get_conj(Conj::And).ok_or_else(|| expected(rule, "A ⊗ B", f))
}

fn not<'a>(rule: &'static str, f: &'a Formula) -> Result<&'a Formula> {
    f.get_not().ok_or_else(|| expected(rule, "¬A", f))
}

fn always<'a>(rule: &'static str, f: &'a Formula) -> Result<&'a Formula> {
    f.get_always().ok_or_else(|| expected(rule, "!A", f))
}

fn quant<'a>(rule: &'static str, kind: Quant, f: &'a Formula) -> Result<(Var, &'a Formula)> {
    let shape = match kind {
        Quant::Forall => "∀x. A",
        Quant::Exists => "∃x. A",
    };
    f.get_quant(kind).ok_or_else(|| expected(rule, shape, f))
}

/// `A % B → B % A`
pub fn commute(src: &Formula) -> Result<Arrow> {
    let (k, a, b) = conj("commute", src)?;
    Ok(Arrow::commute(k, a.clone(), b.clone()))
}

/// `(A % B) % C → A % (B % C)`
pub fn associate_a(src: &Formula) -> Result<Arrow> {
    let rule = "associate_a";
    let (k, ab, c) = conj(rule, src)?;
    let (a, b) = ab
        .get_conj(k)
        .ok_or_else(|| expected(rule, "(A % B) % C", src))?;
    Ok(Arrow::associate_a(k, a.clone(), b.clone(), c.clone()))
}

/// `A % (B % C) → (A % B) % C`
pub fn associate_b(src: &Formula) -> Result<Arrow> {
    let rule = "associate_b";
    let (k, a, bc) = conj(rule, src)?;
    let (b, c) = bc
        .get_conj(k)
        .ok_or_else(|| expected(rule, "A % (B % C)", src))?;
    Ok(Arrow::associate_b(k, a.clone(), b.clone(), c.clone()))
}

/// `A % u → A`
pub fn remove_unit(src: &Formula) -> Result<Arrow> {
    let (k, a, u) = conj("remove_unit", src)?;
    if !Arrow::is_unit_of(k, u) {
        return Err(expected("remove_unit", "A % u", src));
    }
    Ok(Arrow::remove_unit(k, a.clone()))
}

/// `(A ⊕ B) ⊗ C → (A ⊗ C) ⊕ (B ⊗ C)`
pub fn distribute(src: &Formula) -> Result<Arrow> {
    let rule = "distribute";
    let (ab, c) = and(rule, src)?;
    let (a, b) = ab
        .get_conj(Conj::Or)
        .ok_or_else(|| expected(rule, "(A ⊕ B) ⊗ C", src))?;
    Ok(Arrow::distribute(a.clone(), b.clone(), c.clone()))
}

/// `A ⊗ B → A`
pub fn forget(src: &Formula) -> Result<Arrow> {
    let (a, b) = and("forget", src)?;
    Ok(Arrow::forget(a.clone(), b.clone()))
}

/// `¬(A ⊗ B) ⊗ B → ¬A`
pub fn apply(src: &Formula) -> Result<Arrow> {
    let rule = "apply";
    let (hyp, b2) = and(rule, src)?;
    let (a, b) = not(rule, hyp)?
        .get_conj(Conj::And)
        .ok_or_else(|| expected(rule, "¬(A ⊗ B) ⊗ B", src))?;
    if b != b2 {
        return Err(Error::Mismatch {
            rule,
            expected: b.clone(),
            found: b2.clone(),
        });
    }
    Ok(Arrow::apply(a.clone(), b.clone()))
}

/// `¬¬A → A`
pub fn remove_double_dual(src: &Formula) -> Result<Arrow> {
    let rule = "remove_double_dual";
    let a = not(rule, src).and_then(|a| not(rule, a))?;
    Ok(Arrow::remove_double_dual(a.clone()))
}

/// `!A → !!A`
pub fn cojoin(src: &Formula) -> Result<Arrow> {
    Ok(Arrow::cojoin(always("cojoin", src)?.clone()))
}

/// `!A → A`
pub fn derelict(src: &Formula) -> Result<Arrow> {
    Ok(Arrow::derelict(always("derelict", src)?.clone()))
}

/// `!A → !A' ⊗ !A`
pub fn copy(src: &Formula) -> Result<Arrow> {
    Ok(Arrow::copy(always("copy", src)?.clone()))
}

/// `!A ⊗ !B → !(A ⊗ B)`
pub fn zip(src: &Formula) -> Result<Arrow> {
    let rule = "zip";
    let (a, b) = and(rule, src)?;
    let (a, b) = (always(rule, a)?, always(rule, b)?);
    Ok(Arrow::zip(a.clone(), b.clone()))
}

/// `∃x. A → A`
pub fn remove_exists(src: &Formula) -> Result<Arrow> {
    let (x, a) = quant("remove_exists", Quant::Exists, src)?;
    Arrow::remove_exists(x, a.clone())
}

/// `∀x. A → A[x → witness]`
pub fn remove_forall(src: &Formula, witness: Var) -> Result<Arrow> {
    let (x, a) = quant("remove_forall", Quant::Forall, src)?;
    Arrow::remove_forall(x, a.clone(), witness)
}

/// `A ⊗ ∃x. B → ∃x. (A ⊗ B)`
pub fn and_past_exists(src: &Formula) -> Result<Arrow> {
    let rule = "and_past_exists";
    let (a, eb) = and(rule, src)?;
    let (x, b) = quant(rule, Quant::Exists, eb)?;
    Arrow::and_past_exists(a.clone(), x, b.clone())
}

/// `∃x. (A ⊗ B) → A ⊗ ∃x. B`
pub fn exists_past_and(src: &Formula) -> Result<Arrow> {
    let rule = "exists_past_and";
    let (x, ab) = quant(rule, Quant::Exists, src)?;
    let (a, b) = and(rule, ab)?;
    Arrow::exists_past_and(a.clone(), x, b.clone())
}

/// `(a = b) ⊗ A → A[a → b]` or `(a = b) ⊗ A → A[b → a]`
pub fn substitute(src: &Formula, direction: Direction) -> Result<Arrow> {
    let rule = "substitute";
    let (eq, body) = and(rule, src)?;
    match &**eq {
        FormulaC::Identical(l, r) => Arrow::substitute(*l, *r, body.clone(), direction),
        _ => Err(expected(rule, "(a = b) ⊗ A", src)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Unit;

    fn atom() -> Formula {
        Formula::holds(Var::fresh(), Var::fresh())
    }

    #[test]
    fn zip_scenario() {
        let (x, y) = (atom(), atom());
        let src = Formula::and(Formula::always(x.clone()), Formula::always(y.clone()));
        let f = zip(&src).unwrap();
        assert_eq!(f.target(), &Formula::always(Formula::and(x.clone(), y.clone())));
        assert_eq!(f.target().to_string(), format!("!({} ⊗ {})", x, y));

        // zip needs both sides to be exponentials
        assert!(zip(&Formula::and(Formula::always(x.clone()), y)).is_err());
        assert!(zip(&Formula::always(x)).is_err());
    }

    #[test]
    fn wrong_shapes_fail() {
        let (x, y, z) = (atom(), atom(), atom());
        let flat = Formula::and(x.clone(), y.clone());
        assert!(associate_a(&flat).is_err());
        assert!(associate_b(&flat).is_err());
        assert!(distribute(&flat).is_err());
        assert!(remove_unit(&flat).is_err());
        assert!(remove_double_dual(&Formula::not(x.clone())).is_err());
        assert!(derelict(&x).is_err());
        assert!(remove_exists(&x).is_err());
        assert!(commute(&x).is_err());
        // the conjunction kinds of associativity must agree
        let mixed = Formula::and(Formula::or(x.clone(), y.clone()), z.clone());
        assert!(associate_a(&mixed).is_err());
        assert!(distribute(&mixed).is_ok());
    }

    #[test]
    fn apply_checks_argument() {
        let (x, y, z) = (atom(), atom(), atom());
        let imp = Formula::not(Formula::and(x.clone(), y.clone()));
        let good = apply(&Formula::and(imp.clone(), y)).unwrap();
        assert_eq!(good.target(), &Formula::not(x));
        assert!(apply(&Formula::and(imp, z)).is_err());
    }

    #[test]
    fn units_and_quantifiers() {
        let x = atom();
        let unit = Formula::or(x.clone(), Formula::unit(Unit::False));
        assert_eq!(remove_unit(&unit).unwrap().target(), &x);
        let wrong = Formula::or(x.clone(), Formula::unit(Unit::True));
        assert!(remove_unit(&wrong).is_err());

        let (v, a, w) = (Var::fresh(), Var::fresh(), Var::fresh());
        let all = Formula::forall(v, Formula::holds(v, a));
        assert_eq!(remove_forall(&all, w).unwrap().target(), &Formula::holds(w, a));
        let ex = Formula::exists(v, Formula::and(x.clone(), Formula::holds(v, a)));
        let out = exists_past_and(&ex).unwrap();
        assert_eq!(and_past_exists(out.target()).unwrap().target(), &ex);
    }

    #[test]
    fn substitute_needs_equality() {
        let (a, b, c) = (Var::fresh(), Var::fresh(), Var::fresh());
        let src = Formula::and(Formula::identical(a, b), Formula::holds(a, c));
        let f = substitute(&src, Direction::Forward).unwrap();
        assert_eq!(f.target(), &Formula::holds(b, c));
        let bad = Formula::and(Formula::holds(a, b), Formula::holds(a, c));
        assert!(substitute(&bad, Direction::Forward).is_err());
    }
}
