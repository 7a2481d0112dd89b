//! Arrows, i.e. proof steps between formulas.
//!
//! Every arrow is built from a [`Rule`], which fully determines
//! the source and the target of the arrow.
//! Constructing an arrow validates its rule,
//! so every value of type [`Arrow`] is well-typed.
//!
//! There are two ways to construct arrows:
//! by giving the fields of a rule (see the constructors on [`Arrow`],
//! and [`Arrow::new`] for any rule), or
//! by giving the source formula to which a rule should be applied
//! (see the [`rules`] module).

mod reverse;
pub mod rules;
mod typing;

use crate::error::ShapeError as Error;
use crate::{Conj, Formula, Quant, Var};
use core::fmt::{self, Display};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

type Result<T> = core::result::Result<T, Error>;

/// Direction in which an equality is used by substitution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// replace the left side of the equality by the right side
    Forward,
    /// replace the right side of the equality by the left side
    Backward,
}

/// Inference rule together with the formulas it is applied to.
///
/// In the following, `A % B` denotes a conjunction of kind `%`,
/// `A ⊗ B` a conjunction of kind `And`, and `A ⊕ B` one of kind `Or`.
/// Every rule lists the source and target of the arrow it builds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Rule {
    /// `A → A`
    Identity(Formula),
    /// `f: A → B` and `g: B → C` yield `A → C`
    Composite(Arrow, Arrow),
    /// `f: A → A'` yields `A % B → A' % B`
    OnLeft(Conj, Arrow, Formula),
    /// `f: B → B'` yields `A % B → A % B'`
    OnRight(Conj, Formula, Arrow),
    /// `f: A → A'` and `g: B → B'` yield `A % B → A' % B'`
    OnConj(Conj, Arrow, Arrow),
    /// `f: A → B` yields `¬B → ¬A`
    OnNot(Arrow),
    /// `f: A → B` yields `!A → !B`
    OnAlways(Arrow),
    /// `f: A → B` yields `Qx. A → Qx. B`
    OnBody(Quant, Var, Arrow),
    /// `A % B → B % A`
    Commute(Conj, Formula, Formula),
    /// `(A % B) % C → A % (B % C)`
    AssociateA(Conj, Formula, Formula, Formula),
    /// `A % (B % C) → (A % B) % C`
    AssociateB(Conj, Formula, Formula, Formula),
    /// `A → A % u`, where `u` is the unit of `%`
    IntroUnit(Conj, Formula),
    /// `A % u → A`
    RemoveUnit(Conj, Formula),
    /// `(A ⊕ B) ⊗ C → (A ⊗ C) ⊕ (B ⊗ C)`
    Distribute(Formula, Formula, Formula),
    /// `A ⊗ B → A`
    Forget(Formula, Formula),
    /// `A → A ⊕ B`
    Admit(Formula, Formula),
    /// `¬(A ⊗ B) ⊗ B → ¬A`
    Apply(Formula, Formula),
    /// `A → ¬¬A`
    IntroDoubleDual(Formula),
    /// `¬¬A → A`
    RemoveDoubleDual(Formula),
    /// `!A → !!A`
    Cojoin(Formula),
    /// `!A → A`
    Derelict(Formula),
    /// `!A → !A' ⊗ !A`, where `A'` equals `A` up to renaming
    Copy(Formula, Formula),
    /// `!A ⊗ !B → !(A ⊗ B)`
    Zip(Formula, Formula),
    /// `A → ∃y. A[x → y]`, where `x` is the witness and `y` the bound variable
    IntroExists { body: Formula, witness: Var, bound: Var },
    /// `∃x. A → A`, where `x` is not free in `A`
    RemoveExists(Var, Formula),
    /// `A → ∀x. A`, where `x` is not free in `A`
    IntroForall(Var, Formula),
    /// `∀x. A → A[x → w]`, where `w` is the witness
    RemoveForall { bound: Var, body: Formula, witness: Var },
    /// `A ⊗ ∃x. B → ∃x. (A ⊗ B)`, where `x` is not free in `A`
    AndPastExists(Formula, Var, Formula),
    /// `∃x. (A ⊗ B) → A ⊗ ∃x. B`, where `x` is not free in `A`
    ExistsPastAnd(Formula, Var, Formula),
    /// `(a = b) ⊗ A → A[a → b]` or `(a = b) ⊗ A → A[b → a]`
    Substitute {
        left: Var,
        right: Var,
        body: Formula,
        direction: Direction,
    },
}

impl Rule {
    /// Return a short human-readable name of the rule.
    pub fn name(&self) -> &'static str {
        use Rule::*;
        match self {
            Identity(_) => "identity",
            Composite(..) => "composite",
            OnLeft(..) => "left",
            OnRight(..) => "right",
            OnConj(..) => "both",
            OnNot(_) => "not",
            OnAlways(_) => "always",
            OnBody(..) => "body",
            Commute(..) => "commute",
            AssociateA(..) => "associate_a",
            AssociateB(..) => "associate_b",
            IntroUnit(..) => "intro_unit",
            RemoveUnit(..) => "remove_unit",
            Distribute(..) => "distribute",
            Forget(..) => "forget",
            Admit(..) => "admit",
            Apply(..) => "apply",
            IntroDoubleDual(_) => "intro_double_dual",
            RemoveDoubleDual(_) => "remove_double_dual",
            Cojoin(_) => "cojoin",
            Derelict(_) => "derelict",
            Copy(..) => "copy",
            Zip(..) => "zip",
            IntroExists { .. } => "intro_exists",
            RemoveExists(..) => "remove_exists",
            IntroForall(..) => "intro_forall",
            RemoveForall { .. } => "remove_forall",
            AndPastExists(..) => "and_past_exists",
            ExistsPastAnd(..) => "exists_past_and",
            Substitute { .. } => "substitute",
        }
    }

    /// Return true if the rule applies another arrow inside a context.
    pub fn is_functorial(&self) -> bool {
        use Rule::*;
        matches!(
            self,
            OnLeft(..) | OnRight(..) | OnConj(..) | OnNot(_) | OnAlways(_) | OnBody(..)
        )
    }

    /// Return true if the rule only rearranges a formula.
    ///
    /// Structural rules carry no logical content;
    /// they move subformulas around and insert or remove units.
    pub fn is_structural(&self) -> bool {
        use Rule::*;
        matches!(
            self,
            Identity(_)
                | Commute(..)
                | AssociateA(..)
                | AssociateB(..)
                | IntroUnit(..)
                | RemoveUnit(..)
        )
    }
}

#[derive(Debug)]
struct Node {
    rule: Rule,
    source: Formula,
    target: Formula,
}

/// Pointer to a shared, validated arrow.
///
/// Two arrows are equal if their rules are equal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Rule", into = "Rule")]
pub struct Arrow(Rc<Node>);

/// Side of a composition that is left unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fixed {
    Source,
    Target,
}

impl Arrow {
    /// Construct an arrow after validating its rule.
    ///
    /// ~~~
    /// # use linarrow::{Arrow, Conj, Formula, Rule, Var};
    /// let (a, b) = (Var::fresh(), Var::fresh());
    /// let (x, y) = (Formula::holds(a, b), Formula::holds(b, a));
    /// let zip = Arrow::new(Rule::Zip(x.clone(), y.clone()))?;
    /// assert_eq!(zip.source(), &Formula::and(Formula::always(x.clone()), Formula::always(y.clone())));
    /// assert_eq!(zip.target(), &Formula::always(Formula::and(x.clone(), y)));
    ///
    /// // the target of `zip` is no conjunction
    /// let forget = Arrow::new(Rule::Forget(x.clone(), x))?;
    /// assert!(zip.compose(forget).is_err());
    /// # Ok::<_, linarrow::error::ShapeError>(())
    /// ~~~
    pub fn new(rule: Rule) -> Result<Self> {
        use Rule::*;
        Ok(match rule {
            Identity(a) => Self::identity(a),
            Composite(f, g) => f.compose(g)?,
            OnLeft(k, f, r) => Self::on_left(k, f, r),
            OnRight(k, l, f) => Self::on_right(k, l, f),
            OnConj(k, f, g) => Self::on_conj(k, f, g),
            OnNot(f) => Self::on_not(f),
            OnAlways(f) => Self::on_always(f),
            OnBody(q, v, f) => Self::on_body(q, v, f),
            Commute(k, a, b) => Self::commute(k, a, b),
            AssociateA(k, a, b, c) => Self::associate_a(k, a, b, c),
            AssociateB(k, a, b, c) => Self::associate_b(k, a, b, c),
            IntroUnit(k, a) => Self::intro_unit(k, a),
            RemoveUnit(k, a) => Self::remove_unit(k, a),
            Distribute(a, b, c) => Self::distribute(a, b, c),
            Forget(a, b) => Self::forget(a, b),
            Admit(a, b) => Self::admit(a, b),
            Apply(a, b) => Self::apply(a, b),
            IntroDoubleDual(a) => Self::intro_double_dual(a),
            RemoveDoubleDual(a) => Self::remove_double_dual(a),
            Cojoin(a) => Self::cojoin(a),
            Derelict(a) => Self::derelict(a),
            Copy(a, a2) => Self::copy_as(a, a2)?,
            Zip(a, b) => Self::zip(a, b),
            IntroExists {
                body,
                witness,
                bound,
            } => Self::intro_exists(body, witness, bound)?,
            RemoveExists(x, a) => Self::remove_exists(x, a)?,
            IntroForall(x, a) => Self::intro_forall(x, a)?,
            RemoveForall {
                bound,
                body,
                witness,
            } => Self::remove_forall(bound, body, witness)?,
            AndPastExists(a, x, b) => Self::and_past_exists(a, x, b)?,
            ExistsPastAnd(a, x, b) => Self::exists_past_and(a, x, b)?,
            Substitute {
                left,
                right,
                body,
                direction,
            } => Self::substitute(left, right, body, direction)?,
        })
    }

    /// Build an arrow from a rule and its already computed endpoints.
    fn from_parts(rule: Rule, source: Formula, target: Formula) -> Self {
        Self(Rc::new(Node {
            rule,
            source,
            target,
        }))
    }

    pub fn rule(&self) -> &Rule {
        &self.0.rule
    }

    pub fn source(&self) -> &Formula {
        &self.0.source
    }

    pub fn target(&self) -> &Formula {
        &self.0.target
    }

    /// Compare the memory addresses of two arrow pointers.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Return `self` followed by `other`.
    ///
    /// This fails unless the target of `self` equals the source of `other`.
    pub fn compose(self, other: Self) -> Result<Self> {
        if self.target() != other.source() {
            return Err(Error::Uncomposable {
                target: self.target().clone(),
                source: other.source().clone(),
            });
        }
        Ok(Self::composite_unchecked(self, other))
    }

    /// Compose two arrows that are known to fit together.
    pub(crate) fn composite_unchecked(f: Self, g: Self) -> Self {
        debug_assert!(f.target() == g.source());
        let (source, target) = (f.source().clone(), g.target().clone());
        Self::from_parts(Rule::Composite(f, g), source, target)
    }

    /// Extend a proof at its target, keeping its source.
    pub fn forward_compose(self, next: Self) -> Result<(Self, Fixed)> {
        Ok((self.compose(next)?, Fixed::Source))
    }

    /// Extend a proof at its source, keeping its target.
    pub fn backward_compose(self, previous: Self) -> Result<(Self, Fixed)> {
        Ok((previous.compose(self)?, Fixed::Target))
    }

    /// Return the sequence of non-composite arrows that make up the arrow.
    ///
    /// ~~~
    /// # use linarrow::{Arrow, Conj, Formula, Var};
    /// let (a, b) = (Var::fresh(), Var::fresh());
    /// let (x, y) = (Formula::holds(a, b), Formula::holds(b, a));
    /// let swap = Arrow::commute(Conj::And, x.clone(), y.clone());
    /// let back = Arrow::commute(Conj::And, y, x);
    /// let twice = swap.clone().compose(back.clone())?;
    /// assert_eq!(twice.compose(swap.clone())?.steps(), vec![swap.clone(), back, swap]);
    /// # Ok::<_, linarrow::error::ShapeError>(())
    /// ~~~
    pub fn steps(&self) -> Vec<Self> {
        let mut steps = Vec::new();
        self.push_steps(&mut steps);
        steps
    }

    fn push_steps(&self, steps: &mut Vec<Self>) {
        match self.rule() {
            Rule::Composite(f, g) => {
                f.push_steps(steps);
                g.push_steps(steps)
            }
            _ => steps.push(self.clone()),
        }
    }

    /// Number of non-composite arrows, counting arrows inside functorial arrows.
    pub fn size(&self) -> usize {
        use Rule::*;
        match self.rule() {
            Composite(f, g) | OnConj(_, f, g) => f.size() + g.size(),
            OnLeft(_, f, _) | OnRight(_, _, f) | OnNot(f) | OnAlways(f) | OnBody(_, _, f) => {
                1 + f.size()
            }
            _ => 1,
        }
    }

    /// Return true if the arrow is an identity, possibly inside some context.
    pub fn is_identity(&self) -> bool {
        use Rule::*;
        match self.rule() {
            Identity(_) => true,
            OnConj(_, f, g) => f.is_identity() && g.is_identity(),
            OnLeft(_, f, _) | OnRight(_, _, f) | OnNot(f) | OnAlways(f) | OnBody(_, _, f) => {
                f.is_identity()
            }
            _ => false,
        }
    }
}

impl PartialEq for Arrow {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.rule() == other.rule()
    }
}

impl TryFrom<Rule> for Arrow {
    type Error = Error;

    fn try_from(rule: Rule) -> Result<Self> {
        Self::new(rule)
    }
}

impl From<Arrow> for Rule {
    fn from(arrow: Arrow) -> Self {
        arrow.rule().clone()
    }
}

impl Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Rule::*;
        match self.rule() {
            Identity(_) => write!(f, "id"),
            Composite(l, r) => write!(f, "{} ; {}", l, r),
            OnLeft(_, a, _) => write!(f, "left({})", a),
            OnRight(_, _, a) => write!(f, "right({})", a),
            OnConj(_, l, r) => write!(f, "both({}, {})", l, r),
            OnNot(a) => write!(f, "not({})", a),
            OnAlways(a) => write!(f, "always({})", a),
            OnBody(_, _, a) => write!(f, "body({})", a),
            rule => write!(f, "{}", rule.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms() -> (Formula, Formula, Formula) {
        let (a, b) = (Var::fresh(), Var::fresh());
        let x = Formula::holds(a, b);
        let y = Formula::holds(b, a);
        let z = Formula::identical(a, b);
        (x, y, z)
    }

    #[test]
    fn composition_checks_endpoints() {
        let (x, y, _) = atoms();
        let swap = Arrow::commute(Conj::And, x.clone(), y.clone());
        assert!(swap.clone().compose(swap.clone()).is_err());
        let back = Arrow::commute(Conj::And, y, x.clone());
        let round = swap.clone().compose(back).unwrap();
        assert_eq!(round.source(), round.target());
        assert_eq!(round.source(), swap.source());
    }

    #[test]
    fn composition_up_to_renaming() {
        let (a, b, c, d) = (Var::fresh(), Var::fresh(), Var::fresh(), Var::fresh());
        // b ∈ a → ∃c. c ∈ a
        let intro = Arrow::intro_exists(Formula::holds(b, a), b, c).unwrap();
        let same = Arrow::identity(Formula::exists(d, Formula::holds(d, a)));
        let swapped = Arrow::identity(Formula::exists(d, Formula::holds(a, d)));
        assert!(intro.clone().compose(same).is_ok());
        assert!(intro.compose(swapped).is_err());
    }

    #[test]
    fn forward_and_backward() {
        let (x, y, _) = atoms();
        let admit = Arrow::admit(x.clone(), y.clone());
        let commute = Arrow::commute(Conj::Or, x.clone(), y);
        let (fwd, fixed) = admit.clone().forward_compose(commute.clone()).unwrap();
        assert_eq!(fixed, Fixed::Source);
        let (bwd, fixed) = commute.backward_compose(admit).unwrap();
        assert_eq!(fixed, Fixed::Target);
        assert_eq!(fwd, bwd);
    }

    #[test]
    fn display() {
        let (x, y, z) = atoms();
        let f = Arrow::on_left(Conj::And, Arrow::commute(Conj::Or, x, y), z);
        let g = Arrow::on_not(Arrow::identity(f.target().clone()));
        let h = Arrow::on_right(Conj::And, Formula::unit(crate::Unit::True), f);
        assert_eq!(h.to_string(), "right(left(commute))");
        assert_eq!(g.to_string(), "not(id)");
    }

    #[test]
    fn serialization_revalidates() {
        let (x, y, _) = atoms();
        let f = Arrow::zip(x.clone(), y.clone());
        let json = serde_json::to_string(&f).unwrap();
        let g: Arrow = serde_json::from_str(&json).unwrap();
        assert_eq!(f, g);
        assert_eq!(f.target(), g.target());

        // composing zip with an arrow whose source differs must be rejected
        let bad = Rule::Composite(f, Arrow::forget(x, y));
        let json = serde_json::to_string(&bad).unwrap();
        assert!(serde_json::from_str::<Arrow>(&json).is_err());
    }
}
