//! Translation of the surface calculus to the primitive calculus.
//!
//! A surface list `[a, b, c]` of kind `%` becomes the chain `a % (b % (c % unit))`.
//! Operations on lists become sequences of primitive arrows
//! that are applied at the right position of the chain.

use super::{Arrow, Formula, Step};
use crate::error::TranslateError;
use crate::functor::{Endofunctor, Side};
use crate::{Conj, Error};
use fnv::FnvHashMap;

type Result<T> = core::result::Result<T, Error>;

/// Translator from surface formulas and arrows to primitive ones.
///
/// The compiler caches the translations of all formulas it has seen.
/// Surface formulas are never modified.
#[derive(Default)]
pub struct Compiler {
    memo: FnvHashMap<Formula, crate::Formula>,
}

impl Compiler {
    /// Translate a surface formula.
    pub fn formula(&mut self, f: &Formula) -> crate::Formula {
        if let Some(t) = self.memo.get(f) {
            return t.clone();
        }
        let t = match f {
            Formula::Holds(a, b) => crate::Formula::holds(*a, *b),
            Formula::Identical(a, b) => crate::Formula::identical(*a, *b),
            Formula::Not(x) => crate::Formula::not(self.formula(x)),
            Formula::Conj(k, values) => crate::Formula::chain(*k, &self.formulas(values)),
            Formula::Always(x) => crate::Formula::always(self.formula(x)),
            Formula::Quant(q, vars, body) => {
                let body = self.formula(body);
                let quant = |acc, v: &crate::Var| crate::Formula::quant(*q, *v, acc);
                vars.iter().rev().fold(body, quant)
            }
            Formula::Implies(a, b) => {
                crate::Formula::always(crate::Formula::implies(self.formula(a), self.formula(b)))
            }
            Formula::Iff(a, b) => self.formula(&Formula::expand_iff(a, b)),
            Formula::Hidden(_, x) => self.formula(x),
        };
        self.memo.insert(f.clone(), t.clone());
        t
    }

    fn formulas(&mut self, fs: &[Formula]) -> Vec<crate::Formula> {
        fs.iter().map(|f| self.formula(f)).collect()
    }

    /// Translate a surface arrow.
    ///
    /// The result leads from the translation of the source
    /// to the translation of the target.
    pub fn arrow(&mut self, a: &Arrow) -> Result<crate::Arrow> {
        debug!("translate {}", a.step().name());
        Ok(match a.step() {
            Step::Identity(x) => crate::Arrow::identity(self.formula(x)),
            Step::Composite(f, g) => self.arrow(f)?.compose(self.arrow(g)?)?,
            Step::OnElement(k, values, i, f) => {
                let ws = self.formulas(values);
                element(*k, &ws, *i).on_arrow(self.arrow(f)?)
            }
            Step::OnNot(f) => crate::Arrow::on_not(self.arrow(f)?),
            Step::OnAlways(f) => crate::Arrow::on_always(self.arrow(f)?),
            Step::OnBody(q, vars, f) => {
                let f = self.arrow(f)?;
                let body = |acc, v: &crate::Var| crate::Arrow::on_body(*q, *v, acc);
                vars.iter().rev().fold(f, body)
            }
            Step::Shift(k, values, from, to) => {
                shift(*k, self.formulas(values), *from, *to)?.compress()
            }
            Step::Group(k, values, start, end) => {
                group(*k, &self.formulas(values), *start, *end)?.compress()
            }
            Step::Ungroup(k, values, i) => {
                let inner = values[*i].get_conj(*k).ok_or_else(|| TranslateError::Expected {
                    step: "ungroup",
                    expected: "nested connective",
                    found: values[*i].clone(),
                })?;
                let mut ws = self.formulas(&values[..*i]);
                ws.extend(self.formulas(inner));
                ws.extend(self.formulas(&values[*i + 1..]));
                group(*k, &ws, *i, *i + inner.len())?.reverse()?.compress()
            }
            Step::Forget(values, i) => forget(self.formulas(values), *i)?.compress(),
            Step::Admit(values, i, x) => {
                let ws = self.formulas(values);
                admit(&ws, *i, self.formula(x))?.compress()
            }
            Step::Hide(_, x) | Step::Reveal(_, x) => crate::Arrow::identity(self.formula(x)),
            Step::Unfold(x, y) | Step::Fold(x, y) => {
                crate::Arrow::identity(self.formula(&Formula::expand_iff(x, y)))
            }
            Step::Lifted(f, _, _) => f.clone(),
        })
    }
}

impl Formula {
    /// Translate the formula with a fresh compiler.
    pub fn translate(&self) -> crate::Formula {
        Compiler::default().formula(self)
    }
}

impl Arrow {
    /// Translate the arrow with a fresh compiler.
    pub fn translate(&self) -> Result<crate::Arrow> {
        Compiler::default().arrow(self)
    }
}

/// Hole after the given elements of a chain.
fn position(kind: Conj, prefix: &[crate::Formula]) -> Endofunctor {
    let atoms: Vec<_> = prefix
        .iter()
        .map(|v| Endofunctor::conj(kind, Side::Right, v.clone()))
        .collect();
    Endofunctor::from_atoms(atoms.iter())
}

/// Hole at the element with the given index of a chain.
fn element(kind: Conj, ws: &[crate::Formula], i: usize) -> Endofunctor {
    let rest = crate::Formula::chain(kind, &ws[i + 1..]);
    Endofunctor::conj(kind, Side::Left, rest).compose(position(kind, &ws[..i]))
}

/// Swap the elements at positions `p` and `p + 1`.
fn swap(kind: Conj, ws: &[crate::Formula], p: usize) -> Result<crate::Arrow> {
    let (a, b) = (ws[p].clone(), ws[p + 1].clone());
    let rest = crate::Formula::chain(kind, &ws[p + 2..]);
    let commute = crate::Arrow::commute(kind, a.clone(), b.clone());
    let arrow = crate::Arrow::associate_b(kind, a.clone(), b.clone(), rest.clone())
        .compose(crate::Arrow::on_left(kind, commute, rest.clone()))?
        .compose(crate::Arrow::associate_a(kind, b, a, rest))?;
    Ok(position(kind, &ws[..p]).on_arrow(arrow))
}

/// Move the element at `from` to `to` by swapping neighbours.
fn shift(kind: Conj, mut ws: Vec<crate::Formula>, from: usize, to: usize) -> Result<crate::Arrow> {
    let mut arrow = crate::Arrow::identity(crate::Formula::chain(kind, &ws));
    let mut p = from;
    while p != to {
        let q = if p < to { p } else { p - 1 };
        arrow = arrow.compose(swap(kind, &ws, q)?)?;
        ws.swap(q, q + 1);
        p = if p < to { p + 1 } else { p - 1 };
    }
    Ok(arrow)
}

/// `g₀ % … % gₙ % rest → (g₀ % … % gₙ % unit) % rest`
fn nest(kind: Conj, gs: &[crate::Formula], rest: crate::Formula) -> Result<crate::Arrow> {
    match gs.split_first() {
        None => {
            let unit = crate::Formula::unit(kind.unit());
            let intro = crate::Arrow::intro_unit(kind, rest.clone());
            Ok(intro.compose(crate::Arrow::commute(kind, rest, unit))?)
        }
        Some((g, gs)) => {
            let inner = nest(kind, gs, rest.clone())?;
            let group = crate::Formula::chain(kind, gs);
            let assoc = crate::Arrow::associate_b(kind, g.clone(), group, rest);
            Ok(crate::Arrow::on_right(kind, g.clone(), inner).compose(assoc)?)
        }
    }
}

fn group(kind: Conj, ws: &[crate::Formula], start: usize, end: usize) -> Result<crate::Arrow> {
    let rest = crate::Formula::chain(kind, &ws[end..]);
    let nested = nest(kind, &ws[start..end], rest)?;
    Ok(position(kind, &ws[..start]).on_arrow(nested))
}

/// Move the element to the end of the conjunction, then drop it.
fn forget(ws: Vec<crate::Formula>, i: usize) -> Result<crate::Arrow> {
    let last = ws.len() - 1;
    let v = ws[i].clone();
    let mut moved = ws.clone();
    moved.remove(i);
    let shifted = shift(Conj::And, ws, i, last)?;
    let unit = crate::Formula::unit(Conj::And.unit());
    let drop = crate::Arrow::commute(Conj::And, v.clone(), unit.clone())
        .compose(crate::Arrow::forget(unit, v))?;
    Ok(shifted.compose(position(Conj::And, &moved).on_arrow(drop))?)
}

/// `S → x ⊕ S`, where `S` is the chain from the given position on.
fn admit(ws: &[crate::Formula], i: usize, x: crate::Formula) -> Result<crate::Arrow> {
    let suffix = crate::Formula::chain(Conj::Or, &ws[i..]);
    let arrow = crate::Arrow::admit(suffix.clone(), x.clone())
        .compose(crate::Arrow::commute(Conj::Or, suffix, x))?;
    Ok(position(Conj::Or, &ws[..i]).on_arrow(arrow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quant, Unit, Var};

    fn atom() -> Formula {
        Formula::Holds(Var::fresh(), Var::fresh())
    }

    /// Check that the translation of an arrow connects the translated endpoints.
    fn check(compiler: &mut Compiler, a: &Arrow) -> crate::Arrow {
        let t = compiler.arrow(a).unwrap();
        assert_eq!(t.source(), &compiler.formula(a.source()));
        assert_eq!(t.target(), &compiler.formula(a.target()));
        t
    }

    #[test]
    fn formulas() {
        let (a, b, c) = (Var::fresh(), Var::fresh(), Var::fresh());
        let p = Formula::Holds(a, b);
        let tp = crate::Formula::holds(a, b);
        let list = Formula::Conj(Conj::Or, vec![p.clone(), p.clone()]);
        let zero = crate::Formula::unit(Unit::False);
        let expected = crate::Formula::or(tp.clone(), crate::Formula::or(tp.clone(), zero));
        assert_eq!(list.translate(), expected);

        let q = Formula::quant(Quant::Forall, vec![a, c], p.clone());
        let expected = crate::Formula::forall(a, crate::Formula::forall(c, tp.clone()));
        assert_eq!(q.translate(), expected);

        let hidden = Formula::hidden("P", p.clone());
        assert_eq!(hidden.translate(), tp);

        let iff = Formula::iff(p.clone(), hidden);
        let one = crate::Formula::unit(Unit::True);
        let imp = |x: &crate::Formula, y: &crate::Formula| {
            let body = crate::Formula::and(x.clone(), crate::Formula::not(y.clone()));
            crate::Formula::always(crate::Formula::not(body))
        };
        let both = crate::Formula::and(imp(&tp, &tp), crate::Formula::and(imp(&tp, &tp), one));
        assert_eq!(iff.translate(), both);
    }

    #[test]
    fn implication_feeds_apply() {
        let (p, q) = (atom(), atom());
        let imp = Formula::implies(p.clone(), q.clone()).translate();
        let body = imp.get_always().unwrap();
        let not_q = crate::Formula::not(q.translate());
        let src = crate::Formula::and(body.clone(), not_q);
        let apply = crate::arrow::rules::apply(&src).unwrap();
        assert_eq!(apply.target(), &crate::Formula::not(p.translate()));
    }

    #[test]
    fn memoized() {
        let p = atom();
        let f = Formula::not(Formula::Conj(Conj::And, vec![p.clone(), p]));
        let mut compiler = Compiler::default();
        let t1 = compiler.formula(&f);
        assert_eq!(compiler.memo.len(), 3);
        let t2 = compiler.formula(&f);
        assert!(t1.ptr_eq(&t2));
    }

    #[test]
    fn list_operations() {
        let (p, q, r, s) = (atom(), atom(), atom(), atom());
        let list = vec![p.clone(), q.clone(), r.clone(), s.clone()];
        let mut compiler = Compiler::default();
        for (from, to) in [(0, 3), (3, 0), (1, 2), (2, 2)] {
            check(&mut compiler, &Arrow::shift(Conj::And, list.clone(), from, to).unwrap());
        }
        for (start, end) in [(0, 4), (1, 3), (2, 2), (4, 4)] {
            check(&mut compiler, &Arrow::group(Conj::Or, list.clone(), start, end).unwrap());
        }
        let group = Arrow::group(Conj::And, list.clone(), 1, 3).unwrap();
        let values = match group.target() {
            Formula::Conj(_, values) => values.clone(),
            _ => unreachable!(),
        };
        let ungroup = Arrow::ungroup(Conj::And, values, 1).unwrap();
        check(&mut compiler, &ungroup);
        for i in 0..4 {
            check(&mut compiler, &Arrow::forget(list.clone(), i).unwrap());
        }
        for i in 0..5 {
            check(&mut compiler, &Arrow::admit(list.clone(), i, p.clone()).unwrap());
        }
    }

    #[test]
    fn functorial() {
        let (p, q, r) = (atom(), atom(), atom());
        let list = vec![p.clone(), q.clone(), r.clone()];
        let mut compiler = Compiler::default();

        let shift = Arrow::shift(Conj::And, list.clone(), 0, 2).unwrap();
        let forget = Arrow::forget(shift.target().get_conj(Conj::And).unwrap().to_vec(), 0).unwrap();
        let both = shift.clone().compose(forget.clone()).unwrap();
        let t = check(&mut compiler, &both);
        let parts = check(&mut compiler, &shift)
            .compose(check(&mut compiler, &forget))
            .unwrap();
        assert_eq!(t.compress(), parts.compress());

        let id = Arrow::identity(shift.source().clone());
        assert!(check(&mut compiler, &id).is_identity());

        let inner = Arrow::hide("P".to_string(), p.clone());
        let on = Arrow::on_element(Conj::Or, list.clone(), 0, inner).unwrap();
        let not = Arrow::on_not(on);
        let body = Arrow::on_body(Quant::Exists, vec![Var::fresh(), Var::fresh()], not);
        check(&mut compiler, &Arrow::on_always(body));

        let unfold = Arrow::unfold(p.clone(), q.clone());
        let fold = Arrow::fold(p, q);
        check(&mut compiler, &unfold.compose(fold).unwrap());
    }

    #[test]
    fn lifted() {
        let (p, q) = (atom(), atom());
        let list = Formula::Conj(Conj::And, vec![p.clone(), q.clone()]);
        let swapped = Formula::Conj(Conj::And, vec![q.clone(), p.clone()]);
        let mut compiler = Compiler::default();
        let shift = Arrow::shift(Conj::And, vec![p, q], 0, 1).unwrap();
        let prim = compiler.arrow(&shift).unwrap();
        let lifted = Arrow::lifted(prim.clone(), list.clone(), swapped.clone()).unwrap();
        assert_eq!(check(&mut compiler, &lifted), prim);
        assert!(Arrow::lifted(prim, swapped, list).is_err());
    }
}
