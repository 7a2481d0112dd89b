//! Property-based tests for renaming, compression, reversal and translation.

use crate::arrow::rules;
use crate::{enriched, Arrow, Conj, Formula, Quant, Unit, Var};
use proptest::prelude::*;

/// Formula description over a small set of variables.
#[derive(Debug, Clone)]
enum Desc {
    Holds(u8, u8),
    Unit(bool),
    Not(Box<Desc>),
    Always(Box<Desc>),
    Conj(bool, Box<Desc>, Box<Desc>),
    Quant(bool, u8, Box<Desc>),
}

fn arb_desc(max_depth: u32) -> BoxedStrategy<Desc> {
    let leaf = prop_oneof![
        4 => (0..4u8, 0..4u8).prop_map(|(a, b)| Desc::Holds(a, b)),
        1 => any::<bool>().prop_map(Desc::Unit),
    ];
    if max_depth == 0 {
        leaf.boxed()
    } else {
        let sub = || arb_desc(max_depth - 1);
        prop_oneof![
            2 => leaf,
            1 => sub().prop_map(|d| Desc::Not(Box::new(d))),
            1 => sub().prop_map(|d| Desc::Always(Box::new(d))),
            3 => (any::<bool>(), sub(), sub())
                .prop_map(|(k, l, r)| Desc::Conj(k, Box::new(l), Box::new(r))),
            2 => (any::<bool>(), 0..4u8, sub())
                .prop_map(|(q, v, d)| Desc::Quant(q, v, Box::new(d))),
        ]
        .boxed()
    }
}

fn build(desc: &Desc, vars: &[Var]) -> Formula {
    let var = |i: &u8| vars[usize::from(*i)];
    let kind = |and: &bool| if *and { Conj::And } else { Conj::Or };
    match desc {
        Desc::Holds(a, b) => Formula::holds(var(a), var(b)),
        Desc::Unit(t) => Formula::unit(if *t { Unit::True } else { Unit::False }),
        Desc::Not(d) => Formula::not(build(d, vars)),
        Desc::Always(d) => Formula::always(build(d, vars)),
        Desc::Conj(k, l, r) => Formula::conj(kind(k), build(l, vars), build(r, vars)),
        Desc::Quant(q, v, d) => {
            let q = if *q { Quant::Forall } else { Quant::Exists };
            Formula::quant(q, var(v), build(d, vars))
        }
    }
}

fn vars() -> Vec<Var> {
    (0..4).map(|_| Var::fresh()).collect()
}

/// Apply an invertible rule to the formula, if it fits.
fn step(op: u8, f: &Formula) -> Option<Arrow> {
    let kind = |f: &Formula| match &**f {
        crate::FormulaC::Conj(k, ..) => Some(*k),
        _ => None,
    };
    match op % 8 {
        0 => rules::commute(f).ok(),
        1 => rules::associate_a(f).ok(),
        2 => rules::associate_b(f).ok(),
        3 => Some(Arrow::intro_double_dual(f.clone())),
        4 => rules::remove_double_dual(f).ok(),
        5 => Some(Arrow::intro_unit(kind(f).unwrap_or(Conj::And), f.clone())),
        6 => rules::remove_unit(f).ok(),
        _ => {
            // commute inside the left side of a conjunction
            let k = kind(f)?;
            let (l, r) = f.get_conj(k)?;
            Some(Arrow::on_left(k, rules::commute(l).ok()?, r.clone()))
        }
    }
}

/// Build a composite arrow by applying the operations in sequence.
fn derive(f: Formula, ops: &[u8]) -> Arrow {
    let mut arrow = Arrow::identity(f);
    for op in ops {
        if let Some(s) = step(*op, arrow.target()) {
            arrow = arrow.compose(s).unwrap();
        }
    }
    arrow
}

proptest! {
    #[test]
    fn renaming_preserves_equality(d in arb_desc(4)) {
        let f = build(&d, &vars());
        let g = f.rename_bound();
        prop_assert_eq!(&f, &g);
        prop_assert!(f.bound_vars().is_disjoint(&g.bound_vars()));
        prop_assert_eq!(f.free_vars(), g.free_vars());
    }

    #[test]
    fn substituting_bound_fails(d in arb_desc(4), i in 0..4usize) {
        let vs = vars();
        let f = build(&d, &vs);
        let r = f.substitute(vs[i], Var::fresh());
        prop_assert_eq!(r.is_err(), f.bound_vars().contains(&vs[i]));
    }

    #[test]
    fn compression_keeps_endpoints(d in arb_desc(3), ops in proptest::collection::vec(any::<u8>(), 0..12)) {
        let a = derive(build(&d, &vars()), &ops);
        let c = a.compress();
        prop_assert_eq!(c.source(), a.source());
        prop_assert_eq!(c.target(), a.target());
        prop_assert_eq!(c.compress(), c.clone());
    }

    #[test]
    fn reversal_round_trips(d in arb_desc(3), ops in proptest::collection::vec(any::<u8>(), 0..12)) {
        let a = derive(build(&d, &vars()), &ops);
        let r = a.reverse().unwrap();
        prop_assert_eq!(r.reverse().unwrap(), a.clone());
        let round = a.clone().compose(r).unwrap().compress();
        prop_assert!(round.is_identity());
        prop_assert_eq!(round.source(), a.source());
    }

    #[test]
    fn translation_is_functorial(len in 1..6usize, from in 0..6usize, to in 0..6usize, and in any::<bool>()) {
        let (from, to) = (from % len, to % len);
        let kind = if and { Conj::And } else { Conj::Or };
        let values: Vec<_> = (0..len)
            .map(|_| enriched::Formula::Holds(Var::fresh(), Var::fresh()))
            .collect();
        let shift = enriched::Arrow::shift(kind, values, from, to).unwrap();
        let back = enriched::Arrow::shift(kind, shift.target().get_conj(kind).unwrap().to_vec(), to, from).unwrap();
        let mut compiler = enriched::Compiler::default();
        let both = shift.clone().compose(back.clone()).unwrap();
        let t = compiler.arrow(&both).unwrap();
        prop_assert_eq!(t.source(), &compiler.formula(both.source()));
        prop_assert_eq!(t.target(), &compiler.formula(both.target()));
        let parts = compiler.arrow(&shift).unwrap().compose(compiler.arrow(&back).unwrap()).unwrap();
        prop_assert_eq!(t.compress(), parts.compress());
    }
}
