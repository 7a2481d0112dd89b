use criterion::{criterion_group, criterion_main, Criterion};
use linarrow::functor::{Endofunctor, Side};
use linarrow::{Arrow, Conj, Formula, Var};

fn atom() -> Formula {
    Formula::holds(Var::fresh(), Var::fresh())
}

/// Swap the elements of an n-element conjunction back and forth.
fn swaps(n: usize) -> Arrow {
    let values: Vec<_> = (0..n).map(|_| atom()).collect();
    let mut arrow = Arrow::identity(Formula::chain(Conj::And, &values));
    for _ in 0..n {
        let swap = linarrow::arrow::rules::commute(arrow.target()).unwrap();
        arrow = arrow.compose(swap).unwrap();
        let double = Arrow::intro_double_dual(arrow.target().clone());
        arrow = arrow.compose(double).unwrap();
        let undo = linarrow::arrow::rules::remove_double_dual(arrow.target()).unwrap();
        arrow = arrow.compose(undo).unwrap();
    }
    arrow
}

/// Endofunctor nesting a hole below `n` conjunctions and quantifiers.
fn deep(n: usize) -> Endofunctor {
    (0..n).fold(Endofunctor::identity(), |acc, i| {
        let side = if i % 2 == 0 { Side::Left } else { Side::Right };
        acc.compose(Endofunctor::conj(Conj::And, side, atom()))
            .compose(Endofunctor::quant(linarrow::Quant::Exists, Var::fresh()))
    })
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let arrow = swaps(64);
    let f = deep(32);
    let (b, x) = (atom(), atom());

    c.bench_function("compress", |bench| bench.iter(|| arrow.compress()));
    c.bench_function("reverse", |bench| bench.iter(|| arrow.reverse().unwrap()));
    c.bench_function("import", |bench| {
        bench.iter(|| f.import(&b).unwrap().at(&x).unwrap())
    });
    c.bench_function("candidates", |bench| {
        bench.iter(|| f.import_filtered(|_| true).count())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
