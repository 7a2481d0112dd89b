//! Compression of composite arrows.
//!
//! Compression flattens a composite arrow into its sequence of steps and
//! merges adjacent steps wherever a fixed table of shapes allows it.
//! It never changes source or target of an arrow, and
//! compressing an arrow twice yields the same as compressing it once.

use crate::{Arrow, Conj, Formula, Rule};

impl Arrow {
    /// Merge adjacent steps of the arrow, and
    /// return the result as a right-associated composite.
    ///
    /// ~~~
    /// # use linarrow::{Arrow, Conj, Formula, Var};
    /// let (a, b) = (Var::fresh(), Var::fresh());
    /// let (x, y) = (Formula::holds(a, b), Formula::holds(b, a));
    /// let l = Arrow::on_left(Conj::And, Arrow::intro_double_dual(x.clone()), y.clone());
    /// let r = Arrow::on_right(Conj::And, l.target().get_conj(Conj::And).unwrap().0.clone(), Arrow::admit(y.clone(), x));
    /// let lr = l.compose(r)?.compress();
    /// assert_eq!(lr.to_string(), "both(intro_double_dual, admit)");
    /// # Ok::<_, linarrow::error::ShapeError>(())
    /// ~~~
    pub fn compress(&self) -> Self {
        let steps = self.steps();
        debug!("compress {} steps", steps.len());
        let mut stack: Vec<Arrow> = Vec::with_capacity(steps.len());
        for step in steps {
            push(&mut stack, step.compress_step());
        }
        let compressed = stack
            .into_iter()
            .rev()
            .reduce(|g, f| Self::composite_unchecked(f, g));
        compressed.unwrap_or_else(|| Self::identity(self.source().clone()))
    }

    /// Compress the arrows inside a non-composite arrow.
    fn compress_step(&self) -> Self {
        use Rule::*;
        match self.rule() {
            OnLeft(k, f, r) => on_left(*k, f.compress(), r.clone()),
            OnRight(k, l, f) => on_right(*k, l.clone(), f.compress()),
            OnConj(k, f, g) => on_conj(*k, f.compress(), g.compress()),
            OnNot(f) => lift(f.compress(), Arrow::on_not),
            OnAlways(f) => lift(f.compress(), Arrow::on_always),
            OnBody(q, v, f) => lift(f.compress(), |f| Arrow::on_body(*q, *v, f)),
            _ => self.clone(),
        }
    }
}

/// Push a step on a stack of steps of which no adjacent pair can be merged,
/// merging as long as possible.
fn push(stack: &mut Vec<Arrow>, mut right: Arrow) {
    while let Some(left) = stack.pop() {
        match merge(&left, &right) {
            Some(merged) => {
                trace!("merge {} and {} to {}", left, right, merged);
                right = merged
            }
            None => {
                stack.push(left);
                break;
            }
        }
    }
    stack.push(right)
}

/// Merge two composable non-composite steps into one, if possible.
fn merge(left: &Arrow, right: &Arrow) -> Option<Arrow> {
    use Rule::*;
    match (left.rule(), right.rule()) {
        (Identity(_), _) => return Some(right.clone()),
        (_, Identity(_)) => return Some(left.clone()),
        (OnAlways(f), OnAlways(g)) => return Some(lift(then(f, g), Arrow::on_always)),
        // contravariant: the arrow inside the second negation comes first
        (OnNot(f), OnNot(g)) => return Some(lift(then(g, f), Arrow::on_not)),
        (OnBody(q1, v1, f), OnBody(q2, v2, g)) if q1 == q2 && v1 == v2 => {
            return Some(lift(then(f, g), |h| Arrow::on_body(*q1, *v1, h)))
        }
        _ => (),
    }

    if let (Some((k1, fl, fr)), Some((k2, gl, gr))) = (sides(left), sides(right)) {
        if k1 == k2 {
            return Some(on_conj(k1, then(&fl, &gl), then(&fr, &gr)));
        }
    }

    if !left.rule().is_functorial() && left.reverse().ok().as_ref() == Some(right) {
        return Some(Arrow::identity(left.source().clone()));
    }
    None
}

/// Compose two arrows that are known to fit together, and compress the result.
fn then(f: &Arrow, g: &Arrow) -> Arrow {
    Arrow::composite_unchecked(f.clone(), g.clone()).compress()
}

/// Return the arrows on both sides of a conjunction, if the arrow acts on one.
fn sides(arrow: &Arrow) -> Option<(Conj, Arrow, Arrow)> {
    match arrow.rule() {
        Rule::OnLeft(k, f, r) => Some((*k, f.clone(), Arrow::identity(r.clone()))),
        Rule::OnRight(k, l, g) => Some((*k, Arrow::identity(l.clone()), g.clone())),
        Rule::OnConj(k, f, g) => Some((*k, f.clone(), g.clone())),
        _ => None,
    }
}

fn is_id(arrow: &Arrow) -> bool {
    matches!(arrow.rule(), Rule::Identity(_))
}

/// Apply a functorial rule unless the arrow is an identity.
fn lift(f: Arrow, rule: impl FnOnce(Arrow) -> Arrow) -> Arrow {
    if is_id(&f) {
        let lifted = rule(f);
        Arrow::identity(lifted.source().clone())
    } else {
        rule(f)
    }
}

fn on_left(kind: Conj, f: Arrow, r: Formula) -> Arrow {
    lift(f, |f| Arrow::on_left(kind, f, r))
}

fn on_right(kind: Conj, l: Formula, f: Arrow) -> Arrow {
    lift(f, |f| Arrow::on_right(kind, l, f))
}

/// Build the canonical arrow acting on both sides of a conjunction.
fn on_conj(kind: Conj, f: Arrow, g: Arrow) -> Arrow {
    match (is_id(&f), is_id(&g)) {
        (true, true) => Arrow::identity(Formula::conj(
            kind,
            f.source().clone(),
            g.source().clone(),
        )),
        (true, false) => Arrow::on_right(kind, f.source().clone(), g),
        (false, true) => Arrow::on_left(kind, f, g.source().clone()),
        (false, false) => Arrow::on_conj(kind, f, g),
    }
}
