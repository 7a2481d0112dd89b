//! Common error type.

use crate::functor::{Endofunctor, Variance};
use crate::{enriched, Formula, Var};
use core::fmt::{self, Display};

/// Violation of variable hygiene during substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HygieneError {
    /// the replaced variable is bound somewhere inside the formula
    Rebound(Var),
    /// the replacing variable would be captured by a quantifier
    Captured(Var),
}

/// Arrow whose fields do not have the shape required by its rule.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeError {
    Expected {
        rule: &'static str,
        expected: &'static str,
        found: Formula,
    },
    Mismatch {
        rule: &'static str,
        expected: Formula,
        found: Formula,
    },
    Uncomposable {
        target: Formula,
        source: Formula,
    },
    Free {
        rule: &'static str,
        var: Var,
        formula: Formula,
    },
    Hygiene(&'static str, HygieneError),
}

/// Rule that has no known inverse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotInvertible(pub &'static str);

/// Failure to move a formula across a hole.
#[derive(Clone, Debug, PartialEq)]
pub enum TransportError {
    /// no rule moves the side formula past this hole
    Untransportable {
        functor: Endofunctor,
        side: Formula,
    },
    /// the side formula mentions a variable bound by the hole
    Captured { var: Var, side: Formula },
    Variance {
        operation: &'static str,
        expected: Variance,
    },
    /// invalid hole positions of a bifunctor
    Holes {
        left: usize,
        right: usize,
        len: usize,
    },
    Shape(ShapeError),
}

/// Surface arrow whose fields do not fit its step.
#[derive(Clone, Debug, PartialEq)]
pub enum TranslateError {
    Expected {
        step: &'static str,
        expected: &'static str,
        found: enriched::Formula,
    },
    Index {
        step: &'static str,
        index: usize,
        len: usize,
    },
    Mismatch {
        step: &'static str,
        expected: enriched::Formula,
        found: enriched::Formula,
    },
    Uncomposable {
        target: enriched::Formula,
        source: enriched::Formula,
    },
    /// a primitive arrow does not connect the translated endpoints
    Lifted { expected: Formula, found: Formula },
}

/// Common error type.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    Hygiene(HygieneError),
    Shape(ShapeError),
    NotInvertible(NotInvertible),
    Transport(TransportError),
    Translate(TranslateError),
}

impl From<HygieneError> for Error {
    fn from(err: HygieneError) -> Self {
        Self::Hygiene(err)
    }
}

impl From<ShapeError> for Error {
    fn from(err: ShapeError) -> Self {
        Self::Shape(err)
    }
}

impl From<NotInvertible> for Error {
    fn from(err: NotInvertible) -> Self {
        Self::NotInvertible(err)
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        Self::Transport(err)
    }
}

impl From<TranslateError> for Error {
    fn from(err: TranslateError) -> Self {
        Self::Translate(err)
    }
}

impl From<ShapeError> for TransportError {
    fn from(err: ShapeError) -> Self {
        Self::Shape(err)
    }
}

impl Display for HygieneError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Rebound(v) => write!(f, "variable {} is bound inside the formula", v),
            Self::Captured(v) => write!(f, "substitution would be captured by binder of {}", v),
        }
    }
}

impl Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Expected {
                rule,
                expected,
                found,
            } => write!(f, "{}: expected {}, found {}", rule, expected, found),
            Self::Mismatch {
                rule,
                expected,
                found,
            } => write!(f, "{}: expected {}, found {}", rule, expected, found),
            Self::Uncomposable { target, source } => {
                write!(f, "cannot compose arrow to {} with arrow from {}", target, source)
            }
            Self::Free { rule, var, formula } => {
                write!(f, "{}: {} must not be free in {}", rule, var, formula)
            }
            Self::Hygiene(rule, err) => write!(f, "{}: {}", rule, err),
        }
    }
}

impl Display for NotInvertible {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} is not invertible", self.0)
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Untransportable { functor, side } => {
                write!(f, "cannot move {} across {}", side, functor)
            }
            Self::Captured { var, side } => {
                write!(f, "{} mentions {}, which is bound by the hole", side, var)
            }
            Self::Variance {
                operation,
                expected,
            } => write!(f, "{} requires a {} hole", operation, expected),
            Self::Holes { left, right, len } => {
                write!(f, "invalid holes {} and {} among {} values", left, right, len)
            }
            Self::Shape(err) => err.fmt(f),
        }
    }
}

impl Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Expected {
                step,
                expected,
                found,
            } => write!(f, "{}: expected {}, found {}", step, expected, found),
            Self::Index { step, index, len } => {
                write!(f, "{}: index {} out of bounds for {} values", step, index, len)
            }
            Self::Mismatch {
                step,
                expected,
                found,
            } => write!(f, "{}: expected {}, found {}", step, expected, found),
            Self::Uncomposable { target, source } => write!(
                f,
                "cannot compose surface arrow to {} with arrow from {}",
                target, source
            ),
            Self::Lifted { expected, found } => {
                write!(f, "lifted arrow: expected {}, found {}", expected, found)
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Hygiene(e) => e.fmt(f),
            Self::Shape(e) => e.fmt(f),
            Self::NotInvertible(e) => e.fmt(f),
            Self::Transport(e) => e.fmt(f),
            Self::Translate(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}
