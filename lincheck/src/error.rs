use core::fmt::{self, Display};
use std::io;

/// Central error type.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Arrow(linarrow::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<linarrow::Error> for Error {
    fn from(err: linarrow::Error) -> Self {
        Self::Arrow(err)
    }
}

impl From<linarrow::error::ShapeError> for Error {
    fn from(err: linarrow::error::ShapeError) -> Self {
        Self::Arrow(err.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::Json(e) => e.fmt(f),
            Self::Arrow(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {}
