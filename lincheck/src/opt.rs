use crate::Stage;
use clap::Parser;
use std::path::PathBuf;

#[derive(Clone, Debug, Parser)]
/// A checker for serialized arrows of a linear-logic calculus
pub struct Opt {
    /// Perform only operations until (excluding) the given stage.
    ///
    /// Possible values are: parse, check, compress.
    #[arg(long)]
    pub omit: Option<Stage>,

    /// Invert every checked arrow and report its endpoints
    ///
    /// Arrows that are not isomorphisms are reported with a warning.
    #[arg(long)]
    pub reverse: bool,

    /// Print every arrow after loading
    #[arg(long)]
    pub echo: bool,

    /// Files to process
    ///
    /// Every file contains one serialized arrow.
    /// To read from standard input, use "-" as file name.
    #[arg(name = "FILE", required = true)]
    pub files: Vec<PathBuf>,
}

impl Opt {
    /// Return true if the stage is omitted, either directly or
    /// because an earlier stage is omitted.
    pub fn omits(&self, stage: Stage) -> bool {
        self.omit.map_or(false, |omit| stage >= omit)
    }
}
