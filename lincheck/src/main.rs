//! A checker for serialized arrows of a linear-logic calculus.

use clap::Parser;
use lincheck::{path_reads, process, Error, Opt};

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = Opt::parse();

    let result = path_reads(&opt.files).try_for_each(|pr| {
        let (path, read) = pr?;
        process(path, read, &opt).map(|_| ())
    });
    result
}
