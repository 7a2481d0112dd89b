use crate::error::Error;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

pub type PathRead<'a> = (&'a Path, Box<dyn Read>);
pub type PathReads<'a> = Box<dyn Iterator<Item = Result<PathRead<'a>, Error>> + 'a>;

/// Lazily open and return the files, reading stdin for "-".
pub fn path_reads(files: &[PathBuf]) -> PathReads<'_> {
    Box::new(files.iter().map(|file| {
        let read: Box<dyn Read> = if file.as_path() == Path::new("-") {
            Box::new(io::stdin())
        } else {
            Box::new(std::fs::File::open(file)?)
        };
        Ok((file.as_path(), read))
    }))
}
