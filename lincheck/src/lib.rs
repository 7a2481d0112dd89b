//! Check serialized arrows of a linear-logic calculus.

mod error;
mod opt;
mod path_read;
mod process;
mod stage;

pub use error::Error;
pub use opt::Opt;
pub use path_read::{path_reads, PathRead, PathReads};
pub use process::{process, process_str, Report};
pub use stage::Stage;
