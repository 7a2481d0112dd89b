use crate::{Error, Opt, Stage};
use linarrow::{Arrow, Rule};
use std::io::Read;
use std::path::Path;

/// Outcome of processing a single arrow.
#[derive(Debug, Default)]
pub struct Report {
    /// number of primitive steps before compression
    pub steps: usize,
    /// number of primitive steps after compression
    pub compressed: Option<usize>,
    /// endpoints of the reversed arrow, if requested and invertible
    pub reversed: Option<Arrow>,
}

/// Read a serialized rule, then check, compress and reverse it as requested.
pub fn process(path: &Path, mut read: impl Read, opt: &Opt) -> Result<Option<Report>, Error> {
    log::info!("Process {}", path.display());
    let mut s = String::new();
    read.read_to_string(&mut s)?;
    process_str(&s, opt)
}

/// Process an arrow given as JSON string.
///
/// Returns `None` if checking is omitted.
pub fn process_str(s: &str, opt: &Opt) -> Result<Option<Report>, Error> {
    if opt.omits(Stage::Parse) {
        return Ok(None);
    }
    let rule: Rule = serde_json::from_str(s)?;

    if opt.omits(Stage::Check) {
        return Ok(None);
    }
    let arrow = Arrow::new(rule)?;
    if opt.echo {
        println!("{}", arrow);
    }
    println!("{} → {}", arrow.source(), arrow.target());

    let mut report = Report {
        steps: arrow.steps().len(),
        ..Default::default()
    };

    if !opt.omits(Stage::Compress) {
        let compressed = arrow.compress().steps().len();
        log::info!("Compress {} steps to {}", report.steps, compressed);
        report.compressed = Some(compressed);
    }

    if opt.reverse {
        match arrow.reverse() {
            Ok(rev) => {
                println!("{} → {}", rev.source(), rev.target());
                report.reversed = Some(rev);
            }
            Err(e) => log::warn!("{}", e),
        }
    }
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use linarrow::{Conj, Formula, Var};

    fn opt(args: &[&str]) -> Opt {
        let args = ["lincheck"].iter().chain(args).chain(&["-"]);
        Opt::parse_from(args)
    }

    fn json(arrow: &Arrow) -> String {
        serde_json::to_string(arrow).unwrap()
    }

    #[test]
    fn check_and_reverse() {
        let (a, b) = (Var::fresh(), Var::fresh());
        let (p, q) = (Formula::holds(a, b), Formula::holds(b, a));
        let c = Arrow::commute(Conj::And, p.clone(), q.clone());
        let arrow = c.clone().compose(c.reverse().unwrap()).unwrap();

        let report = process_str(&json(&arrow), &opt(&["--reverse"])).unwrap().unwrap();
        assert_eq!(report.steps, 2);
        assert_eq!(report.compressed, Some(1));
        let rev = report.reversed.unwrap();
        assert_eq!(rev.source(), arrow.target());
        assert_eq!(rev.target(), arrow.source());
    }

    #[test]
    fn omitted_stages() {
        let a = Var::fresh();
        let arrow = Arrow::identity(Formula::holds(a, a));
        let s = json(&arrow);
        assert!(process_str(&s, &opt(&["--omit", "check"])).unwrap().is_none());
        let report = process_str(&s, &opt(&["--omit", "compress"])).unwrap().unwrap();
        assert_eq!(report.compressed, None);
        assert!(process_str("{", &opt(&[])).is_err());
    }

    #[test]
    fn irreversible() {
        let (a, b) = (Var::fresh(), Var::fresh());
        let forget = Arrow::forget(Formula::holds(a, b), Formula::holds(b, a));
        let report = process_str(&json(&forget), &opt(&["--reverse"])).unwrap().unwrap();
        assert!(report.reversed.is_none());
    }
}
