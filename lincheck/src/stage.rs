/// A stage in the processing of arrows.
///
/// This is useful to omit certain parts of arrow processing.
/// Omitting one stage also omits all stages after it,
/// i.e. all stages greater than the stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Reading JSON
    Parse,
    /// Validation of rules
    Check,
    /// Simplification of checked arrows
    Compress,
}

impl core::str::FromStr for Stage {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parse" => Ok(Self::Parse),
            "check" => Ok(Self::Check),
            "compress" => Ok(Self::Compress),
            _ => Err("unknown stage: ".to_owned() + s),
        }
    }
}
