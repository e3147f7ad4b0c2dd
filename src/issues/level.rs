use strum::{Display, EnumIter};

/// Severity of an issue, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Level {
    Ok,
    Info,
    Warn,
    Error,
}
